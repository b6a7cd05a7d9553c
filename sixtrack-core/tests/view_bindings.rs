use std::sync::Arc;

use sixtrack_core::labels::{numeric_to_label_index, LabelSlot};
use sixtrack_core::params::layout::{
    DELAY_OVERLAY_ENABLED, DELAY_TIME_FREE, DELAY_TIME_SYNC_INDEX, REVERB_OVERLAY_ENABLED,
    REVERB_TONE_OVERLAY,
};
use sixtrack_core::params::{ParamStore, TrackIndex};
use sixtrack_core::view::{HeaderSlot, MixerSlot, PageSlot, SlotId};
use sixtrack_core::{dispatch_action, Action, Editor, SessionAction, SlotAction, ViewAction};

/// Listeners the editor keeps outside the slot arena: four global flags
/// plus machine, mute, color and shape for each track.
const WATCH_LISTENERS: usize = 4 + 6 * 4;

fn open() -> Editor {
    Editor::new(Arc::new(ParamStore::with_default_layout()), TrackIndex::default())
}

fn view(editor: &mut Editor, action: ViewAction) {
    dispatch_action(&Action::View(action), editor);
    editor.pump_notifications();
}

fn slot(editor: &mut Editor, action: SlotAction) {
    dispatch_action(&Action::Slot(action), editor);
    editor.pump_notifications();
}

fn bound_name(editor: &Editor, slot: SlotId) -> Option<String> {
    editor
        .registry()
        .bound_param(slot)
        .and_then(|id| editor.store().spec(id))
        .map(|spec| spec.name.clone())
}

fn total_listeners(editor: &Editor) -> usize {
    editor
        .store()
        .specs()
        .map(|(id, _)| editor.store().listener_count(id))
        .sum()
}

#[test]
fn selecting_tracks_leaves_only_last_track_bound() {
    let mut editor = open();
    view(&mut editor, ViewAction::SelectTrack(1));
    view(&mut editor, ViewAction::SelectTrack(4));

    for page in PageSlot::ALL {
        let name = bound_name(&editor, SlotId::Page(page)).unwrap();
        assert!(name.starts_with("t5_"), "{:?} bound to {}", page, name);
    }
    let t2_decay = editor.store().param_id("t2_decay").unwrap();
    assert_eq!(editor.store().listener_count(t2_decay), 0);
}

#[test]
fn out_of_range_track_is_clamped() {
    let mut editor = open();
    view(&mut editor, ViewAction::SelectTrack(17));
    assert_eq!(editor.view().active_track, TrackIndex::new_clamped(5));
    assert_eq!(bound_name(&editor, SlotId::Page(PageSlot::Pitch)).as_deref(), Some("t6_pitch"));
}

#[test]
fn one_live_connection_per_slot_through_any_sequence() {
    let mut editor = open();
    let actions = [
        ViewAction::SelectTrack(2),
        ViewAction::SetDelaySwap(true),
        ViewAction::EnterMixer,
        ViewAction::SetSyncSwap(true),
        ViewAction::ExitMixer,
        ViewAction::SetReverbSwap(true),
        ViewAction::SetPanSwap(true),
        ViewAction::SetLfoDetail(true),
        ViewAction::TrackButton(5),
        ViewAction::ToggleMixer,
        ViewAction::SetSyncSwap(false),
        ViewAction::ToggleMixer,
        ViewAction::SetReverbSwap(false),
    ];
    for action in actions {
        view(&mut editor, action.clone());
        let bound = SlotId::all()
            .into_iter()
            .filter(|s| editor.registry().is_bound(*s))
            .count();
        assert_eq!(editor.registry().live_connections(), bound);
        assert_eq!(total_listeners(&editor), bound + WATCH_LISTENERS, "after {:?}", action);
    }
}

#[test]
fn delay_and_reverb_never_both_active() {
    let mut editor = open();
    let toggles = [
        ViewAction::SetDelaySwap(true),
        ViewAction::SetReverbSwap(true),
        ViewAction::SetDelaySwap(true),
        ViewAction::SetDelaySwap(false),
        ViewAction::SetReverbSwap(true),
        ViewAction::SetReverbSwap(false),
    ];
    for action in toggles {
        view(&mut editor, action);
        assert!(!(editor.view().delay_swap && editor.view().reverb_swap));
        assert!(!(editor.store().flag_of(DELAY_OVERLAY_ENABLED)
            && editor.store().flag_of(REVERB_OVERLAY_ENABLED)));
    }
}

#[test]
fn user_toggles_are_last_write_wins() {
    let mut editor = open();
    view(&mut editor, ViewAction::SetDelaySwap(true));
    view(&mut editor, ViewAction::SetReverbSwap(true));
    assert!(!editor.view().delay_swap);
    assert!(editor.view().reverb_swap);
    assert_eq!(
        bound_name(&editor, SlotId::Page(PageSlot::ReverbSend)).as_deref(),
        Some(REVERB_TONE_OVERLAY)
    );
}

#[test]
fn header_toggle_slots_follow_overlay_rules() {
    let mut editor = open();
    slot(&mut editor, SlotAction::Toggle(SlotId::Header(HeaderSlot::DelaySwap)));
    slot(&mut editor, SlotAction::Toggle(SlotId::Header(HeaderSlot::ReverbSwap)));
    assert!(!editor.view().delay_swap);
    assert!(editor.view().reverb_swap);
    assert_eq!(editor.registry().holder(SlotId::Header(HeaderSlot::DelaySwap)).value, 0);
    assert_eq!(editor.registry().holder(SlotId::Header(HeaderSlot::ReverbSwap)).value, 1);
}

#[test]
fn simultaneous_automation_write_keeps_delay() {
    let mut editor = open();
    editor.store().set_value_by_name(DELAY_OVERLAY_ENABLED, 1);
    editor.store().set_value_by_name(REVERB_OVERLAY_ENABLED, 1);
    let result = editor.pump_notifications();
    assert!(result.needs_render);
    assert!(editor.view().delay_swap);
    assert!(!editor.view().reverb_swap);
    assert!(!editor.store().flag_of(REVERB_OVERLAY_ENABLED));

    // The corrective write comes back as a notification and settles.
    editor.pump_notifications();
    assert!(editor.view().delay_swap);
    assert!(!editor.pump_notifications().needs_render);
}

#[test]
fn mixer_binds_every_track_button_to_its_mute() {
    let mut editor = open();
    view(&mut editor, ViewAction::SelectTrack(2));
    view(&mut editor, ViewAction::EnterMixer);

    for track in TrackIndex::ALL {
        let expected = format!("t{}_unmuted", track.number());
        assert_eq!(bound_name(&editor, SlotId::TrackButton(track)), Some(expected));
        assert!(!editor.slot_view(SlotId::TrackButton(track)).highlighted);
        assert!(editor.slot_view(SlotId::Mixer(MixerSlot::Pan, track)).visible);
    }

    view(&mut editor, ViewAction::ExitMixer);
    for track in TrackIndex::ALL {
        assert!(!editor.registry().is_bound(SlotId::TrackButton(track)));
    }
    assert!(editor.slot_view(SlotId::TrackButton(TrackIndex::new_clamped(2))).highlighted);
}

#[test]
fn mixer_track_buttons_toggle_independently() {
    let mut editor = open();
    view(&mut editor, ViewAction::EnterMixer);
    view(&mut editor, ViewAction::TrackButton(0));
    view(&mut editor, ViewAction::TrackButton(3));
    assert!(editor.is_track_muted(TrackIndex::new_clamped(0)));
    assert!(editor.is_track_muted(TrackIndex::new_clamped(3)));
    assert!(!editor.is_track_muted(TrackIndex::new_clamped(1)));
    assert!(editor.view().is_mixer());

    view(&mut editor, ViewAction::TrackButton(0));
    assert!(!editor.is_track_muted(TrackIndex::new_clamped(0)));
}

#[test]
fn tone_machine_shows_color_selector() {
    let mut editor = open();
    editor.store().set_value_by_name("t1_machine", 4);
    editor.store().set_value_by_name("t1_color", 64);
    editor.pump_notifications();

    let color = editor.labels().color;
    assert!(color.visible);
    assert!(!editor.labels().shape.visible);
    let expected = numeric_to_label_index(64, 137);
    assert_eq!(color.index, expected);

    let view = editor.slot_view(SlotId::Page(PageSlot::Color));
    assert_eq!(view.mirror.map(|(label, _)| label), Some(LabelSlot::Color));
    assert_eq!(view.text, LabelSlot::Color.label(expected));
}

#[test]
fn selector_hidden_in_mixer_and_for_other_machines() {
    let mut editor = open();
    editor.store().set_value_by_name("t1_machine", 5);
    editor.pump_notifications();
    assert!(editor.labels().shape.visible);

    view(&mut editor, ViewAction::EnterMixer);
    assert!(!editor.labels().shape.visible);
    view(&mut editor, ViewAction::ExitMixer);
    view(&mut editor, ViewAction::SelectTrack(1));
    assert!(!editor.labels().shape.visible);
}

#[test]
fn picking_a_label_writes_one_numeric_value() {
    let mut editor = open();
    editor.store().set_value_by_name("t1_machine", 5);
    editor.pump_notifications();

    slot(&mut editor, SlotAction::SelectLabel(LabelSlot::Shape, 37));
    assert_eq!(editor.store().value_of("t1_shape"), Some(127));
    assert_eq!(editor.labels().shape.index, 37);

    slot(&mut editor, SlotAction::AdjustLabel(LabelSlot::Shape, -1));
    assert_eq!(editor.labels().shape.index, 36);
    let numeric = editor.store().value_of("t1_shape").unwrap();
    assert_eq!(numeric_to_label_index(numeric, 38), 36);
}

/// Step the selector until it stops moving; returns every index shown.
fn step_through(editor: &mut Editor, label: LabelSlot, delta: i32) -> Vec<usize> {
    let mut shown = vec![editor.labels().get(label).index];
    for _ in 0..label.len() {
        slot(editor, SlotAction::AdjustLabel(label, delta));
        let index = editor.labels().get(label).index;
        if shown.last() == Some(&index) {
            break;
        }
        shown.push(index);
    }
    shown
}

#[test]
fn color_selector_steps_across_whole_table() {
    let mut editor = open();
    editor.store().set_value_by_name("t1_machine", 4);
    editor.store().set_value_by_name("t1_color", 0);
    editor.pump_notifications();

    // 137 labels over 128 numeric values: every value shows its own label.
    let up = step_through(&mut editor, LabelSlot::Color, 1);
    assert_eq!(up.len(), 128);
    assert_eq!(up.last(), Some(&136));
    assert!(up.windows(2).all(|w| w[0] < w[1]));
    assert_eq!(editor.store().value_of("t1_color"), Some(127));

    let down = step_through(&mut editor, LabelSlot::Color, -1);
    assert_eq!(down.len(), 128);
    assert_eq!(down.last(), Some(&0));
    assert!(down.windows(2).all(|w| w[0] > w[1]));
    assert_eq!(editor.store().value_of("t1_color"), Some(0));
}

#[test]
fn shape_selector_steps_across_whole_table() {
    let mut editor = open();
    editor.store().set_value_by_name("t1_machine", 5);
    editor.pump_notifications();

    let up = step_through(&mut editor, LabelSlot::Shape, 1);
    assert_eq!(up, (0..38).collect::<Vec<_>>());
    let down = step_through(&mut editor, LabelSlot::Shape, -1);
    assert_eq!(down, (0..38).rev().collect::<Vec<_>>());
}

#[test]
fn toggle_only_flips_on_off_slots() {
    let mut editor = open();
    slot(&mut editor, SlotAction::Set(SlotId::Page(PageSlot::Decay), 77));
    slot(&mut editor, SlotAction::Toggle(SlotId::Page(PageSlot::Decay)));
    assert_eq!(editor.store().value_of("t1_decay"), Some(77));

    slot(&mut editor, SlotAction::Toggle(SlotId::Machine(TrackIndex::default())));
    assert_eq!(editor.store().value_of("t1_machine"), Some(0));

    slot(&mut editor, SlotAction::Toggle(SlotId::Page(PageSlot::Punch)));
    assert_eq!(editor.store().value_of("t1_punch"), Some(1));
    slot(&mut editor, SlotAction::Toggle(SlotId::Header(HeaderSlot::PanSwap)));
    assert!(editor.view().pan_swap);
}

#[test]
fn observing_a_value_never_writes_back() {
    let mut editor = open();
    editor.store().set_value_by_name("t1_machine", 4);
    editor.store().set_value_by_name("t1_color", 65);
    editor.pump_notifications();
    editor.pump_notifications();
    // 65 is not a canonical label value, and it stays untouched.
    assert_eq!(editor.store().value_of("t1_color"), Some(65));
}

#[test]
fn reverb_overlay_hides_delay_time_with_sync_on() {
    let mut editor = open();
    view(&mut editor, ViewAction::SetSyncSwap(true));
    assert_eq!(
        bound_name(&editor, SlotId::Header(HeaderSlot::DelayTime)).as_deref(),
        Some(DELAY_TIME_SYNC_INDEX)
    );
    view(&mut editor, ViewAction::SetReverbSwap(true));

    let visible = editor.visible_slots();
    assert!(!visible.contains(&SlotId::Header(HeaderSlot::DelayTime)));
    assert!(!visible.contains(&SlotId::Header(HeaderSlot::DelaySync)));
    assert!(visible.contains(&SlotId::Page(PageSlot::ReverbSend)));
    assert_eq!(
        bound_name(&editor, SlotId::Page(PageSlot::ReverbSend)).as_deref(),
        Some(REVERB_TONE_OVERLAY)
    );

    view(&mut editor, ViewAction::SetSyncSwap(false));
    assert!(!editor.visible_slots().contains(&SlotId::Header(HeaderSlot::DelayTime)));
    assert_eq!(
        bound_name(&editor, SlotId::Header(HeaderSlot::DelayTime)).as_deref(),
        Some(DELAY_TIME_FREE)
    );
}

#[test]
fn automated_sync_flag_rebinds_delay_time() {
    let mut editor = open();
    editor.store().set_value_by_name("delayTimeSyncEnabled", 1);
    editor.pump_notifications();
    assert!(editor.view().sync_swap);
    assert_eq!(
        bound_name(&editor, SlotId::MixDelayTime).as_deref(),
        Some(DELAY_TIME_SYNC_INDEX)
    );
}

#[test]
fn hidden_slots_ignore_edits() {
    let mut editor = open();
    view(&mut editor, ViewAction::EnterMixer);
    slot(&mut editor, SlotAction::Set(SlotId::Page(PageSlot::Decay), 50));
    assert_eq!(editor.store().value_of("t1_decay"), Some(0));

    slot(&mut editor, SlotAction::Adjust(SlotId::Mixer(MixerSlot::Volume, TrackIndex::new_clamped(1)), -20));
    assert_eq!(editor.store().value_of("t2_mixVolume"), Some(80));
}

#[test]
fn session_round_trip_updates_open_editor() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("state.json");

    let mut editor = open();
    slot(&mut editor, SlotAction::Set(SlotId::Page(PageSlot::Decay), 99));
    let saved = dispatch_action(&Action::Session(SessionAction::Save(path.clone())), &mut editor);
    assert_eq!(saved.status.len(), 1);

    dispatch_action(&Action::Session(SessionAction::ResetDefaults), &mut editor);
    editor.pump_notifications();
    assert_eq!(editor.registry().holder(SlotId::Page(PageSlot::Decay)).value, 0);

    dispatch_action(&Action::Session(SessionAction::Load(path)), &mut editor);
    editor.pump_notifications();
    assert_eq!(editor.registry().holder(SlotId::Page(PageSlot::Decay)).value, 99);
}

#[test]
fn quit_is_reported() {
    let mut editor = open();
    assert!(dispatch_action(&Action::Quit, &mut editor).quit);
    assert!(!dispatch_action(&Action::None, &mut editor).quit);
}
