use crate::action::{DispatchResult, ViewAction};
use crate::editor::Editor;
use crate::params::layout::{
    DELAY_OVERLAY_ENABLED, DELAY_TIME_SYNC_ENABLED, PANNING_OVERLAY_ENABLED,
    REVERB_OVERLAY_ENABLED,
};
use crate::params::{track_param_id, TrackIndex, NUM_TRACKS};
use crate::view::SlotId;

fn track_for(index: usize) -> TrackIndex {
    if index >= NUM_TRACKS {
        log::warn!("track index {} out of range, clamping", index);
    }
    TrackIndex::new_clamped(index)
}

fn rendered(changed: bool) -> DispatchResult {
    if changed {
        DispatchResult::render()
    } else {
        DispatchResult::none()
    }
}

pub(super) fn dispatch_view(action: &ViewAction, editor: &mut Editor) -> DispatchResult {
    match action {
        ViewAction::SelectTrack(index) => {
            let track = track_for(*index);
            rendered(editor.update_view(|v| v.select_track(track)))
        }
        ViewAction::TrackButton(index) => {
            let track = track_for(*index);
            if editor.view().is_mixer() {
                toggle_mute(editor, track)
            } else {
                rendered(editor.update_view(|v| v.select_track(track)))
            }
        }
        ViewAction::ToggleMixer => rendered(editor.update_view(|v| v.toggle_mixer())),
        ViewAction::EnterMixer => rendered(editor.update_view(|v| v.enter_mixer())),
        ViewAction::ExitMixer => rendered(editor.update_view(|v| v.exit_mixer())),
        ViewAction::SetPanSwap(on) => {
            editor.store().set_value_by_name(PANNING_OVERLAY_ENABLED, *on as i32);
            rendered(editor.update_view(|v| v.set_pan_swap(*on)))
        }
        ViewAction::SetDelaySwap(on) => {
            let changed = editor.update_view(|v| v.set_delay_swap(*on));
            // Clear the other flag first so the store never holds both.
            if *on {
                editor.store().set_value_by_name(REVERB_OVERLAY_ENABLED, 0);
            }
            editor.store().set_value_by_name(DELAY_OVERLAY_ENABLED, *on as i32);
            rendered(changed)
        }
        ViewAction::SetReverbSwap(on) => {
            let changed = editor.update_view(|v| v.set_reverb_swap(*on));
            if *on {
                editor.store().set_value_by_name(DELAY_OVERLAY_ENABLED, 0);
            }
            editor.store().set_value_by_name(REVERB_OVERLAY_ENABLED, *on as i32);
            rendered(changed)
        }
        ViewAction::SetSyncSwap(on) => {
            editor.store().set_value_by_name(DELAY_TIME_SYNC_ENABLED, *on as i32);
            rendered(editor.update_view(|v| v.set_sync_swap(*on)))
        }
        ViewAction::SetLfoDetail(on) => rendered(editor.update_view(|v| v.set_lfo_detail(*on))),
    }
}

/// Mixer-mode track buttons are independent mute toggles.
fn toggle_mute(editor: &mut Editor, track: TrackIndex) -> DispatchResult {
    let name = track_param_id(track, "unmuted");
    let unmuted = editor.store().flag_of(&name);
    editor
        .registry_mut()
        .edit(SlotId::TrackButton(track), (!unmuted) as i32);
    log::debug!("track {} {}", track.number(), if unmuted { "muted" } else { "unmuted" });
    DispatchResult::render()
}
