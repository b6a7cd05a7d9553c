//! Editor facade: owns the slot arena, the view state and the label mirrors
//! for one open editor, and reconciles them with the shared store.
//!
//! Store notifications only land in a channel. They are applied when the UI
//! thread calls [`Editor::pump_notifications`], so every handler runs on the
//! thread that owns the editor and reads the latest value at that point.

use std::collections::{BTreeSet, HashMap};
use std::sync::mpsc::{self, Receiver};
use std::sync::Arc;

use crate::action::DispatchResult;
use crate::binding::BindingRegistry;
use crate::dispatch::feedback::dispatch_param_changes;
use crate::labels::{LabelMirror, LabelMirrors, LabelSlot};
use crate::params::layout::{
    DELAY_OVERLAY_ENABLED, DELAY_TIME_SYNC_ENABLED, PANNING_OVERLAY_ENABLED,
    REVERB_OVERLAY_ENABLED,
};
use crate::params::{track_param_id, ListenerId, Machine, ParamChange, ParamId, ParamStore, TrackIndex};
use crate::view::{plan, PageSlot, SlotId, ViewState};

/// Store parameters the editor reacts to beyond plain value display.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Watched {
    DelayOverlay,
    ReverbOverlay,
    PanOverlay,
    Sync,
    Machine(TrackIndex),
    Mute(TrackIndex),
    Label(LabelSlot, TrackIndex),
}

/// Everything the front-end needs to draw one slot.
#[derive(Debug, Clone, PartialEq)]
pub struct SlotView {
    pub slot: SlotId,
    pub visible: bool,
    pub caption: String,
    pub param: Option<ParamId>,
    pub value: i32,
    pub text: String,
    /// Drawn as selected (track buttons in track mode).
    pub highlighted: bool,
    /// Active label selector replacing the plain value text.
    pub mirror: Option<(LabelSlot, LabelMirror)>,
}

pub struct Editor {
    store: Arc<ParamStore>,
    registry: BindingRegistry,
    view: ViewState,
    labels: LabelMirrors,
    rx: Receiver<ParamChange>,
    watches: HashMap<ParamId, Watched>,
    watch_listeners: Vec<ListenerId>,
    rebinds: u64,
}

pub(crate) fn label_page_slot(slot: LabelSlot) -> PageSlot {
    match slot {
        LabelSlot::Color => PageSlot::Color,
        LabelSlot::Shape => PageSlot::Shape,
    }
}

impl Editor {
    pub fn new(store: Arc<ParamStore>, start_track: TrackIndex) -> Self {
        let (tx, rx) = mpsc::channel();
        let registry = BindingRegistry::new(Arc::clone(&store), tx.clone());

        let mut wanted = vec![
            (DELAY_OVERLAY_ENABLED.to_string(), Watched::DelayOverlay),
            (REVERB_OVERLAY_ENABLED.to_string(), Watched::ReverbOverlay),
            (PANNING_OVERLAY_ENABLED.to_string(), Watched::PanOverlay),
            (DELAY_TIME_SYNC_ENABLED.to_string(), Watched::Sync),
        ];
        for track in TrackIndex::ALL {
            wanted.push((track_param_id(track, "machine"), Watched::Machine(track)));
            wanted.push((track_param_id(track, "unmuted"), Watched::Mute(track)));
            for slot in LabelSlot::ALL {
                wanted.push((track_param_id(track, slot.suffix()), Watched::Label(slot, track)));
            }
        }

        let mut watches = HashMap::new();
        let mut watch_listeners = Vec::new();
        for (name, watched) in wanted {
            match store.param_id(&name) {
                Some(id) => {
                    watch_listeners.push(store.add_listener(id, tx.clone()));
                    watches.insert(id, watched);
                }
                None => log::warn!("editor: parameter '{}' missing from layout", name),
            }
        }

        let mut editor = Self {
            store,
            registry,
            view: ViewState::new(start_track),
            labels: LabelMirrors::default(),
            rx,
            watches,
            watch_listeners,
            rebinds: 0,
        };
        editor.sync_view_from_store(true);
        editor.apply_view();
        editor
    }

    pub fn view(&self) -> &ViewState {
        &self.view
    }

    pub fn labels(&self) -> &LabelMirrors {
        &self.labels
    }

    pub fn registry(&self) -> &BindingRegistry {
        &self.registry
    }

    pub(crate) fn registry_mut(&mut self) -> &mut BindingRegistry {
        &mut self.registry
    }

    pub fn store(&self) -> &Arc<ParamStore> {
        &self.store
    }

    /// Total slot rebinds performed since the editor opened.
    pub fn rebinds(&self) -> u64 {
        self.rebinds
    }

    pub(crate) fn watched(&self, param: ParamId) -> Option<Watched> {
        self.watches.get(&param).copied()
    }

    fn machine_of(&self, track: TrackIndex) -> Machine {
        Machine::from_index(self.store.value_of(&track_param_id(track, "machine")).unwrap_or(0))
    }

    /// Pull the persisted flags into the view. When `overlays` is set the
    /// delay/reverb pair is reconciled too, and a simultaneous write of both
    /// is resolved in favour of delay. Returns true if the store needed
    /// correcting.
    pub(crate) fn sync_view_from_store(&mut self, overlays: bool) -> bool {
        let mut forced = false;
        self.view.pan_swap = self.store.flag_of(PANNING_OVERLAY_ENABLED);
        self.view.sync_swap = self.store.flag_of(DELAY_TIME_SYNC_ENABLED);
        if overlays {
            let delay = self.store.flag_of(DELAY_OVERLAY_ENABLED);
            let reverb = self.store.flag_of(REVERB_OVERLAY_ENABLED);
            forced = self.view.reconcile_overlays(delay, reverb);
        }
        self.view.active_machine = self.machine_of(self.view.active_track);
        if forced {
            log::debug!("delay and reverb overlays both set, clearing reverb");
            self.store.set_value_by_name(REVERB_OVERLAY_ENABLED, 0);
        }
        forced
    }

    /// Mutate the view and reconcile bindings if anything changed.
    pub(crate) fn update_view(&mut self, f: impl FnOnce(&mut ViewState)) -> bool {
        let before = self.view;
        f(&mut self.view);
        self.view.active_machine = self.machine_of(self.view.active_track);
        if before == self.view {
            return false;
        }
        log::debug!("view {:?} -> {:?}", before, self.view);
        self.apply_view();
        true
    }

    /// Rebind every slot whose target changed, then apply visibility. No
    /// slot is drawn in between; the caller issues a single render.
    pub(crate) fn apply_view(&mut self) -> usize {
        let assignments = plan(&self.view);
        let mut rebound = 0;
        for assignment in &assignments {
            if self.registry.target(assignment.slot) == assignment.param.as_deref() {
                continue;
            }
            match &assignment.param {
                Some(name) => {
                    self.registry.bind(assignment.slot, name);
                }
                None => self.registry.unbind(assignment.slot),
            }
            rebound += 1;
        }
        for assignment in &assignments {
            self.registry.set_visible(assignment.slot, assignment.visible);
        }
        self.rebinds += rebound as u64;
        self.refresh_labels();
        rebound
    }

    /// Recompute both label mirrors from their numeric parameters. Mirrors
    /// never write back. Returns true if either mirror changed.
    pub(crate) fn refresh_labels(&mut self) -> bool {
        let before = self.labels;
        for slot in LabelSlot::ALL {
            let numeric = self
                .store
                .value_of(&track_param_id(self.view.active_track, slot.suffix()))
                .unwrap_or(0);
            let mirror =
                LabelMirror::resolve(slot, self.view.is_track(), self.view.active_machine, numeric);
            self.labels.set(slot, mirror);
        }
        before != self.labels
    }

    /// Apply every queued store notification. Duplicates coalesce and
    /// handlers read the store at this point, not at send time.
    pub fn pump_notifications(&mut self) -> DispatchResult {
        let changed: BTreeSet<ParamId> = self.rx.try_iter().map(|c| c.param).collect();
        if changed.is_empty() {
            return DispatchResult::none();
        }
        dispatch_param_changes(&changed, self)
    }

    pub fn slot_view(&self, slot: SlotId) -> SlotView {
        let holder = self.registry.holder(slot);
        let param = self.registry.bound_param(slot);
        let spec = param.and_then(|id| self.store.spec(id));

        let mirror = match slot {
            SlotId::Page(PageSlot::Color) => Some(LabelSlot::Color),
            SlotId::Page(PageSlot::Shape) => Some(LabelSlot::Shape),
            _ => None,
        }
        .map(|label| (label, self.labels.get(label)))
        .filter(|(_, mirror)| mirror.visible);

        let text = match (&mirror, spec) {
            (Some((label, m)), _) => label.label(m.index),
            (None, Some(spec)) => spec.display_value(holder.value),
            (None, None) => String::new(),
        };
        let highlighted = match slot {
            SlotId::TrackButton(t) => self.view.highlighted_track() == Some(t),
            _ => false,
        };

        SlotView {
            slot,
            visible: holder.visible,
            caption: slot.caption(),
            param,
            value: holder.value,
            text,
            highlighted,
            mirror,
        }
    }

    pub fn visible_slots(&self) -> Vec<SlotId> {
        SlotId::all()
            .into_iter()
            .filter(|slot| self.registry.holder(*slot).visible)
            .collect()
    }

    /// Read straight from the store so the outline is right in both modes,
    /// whether or not the button is bound.
    pub fn is_track_muted(&self, track: TrackIndex) -> bool {
        !self.store.flag_of(&track_param_id(track, "unmuted"))
    }
}

impl Drop for Editor {
    fn drop(&mut self) {
        for listener in self.watch_listeners.drain(..) {
            self.store.remove_listener(listener);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::view::HeaderSlot;

    fn editor() -> Editor {
        Editor::new(Arc::new(ParamStore::with_default_layout()), TrackIndex::default())
    }

    #[test]
    fn opens_bound_to_start_track() {
        let editor = Editor::new(
            Arc::new(ParamStore::with_default_layout()),
            TrackIndex::new_clamped(3),
        );
        let decay = editor.store().param_id("t4_decay").unwrap();
        assert_eq!(editor.registry().bound_param(SlotId::Page(PageSlot::Decay)), Some(decay));
        assert!(editor.view().is_track());
    }

    #[test]
    fn open_resolves_conflicting_persisted_overlays() {
        let store = Arc::new(ParamStore::with_default_layout());
        store.set_value_by_name(DELAY_OVERLAY_ENABLED, 1);
        store.set_value_by_name(REVERB_OVERLAY_ENABLED, 1);
        let editor = Editor::new(Arc::clone(&store), TrackIndex::default());
        assert!(editor.view().delay_swap);
        assert!(!editor.view().reverb_swap);
        assert!(!store.flag_of(REVERB_OVERLAY_ENABLED));
    }

    #[test]
    fn unchanged_view_rebinds_nothing() {
        let mut editor = editor();
        let before = editor.rebinds();
        assert!(!editor.update_view(|v| v.select_track(TrackIndex::default())));
        assert_eq!(editor.rebinds(), before);
    }

    #[test]
    fn track_switch_rebinds_only_page_slots() {
        let mut editor = editor();
        let before = editor.rebinds();
        editor.update_view(|v| v.select_track(TrackIndex::new_clamped(1)));
        assert_eq!(editor.rebinds() - before, PageSlot::ALL.len() as u64);
    }

    #[test]
    fn pump_refreshes_holders_and_coalesces() {
        let mut editor = editor();
        let slot = SlotId::Header(HeaderSlot::ReverbSize);
        editor.store().set_value_by_name("reverbSizeGlobal", 10);
        editor.store().set_value_by_name("reverbSizeGlobal", 20);
        let result = editor.pump_notifications();
        assert!(result.needs_render);
        assert_eq!(editor.registry().holder(slot).value, 20);
        assert!(!editor.pump_notifications().needs_render);
    }

    #[test]
    fn mute_change_repaints_in_track_mode() {
        let mut editor = editor();
        assert!(editor.view().is_track());
        editor.store().set_value_by_name("t3_unmuted", 0);
        assert!(editor.pump_notifications().needs_render);
        assert!(editor.is_track_muted(TrackIndex::new_clamped(2)));
        assert!(!editor.is_track_muted(TrackIndex::default()));
    }

    #[test]
    fn close_removes_every_listener() {
        let store = Arc::new(ParamStore::with_default_layout());
        {
            let _editor = Editor::new(Arc::clone(&store), TrackIndex::default());
        }
        for (id, _) in store.specs() {
            assert_eq!(store.listener_count(id), 0, "{}", store.spec(id).unwrap().name);
        }
    }

    #[test]
    fn slot_view_shows_choice_text() {
        let editor = editor();
        let view = editor.slot_view(SlotId::Machine(TrackIndex::default()));
        assert_eq!(view.text, "KICK");
        assert_eq!(view.caption, "MACH 1");
        assert!(editor.slot_view(SlotId::TrackButton(TrackIndex::default())).highlighted);
    }
}
