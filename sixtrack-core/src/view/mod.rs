//! View-mode state: which page is showing, which track the per-track slots
//! follow, and the overlay toggles. Every slot binding and visibility is
//! derived from one `ViewState` by [`slots::plan`].

pub mod slots;

pub use slots::{plan, HeaderSlot, MixerSlot, PageSlot, SlotAssignment, SlotId};

use crate::params::{Machine, TrackIndex};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ViewMode {
    #[default]
    Track,
    Mixer,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ViewState {
    pub mode: ViewMode,
    pub active_track: TrackIndex,
    pub pan_swap: bool,
    pub delay_swap: bool,
    pub reverb_swap: bool,
    pub lfo_detail: bool,
    /// Mirrors the persisted `delayTimeSyncEnabled` flag.
    pub sync_swap: bool,
    /// Machine type of the active track, cached for label visibility.
    pub active_machine: Machine,
}

impl ViewState {
    pub fn new(active_track: TrackIndex) -> Self {
        Self {
            active_track,
            ..Self::default()
        }
    }

    pub fn is_mixer(&self) -> bool {
        self.mode == ViewMode::Mixer
    }

    pub fn is_track(&self) -> bool {
        self.mode == ViewMode::Track
    }

    /// Selecting a track always lands in track mode.
    pub fn select_track(&mut self, track: TrackIndex) {
        self.mode = ViewMode::Track;
        self.active_track = track;
    }

    pub fn enter_mixer(&mut self) {
        self.mode = ViewMode::Mixer;
    }

    pub fn exit_mixer(&mut self) {
        self.mode = ViewMode::Track;
    }

    pub fn toggle_mixer(&mut self) {
        if self.is_mixer() {
            self.exit_mixer();
        } else {
            self.enter_mixer();
        }
    }

    pub fn set_pan_swap(&mut self, on: bool) {
        self.pan_swap = on;
    }

    /// Explicit user toggle: the latest request wins.
    pub fn set_delay_swap(&mut self, on: bool) {
        self.delay_swap = on;
        if on {
            self.reverb_swap = false;
        }
    }

    /// Explicit user toggle: the latest request wins.
    pub fn set_reverb_swap(&mut self, on: bool) {
        self.reverb_swap = on;
        if on {
            self.delay_swap = false;
        }
    }

    pub fn set_sync_swap(&mut self, on: bool) {
        self.sync_swap = on;
    }

    pub fn set_lfo_detail(&mut self, on: bool) {
        self.lfo_detail = on;
    }

    /// Apply both overlay flags as observed in the store at the same time.
    /// If both are set, delay wins. Returns true when reverb was forced off.
    pub fn reconcile_overlays(&mut self, delay: bool, reverb: bool) -> bool {
        self.delay_swap = delay;
        self.reverb_swap = reverb && !delay;
        delay && reverb
    }

    /// Track button drawn as selected; none while the mixer page is up.
    pub fn highlighted_track(&self) -> Option<TrackIndex> {
        match self.mode {
            ViewMode::Track => Some(self.active_track),
            ViewMode::Mixer => None,
        }
    }

    pub fn pan_swap_active(&self) -> bool {
        self.is_track() && self.pan_swap
    }

    pub fn delay_swap_active(&self) -> bool {
        self.is_track() && self.delay_swap
    }

    pub fn reverb_swap_active(&self) -> bool {
        self.is_track() && self.reverb_swap
    }

    pub fn lfo_detail_active(&self) -> bool {
        self.is_track() && self.lfo_detail
    }
}
