use std::path::PathBuf;

use crate::labels::LabelSlot;
use crate::view::SlotId;

/// View navigation and overlay toggles
#[derive(Debug, Clone, PartialEq)]
pub enum ViewAction {
    SelectTrack(usize),
    /// Footer button: select in track mode, mute toggle in the mixer.
    TrackButton(usize),
    ToggleMixer,
    EnterMixer,
    ExitMixer,
    SetPanSwap(bool),
    SetDelaySwap(bool),
    SetReverbSwap(bool),
    SetSyncSwap(bool),
    SetLfoDetail(bool),
}

/// Value edits coming from a slot
#[derive(Debug, Clone, PartialEq)]
pub enum SlotAction {
    Set(SlotId, i32),
    Adjust(SlotId, i32),
    Toggle(SlotId),
    /// Pick a label from a machine-dependent selector by index.
    SelectLabel(LabelSlot, usize),
    /// Step the selector by whole labels.
    AdjustLabel(LabelSlot, i32),
}

#[derive(Debug, Clone, PartialEq)]
pub enum SessionAction {
    Save(PathBuf),
    Load(PathBuf),
    ResetDefaults,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    None,
    Quit,
    View(ViewAction),
    Slot(SlotAction),
    Session(SessionAction),
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DispatchResult {
    pub quit: bool,
    pub needs_render: bool,
    pub status: Vec<String>,
}

impl DispatchResult {
    pub fn none() -> Self {
        Self::default()
    }

    pub fn with_quit() -> Self {
        Self { quit: true, ..Self::default() }
    }

    pub fn render() -> Self {
        Self { needs_render: true, ..Self::default() }
    }

    pub fn with_status(message: impl Into<String>) -> Self {
        Self {
            needs_render: true,
            status: vec![message.into()],
            ..Self::default()
        }
    }

    pub fn push_status(&mut self, message: impl Into<String>) {
        self.status.push(message.into());
        self.needs_render = true;
    }

    pub fn merge(&mut self, other: DispatchResult) {
        self.quit = self.quit || other.quit;
        self.needs_render = self.needs_render || other.needs_render;
        self.status.extend(other.status);
    }
}
