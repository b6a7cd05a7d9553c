use std::sync::Arc;

use crate::editor::Editor;
use crate::midi::{transpose_events, MidiEvent};
use crate::params::{track_param_id, ParamId, ParamStore, Snapshot, TrackIndex, NUM_TRACKS};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChannelSet {
    Disabled,
    Mono,
    Stereo,
    Discrete(u16),
}

/// How the host loads the processor; decides which bus layouts it accepts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ProcessorKind {
    #[default]
    MidiEffect,
    Instrument,
    AudioEffect,
}

/// Owns the parameter store for the lifetime of the plugin instance. Editors
/// come and go; the values stay here.
pub struct Processor {
    kind: ProcessorKind,
    store: Arc<ParamStore>,
    pitch_ids: [Option<ParamId>; NUM_TRACKS],
}

impl Processor {
    pub fn new(kind: ProcessorKind) -> Self {
        Self::with_store(kind, ParamStore::with_default_layout())
    }

    pub fn with_store(kind: ProcessorKind, store: ParamStore) -> Self {
        // Resolved once so the real-time path never does a name lookup.
        let pitch_ids = TrackIndex::ALL.map(|track| store.param_id(&track_param_id(track, "pitch")));
        Self {
            kind,
            store: Arc::new(store),
            pitch_ids,
        }
    }

    pub fn kind(&self) -> ProcessorKind {
        self.kind
    }

    pub fn store(&self) -> &Arc<ParamStore> {
        &self.store
    }

    pub fn create_editor(&self, start_track: TrackIndex) -> Editor {
        Editor::new(Arc::clone(&self.store), start_track)
    }

    /// Transpose the block's note events by each track's pitch offset.
    pub fn process_midi(&self, events: &mut [MidiEvent]) {
        if self.kind != ProcessorKind::MidiEffect {
            return;
        }
        transpose_events(events, |track| {
            self.pitch_ids[track]
                .map(|id| self.store.value(id))
                .unwrap_or(0)
        });
    }

    pub fn is_bus_layout_supported(&self, output: ChannelSet, input: ChannelSet) -> bool {
        match self.kind {
            ProcessorKind::MidiEffect => true,
            ProcessorKind::Instrument => matches!(output, ChannelSet::Mono | ChannelSet::Stereo),
            ProcessorKind::AudioEffect => {
                matches!(output, ChannelSet::Mono | ChannelSet::Stereo) && output == input
            }
        }
    }

    pub fn save_state(&self) -> Vec<u8> {
        Snapshot::capture(&self.store).to_bytes()
    }

    /// Unknown names in the blob are ignored; listeners hear about every
    /// value that changed.
    pub fn restore_state(&self, bytes: &[u8]) -> Result<usize, String> {
        let snapshot = Snapshot::from_bytes(bytes)?;
        Ok(snapshot.restore(&self.store))
    }
}

impl Default for Processor {
    fn default() -> Self {
        Self::new(ProcessorKind::default())
    }
}
