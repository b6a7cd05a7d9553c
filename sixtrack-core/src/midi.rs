//! Per-track note transposition for the MIDI pass-through.
//!
//! Channels 1-6 map to tracks 1-6. Note-on and note-off numbers are shifted
//! by the track's pitch offset; everything else passes through unchanged.

use crate::params::NUM_TRACKS;

const NOTE_OFF: u8 = 0x80;
const NOTE_ON: u8 = 0x90;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MidiEvent {
    /// Position within the current block.
    pub sample_offset: u32,
    pub status: u8,
    pub data1: u8,
    pub data2: u8,
}

impl MidiEvent {
    pub fn note_on(channel: u8, note: u8, velocity: u8, sample_offset: u32) -> Self {
        Self {
            sample_offset,
            status: NOTE_ON | (channel.saturating_sub(1) & 0x0F),
            data1: note & 0x7F,
            data2: velocity & 0x7F,
        }
    }

    pub fn note_off(channel: u8, note: u8, sample_offset: u32) -> Self {
        Self {
            sample_offset,
            status: NOTE_OFF | (channel.saturating_sub(1) & 0x0F),
            data1: note & 0x7F,
            data2: 0,
        }
    }

    pub fn is_note(&self) -> bool {
        matches!(self.status & 0xF0, NOTE_OFF | NOTE_ON)
    }

    /// 1-based MIDI channel.
    pub fn channel(&self) -> u8 {
        (self.status & 0x0F) + 1
    }
}

/// Shift a note number by a semitone offset; results leave [0,127] by clamping.
pub fn transpose_note(note: u8, semitones: i32) -> u8 {
    (note as i32 + semitones).clamp(0, 127) as u8
}

/// Rewrite note numbers in place. `pitch` returns the semitone offset for a
/// 0-based track index.
pub fn transpose_events(events: &mut [MidiEvent], pitch: impl Fn(usize) -> i32) {
    for event in events.iter_mut().filter(|e| e.is_note()) {
        let track = event.channel() as usize - 1;
        if track < NUM_TRACKS {
            event.data1 = transpose_note(event.data1, pitch(track));
        }
    }
}
