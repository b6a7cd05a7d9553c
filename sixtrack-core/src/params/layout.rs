//! Declarative parameter layout: the global parameters plus one
//! `t{N}_...` namespace per track.

use super::ParamSpec;

pub const NUM_TRACKS: usize = 6;

pub const PATTERN_BANK: &str = "patternBankGlobal";
pub const PATTERN_INDEX: &str = "patternIndexGlobal";
pub const MAIN_VOLUME: &str = "mainVolumeGlobal";
pub const REVERB_SIZE: &str = "reverbSizeGlobal";
pub const DELAY_TIME_FREE: &str = "delayTimeFreeGlobal";
pub const DELAY_TIME_SYNC_ENABLED: &str = "delayTimeSyncEnabled";
pub const DELAY_TIME_SYNC_INDEX: &str = "delayTimeSyncIndexGlobal";
pub const DELAY_OVERLAY_ENABLED: &str = "delaySendOverlayEnabled";
pub const REVERB_OVERLAY_ENABLED: &str = "reverbSendOverlayEnabled";
pub const PANNING_OVERLAY_ENABLED: &str = "panningOverlayEnabled";
pub const DELAY_FEEDBACK_OVERLAY: &str = "delayFeedbackOverlay";
pub const REVERB_TONE_OVERLAY: &str = "reverbToneOverlay";
pub const PANNING_OVERLAY: &str = "panningOverlay";

const NOTE_NAMES: [&str; 12] = ["C", "C#", "D", "D#", "E", "F", "F#", "G", "G#", "A", "A#", "B"];

/// One of the six fixed tracks, 0-based.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct TrackIndex(u8);

impl TrackIndex {
    pub const ALL: [TrackIndex; NUM_TRACKS] = [
        TrackIndex(0),
        TrackIndex(1),
        TrackIndex(2),
        TrackIndex(3),
        TrackIndex(4),
        TrackIndex(5),
    ];

    /// Out-of-range indices are clamped into [0, 5]; the UI only offers six selectors.
    pub fn new_clamped(index: usize) -> Self {
        TrackIndex(index.min(NUM_TRACKS - 1) as u8)
    }

    pub fn get(self) -> usize {
        self.0 as usize
    }

    /// 1-based number used in parameter names and on screen.
    pub fn number(self) -> usize {
        self.0 as usize + 1
    }
}

/// Per-track parameter name, e.g. `t3_decay` for track index 2.
pub fn track_param_id(track: TrackIndex, suffix: &str) -> String {
    format!("t{}_{}", track.number(), suffix)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Machine {
    #[default]
    Kick,
    Snare,
    Metal,
    Perc,
    Tone,
    Chord,
}

impl Machine {
    pub fn name(&self) -> &'static str {
        match self {
            Machine::Kick => "KICK",
            Machine::Snare => "SNARE",
            Machine::Metal => "METAL",
            Machine::Perc => "PERC",
            Machine::Tone => "TONE",
            Machine::Chord => "CHORD",
        }
    }

    pub fn index(&self) -> i32 {
        match self {
            Machine::Kick => 0,
            Machine::Snare => 1,
            Machine::Metal => 2,
            Machine::Perc => 3,
            Machine::Tone => 4,
            Machine::Chord => 5,
        }
    }

    /// Unknown indices fall back to KICK.
    pub fn from_index(index: i32) -> Machine {
        match index {
            1 => Machine::Snare,
            2 => Machine::Metal,
            3 => Machine::Perc,
            4 => Machine::Tone,
            5 => Machine::Chord,
            _ => Machine::Kick,
        }
    }

    pub fn all() -> Vec<Machine> {
        vec![
            Machine::Kick,
            Machine::Snare,
            Machine::Metal,
            Machine::Perc,
            Machine::Tone,
            Machine::Chord,
        ]
    }
}

/// Note names `C 0` through `G 10`; sharps are written without the space.
pub fn pitch_note_choices() -> Vec<String> {
    let mut notes = Vec::with_capacity(128);
    for octave in 0..=10 {
        let last = if octave == 10 { 7 } else { 11 };
        for name in &NOTE_NAMES[..=last] {
            if name.contains('#') {
                notes.push(format!("{}{}", name, octave));
            } else {
                notes.push(format!("{} {}", name, octave));
            }
        }
    }
    notes
}

fn global_parameters() -> Vec<ParamSpec> {
    vec![
        ParamSpec::choice(PATTERN_BANK, "Pattern Bank", ["A", "B", "C", "D", "E", "F"], 0),
        ParamSpec::choice(
            PATTERN_INDEX,
            "Pattern",
            (1..=16).map(|i| format!("{:02}", i)),
            0,
        ),
        ParamSpec::int(MAIN_VOLUME, "Main Volume", 0, 127, 100),
        ParamSpec::int(REVERB_SIZE, "Reverb Size", 0, 127, 64),
        ParamSpec::int(DELAY_TIME_FREE, "Delay Time", 0, 127, 0),
        ParamSpec::boolean(DELAY_TIME_SYNC_ENABLED, "Delay Time Sync", false),
        ParamSpec::choice(
            DELAY_TIME_SYNC_INDEX,
            "Delay Time (Sync)",
            ["1", "2", "3", "4", "6", "8", "12", "16", "24", "32", "48", "64", "96", "128"],
            7,
        ),
        ParamSpec::boolean(DELAY_OVERLAY_ENABLED, "Delay Overlay Enabled", false),
        ParamSpec::boolean(REVERB_OVERLAY_ENABLED, "Reverb Overlay Enabled", false),
        ParamSpec::boolean(PANNING_OVERLAY_ENABLED, "Panning Overlay Enabled", false),
        ParamSpec::int(DELAY_FEEDBACK_OVERLAY, "Delay Feedb (Overlay)", 0, 127, 0),
        ParamSpec::int(REVERB_TONE_OVERLAY, "Reverb Tone (Overlay)", 0, 127, 0),
        ParamSpec::int(PANNING_OVERLAY, "Panning (Overlay)", -64, 63, 0),
    ]
}

fn track_parameters(track: TrackIndex, pitch_notes: &[String]) -> Vec<ParamSpec> {
    let id = |suffix: &str| track_param_id(track, suffix);
    let label = |name: &str| format!("{} (T{})", name, track.number());

    let mut specs = vec![
        ParamSpec::boolean(id("unmuted"), label("Unmuted"), true),
        ParamSpec::int(id("mixVolume"), label("Mix Volume"), 0, 127, 100),
        ParamSpec::int(id("mixPan"), label("Mix Pan"), -64, 63, 0),
        ParamSpec::choice(id("machine"), label("Machine"), Machine::all().iter().map(|m| m.name()), 0),
        ParamSpec::boolean(id("punch"), label("Punch"), false),
        ParamSpec::int(id("pitch"), label("Pitch"), -24, 24, 0),
        ParamSpec::choice(id("pitchNote"), label("Pitch Note"), pitch_notes.iter().cloned(), 0),
    ];

    for name in ["decay", "color", "shape"] {
        specs.push(ParamSpec::int(id(name), label(&name.to_uppercase()), 0, 127, 0));
    }

    specs.push(ParamSpec::boolean(id("gate"), label("Gate"), false));
    for name in ["sweep", "contour", "delaySend", "reverbSend"] {
        specs.push(ParamSpec::int(id(name), label(&name.to_uppercase()), 0, 127, 0));
    }

    specs.push(ParamSpec::choice(
        id("lfoMode"),
        label("LFO Mode"),
        ["FREE", "TRG", "HOLD", "ONE", "HALF"],
        0,
    ));
    specs.push(ParamSpec::int(id("lfoSpeed"), label("LFO Speed"), -64, 63, 0));
    specs.push(ParamSpec::int(id("lfoMultiply"), label("LFO Multiply"), 0, 23, 0));
    specs.push(ParamSpec::choice(
        id("lfoWaveform"),
        label("LFO Waveform"),
        ["TRI", "SIN", "SQR", "SAW", "ENV", "SAW-HLF", "S&H"],
        0,
    ));
    specs.push(ParamSpec::int(id("lfoPhase"), label("LFO Phase"), 0, 127, 0));
    specs.push(ParamSpec::int(id("lfoDepth"), label("LFO Depth"), -64, 63, 0));
    specs.push(ParamSpec::choice(
        id("lfoDestination"),
        label("LFO Destination"),
        [
            " --- ", "PTCH", "FTUN", "DEC", "COLR", "SHPE", "SWEP", "CONT", "DELS", "REVS", "DIST",
            "PAN", "PAW", "GATE",
        ],
        0,
    ));
    specs.push(ParamSpec::int(id("lfoFade"), label("LFO Fade"), -64, 63, 0));

    for name in ["volDist", "swing", "chance"] {
        specs.push(ParamSpec::int(id(name), label(&name.to_uppercase()), 0, 127, 0));
    }

    specs
}

/// The full fixed layout: globals first, then tracks 1-6.
pub fn create_parameter_layout() -> Vec<ParamSpec> {
    let pitch_notes = pitch_note_choices();
    let mut layout = global_parameters();
    for track in TrackIndex::ALL {
        layout.extend(track_parameters(track, &pitch_notes));
    }
    layout
}
