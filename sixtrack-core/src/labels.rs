//! Machine-dependent label mirrors for the COLOR and SHAPE dials.
//!
//! The numeric parameter is always the source of truth. A mirror is
//! recomputed from it on every observation and never writes back on its
//! own; picking a label is a separate user edit that becomes one numeric
//! write.

use crate::params::Machine;

/// Upper bound of the mirrored numeric parameters.
pub const NUMERIC_MAX: i32 = 127;

const TONE_FINE_TUNE_SPAN: i32 = 68;

const CHORD_NAMES: [&str; 38] = [
    "MAJ", "MIN", "SUS2", "SUS4", "DIM", "AUG", "MAJ6", "MIN6", "7", "MAJ7", "MIN7", "MINMAJ7",
    "DIM7", "M7B5", "7SUS4", "ADD9", "MADD9", "9", "MAJ9", "MIN9", "6/9", "M6/9", "11", "MIN11",
    "13", "MAJ13", "MIN13", "7B9", "7#9", "7#11", "7B5", "7#5", "AUG7", "5", "OCT", "MAJ7#11",
    "9SUS4", "ADD11",
];

/// Map a numeric value in [0,127] to a label index in [0, n-1].
pub fn numeric_to_label_index(value: i32, len: usize) -> usize {
    if len <= 1 {
        return 0;
    }
    let last = (len - 1) as f64;
    let idx = (value as f64 / NUMERIC_MAX as f64 * last).round();
    idx.clamp(0.0, last) as usize
}

/// Canonical numeric value for a label index.
pub fn label_index_to_numeric(index: usize, len: usize) -> i32 {
    if len <= 1 {
        return 0;
    }
    let index = index.min(len - 1) as f64;
    let value = (index / (len - 1) as f64 * NUMERIC_MAX as f64).round() as i32;
    value.clamp(0, NUMERIC_MAX)
}

/// Numeric value `steps` shown labels away from `value`. Labels no numeric
/// value maps to are skipped, so every step moves the selector. Stops at
/// either end of the table.
pub fn step_label_numeric(value: i32, len: usize, steps: i32) -> i32 {
    let dir = steps.signum();
    let mut value = value.clamp(0, NUMERIC_MAX);
    for _ in 0..steps.unsigned_abs() {
        let index = numeric_to_label_index(value, len);
        let mut next = value;
        let target = loop {
            next += dir;
            if !(0..=NUMERIC_MAX).contains(&next) {
                return value;
            }
            let candidate = numeric_to_label_index(next, len);
            if candidate != index {
                break candidate;
            }
        };
        let canonical = label_index_to_numeric(target, len);
        value = if numeric_to_label_index(canonical, len) == target {
            canonical
        } else {
            next
        };
    }
    value
}

/// The two mirrored dials.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LabelSlot {
    Color,
    Shape,
}

impl LabelSlot {
    pub const ALL: [LabelSlot; 2] = [LabelSlot::Color, LabelSlot::Shape];

    /// Per-track parameter suffix of the mirrored numeric dial.
    pub fn suffix(&self) -> &'static str {
        match self {
            LabelSlot::Color => "color",
            LabelSlot::Shape => "shape",
        }
    }

    pub fn caption(&self) -> &'static str {
        match self {
            LabelSlot::Color => "COLOR",
            LabelSlot::Shape => "SHAPE",
        }
    }

    /// Machine type that activates this mirror.
    pub fn machine(&self) -> Machine {
        match self {
            LabelSlot::Color => Machine::Tone,
            LabelSlot::Shape => Machine::Chord,
        }
    }

    pub fn len(&self) -> usize {
        match self {
            LabelSlot::Color => (TONE_FINE_TUNE_SPAN * 2 + 1) as usize,
            LabelSlot::Shape => CHORD_NAMES.len(),
        }
    }

    pub fn label(&self, index: usize) -> String {
        let index = index.min(self.len() - 1);
        match self {
            LabelSlot::Color => {
                let cents = index as i32 - TONE_FINE_TUNE_SPAN;
                if cents > 0 {
                    format!("+{}", cents)
                } else {
                    cents.to_string()
                }
            }
            LabelSlot::Shape => CHORD_NAMES[index].to_string(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct LabelMirror {
    /// Selector shown; the plain caption is hidden while this is true.
    pub visible: bool,
    pub index: usize,
}

impl LabelMirror {
    pub fn resolve(slot: LabelSlot, track_mode: bool, machine: Machine, numeric: i32) -> Self {
        Self {
            visible: track_mode && machine == slot.machine(),
            index: numeric_to_label_index(numeric, slot.len()),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct LabelMirrors {
    pub color: LabelMirror,
    pub shape: LabelMirror,
}

impl LabelMirrors {
    pub fn get(&self, slot: LabelSlot) -> LabelMirror {
        match slot {
            LabelSlot::Color => self.color,
            LabelSlot::Shape => self.shape,
        }
    }

    pub fn set(&mut self, slot: LabelSlot, mirror: LabelMirror) {
        match slot {
            LabelSlot::Color => self.color = mirror,
            LabelSlot::Shape => self.shape = mirror,
        }
    }
}
