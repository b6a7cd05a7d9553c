use crate::params::layout::{
    DELAY_FEEDBACK_OVERLAY, DELAY_OVERLAY_ENABLED, DELAY_TIME_FREE, DELAY_TIME_SYNC_ENABLED,
    DELAY_TIME_SYNC_INDEX, MAIN_VOLUME, PANNING_OVERLAY, PANNING_OVERLAY_ENABLED, PATTERN_BANK,
    PATTERN_INDEX, REVERB_OVERLAY_ENABLED, REVERB_SIZE, REVERB_TONE_OVERLAY,
};
use crate::params::{track_param_id, TrackIndex, NUM_TRACKS};

use super::ViewState;

/// Global controls along the top of the surface.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HeaderSlot {
    PatternBank,
    PatternIndex,
    /// Main volume, or panning while the pan overlay is on.
    MainLevel,
    ReverbSize,
    /// Free delay time, or the synced division while sync is on.
    DelayTime,
    DelaySync,
    PanSwap,
    DelaySwap,
    ReverbSwap,
}

impl HeaderSlot {
    pub const ALL: [HeaderSlot; 9] = [
        HeaderSlot::PatternBank,
        HeaderSlot::PatternIndex,
        HeaderSlot::MainLevel,
        HeaderSlot::ReverbSize,
        HeaderSlot::DelayTime,
        HeaderSlot::DelaySync,
        HeaderSlot::PanSwap,
        HeaderSlot::DelaySwap,
        HeaderSlot::ReverbSwap,
    ];
}

/// Track page controls; all follow the active track.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PageSlot {
    Punch,
    Pitch,
    PitchNote,
    Decay,
    Color,
    Shape,
    Gate,
    Sweep,
    Contour,
    DelaySend,
    ReverbSend,
    LfoMode,
    LfoSpeed,
    VolDist,
    Swing,
    Chance,
    LfoMultiply,
    LfoWaveform,
    LfoPhase,
    LfoDepth,
    LfoDestination,
    LfoFade,
}

impl PageSlot {
    pub const ALL: [PageSlot; 22] = [
        PageSlot::Punch,
        PageSlot::Pitch,
        PageSlot::PitchNote,
        PageSlot::Decay,
        PageSlot::Color,
        PageSlot::Shape,
        PageSlot::Gate,
        PageSlot::Sweep,
        PageSlot::Contour,
        PageSlot::DelaySend,
        PageSlot::ReverbSend,
        PageSlot::LfoMode,
        PageSlot::LfoSpeed,
        PageSlot::VolDist,
        PageSlot::Swing,
        PageSlot::Chance,
        PageSlot::LfoMultiply,
        PageSlot::LfoWaveform,
        PageSlot::LfoPhase,
        PageSlot::LfoDepth,
        PageSlot::LfoDestination,
        PageSlot::LfoFade,
    ];

    pub fn suffix(self) -> &'static str {
        match self {
            PageSlot::Punch => "punch",
            PageSlot::Pitch => "pitch",
            PageSlot::PitchNote => "pitchNote",
            PageSlot::Decay => "decay",
            PageSlot::Color => "color",
            PageSlot::Shape => "shape",
            PageSlot::Gate => "gate",
            PageSlot::Sweep => "sweep",
            PageSlot::Contour => "contour",
            PageSlot::DelaySend => "delaySend",
            PageSlot::ReverbSend => "reverbSend",
            PageSlot::LfoMode => "lfoMode",
            PageSlot::LfoSpeed => "lfoSpeed",
            PageSlot::VolDist => "volDist",
            PageSlot::Swing => "swing",
            PageSlot::Chance => "chance",
            PageSlot::LfoMultiply => "lfoMultiply",
            PageSlot::LfoWaveform => "lfoWaveform",
            PageSlot::LfoPhase => "lfoPhase",
            PageSlot::LfoDepth => "lfoDepth",
            PageSlot::LfoDestination => "lfoDestination",
            PageSlot::LfoFade => "lfoFade",
        }
    }

    /// Lives on the LFO detail panel.
    pub fn is_lfo_panel(self) -> bool {
        matches!(
            self,
            PageSlot::LfoMultiply
                | PageSlot::LfoWaveform
                | PageSlot::LfoPhase
                | PageSlot::LfoDepth
                | PageSlot::LfoDestination
                | PageSlot::LfoFade
        )
    }

    /// Covered by the LFO detail panel while it is open.
    pub fn hidden_by_lfo_panel(self) -> bool {
        matches!(
            self,
            PageSlot::LfoSpeed | PageSlot::VolDist | PageSlot::Swing | PageSlot::Chance
        )
    }
}

/// Per-track strip controls on the mixer page.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MixerSlot {
    Volume,
    Pan,
    DelaySend,
    ReverbSend,
}

impl MixerSlot {
    pub const ALL: [MixerSlot; 4] = [
        MixerSlot::Volume,
        MixerSlot::Pan,
        MixerSlot::DelaySend,
        MixerSlot::ReverbSend,
    ];

    pub fn suffix(self) -> &'static str {
        match self {
            MixerSlot::Volume => "mixVolume",
            MixerSlot::Pan => "mixPan",
            MixerSlot::DelaySend => "delaySend",
            MixerSlot::ReverbSend => "reverbSend",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SlotId {
    Header(HeaderSlot),
    Page(PageSlot),
    Machine(TrackIndex),
    TrackButton(TrackIndex),
    Mixer(MixerSlot, TrackIndex),
    MixDelayTime,
    MixDelaySync,
}

const HEADER_BASE: usize = 0;
const PAGE_BASE: usize = HEADER_BASE + HeaderSlot::ALL.len();
const MACHINE_BASE: usize = PAGE_BASE + PageSlot::ALL.len();
const BUTTON_BASE: usize = MACHINE_BASE + NUM_TRACKS;
const MIXER_BASE: usize = BUTTON_BASE + NUM_TRACKS;
const MIX_DELAY_TIME: usize = MIXER_BASE + MixerSlot::ALL.len() * NUM_TRACKS;
const MIX_DELAY_SYNC: usize = MIX_DELAY_TIME + 1;

/// Size of the slot arena.
pub const SLOT_COUNT: usize = MIX_DELAY_SYNC + 1;

impl SlotId {
    /// Position in the fixed slot arena.
    pub fn index(self) -> usize {
        match self {
            SlotId::Header(h) => HEADER_BASE + h as usize,
            SlotId::Page(p) => PAGE_BASE + p as usize,
            SlotId::Machine(t) => MACHINE_BASE + t.get(),
            SlotId::TrackButton(t) => BUTTON_BASE + t.get(),
            SlotId::Mixer(m, t) => MIXER_BASE + m as usize * NUM_TRACKS + t.get(),
            SlotId::MixDelayTime => MIX_DELAY_TIME,
            SlotId::MixDelaySync => MIX_DELAY_SYNC,
        }
    }

    /// Every slot in arena order.
    pub fn all() -> Vec<SlotId> {
        let mut slots = Vec::with_capacity(SLOT_COUNT);
        slots.extend(HeaderSlot::ALL.iter().map(|h| SlotId::Header(*h)));
        slots.extend(PageSlot::ALL.iter().map(|p| SlotId::Page(*p)));
        slots.extend(TrackIndex::ALL.iter().map(|t| SlotId::Machine(*t)));
        slots.extend(TrackIndex::ALL.iter().map(|t| SlotId::TrackButton(*t)));
        for m in MixerSlot::ALL {
            slots.extend(TrackIndex::ALL.iter().map(|t| SlotId::Mixer(m, *t)));
        }
        slots.push(SlotId::MixDelayTime);
        slots.push(SlotId::MixDelaySync);
        slots
    }

    /// Follows the active track and is rebound on track selection.
    pub fn is_track_dependent(self) -> bool {
        matches!(self, SlotId::Page(_))
    }

    pub fn caption(self) -> String {
        match self {
            SlotId::Header(h) => match h {
                HeaderSlot::PatternBank => "BANK",
                HeaderSlot::PatternIndex => "PATTERN",
                HeaderSlot::MainLevel => "MAIN",
                HeaderSlot::ReverbSize => "REV SIZE",
                HeaderSlot::DelayTime => "DLY TIME",
                HeaderSlot::DelaySync => "SYNC",
                HeaderSlot::PanSwap => "PAN",
                HeaderSlot::DelaySwap => "DLY",
                HeaderSlot::ReverbSwap => "REV",
            }
            .to_string(),
            SlotId::Page(p) => match p {
                PageSlot::Punch => "PUNCH",
                PageSlot::Pitch => "PITCH",
                PageSlot::PitchNote => "NOTE",
                PageSlot::Decay => "DECAY",
                PageSlot::Color => "COLOR",
                PageSlot::Shape => "SHAPE",
                PageSlot::Gate => "GATE",
                PageSlot::Sweep => "SWEEP",
                PageSlot::Contour => "CONTOUR",
                PageSlot::DelaySend => "DELAY",
                PageSlot::ReverbSend => "REVERB",
                PageSlot::LfoMode => "LFO MODE",
                PageSlot::LfoSpeed => "LFO SPEED",
                PageSlot::VolDist => "VOL+DIST",
                PageSlot::Swing => "SWING",
                PageSlot::Chance => "CHANCE",
                PageSlot::LfoMultiply => "MULTIPLY",
                PageSlot::LfoWaveform => "WAVEFORM",
                PageSlot::LfoPhase => "PHASE",
                PageSlot::LfoDepth => "DEPTH",
                PageSlot::LfoDestination => "DESTINATION",
                PageSlot::LfoFade => "FADE",
            }
            .to_string(),
            SlotId::Machine(t) => format!("MACH {}", t.number()),
            SlotId::TrackButton(t) => format!("T{}", t.number()),
            SlotId::Mixer(m, t) => {
                let name = match m {
                    MixerSlot::Volume => "VOL",
                    MixerSlot::Pan => "PAN",
                    MixerSlot::DelaySend => "DLY",
                    MixerSlot::ReverbSend => "REV",
                };
                format!("{} {}", name, t.number())
            }
            SlotId::MixDelayTime => "DLY TIME".to_string(),
            SlotId::MixDelaySync => "SYNC".to_string(),
        }
    }
}

/// Derived visibility and target for one slot.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SlotAssignment {
    pub slot: SlotId,
    pub visible: bool,
    /// None leaves the slot unbound.
    pub param: Option<String>,
}

fn delay_time_param(state: &ViewState) -> &'static str {
    if state.sync_swap {
        DELAY_TIME_SYNC_INDEX
    } else {
        DELAY_TIME_FREE
    }
}

fn header_assignment(slot: HeaderSlot, state: &ViewState) -> (bool, String) {
    let track = state.is_track();
    let (visible, param) = match slot {
        HeaderSlot::PatternBank => (true, PATTERN_BANK),
        HeaderSlot::PatternIndex => (true, PATTERN_INDEX),
        HeaderSlot::MainLevel => {
            let param = if state.pan_swap_active() { PANNING_OVERLAY } else { MAIN_VOLUME };
            (true, param)
        }
        HeaderSlot::ReverbSize => (track, REVERB_SIZE),
        // The reverb tone overlay takes over this region.
        HeaderSlot::DelayTime => (track && !state.reverb_swap, delay_time_param(state)),
        HeaderSlot::DelaySync => (track && !state.reverb_swap, DELAY_TIME_SYNC_ENABLED),
        HeaderSlot::PanSwap => (track, PANNING_OVERLAY_ENABLED),
        HeaderSlot::DelaySwap => (track, DELAY_OVERLAY_ENABLED),
        HeaderSlot::ReverbSwap => (track, REVERB_OVERLAY_ENABLED),
    };
    (visible, param.to_string())
}

fn page_assignment(slot: PageSlot, state: &ViewState) -> (bool, String) {
    let visible = if slot.is_lfo_panel() {
        state.lfo_detail_active()
    } else if slot.hidden_by_lfo_panel() {
        state.is_track() && !state.lfo_detail
    } else {
        state.is_track()
    };
    let param = match slot {
        PageSlot::DelaySend if state.delay_swap_active() => DELAY_FEEDBACK_OVERLAY.to_string(),
        PageSlot::ReverbSend if state.reverb_swap_active() => REVERB_TONE_OVERLAY.to_string(),
        _ => track_param_id(state.active_track, slot.suffix()),
    };
    (visible, param)
}

/// Full slot plan for a view state, in arena order.
pub fn plan(state: &ViewState) -> Vec<SlotAssignment> {
    SlotId::all()
        .into_iter()
        .map(|slot| {
            let (visible, param) = match slot {
                SlotId::Header(h) => {
                    let (visible, param) = header_assignment(h, state);
                    (visible, Some(param))
                }
                SlotId::Page(p) => {
                    let (visible, param) = page_assignment(p, state);
                    (visible, Some(param))
                }
                SlotId::Machine(t) => (state.is_track(), Some(track_param_id(t, "machine"))),
                SlotId::TrackButton(t) => {
                    // Select semantics in track mode, independent mute toggles in the mixer.
                    let param = state.is_mixer().then(|| track_param_id(t, "unmuted"));
                    (true, param)
                }
                SlotId::Mixer(m, t) => (state.is_mixer(), Some(track_param_id(t, m.suffix()))),
                SlotId::MixDelayTime => (state.is_mixer(), Some(delay_time_param(state).to_string())),
                SlotId::MixDelaySync => (state.is_mixer(), Some(DELAY_TIME_SYNC_ENABLED.to_string())),
            };
            SlotAssignment { slot, visible, param }
        })
        .collect()
}
