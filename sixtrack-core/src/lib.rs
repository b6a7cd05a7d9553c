//! Parameter-binding core for the six-track drum/synth editor.
//!
//! A fixed set of control slots is bound to named parameters in a shared
//! store. Which parameter each slot shows depends on the selected track, the
//! mixer page and the overlay toggles; [`view::plan`] derives all of it from
//! a single [`view::ViewState`].

pub mod action;
pub mod binding;
pub mod config;
pub mod dispatch;
pub mod editor;
pub mod labels;
pub mod midi;
pub mod params;
pub mod processor;
pub mod view;

pub use action::{Action, DispatchResult, SessionAction, SlotAction, ViewAction};
pub use dispatch::dispatch_action;
pub use editor::{Editor, SlotView};
pub use processor::{ChannelSet, Processor, ProcessorKind};
