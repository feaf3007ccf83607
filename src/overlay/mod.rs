//! Overlay core: what is shown, since when, and how it animates.
//!
//! [`state`] holds the pure state machine and sampling math; [`hub`] runs it
//! on a single owner thread fed by input producers.

pub mod hub;
pub mod state;

pub use hub::{KeyDownOutcome, OverlayHandle, OverlayHub};
pub use state::{AnimationSample, AnimationTiming, OverlayPhase, OverlayState, Transition};
