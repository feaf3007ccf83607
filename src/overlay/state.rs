//! Overlay state machine and time-derived animation sampling.
//!
//! The state only records *what* is shown and *when* it last changed. Every
//! animation parameter is recomputed from that pair and the current instant,
//! so nothing intermediate is ever stored.

use std::sync::Arc;
use std::time::{Duration, Instant};

/// Durations and magnitudes of the appear/fade animation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AnimationTiming {
    /// Length of the pop-in after key-down/release
    pub appear: Duration,
    /// Extra scale at the start of the pop-in (0.2 → starts at 1.2×)
    pub pop_scale: f64,
    /// How long the label holds at full opacity after release
    pub fade_delay: Duration,
    /// Length of the linear fade-out
    pub fade: Duration,
}

impl Default for AnimationTiming {
    fn default() -> Self {
        Self {
            appear: Duration::from_millis(100),
            pop_scale: 0.2,
            fade_delay: Duration::from_millis(1000),
            fade: Duration::from_millis(1000),
        }
    }
}

impl AnimationTiming {
    /// Time after release at which the label disappears completely.
    pub fn lifetime(&self) -> Duration {
        self.fade_delay + self.fade
    }
}

/// Coarse state of the overlay at a given instant.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OverlayPhase {
    /// Nothing to show
    Idle,
    /// A key is held
    Pressed,
    /// Key released, hold/fade timer running
    Releasing,
}

/// Point-in-time animation parameters, derived and never stored.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AnimationSample {
    pub phase: OverlayPhase,
    /// Pop-in multiplier applied to font size and padding (≥ 1.0)
    pub scale: f64,
    /// Opacity multiplier in `[0, 1]`
    pub alpha: f64,
    pub visible: bool,
}

impl AnimationSample {
    pub const HIDDEN: AnimationSample = AnimationSample {
        phase: OverlayPhase::Idle,
        scale: 1.0,
        alpha: 0.0,
        visible: false,
    };
}

/// A state change submitted by an input producer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Transition {
    /// Show `label` from `at` onwards, restarting the appear animation
    KeyDown { label: String, at: Instant },
    /// Start the fade clock at `at`
    KeyUp { at: Instant },
}

/// The single piece of mutable overlay state.
///
/// Starts empty and released. `last_change` never moves backwards.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OverlayState {
    label: Option<Arc<str>>,
    released: bool,
    last_change: Instant,
}

impl OverlayState {
    /// Creates the startup state: nothing shown, released.
    pub fn new(now: Instant) -> Self {
        Self {
            label: None,
            released: true,
            last_change: now,
        }
    }

    /// Currently displayed label, if any.
    pub fn label(&self) -> Option<&str> {
        self.label.as_deref()
    }

    pub fn is_released(&self) -> bool {
        self.released
    }

    pub fn last_change(&self) -> Instant {
        self.last_change
    }

    /// Shows a new label. Always overrides an in-flight fade.
    pub fn key_down(&mut self, label: String, at: Instant) -> bool {
        self.label = Some(label.into());
        self.released = false;
        self.touch(at);
        true
    }

    /// Starts the fade clock. A no-op when already released.
    ///
    /// The released key is not compared with the displayed one: any key-up
    /// while pressed counts.
    pub fn key_up(&mut self, at: Instant) -> bool {
        if self.released {
            return false;
        }
        self.released = true;
        self.touch(at);
        true
    }

    /// Applies a transition, returning whether the state changed.
    pub fn apply(&mut self, transition: Transition) -> bool {
        match transition {
            Transition::KeyDown { label, at } => self.key_down(label, at),
            Transition::KeyUp { at } => self.key_up(at),
        }
    }

    fn touch(&mut self, at: Instant) {
        self.last_change = self.last_change.max(at);
    }

    /// Time on the fade clock. Pinned to zero while the key is held.
    pub fn elapsed(&self, now: Instant) -> Duration {
        if self.released {
            now.saturating_duration_since(self.last_change)
        } else {
            Duration::ZERO
        }
    }

    /// Derives scale, opacity and visibility at `now`.
    pub fn sample(&self, now: Instant, timing: &AnimationTiming) -> AnimationSample {
        if self.label().is_none_or(str::is_empty) {
            return AnimationSample::HIDDEN;
        }

        let elapsed = self.elapsed(now);
        if elapsed > timing.lifetime() {
            return AnimationSample::HIDDEN;
        }

        let scale = if elapsed < timing.appear {
            let progress = elapsed.as_secs_f64() / timing.appear.as_secs_f64();
            1.0 + (1.0 - progress) * timing.pop_scale
        } else {
            1.0
        };

        let alpha = if elapsed > timing.fade_delay {
            let fading = (elapsed - timing.fade_delay).as_secs_f64();
            (1.0 - fading / timing.fade.as_secs_f64()).clamp(0.0, 1.0)
        } else {
            1.0
        };

        AnimationSample {
            phase: if self.released {
                OverlayPhase::Releasing
            } else {
                OverlayPhase::Pressed
            },
            scale,
            alpha,
            visible: true,
        }
    }
}
