//! Cross-formation transitions.
//!
//! The controller tracks exactly one `(previous, current)` formation pair and
//! a progress value. A request for a formation different from the current one
//! restarts the blend from zero; a request arriving mid-blend discards the
//! in-flight previous formation rather than queueing.
//!
//! Consumers never see raw progress. [`TransitionController::blend`] returns
//! the cubic ease-in-out of progress, which has zero velocity at both ends
//! and no kink at the midpoint.
//!
//! ```text
//!            request(new != current)
//!   Idle ─────────────────────────────▶ Transitioning
//!    ▲                                   │  ▲
//!    │      progress reaches 1           │  │ request(new != current)
//!    └───────────────────────────────────┘  └──(restart at 0)
//! ```

use glam::Vec3;

use crate::formation::Formation;

/// Cubic ease-in-out on `[0, 1]`.
///
/// Both branches evaluate to exactly 0.5 at the midpoint.
#[inline]
pub fn ease_in_out_cubic(p: f32) -> f32 {
    let p = p.clamp(0.0, 1.0);
    if p < 0.5 {
        4.0 * p * p * p
    } else {
        let k = -2.0 * p + 2.0;
        1.0 - k * k * k / 2.0
    }
}

/// Mutable blend state for one particle field.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TransitionState {
    /// Formation being blended away from.
    pub previous: Formation,
    /// Formation being blended toward.
    pub current: Formation,
    /// Raw linear progress in [0, 1].
    pub progress: f32,
    /// Blend duration in milliseconds.
    pub duration_ms: f32,
    /// Whether a blend is in flight.
    pub active: bool,
}

impl TransitionState {
    /// Settled state showing `formation`, nothing pending.
    pub fn idle(formation: Formation) -> Self {
        Self {
            previous: formation,
            current: formation,
            progress: 1.0,
            duration_ms: 0.0,
            active: false,
        }
    }
}

impl Default for TransitionState {
    fn default() -> Self {
        Self::idle(Formation::Default)
    }
}

/// Drives a [`TransitionState`] forward once per frame.
#[derive(Debug, Clone, Default)]
pub struct TransitionController {
    state: TransitionState,
}

impl TransitionController {
    /// Start idle on `formation`.
    pub fn new(formation: Formation) -> Self {
        Self {
            state: TransitionState::idle(formation),
        }
    }

    /// Snapshot of the current state.
    pub fn state(&self) -> TransitionState {
        self.state
    }

    /// Whether a blend is in flight.
    pub fn is_active(&self) -> bool {
        self.state.active
    }

    /// Formation being blended away from.
    pub fn previous(&self) -> Formation {
        self.state.previous
    }

    /// Formation being blended toward.
    pub fn current(&self) -> Formation {
        self.state.current
    }

    /// Raw linear progress.
    pub fn progress(&self) -> f32 {
        self.state.progress
    }

    /// Eased blend weight handed to position composition.
    pub fn blend(&self) -> f32 {
        ease_in_out_cubic(self.state.progress)
    }

    /// Ask for `target` with a blend of `duration_ms`.
    ///
    /// Returns `true` if a new transition started. Requesting the formation
    /// that is already current is a no-op, even mid-blend.
    pub fn request(&mut self, target: Formation, duration_ms: f32) -> bool {
        if target == self.state.current {
            return false;
        }

        if self.state.active {
            tracing::debug!(
                discarded = %self.state.previous,
                from = %self.state.current,
                to = %target,
                "superseding in-flight transition"
            );
        } else {
            tracing::debug!(from = %self.state.current, to = %target, duration_ms, "transition started");
        }

        self.state = TransitionState {
            previous: self.state.current,
            current: target,
            progress: 0.0,
            duration_ms,
            active: true,
        };
        true
    }

    /// Advance by one frame of `delta_ms` milliseconds and return the eased blend.
    ///
    /// A non-positive duration completes on the first update. Idle
    /// controllers are left untouched.
    pub fn update(&mut self, delta_ms: f32) -> f32 {
        if !self.state.active {
            return self.blend();
        }

        let step = if self.state.duration_ms > 0.0 {
            delta_ms.max(0.0) / self.state.duration_ms
        } else {
            1.0
        };
        self.state.progress = (self.state.progress + step).min(1.0);

        if self.state.progress >= 1.0 {
            self.state.progress = 1.0;
            self.state.active = false;
            tracing::debug!(formation = %self.state.current, "transition complete");
        }

        self.blend()
    }

    /// Blend two already-evaluated formation positions at the current weight.
    #[inline]
    pub fn mix(&self, previous: Vec3, current: Vec3) -> Vec3 {
        previous.lerp(current, self.blend())
    }
}
