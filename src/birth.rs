//! Staggered particle emergence.
//!
//! A freshly created field is empty. The sequencer latches the clock the
//! first time it is sampled and ramps a field-wide progress from 0 to 1 over
//! [`BIRTH_DURATION`] seconds. Each particle consumes that ramp through its
//! own window `[offset.x * 0.5, offset.x * 0.5 + 0.5]`, so particles ignite at
//! scattered moments instead of all at once.
//!
//! Once the ramp reaches 1 the sequencer stays there until the field is
//! recreated.

/// Seconds for the field-wide birth ramp.
pub const BIRTH_DURATION: f32 = 5.0;
/// Largest per-particle delay, reached at `offset.x == 1`.
pub const MAX_BIRTH_DELAY: f32 = 0.5;
/// Width of each particle's emergence window.
pub const BIRTH_WINDOW: f32 = 0.5;

/// Hermite smoothstep.
///
/// When the edges coincide (or are inverted) it degrades to a hard step at
/// `edge0` instead of dividing by zero.
#[inline]
pub fn smoothstep(edge0: f32, edge1: f32, x: f32) -> f32 {
    if edge1 <= edge0 {
        return if x < edge0 { 0.0 } else { 1.0 };
    }
    let t = ((x - edge0) / (edge1 - edge0)).clamp(0.0, 1.0);
    t * t * (3.0 - 2.0 * t)
}

/// Per-particle emergence for a given field-wide progress.
#[inline]
pub fn emergence(offset_x: f32, birth_progress: f32) -> f32 {
    let delay = offset_x * MAX_BIRTH_DELAY;
    smoothstep(delay, delay + BIRTH_WINDOW, birth_progress)
}

/// Field-wide birth clock.
#[derive(Debug, Clone, Default)]
pub struct BirthSequencer {
    start: Option<f32>,
    progress: f32,
}

impl BirthSequencer {
    /// A sequencer that has not yet been sampled.
    pub fn new() -> Self {
        Self::default()
    }

    /// A sequencer that is already complete. Useful for tests and for
    /// fields that should appear fully formed.
    pub fn completed() -> Self {
        Self {
            start: Some(0.0),
            progress: 1.0,
        }
    }

    /// Sample at elapsed clock time `now` (seconds) and return the field-wide progress.
    ///
    /// The first call latches `now` as the birth start.
    pub fn update(&mut self, now: f32) -> f32 {
        if self.progress >= 1.0 {
            return 1.0;
        }

        let start = *self.start.get_or_insert_with(|| {
            tracing::debug!(start = now, "birth sequence started");
            now
        });

        let progress = ((now - start) / BIRTH_DURATION).clamp(0.0, 1.0);
        // A clock that steps backwards must not un-birth particles
        self.progress = self.progress.max(progress);

        if self.progress >= 1.0 {
            tracing::debug!("birth sequence complete");
        }
        self.progress
    }

    /// Last computed field-wide progress.
    pub fn progress(&self) -> f32 {
        self.progress
    }

    /// Whether every particle has fully emerged.
    pub fn is_complete(&self) -> bool {
        self.progress >= 1.0
    }

    /// Emergence factor for a particle with the given first offset.
    pub fn emergence(&self, offset_x: f32) -> f32 {
        emergence(offset_x, self.progress)
    }
}
