//! The particle void: frame-sequential orchestration around the parallel kernel.
//!
//! [`ParticleVoid`] owns everything that persists between frames: the
//! immutable seed buffer, the transition and birth state, the clock, the
//! active configuration, and the output buffer handed to the renderer. Each
//! [`tick`](ParticleVoid::tick) advances the global state once on the calling
//! thread, freezes it into a [`FrameUniforms`] snapshot, and then evaluates
//! every particle in parallel against that snapshot.
//!
//! ```ignore
//! let mut void = ParticleVoid::new(30_000, SceneConfig::default());
//! void.apply_config(SceneConfig { formation: Formation::Orbit, ..void.config() });
//!
//! loop {
//!     let particles = void.tick(1.0 / 60.0, cursor);
//!     renderer.render(particles, void.camera().view_proj())?;
//! }
//! ```

use crate::birth::BirthSequencer;
use crate::camera::{Camera, Viewport};
use crate::config::SceneConfig;
use crate::cursor::{influence_radius_ndc, CursorInteraction, CursorState};
use crate::frame::{evaluate_into, FrameUniforms, ParticleOutput};
use crate::palette::ColorBands;
use crate::seed::{SeedBuffer, SeedGenerator};
use crate::time::FrameClock;
use crate::transition::TransitionController;

/// A field of particles and the state that animates it.
pub struct ParticleVoid {
    seeds: SeedBuffer,
    outputs: Vec<ParticleOutput>,
    transition: TransitionController,
    birth: BirthSequencer,
    clock: FrameClock,
    config: SceneConfig,
    bands: ColorBands,
    camera: Camera,
    viewport: Viewport,
}

impl ParticleVoid {
    /// Create a field of `count` freshly seeded particles.
    pub fn new(count: usize, config: SceneConfig) -> Self {
        Self::with_seeds(SeedGenerator::default().generate(count), config)
    }

    /// Create a field from existing seeds.
    ///
    /// The field starts settled in `config.formation` with no particle born yet.
    pub fn with_seeds(seeds: SeedBuffer, config: SceneConfig) -> Self {
        let config = config.sanitized();
        let viewport = Viewport::default();
        tracing::info!(
            particles = seeds.len(),
            formation = %config.formation,
            color = %config.color_temp,
            "particle void created"
        );

        Self {
            outputs: vec![ParticleOutput::default(); seeds.len()],
            seeds,
            transition: TransitionController::new(config.formation),
            birth: BirthSequencer::new(),
            clock: FrameClock::new(),
            bands: config.color_temp.bands(),
            config,
            camera: Camera::new(viewport.aspect()),
            viewport,
        }
    }

    /// Apply a new configuration between frames.
    ///
    /// A changed formation starts (or supersedes) a transition; a changed
    /// color temperature swaps the bands immediately.
    pub fn apply_config(&mut self, config: SceneConfig) {
        let config = config.sanitized();

        self.transition.request(config.formation, config.transition_duration);

        if config.color_temp != self.config.color_temp {
            self.bands = config.color_temp.bands();
            tracing::info!(from = %self.config.color_temp, to = %config.color_temp, "color temperature changed");
        }

        self.config = config;
    }

    /// Track a new viewport size.
    pub fn resize(&mut self, viewport: Viewport) {
        self.viewport = viewport;
        self.camera.set_viewport(viewport);
    }

    /// Skip the birth sequence so every particle is fully formed.
    pub fn skip_birth(&mut self) {
        self.birth = BirthSequencer::completed();
    }

    /// Advance by `delta_secs` and evaluate every particle.
    pub fn tick(&mut self, delta_secs: f32, cursor: CursorState) -> &[ParticleOutput] {
        self.clock.advance(delta_secs);
        self.evaluate(cursor)
    }

    /// Advance by real time since the last frame and evaluate every particle.
    pub fn tick_realtime(&mut self, cursor: CursorState) -> &[ParticleOutput] {
        self.clock.tick();
        self.evaluate(cursor)
    }

    fn evaluate(&mut self, cursor: CursorState) -> &[ParticleOutput] {
        self.transition.update(self.clock.delta_ms());
        self.birth.update(self.clock.elapsed());

        let uniforms = self.frame_uniforms(cursor);
        evaluate_into(&self.seeds, &uniforms, &mut self.outputs);
        &self.outputs
    }

    /// Snapshot of the frame-global state for the given cursor.
    pub fn frame_uniforms(&self, cursor: CursorState) -> FrameUniforms {
        let radius = influence_radius_ndc(self.config.cursor_influence, self.viewport.width);
        FrameUniforms {
            time: self.clock.elapsed(),
            speed: self.config.speed,
            previous: self.transition.previous(),
            current: self.transition.current(),
            blend: self.transition.blend(),
            birth_progress: self.birth.progress(),
            density: self.config.density,
            particle_size: self.config.particle_size,
            cursor: CursorInteraction::new(cursor, radius),
            bands: self.bands,
            view: self.camera.view_matrix(),
            proj: self.camera.projection_matrix(),
        }
    }

    /// Outputs of the most recent tick.
    pub fn outputs(&self) -> &[ParticleOutput] {
        &self.outputs
    }

    /// The immutable seed buffer.
    pub fn seeds(&self) -> &SeedBuffer {
        &self.seeds
    }

    /// Number of particles.
    pub fn len(&self) -> usize {
        self.seeds.len()
    }

    /// Whether the field has no particles.
    pub fn is_empty(&self) -> bool {
        self.seeds.is_empty()
    }

    /// Active (sanitized) configuration.
    pub fn config(&self) -> SceneConfig {
        self.config
    }

    /// Transition state.
    pub fn transition(&self) -> &TransitionController {
        &self.transition
    }

    /// Birth state.
    pub fn birth(&self) -> &BirthSequencer {
        &self.birth
    }

    /// The clock.
    pub fn clock(&self) -> &FrameClock {
        &self.clock
    }

    /// Mutable clock access for pausing and time scaling.
    pub fn clock_mut(&mut self) -> &mut FrameClock {
        &mut self.clock
    }

    /// Current color bands.
    pub fn bands(&self) -> ColorBands {
        self.bands
    }

    /// The camera.
    pub fn camera(&self) -> &Camera {
        &self.camera
    }

    /// The viewport.
    pub fn viewport(&self) -> Viewport {
        self.viewport
    }
}
