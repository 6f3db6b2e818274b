//! # voidfield - Procedural Particle Formation Engine
//!
//! Tens of thousands of glowing points, each placed every frame by a pure
//! function of its immutable random seed, the clock, and a small scene
//! configuration.
//!
//! voidfield owns the hard part of an ambient particle backdrop: seven
//! parametric formations, eased blending between any two of them, staggered
//! birth, cursor repulsion, and three-band coloring. A thin wgpu renderer
//! draws the result.
//!
//! ## Quick Start
//!
//! ```ignore
//! use voidfield::prelude::*;
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = SceneConfig::resolve("home", &SceneOverrides::default())?;
//!     voidfield::run(30_000, config)?;
//!     Ok(())
//! }
//! ```
//!
//! Headless, for tests or custom renderers:
//!
//! ```ignore
//! let mut void = ParticleVoid::new(10_000, SceneConfig::default());
//! void.apply_config(SceneConfig { formation: Formation::Orbit, ..void.config() });
//! for _ in 0..60 {
//!     let particles: &[ParticleOutput] = void.tick(1.0 / 60.0, CursorState::default());
//! }
//! ```
//!
//! ## Core Concepts
//!
//! ### Seeds
//!
//! Each particle gets three uniform offsets, a size factor, and a color mix
//! value when the field is created. They never change. Every formation maps
//! the same offsets to a position, which is what makes blending between
//! formations continuous.
//!
//! ### Formations
//!
//! | Formation | Shape |
//! |-----------|-------|
//! | [`Formation::Default`] | Uniform solid sphere |
//! | [`Formation::Cosmic`] | Jittered (3,2) torus knot |
//! | [`Formation::Scattered`] | Static box scatter |
//! | [`Formation::Orbit`] | Six tilted rings |
//! | [`Formation::Grid`] | Breathing lattice |
//! | [`Formation::Pulse`] | Sphere with a traveling wave |
//! | [`Formation::Converge`] | Tight inward spiral |
//!
//! ### Frames
//!
//! Per frame, [`ParticleVoid::tick`] advances the transition and birth clocks
//! once, snapshots them into [`FrameUniforms`], and evaluates every particle
//! in parallel into a [`ParticleOutput`] buffer ready for instanced drawing.

pub mod birth;
pub mod camera;
pub mod config;
pub mod cursor;
pub mod error;
pub mod formation;
pub mod frame;
mod gpu;
pub mod input;
pub mod noise;
pub mod palette;
pub mod scene;
pub mod seed;
pub mod shader;
pub mod time;
pub mod transition;
mod window;

pub use bytemuck;
pub use glam::{Vec2, Vec3};

pub use birth::BirthSequencer;
pub use camera::{Camera, Viewport};
pub use config::{SceneConfig, SceneOverrides, ScenePreset, SceneStore, PRESETS};
pub use cursor::{CursorInteraction, CursorState};
pub use error::{ConfigError, GpuError, PaletteError, RunError, UnknownFormation};
pub use formation::Formation;
pub use frame::{FrameUniforms, ParticleOutput};
pub use palette::{ColorBands, ColorTemp};
pub use scene::ParticleVoid;
pub use seed::{ParticleSeed, SeedBuffer, SeedGenerator, SeedProfile};
pub use time::FrameClock;
pub use transition::{TransitionController, TransitionState};
pub use window::run;

/// Convenient re-exports for common usage.
///
/// ```ignore
/// use voidfield::prelude::*;
/// ```
pub mod prelude {
    pub use crate::config::{SceneConfig, SceneOverrides, SceneStore};
    pub use crate::cursor::CursorState;
    pub use crate::error::{ConfigError, RunError};
    pub use crate::formation::Formation;
    pub use crate::frame::ParticleOutput;
    pub use crate::palette::ColorTemp;
    pub use crate::scene::ParticleVoid;
    pub use crate::seed::{SeedGenerator, SeedProfile};
    pub use crate::window::run;
    pub use crate::{Vec2, Vec3};
}
