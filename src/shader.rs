//! Render shader and its uniform block.
//!
//! Particles are drawn as camera-facing quads, one instance per
//! [`ParticleOutput`](crate::frame::ParticleOutput). The fragment stage
//! shapes each quad into a bright core with a soft glow, and the pipeline
//! blends additively so dense regions bloom.

use bytemuck::{Pod, Zeroable};
use glam::{Mat4, Vec2};

/// WGSL source for the particle pipeline (`vs_main` / `fs_main`).
pub const RENDER_SHADER: &str = include_str!("particles.wgsl");

/// Vertices per particle quad.
pub const VERTICES_PER_PARTICLE: u32 = 6;

/// Uniform block shared by both shader stages.
#[repr(C)]
#[derive(Debug, Copy, Clone, Pod, Zeroable)]
pub struct Uniforms {
    pub view_proj: [[f32; 4]; 4],
    pub viewport: [f32; 2],
    pub _padding: [f32; 2],
}

impl Uniforms {
    pub fn new(view_proj: Mat4, viewport: Vec2) -> Self {
        Self {
            view_proj: view_proj.to_cols_array_2d(),
            viewport: viewport.to_array(),
            _padding: [0.0; 2],
        }
    }
}
