//! Per-frame particle evaluation.
//!
//! Every frame the orchestration layer advances the transition and birth
//! clocks, freezes them into a [`FrameUniforms`] snapshot, and runs
//! [`evaluate_into`] over the whole seed buffer. The kernel is a pure function
//! of one seed plus the snapshot, so particles are evaluated in parallel with
//! rayon and no shared mutable state.
//!
//! Per particle:
//!
//! 1. Blend the previous and current formations at the eased weight
//! 2. Add organic drift
//! 3. Scale toward the origin by the particle's birth emergence
//! 4. Fade by distance from the vertical axis, scaled by density
//! 5. Push away from the cursor in screen space
//! 6. Pick a color from the three bands
//! 7. Fade by view depth; boost rare highlights
//! 8. Attenuate point size by view depth
//!
//! # Example
//!
//! ```ignore
//! let uniforms = FrameUniforms {
//!     current: Formation::Orbit,
//!     ..Default::default()
//! };
//! let mut out = vec![ParticleOutput::default(); seeds.len()];
//! evaluate_into(&seeds, &uniforms, &mut out);
//! ```

use bytemuck::{Pod, Zeroable};
use glam::{Mat4, Vec3};
use rayon::prelude::*;

use crate::birth::{emergence, smoothstep};
use crate::camera::Camera;
use crate::cursor::CursorInteraction;
use crate::formation::Formation;
use crate::noise::organic_drift;
use crate::palette::{band_opacity, ColorBands};
use crate::seed::{ParticleSeed, SeedBuffer};

/// Inner edge of the density fade at density 1.
pub const DENSITY_FADE_INNER: f32 = 18.0;
/// Outer edge of the density fade at density 1.
pub const DENSITY_FADE_OUTER: f32 = 30.0;
/// View depth where the depth fade begins.
pub const DEPTH_FADE_NEAR: f32 = 40.0;
/// View depth where particles are fully faded.
pub const DEPTH_FADE_FAR: f32 = 85.0;
/// Opacity ceiling before the rare boost.
pub const BASE_OPACITY: f32 = 0.88;
/// Pixels per unit of `size_factor * particle_size` at depth 1.
pub const SIZE_SCALE: f32 = 120.0;
/// Smallest rendered point size in pixels.
pub const MIN_POINT_SIZE: f32 = 0.5;
/// Largest rendered point size in pixels.
pub const MAX_POINT_SIZE: f32 = 10.0;
/// Depths below this are clamped before dividing.
pub const MIN_DEPTH: f32 = 0.001;

/// Frame-global inputs, read-only during evaluation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FrameUniforms {
    /// Clock time in seconds.
    pub time: f32,
    /// Animation speed multiplier.
    pub speed: f32,
    /// Formation being blended away from.
    pub previous: Formation,
    /// Formation being blended toward.
    pub current: Formation,
    /// Eased blend weight in [0, 1].
    pub blend: f32,
    /// Field-wide birth progress in [0, 1].
    pub birth_progress: f32,
    /// Radial density in [0, 1].
    pub density: f32,
    /// Point size multiplier.
    pub particle_size: f32,
    /// Cursor repulsion for this frame.
    pub cursor: CursorInteraction,
    /// Linear-RGB color bands.
    pub bands: ColorBands,
    /// World to view transform.
    pub view: Mat4,
    /// View to clip transform.
    pub proj: Mat4,
}

impl Default for FrameUniforms {
    /// A settled field: no transition, fully born, cursor disabled.
    fn default() -> Self {
        let camera = Camera::default();
        Self {
            time: 0.0,
            speed: 1.0,
            previous: Formation::Default,
            current: Formation::Default,
            blend: 1.0,
            birth_progress: 1.0,
            density: 1.0,
            particle_size: 0.5,
            cursor: CursorInteraction {
                cursor: glam::Vec2::ZERO,
                radius: 0.0,
            },
            bands: ColorBands::default(),
            view: camera.view_matrix(),
            proj: camera.projection_matrix(),
        }
    }
}

/// Renderable attributes for one particle.
///
/// Laid out for direct upload as a per-instance vertex buffer.
#[repr(C)]
#[derive(Debug, Clone, Copy, Default, PartialEq, Pod, Zeroable)]
pub struct ParticleOutput {
    /// World position.
    pub position: [f32; 3],
    /// Point size in pixels.
    pub size: f32,
    /// Linear RGB.
    pub color: [f32; 3],
    /// Opacity in [0, 1].
    pub opacity: f32,
}

impl ParticleOutput {
    /// World position as a vector.
    #[inline]
    pub fn position(&self) -> Vec3 {
        Vec3::from_array(self.position)
    }

    /// Whether every field is a finite number.
    pub fn is_finite(&self) -> bool {
        self.position.iter().chain(self.color.iter()).all(|v| v.is_finite())
            && self.size.is_finite()
            && self.opacity.is_finite()
    }
}

/// Formation position before drift, birth, and cursor.
///
/// Equals the previous formation at `blend == 0` and the current one at
/// `blend == 1`.
#[inline]
pub fn blended_position(offset: Vec3, u: &FrameUniforms) -> Vec3 {
    let from = u.previous.position(offset, u.time, u.speed);
    if u.previous == u.current {
        return from;
    }
    let to = u.current.position(offset, u.time, u.speed);
    from.lerp(to, u.blend)
}

/// Radial fade for a particle `spread` units from the vertical axis.
///
/// At density 0 the band collapses and every particle is faded out.
#[inline]
pub fn density_fade(spread: f32, density: f32) -> f32 {
    1.0 - smoothstep(DENSITY_FADE_INNER * density, DENSITY_FADE_OUTER * density, spread)
}

/// Fade for particles far from the camera.
#[inline]
pub fn depth_fade(view_depth: f32) -> f32 {
    1.0 - smoothstep(DEPTH_FADE_NEAR, DEPTH_FADE_FAR, view_depth)
}

/// Perspective-attenuated point size in pixels.
#[inline]
pub fn point_size(size_factor: f32, particle_size: f32, view_depth: f32) -> f32 {
    let size = size_factor * particle_size * SIZE_SCALE / view_depth.max(MIN_DEPTH);
    if size.is_nan() {
        return MIN_POINT_SIZE;
    }
    size.clamp(MIN_POINT_SIZE, MAX_POINT_SIZE)
}

/// Evaluate one particle.
pub fn evaluate_particle(seed: &ParticleSeed, u: &FrameUniforms) -> ParticleOutput {
    let offset = seed.offset();

    let mut p = blended_position(offset, u) + organic_drift(offset, u.time, u.speed);

    let birth = emergence(offset.x, u.birth_progress);
    p *= birth;

    let density = density_fade(p.truncate().length(), u.density);

    if u.cursor.is_enabled() {
        if let Some(projected) = Camera::project_with(&u.view, &u.proj, p) {
            p = u.cursor.repel(p, projected.ndc);
        }
    }

    let view_depth = Camera::view_depth_with(&u.view, p);
    let opacity = density * depth_fade(view_depth) * BASE_OPACITY * birth;

    ParticleOutput {
        position: p.to_array(),
        size: point_size(seed.size_factor, u.particle_size, view_depth),
        color: u.bands.color(seed.color_mix).to_array(),
        opacity: band_opacity(seed.color_mix, opacity).clamp(0.0, 1.0),
    }
}

/// Evaluate every seed into `out` in parallel.
///
/// Only the first `min(seeds.len(), out.len())` entries are written.
pub fn evaluate_into(seeds: &SeedBuffer, u: &FrameUniforms, out: &mut [ParticleOutput]) {
    let n = seeds.len().min(out.len());

    let offsets = seeds.offsets();
    let sizes = seeds.size_factors();
    let mixes = seeds.color_mix();

    out[..n].par_iter_mut().enumerate().for_each(|(i, slot)| {
        let seed = ParticleSeed::new(offsets[i], sizes[i], mixes[i]);
        *slot = evaluate_particle(&seed, u);
    });
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cursor::CursorState;
    use glam::Vec2;
    use proptest::prelude::*;

    fn seed(x: f32, y: f32, z: f32, mix: f32) -> ParticleSeed {
        ParticleSeed::new(Vec3::new(x, y, z), 1.0, mix)
    }

    #[test]
    fn test_evaluate_into_mismatched_lengths() {
        let seeds: SeedBuffer = (0..4).map(|i| seed(i as f32 * 0.2, 0.5, 0.5, 0.1)).collect();
        let u = FrameUniforms::default();

        let mut short = vec![ParticleOutput::default(); 2];
        evaluate_into(&seeds, &u, &mut short);
        assert_eq!(short[1], evaluate_particle(&seeds.get(1), &u));

        let mut long = vec![ParticleOutput::default(); 6];
        evaluate_into(&seeds, &u, &mut long);
        assert_eq!(long[3], evaluate_particle(&seeds.get(3), &u));
        assert_eq!(long[4], ParticleOutput::default());
        assert_eq!(long[5], ParticleOutput::default());
    }

    #[test]
    fn test_output_layout() {
        assert_eq!(std::mem::size_of::<ParticleOutput>(), 32);
    }

    #[test]
    fn test_blend_identities() {
        let offset = Vec3::new(0.3, 0.7, 0.2);
        let mut u = FrameUniforms {
            previous: Formation::Grid,
            current: Formation::Pulse,
            time: 3.0,
            blend: 0.0,
            ..Default::default()
        };
        assert_eq!(blended_position(offset, &u), Formation::Grid.position(offset, 3.0, 1.0));
        u.blend = 1.0;
        let at_one = blended_position(offset, &u);
        assert!((at_one - Formation::Pulse.position(offset, 3.0, 1.0)).length() < 1e-4);
    }

    #[test]
    fn test_unborn_particle_is_invisible_at_origin() {
        let u = FrameUniforms {
            birth_progress: 0.0,
            ..Default::default()
        };
        let out = evaluate_particle(&seed(0.4, 0.4, 0.4, 0.2), &u);
        assert_eq!(out.position(), Vec3::ZERO);
        assert_eq!(out.opacity, 0.0);
    }

    #[test]
    fn test_density_fade_band() {
        assert_eq!(density_fade(5.0, 1.0), 1.0);
        assert_eq!(density_fade(40.0, 1.0), 0.0);
        assert!((density_fade(24.0, 1.0) - 0.5).abs() < 1e-6);
        assert_eq!(density_fade(0.5, 0.0), 0.0);
    }

    #[test]
    fn test_zero_density_hides_everything() {
        let u = FrameUniforms {
            density: 0.0,
            time: 2.0,
            ..Default::default()
        };
        for i in 0..50 {
            let t = i as f32 / 50.0;
            let out = evaluate_particle(&seed(t, 1.0 - t, 0.5, t), &u);
            assert!(out.is_finite());
            assert_eq!(out.opacity, 0.0);
        }
    }

    #[test]
    fn test_depth_fade_and_size() {
        assert_eq!(depth_fade(10.0), 1.0);
        assert_eq!(depth_fade(90.0), 0.0);
        assert_eq!(point_size(1.0, 0.5, 15.0), 4.0);
        assert_eq!(point_size(2.0, 1.0, 0.0), MAX_POINT_SIZE);
        assert_eq!(point_size(0.4, 0.1, 80.0), MIN_POINT_SIZE);
        assert_eq!(point_size(1.0, 1.0, -3.0), MAX_POINT_SIZE);
    }

    #[test]
    fn test_rare_particles_are_brighter() {
        let u = FrameUniforms::default();
        let common = evaluate_particle(&seed(0.1, 0.5, 0.1, 0.3), &u);
        let rare = evaluate_particle(&seed(0.1, 0.5, 0.1, 0.95), &u);
        assert_eq!(rare.color, u.bands.rare.to_array());
        assert!(rare.opacity > common.opacity);
        assert!(rare.opacity <= 1.0);
    }

    #[test]
    fn test_cursor_pushes_nearby_particle() {
        let s = seed(0.1, 0.5, 0.1, 0.3);
        let calm = evaluate_particle(&s, &FrameUniforms::default());

        let projected = Camera::default().project(calm.position()).unwrap();
        let cursor = CursorState::new(projected.ndc - Vec2::new(0.05, 0.0));
        let u = FrameUniforms {
            cursor: CursorInteraction::new(cursor, 0.2),
            ..Default::default()
        };
        let pushed = evaluate_particle(&s, &u);

        let delta = pushed.position() - calm.position();
        assert!(delta.x > 0.0, "expected push away from cursor, got {delta:?}");
        assert!(delta.z.abs() < 1e-6);
    }

    #[test]
    fn test_parallel_matches_serial() {
        let seeds: SeedBuffer = (0..257)
            .map(|i| {
                let t = i as f32 / 257.0;
                seed(t, (t * 7.0).fract(), (t * 13.0).fract(), t)
            })
            .collect();
        let u = FrameUniforms {
            previous: Formation::Cosmic,
            current: Formation::Orbit,
            blend: 0.4,
            time: 12.0,
            birth_progress: 0.7,
            density: 0.6,
            ..Default::default()
        };
        let mut out = vec![ParticleOutput::default(); seeds.len()];
        evaluate_into(&seeds, &u, &mut out);

        for (i, got) in out.iter().enumerate() {
            assert_eq!(*got, evaluate_particle(&seeds.get(i), &u));
        }
    }

    proptest! {
        #[test]
        fn prop_outputs_are_finite(
            x in 0.0f32..1.0, y in 0.0f32..1.0, z in 0.0f32..1.0,
            mix in 0.0f32..=1.0,
            prev in 0usize..7, cur in 0usize..7,
            blend in 0.0f32..=1.0,
            birth in 0.0f32..=1.0,
            density in 0.0f32..=1.0,
            time in 0.0f32..10_000.0,
            cx in -1.0f32..1.0, cy in -1.0f32..1.0,
        ) {
            let u = FrameUniforms {
                time,
                speed: 0.3,
                previous: Formation::ALL[prev],
                current: Formation::ALL[cur],
                blend,
                birth_progress: birth,
                density,
                cursor: CursorInteraction::new(CursorState::new(Vec2::new(cx, cy)), 0.3),
                ..Default::default()
            };
            let out = evaluate_particle(&ParticleSeed::new(Vec3::new(x, y, z), 1.0, mix), &u);
            prop_assert!(out.is_finite());
            prop_assert!((0.0..=1.0).contains(&out.opacity));
            prop_assert!((MIN_POINT_SIZE..=MAX_POINT_SIZE).contains(&out.size));
        }
    }
}
