//! The formation catalog.
//!
//! A formation maps a particle's seed offset to a world-space position at a
//! given time. All seven formations are pure functions with no shared state,
//! so any particle can be placed in any formation independently, and two
//! formations can be evaluated side by side for blending.
//!
//! | Index | Formation | Shape |
//! |-------|-----------|-------|
//! | 0 | [`Formation::Default`] | Uniform solid sphere, radius 22, centered at z = -10 |
//! | 1 | [`Formation::Cosmic`] | (3,2) torus knot with per-particle jitter |
//! | 2 | [`Formation::Scattered`] | 55 x 35 x 45 box scatter |
//! | 3 | [`Formation::Orbit`] | Six tilted concentric rings |
//! | 4 | [`Formation::Grid`] | 12 x 8 x 9 breathing lattice |
//! | 5 | [`Formation::Pulse`] | Sphere with a traveling radial wave |
//! | 6 | [`Formation::Converge`] | Tight flattened inward spiral |

use std::f32::consts::{PI, TAU};
use std::fmt;
use std::str::FromStr;

use glam::Vec3;
use serde::{Deserialize, Serialize};

use crate::error::UnknownFormation;

/// Signature shared by every formation: `(offset, time, speed) -> position`.
pub type FormationFn = fn(Vec3, f32, f32) -> Vec3;

/// Number of formations in the catalog.
pub const FORMATION_COUNT: usize = 7;

/// Lookup table indexed by [`Formation::index`].
pub const FORMATION_TABLE: [FormationFn; FORMATION_COUNT] = [
    default_sphere,
    cosmic_knot,
    scattered_box,
    orbit_rings,
    grid_lattice,
    pulse_blob,
    converge_spiral,
];

/// A named formation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Formation {
    /// Gentle uniform sphere (fallback).
    #[default]
    Default,
    /// Swirling torus-knot clusters.
    Cosmic,
    /// Loose drifting constellation.
    Scattered,
    /// Slow concentric orbital rings.
    Orbit,
    /// Geometric lattice that breathes.
    Grid,
    /// Organic blob that pulses outward.
    Pulse,
    /// Particles drawn inward to a center point.
    Converge,
}

impl Formation {
    /// Every formation in index order.
    pub const ALL: [Formation; FORMATION_COUNT] = [
        Formation::Default,
        Formation::Cosmic,
        Formation::Scattered,
        Formation::Orbit,
        Formation::Grid,
        Formation::Pulse,
        Formation::Converge,
    ];

    /// Position of this formation in the catalog.
    #[inline]
    pub fn index(self) -> usize {
        self as usize
    }

    /// Formation at an integer index, if one exists.
    pub fn from_index(index: usize) -> Option<Formation> {
        Self::ALL.get(index).copied()
    }

    /// Resolve a possibly fractional index.
    ///
    /// Rounds to the nearest integer; anything outside `0..=6` (including
    /// NaN) falls back to [`Formation::Default`].
    pub fn from_index_f32(index: f32) -> Formation {
        let rounded = (index + 0.5).floor();
        if rounded.is_finite() && rounded >= 0.0 && rounded < FORMATION_COUNT as f32 {
            Self::ALL[rounded as usize]
        } else {
            Formation::Default
        }
    }

    /// Lower-case name used in configuration files.
    pub fn name(self) -> &'static str {
        match self {
            Formation::Default => "default",
            Formation::Cosmic => "cosmic",
            Formation::Scattered => "scattered",
            Formation::Orbit => "orbit",
            Formation::Grid => "grid",
            Formation::Pulse => "pulse",
            Formation::Converge => "converge",
        }
    }

    /// Evaluate this formation for one particle.
    #[inline]
    pub fn position(self, offset: Vec3, time: f32, speed: f32) -> Vec3 {
        FORMATION_TABLE[self.index()](offset, time, speed)
    }
}

impl fmt::Display for Formation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Formation {
    type Err = UnknownFormation;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .iter()
            .copied()
            .find(|f| f.name().eq_ignore_ascii_case(s))
            .ok_or_else(|| UnknownFormation(s.to_string()))
    }
}

/// Dispatch by (possibly fractional) index.
///
/// Rounds to nearest, out-of-range falls back to formation 0.
#[inline]
pub fn position_for_index(index: f32, offset: Vec3, time: f32, speed: f32) -> Vec3 {
    Formation::from_index_f32(index).position(offset, time, speed)
}

/// Unit direction plus `cos(theta)` for the spherical-inversion formations.
#[inline]
fn sphere_direction(o: Vec3) -> (f32, f32, f32) {
    let phi = o.x * TAU;
    let cos_t = 2.0 * o.y - 1.0;
    let sin_t = (1.0 - cos_t * cos_t).max(0.0).sqrt();
    (phi, cos_t, sin_t)
}

/// 0: uniform-density solid sphere.
pub fn default_sphere(o: Vec3, _time: f32, _speed: f32) -> Vec3 {
    let (phi, cos_t, sin_t) = sphere_direction(o);
    let r = o.z.max(0.0).cbrt() * 22.0;
    Vec3::new(
        r * sin_t * phi.cos(),
        r * sin_t * phi.sin(),
        r * cos_t - 10.0,
    )
}

/// 1: (3,2) torus knot, several wraps, jittered per particle.
pub fn cosmic_knot(o: Vec3, _time: f32, _speed: f32) -> Vec3 {
    const MAJOR: f32 = 7.0;
    const MINOR: f32 = 3.5;
    const P: f32 = 3.0;
    const Q: f32 = 2.0;

    let angle = o.x * 3.0 * TAU;
    let qp = Q / P * angle;
    let ring = MAJOR + MINOR * qp.cos();
    let knot = Vec3::new(ring * angle.cos(), ring * angle.sin(), MINOR * qp.sin());
    knot + (o - Vec3::splat(0.5)) * 7.0
}

/// 2: independent per-axis scatter, static.
pub fn scattered_box(o: Vec3, _time: f32, _speed: f32) -> Vec3 {
    (o - Vec3::splat(0.5)) * Vec3::new(55.0, 35.0, 45.0)
}

/// 3: six concentric rings; inner rings spin faster, each ring tilted.
pub fn orbit_rings(o: Vec3, time: f32, speed: f32) -> Vec3 {
    let ring = (o.x * 6.0).floor().clamp(0.0, 5.0);
    let radius = (ring + 1.0) * 4.0;
    let angular = (0.06 - ring * 0.008) * speed;
    let angle = o.y * TAU + time * angular;
    let incline = (ring - 2.5) * 0.35;

    Vec3::new(
        angle.cos() * radius,
        angle.sin() * radius * incline.sin() + (o.z - 0.5) * 4.0,
        angle.sin() * radius * incline.cos() - 6.0,
    )
}

/// 4: fixed 12 x 8 x 9 lattice with a small breathing displacement.
pub fn grid_lattice(o: Vec3, time: f32, speed: f32) -> Vec3 {
    const COLS: u32 = 12;
    const ROWS: u32 = 8;
    const DEPTH: u32 = 9;
    const CELLS: u32 = COLS * ROWS * DEPTH;

    let id = ((o.x * CELLS as f32).floor().max(0.0) as u32).min(CELLS - 1);
    let col = (id % COLS) as f32;
    let row = ((id / COLS) % ROWS) as f32;
    let dep = (id / (COLS * ROWS)) as f32;

    let base = Vec3::new(
        (col / (COLS - 1) as f32 - 0.5) * 24.0,
        (row / (ROWS - 1) as f32 - 0.5) * 16.0,
        (dep / (DEPTH - 1) as f32 - 0.5) * 12.0 - 5.0,
    );
    let b = (time * 0.4 * speed + o.z * TAU + o.x * PI).sin() * 0.5;
    base + Vec3::new(b * 0.4, b * 0.3, b * 0.2)
}

/// 5: sphere whose radius rides a traveling sine wave.
pub fn pulse_blob(o: Vec3, time: f32, speed: f32) -> Vec3 {
    let (phi, cos_t, sin_t) = sphere_direction(o);
    let wave = (time * 1.1 * speed + phi * 2.5 + (1.0 - cos_t) * PI).sin();
    let r = 3.5 + o.z * 9.0 + wave * 2.5;
    Vec3::new(
        r * sin_t * phi.cos(),
        r * sin_t * phi.sin() * 0.65,
        r * cos_t - 4.0,
    )
}

/// 6: small spiral band, spin grows with the third offset.
pub fn converge_spiral(o: Vec3, time: f32, speed: f32) -> Vec3 {
    let phi = o.x * TAU + time * 0.18 * speed;
    let cos_t = 2.0 * o.y - 1.0;
    let sin_t = (1.0 - cos_t * cos_t).max(0.0).sqrt();
    let r = 0.8 + o.z * 4.0;
    let spin = phi + o.z * 5.0;
    Vec3::new(r * sin_t * spin.cos(), r * cos_t * 0.25, r * sin_t * spin.sin())
}
