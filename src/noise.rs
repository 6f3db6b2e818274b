//! Compact 3D value noise for organic drift.
//!
//! Three noise lookups per particle give a slow breathing motion layered on
//! top of every formation. No textures and no tables, so the CPU kernel and a
//! shader port produce the same field.

use glam::Vec3;

/// Peak-to-peak amplitude of the drift on each axis.
pub const DRIFT_AMPLITUDE: f32 = 2.8;
/// Seed scale applied to the particle offset before sampling.
pub const DRIFT_SEED_SCALE: f32 = 5.3;
/// Clock scale applied to `time * speed` before sampling.
pub const DRIFT_TIME_SCALE: f32 = 0.12;

/// `fract(sin(n) * 43758.5453)`, in [0, 1).
#[inline]
pub fn hash(n: f32) -> f32 {
    let v = n.sin() * 43_758.547;
    v - v.floor()
}

/// Trilinear value noise with smoothstep weights, in [0, 1].
pub fn noise3(x: Vec3) -> f32 {
    let p = x.floor();
    let f = x - p;
    let f = f * f * (Vec3::splat(3.0) - 2.0 * f);

    let n = p.x + p.y * 57.0 + p.z * 113.0;
    let lerp = |a: f32, b: f32, t: f32| a + (b - a) * t;

    lerp(
        lerp(
            lerp(hash(n), hash(n + 1.0), f.x),
            lerp(hash(n + 57.0), hash(n + 58.0), f.x),
            f.y,
        ),
        lerp(
            lerp(hash(n + 113.0), hash(n + 114.0), f.x),
            lerp(hash(n + 170.0), hash(n + 171.0), f.x),
            f.y,
        ),
        f.z,
    )
}

/// Raw drift sample at `seed` and noise time `t`.
pub fn drift(seed: Vec3, t: f32) -> Vec3 {
    let s = seed * 0.45;
    Vec3::new(
        noise3(s + Vec3::new(0.0, 0.0, t)) - 0.5,
        noise3(s + Vec3::new(1.73, 9.21, t)) - 0.5,
        noise3(s + Vec3::new(3.40, 5.63, t)) - 0.5,
    ) * DRIFT_AMPLITUDE
}

/// Drift for a particle offset at clock `time` and animation `speed`.
#[inline]
pub fn organic_drift(offset: Vec3, time: f32, speed: f32) -> Vec3 {
    drift(offset * DRIFT_SEED_SCALE, time * DRIFT_TIME_SCALE * speed)
}
