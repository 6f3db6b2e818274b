//! Per-particle static attributes.
//!
//! Every particle is born with a [`ParticleSeed`]: three uniform offsets, a
//! size factor, and a color mix value. Seeds are generated once when a field
//! is created and never change afterwards, so a particle's trajectory through
//! every formation is a pure function of its seed, the clock, and the scene
//! configuration.
//!
//! Seeds are stored as a structure of arrays ([`SeedBuffer`]) so the frame
//! pass can stream them without per-particle allocation.
//!
//! # Example
//!
//! ```ignore
//! use rand::SeedableRng;
//! use voidfield::seed::{SeedGenerator, SeedProfile};
//!
//! let mut rng = rand::rngs::SmallRng::seed_from_u64(7);
//! let seeds = SeedGenerator::new(SeedProfile::default()).generate_with(30_000, &mut rng);
//! assert_eq!(seeds.len(), 30_000);
//! ```

use glam::Vec3;
use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};

/// Smallest size factor a seed can receive.
pub const MIN_SIZE_FACTOR: f32 = 0.4;
/// Largest size factor a seed can receive.
pub const MAX_SIZE_FACTOR: f32 = 2.0;
/// Lower bound of the rare color band.
pub const RARE_MIX_MIN: f32 = 0.92;

/// Immutable attributes of a single particle.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ParticleSeed {
    /// Three independent uniforms in [0, 1).
    pub offset: [f32; 3],
    /// Point size multiplier in [0.4, 2.0].
    pub size_factor: f32,
    /// Color band selector in [0, 1].
    pub color_mix: f32,
}

impl ParticleSeed {
    /// Build a seed from explicit values.
    pub fn new(offset: Vec3, size_factor: f32, color_mix: f32) -> Self {
        Self {
            offset: offset.to_array(),
            size_factor,
            color_mix,
        }
    }

    /// Offset as a vector.
    #[inline]
    pub fn offset(&self) -> Vec3 {
        Vec3::from_array(self.offset)
    }
}

/// Distribution parameters for the color mix attribute.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SeedProfile {
    /// Probability that a particle lands in the rare band.
    pub rare_probability: f32,
    /// Power applied to the uniform draw for non-rare particles.
    /// Values above 1 bias toward the primary color.
    pub bias_exponent: f32,
    /// Upper bound of the non-rare color mix range.
    pub max_common_mix: f32,
}

impl SeedProfile {
    /// Denser highlight variant: 5% rare, gentle bias.
    pub const LUMINOUS: SeedProfile = SeedProfile {
        rare_probability: 0.05,
        bias_exponent: 1.5,
        max_common_mix: 0.85,
    };

    /// Sparse highlight variant: 1.5% rare, strong bias toward primary.
    pub const SPARSE: SeedProfile = SeedProfile {
        rare_probability: 0.015,
        bias_exponent: 2.0,
        max_common_mix: 0.75,
    };
}

impl Default for SeedProfile {
    fn default() -> Self {
        Self::LUMINOUS
    }
}

/// Structure-of-arrays storage for particle seeds.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SeedBuffer {
    offsets: Vec<Vec3>,
    size_factors: Vec<f32>,
    color_mix: Vec<f32>,
}

impl SeedBuffer {
    /// Empty buffer with room for `capacity` seeds.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            offsets: Vec::with_capacity(capacity),
            size_factors: Vec::with_capacity(capacity),
            color_mix: Vec::with_capacity(capacity),
        }
    }

    /// Append a seed.
    pub fn push(&mut self, seed: ParticleSeed) {
        self.offsets.push(seed.offset());
        self.size_factors.push(seed.size_factor);
        self.color_mix.push(seed.color_mix);
    }

    /// Number of seeds.
    #[inline]
    pub fn len(&self) -> usize {
        self.offsets.len()
    }

    /// Whether the buffer holds no seeds.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.offsets.is_empty()
    }

    /// Reassemble the seed at `index`.
    ///
    /// # Panics
    ///
    /// Panics if `index >= len()`.
    #[inline]
    pub fn get(&self, index: usize) -> ParticleSeed {
        ParticleSeed {
            offset: self.offsets[index].to_array(),
            size_factor: self.size_factors[index],
            color_mix: self.color_mix[index],
        }
    }

    /// All offsets.
    pub fn offsets(&self) -> &[Vec3] {
        &self.offsets
    }

    /// All size factors.
    pub fn size_factors(&self) -> &[f32] {
        &self.size_factors
    }

    /// All color mix values.
    pub fn color_mix(&self) -> &[f32] {
        &self.color_mix
    }

    /// Iterate seeds in index order.
    pub fn iter(&self) -> impl Iterator<Item = ParticleSeed> + '_ {
        (0..self.len()).map(move |i| self.get(i))
    }
}

impl FromIterator<ParticleSeed> for SeedBuffer {
    fn from_iter<I: IntoIterator<Item = ParticleSeed>>(iter: I) -> Self {
        let iter = iter.into_iter();
        let mut buffer = SeedBuffer::with_capacity(iter.size_hint().0);
        for seed in iter {
            buffer.push(seed);
        }
        buffer
    }
}

/// Produces seed buffers from a random source.
#[derive(Debug, Clone, Copy, Default)]
pub struct SeedGenerator {
    profile: SeedProfile,
}

impl SeedGenerator {
    /// Create a generator with the given color mix profile.
    pub fn new(profile: SeedProfile) -> Self {
        Self { profile }
    }

    /// The color mix profile in use.
    pub fn profile(&self) -> SeedProfile {
        self.profile
    }

    /// Generate `count` seeds from a time-seeded RNG.
    pub fn generate(&self, count: usize) -> SeedBuffer {
        let seed = std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .map(|d| d.as_nanos() as u64)
            .unwrap_or(42);
        self.generate_with(count, &mut SmallRng::seed_from_u64(seed))
    }

    /// Generate `count` seeds from the supplied RNG.
    ///
    /// Identical RNG state yields identical buffers.
    pub fn generate_with<R: Rng + ?Sized>(&self, count: usize, rng: &mut R) -> SeedBuffer {
        let mut buffer = SeedBuffer::with_capacity(count);
        for _ in 0..count {
            buffer.push(self.sample(rng));
        }
        buffer
    }

    /// Draw a single seed.
    pub fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> ParticleSeed {
        let offset = Vec3::new(rng.gen(), rng.gen(), rng.gen());
        let size_factor = rng.gen_range(MIN_SIZE_FACTOR..=MAX_SIZE_FACTOR);

        let color_mix = if rng.gen::<f32>() < self.profile.rare_probability {
            rng.gen_range(RARE_MIX_MIN..=1.0)
        } else {
            rng.gen::<f32>().powf(self.profile.bias_exponent) * self.profile.max_common_mix
        };

        ParticleSeed::new(offset, size_factor, color_mix)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rng() -> SmallRng {
        SmallRng::seed_from_u64(0x5eed)
    }

    #[test]
    fn test_generate_exact_count() {
        let gen = SeedGenerator::default();
        assert_eq!(gen.generate_with(1234, &mut rng()).len(), 1234);
        assert!(gen.generate_with(0, &mut rng()).is_empty());
        assert_eq!(gen.generate(17).len(), 17);
    }

    #[test]
    fn test_attribute_ranges() {
        let seeds = SeedGenerator::default().generate_with(20_000, &mut rng());
        for seed in seeds.iter() {
            for o in seed.offset {
                assert!((0.0..1.0).contains(&o));
            }
            assert!((MIN_SIZE_FACTOR..=MAX_SIZE_FACTOR).contains(&seed.size_factor));
            assert!((0.0..=1.0).contains(&seed.color_mix));
        }
    }

    #[test]
    fn test_color_mix_bands() {
        let profile = SeedProfile::SPARSE;
        let seeds = SeedGenerator::new(profile).generate_with(50_000, &mut rng());

        let rare = seeds.color_mix().iter().filter(|&&m| m >= RARE_MIX_MIN).count();
        let common_max = seeds
            .color_mix()
            .iter()
            .copied()
            .filter(|&m| m < RARE_MIX_MIN)
            .fold(0.0f32, f32::max);

        // Nothing falls in the gap between the two bands
        assert!(common_max <= profile.max_common_mix);

        // ~1.5% of 50k = 750
        assert!(rare > 400 && rare < 1_100, "rare count {rare}");
    }

    #[test]
    fn test_bias_toward_primary() {
        let seeds = SeedGenerator::new(SeedProfile::SPARSE).generate_with(20_000, &mut rng());
        let common: Vec<f32> = seeds
            .color_mix()
            .iter()
            .copied()
            .filter(|&m| m < RARE_MIX_MIN)
            .collect();
        let below_half = common.iter().filter(|&&m| m < 0.375).count();

        // x^2 * 0.75 < 0.375 whenever x < 0.707
        assert!(below_half as f32 / common.len() as f32 > 0.65);
    }

    #[test]
    fn test_deterministic_with_same_rng() {
        let gen = SeedGenerator::default();
        let a = gen.generate_with(256, &mut rng());
        let b = gen.generate_with(256, &mut rng());
        assert_eq!(a, b);
    }

    #[test]
    fn test_iter_collect_round_trip() {
        let seeds = SeedGenerator::default().generate_with(8, &mut rng());
        let rebuilt: SeedBuffer = seeds.iter().collect();
        assert_eq!(rebuilt, seeds);
    }
}
