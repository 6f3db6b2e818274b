//! Color temperature presets and three-band particle coloring.
//!
//! Each temperature supplies a primary, a secondary, and a rare color. A
//! particle's `color_mix` seed picks where it sits:
//!
//! | `color_mix` | Color |
//! |-------------|-------|
//! | `> 0.9` | rare |
//! | `(0.5, 0.9]` | secondary → rare, weight `(mix - 0.5) * 2` |
//! | `<= 0.5` | primary → secondary, weight `mix * 2` |
//!
//! Rare particles also get a 1.6x opacity boost so they read as highlights.

use std::fmt;
use std::str::FromStr;

use glam::Vec3;
use serde::{Deserialize, Serialize};

use crate::error::PaletteError;

/// Mix values strictly above this are rare.
pub const RARE_THRESHOLD: f32 = 0.9;
/// Upper bound of the primary → secondary blend.
pub const SECONDARY_THRESHOLD: f32 = 0.5;
/// Opacity multiplier for rare particles.
pub const RARE_OPACITY_BOOST: f32 = 1.6;

/// Named color temperature.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ColorTemp {
    /// Muted cyan, soft violet, dusty lavender.
    #[default]
    Cool,
    /// Amber, sand, pale gold.
    Warm,
    /// Deep violet, rose, dusty pink.
    Purple,
    /// Antique gold, bronze, cream.
    Gold,
    /// Steel blue, slate, silver.
    Ice,
    /// Deep purple, navy, electric blue.
    Storm,
    /// Muted rose, mauve, dusty pink.
    Rose,
}

impl ColorTemp {
    /// Every temperature, in cycling order.
    pub const ALL: [ColorTemp; 7] = [
        ColorTemp::Cool,
        ColorTemp::Warm,
        ColorTemp::Purple,
        ColorTemp::Gold,
        ColorTemp::Ice,
        ColorTemp::Storm,
        ColorTemp::Rose,
    ];

    /// Lower-case name used in configuration files.
    pub fn name(self) -> &'static str {
        match self {
            ColorTemp::Cool => "cool",
            ColorTemp::Warm => "warm",
            ColorTemp::Purple => "purple",
            ColorTemp::Gold => "gold",
            ColorTemp::Ice => "ice",
            ColorTemp::Storm => "storm",
            ColorTemp::Rose => "rose",
        }
    }

    /// `[primary, secondary, rare]` as sRGB hex.
    pub fn hex(self) -> [&'static str; 3] {
        match self {
            ColorTemp::Cool => ["#3ab5cc", "#7b5ea7", "#a98fc4"],
            ColorTemp::Warm => ["#c47a3a", "#b89060", "#d4b896"],
            ColorTemp::Purple => ["#7a4fa8", "#b06090", "#c4a0b8"],
            ColorTemp::Gold => ["#c8a84b", "#b87840", "#e0d0a0"],
            ColorTemp::Ice => ["#88aac8", "#7080b8", "#b0bcd8"],
            ColorTemp::Storm => ["#5a3a8a", "#2a3868", "#6080a8"],
            ColorTemp::Rose => ["#b85068", "#9060a0", "#c090b0"],
        }
    }

    /// Linear-RGB bands for this temperature.
    pub fn bands(self) -> ColorBands {
        let [p, s, r] = self.hex();
        // The table above is static and well-formed
        ColorBands::from_hex(p, s, r).unwrap_or_default()
    }

    /// Next temperature in cycling order.
    pub fn next(self) -> ColorTemp {
        let i = Self::ALL.iter().position(|&t| t == self).unwrap_or(0);
        Self::ALL[(i + 1) % Self::ALL.len()]
    }
}

impl fmt::Display for ColorTemp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for ColorTemp {
    type Err = PaletteError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .iter()
            .copied()
            .find(|t| t.name().eq_ignore_ascii_case(s))
            .ok_or_else(|| PaletteError::UnknownTemp(s.to_string()))
    }
}

/// Parse `#rrggbb` into sRGB components in [0, 1].
pub fn parse_hex(hex: &str) -> Result<Vec3, PaletteError> {
    let digits = hex.strip_prefix('#').unwrap_or(hex);
    if digits.len() != 6 || !digits.is_ascii() {
        return Err(PaletteError::InvalidHex(hex.to_string()));
    }
    let channel = |i: usize| {
        u8::from_str_radix(&digits[i..i + 2], 16)
            .map(|v| v as f32 / 255.0)
            .map_err(|_| PaletteError::InvalidHex(hex.to_string()))
    };
    Ok(Vec3::new(channel(0)?, channel(2)?, channel(4)?))
}

/// sRGB transfer function inverse, per channel.
pub fn srgb_to_linear(c: Vec3) -> Vec3 {
    let f = |v: f32| {
        if v <= 0.04045 {
            v / 12.92
        } else {
            ((v + 0.055) / 1.055).powf(2.4)
        }
    };
    Vec3::new(f(c.x), f(c.y), f(c.z))
}

/// The three color bands in linear RGB.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ColorBands {
    /// Most common color.
    pub primary: Vec3,
    /// Mid band.
    pub secondary: Vec3,
    /// Highlight color.
    pub rare: Vec3,
}

impl Default for ColorBands {
    fn default() -> Self {
        Self {
            primary: Vec3::new(0.0, 0.831, 1.0),
            secondary: Vec3::new(0.753, 0.518, 0.988),
            rare: Vec3::new(0.941, 0.671, 0.988),
        }
    }
}

impl ColorBands {
    /// Build from three sRGB hex strings.
    pub fn from_hex(primary: &str, secondary: &str, rare: &str) -> Result<Self, PaletteError> {
        Ok(Self {
            primary: srgb_to_linear(parse_hex(primary)?),
            secondary: srgb_to_linear(parse_hex(secondary)?),
            rare: srgb_to_linear(parse_hex(rare)?),
        })
    }

    /// Color for a particle's mix value.
    #[inline]
    pub fn color(&self, mix: f32) -> Vec3 {
        if is_rare(mix) {
            self.rare
        } else if mix > SECONDARY_THRESHOLD {
            self.secondary.lerp(self.rare, (mix - SECONDARY_THRESHOLD) * 2.0)
        } else {
            self.primary.lerp(self.secondary, mix.max(0.0) * 2.0)
        }
    }
}

/// Whether a mix value falls in the rare band.
#[inline]
pub fn is_rare(mix: f32) -> bool {
    mix > RARE_THRESHOLD
}

/// Apply the rare highlight boost to a base opacity.
#[inline]
pub fn band_opacity(mix: f32, opacity: f32) -> f32 {
    if is_rare(mix) {
        (opacity * RARE_OPACITY_BOOST).min(1.0)
    } else {
        opacity
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn bands() -> ColorBands {
        ColorBands {
            primary: Vec3::new(1.0, 0.0, 0.0),
            secondary: Vec3::new(0.0, 1.0, 0.0),
            rare: Vec3::new(0.0, 0.0, 1.0),
        }
    }

    #[test]
    fn test_parse_hex() {
        assert_eq!(parse_hex("#ff0000").unwrap(), Vec3::new(1.0, 0.0, 0.0));
        assert_eq!(parse_hex("00ff00").unwrap(), Vec3::new(0.0, 1.0, 0.0));
        assert!(parse_hex("#fff").is_err());
        assert!(parse_hex("#gg0000").is_err());
        assert!(parse_hex("#ééé").is_err());
    }

    #[test]
    fn test_srgb_to_linear_endpoints() {
        assert_eq!(srgb_to_linear(Vec3::ZERO), Vec3::ZERO);
        assert!((srgb_to_linear(Vec3::ONE) - Vec3::ONE).length() < 1e-6);
        // Mid grey is darker in linear space
        assert!(srgb_to_linear(Vec3::splat(0.5)).x < 0.25);
    }

    #[test]
    fn test_every_temp_parses() {
        for temp in ColorTemp::ALL {
            let [p, s, r] = temp.hex();
            assert!(ColorBands::from_hex(p, s, r).is_ok(), "{temp}");
            assert_ne!(temp.bands(), ColorBands::default());
        }
    }

    #[test]
    fn test_band_endpoints() {
        let b = bands();
        assert_eq!(b.color(0.0), b.primary);
        assert_eq!(b.color(1.0), b.rare);
        assert_eq!(b.color(0.5), b.secondary);
    }

    #[test]
    fn test_rare_boundary_is_exclusive() {
        let b = bands();
        let at = b.color(0.9);
        assert!(!is_rare(0.9));
        assert_ne!(at, b.rare);
        // 0.9 is the secondary → rare blend at weight 0.8
        assert!((at - Vec3::new(0.0, 0.2, 0.8)).length() < 1e-5);
        assert_eq!(b.color(0.9001), b.rare);
    }

    #[test]
    fn test_lower_blend() {
        let b = bands();
        assert!((b.color(0.25) - Vec3::new(0.5, 0.5, 0.0)).length() < 1e-6);
    }

    #[test]
    fn test_rare_opacity_boost_capped() {
        assert_eq!(band_opacity(0.95, 0.5), 0.8);
        assert_eq!(band_opacity(0.95, 0.9), 1.0);
        assert_eq!(band_opacity(0.9, 0.5), 0.5);
        assert_eq!(band_opacity(0.1, 0.5), 0.5);
    }

    #[test]
    fn test_cycle_and_parse() {
        assert_eq!(ColorTemp::Rose.next(), ColorTemp::Cool);
        assert_eq!(ColorTemp::Cool.next(), ColorTemp::Warm);
        assert_eq!("storm".parse::<ColorTemp>(), Ok(ColorTemp::Storm));
        assert!(matches!("neon".parse::<ColorTemp>(), Err(PaletteError::UnknownTemp(_))));
    }
}
