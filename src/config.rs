//! Scene configuration.
//!
//! A [`SceneConfig`] is the only externally mutable input to the void. It is
//! read once per frame and applied between frames, never mid-evaluation.
//!
//! Pages pick a named [`ScenePreset`] and may override individual fields:
//!
//! ```ignore
//! let config = SceneConfig::resolve("about", &SceneOverrides {
//!     density: Some(0.8),
//!     ..Default::default()
//! })?;
//! config.save("about.json")?;
//! ```

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;
use crate::formation::Formation;
use crate::palette::ColorTemp;

/// Full scene configuration.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SceneConfig {
    /// Target formation.
    pub formation: Formation,
    /// Radial density in [0, 1]; lower values fade the outer field.
    pub density: f32,
    /// Color temperature preset.
    pub color_temp: ColorTemp,
    /// Point size multiplier.
    pub particle_size: f32,
    /// Animation speed multiplier.
    pub speed: f32,
    /// Cursor influence radius in pixels.
    pub cursor_influence: f32,
    /// Formation blend time in milliseconds.
    pub transition_duration: f32,
}

impl Default for SceneConfig {
    fn default() -> Self {
        Self {
            formation: Formation::Default,
            density: 0.5,
            color_temp: ColorTemp::Cool,
            particle_size: 0.5,
            speed: 0.3,
            cursor_influence: 120.0,
            transition_duration: 1200.0,
        }
    }
}

impl SceneConfig {
    /// Preset `name` with `overrides` applied on top.
    pub fn resolve(name: &str, overrides: &SceneOverrides) -> Result<Self, ConfigError> {
        let preset = ScenePreset::find(name).ok_or_else(|| ConfigError::UnknownPreset(name.to_string()))?;
        Ok(overrides.apply(preset.config()))
    }

    /// Copy with malformed values degraded to something renderable.
    ///
    /// Non-finite scalars fall back to the default, density clamps to
    /// [0, 1], and negative magnitudes clamp to 0.
    pub fn sanitized(&self) -> Self {
        let fallback = Self::default();
        let finite = |v: f32, d: f32| if v.is_finite() { v } else { d };

        Self {
            formation: self.formation,
            color_temp: self.color_temp,
            density: finite(self.density, fallback.density).clamp(0.0, 1.0),
            particle_size: finite(self.particle_size, fallback.particle_size).max(0.0),
            speed: finite(self.speed, fallback.speed).max(0.0),
            cursor_influence: finite(self.cursor_influence, fallback.cursor_influence).max(0.0),
            transition_duration: finite(self.transition_duration, fallback.transition_duration).max(0.0),
        }
    }

    /// Save the configuration to a JSON file.
    pub fn save(&self, path: impl AsRef<Path>) -> Result<(), ConfigError> {
        let json = serde_json::to_string_pretty(self)?;
        fs::write(path, json)?;
        Ok(())
    }

    /// Load a configuration from a JSON file.
    ///
    /// Missing fields take their default values.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let json = fs::read_to_string(path)?;
        Self::from_json(&json)
    }

    /// Parse a configuration from a JSON string.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(json)?)
    }
}

/// Partial configuration; `None` fields leave the base untouched.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SceneOverrides {
    pub formation: Option<Formation>,
    pub density: Option<f32>,
    pub color_temp: Option<ColorTemp>,
    pub particle_size: Option<f32>,
    pub speed: Option<f32>,
    pub cursor_influence: Option<f32>,
    pub transition_duration: Option<f32>,
}

impl SceneOverrides {
    /// Merge onto `base`.
    pub fn apply(&self, base: SceneConfig) -> SceneConfig {
        SceneConfig {
            formation: self.formation.unwrap_or(base.formation),
            density: self.density.unwrap_or(base.density),
            color_temp: self.color_temp.unwrap_or(base.color_temp),
            particle_size: self.particle_size.unwrap_or(base.particle_size),
            speed: self.speed.unwrap_or(base.speed),
            cursor_influence: self.cursor_influence.unwrap_or(base.cursor_influence),
            transition_duration: self.transition_duration.unwrap_or(base.transition_duration),
        }
    }

    /// Whether every field is `None`.
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}

/// A named page configuration.
pub struct ScenePreset {
    pub name: &'static str,
    pub description: &'static str,
    pub config: fn() -> SceneConfig,
}

impl ScenePreset {
    /// Look up a preset by name, ignoring case.
    pub fn find(name: &str) -> Option<&'static ScenePreset> {
        PRESETS.iter().find(|p| p.name.eq_ignore_ascii_case(name))
    }

    /// Build this preset's configuration.
    pub fn config(&self) -> SceneConfig {
        (self.config)()
    }
}

pub static PRESETS: &[ScenePreset] = &[
    ScenePreset {
        name: "home",
        description: "Dense cosmic knot in cool tones",
        config: || SceneConfig {
            formation: Formation::Cosmic,
            density: 1.0,
            color_temp: ColorTemp::Cool,
            particle_size: 0.6,
            speed: 0.4,
            cursor_influence: 140.0,
            transition_duration: 1500.0,
        },
    },
    ScenePreset {
        name: "work",
        description: "Warm scattered constellation",
        config: || SceneConfig {
            formation: Formation::Scattered,
            density: 0.6,
            color_temp: ColorTemp::Warm,
            particle_size: 0.4,
            speed: 0.25,
            cursor_influence: 100.0,
            transition_duration: 1000.0,
        },
    },
    ScenePreset {
        name: "about",
        description: "Slow purple orbital rings",
        config: || SceneConfig {
            formation: Formation::Orbit,
            density: 0.4,
            color_temp: ColorTemp::Purple,
            particle_size: 0.5,
            speed: 0.2,
            cursor_influence: 80.0,
            transition_duration: 1800.0,
        },
    },
    ScenePreset {
        name: "services",
        description: "Icy breathing lattice",
        config: || SceneConfig {
            formation: Formation::Grid,
            density: 0.5,
            color_temp: ColorTemp::Ice,
            particle_size: 0.35,
            speed: 0.15,
            cursor_influence: 120.0,
            transition_duration: 1200.0,
        },
    },
    ScenePreset {
        name: "team",
        description: "Rose blob with a traveling pulse",
        config: || SceneConfig {
            formation: Formation::Pulse,
            density: 0.45,
            color_temp: ColorTemp::Rose,
            particle_size: 0.55,
            speed: 0.35,
            cursor_influence: 160.0,
            transition_duration: 1400.0,
        },
    },
    ScenePreset {
        name: "contact",
        description: "Golden inward spiral",
        config: || SceneConfig {
            formation: Formation::Converge,
            density: 0.3,
            color_temp: ColorTemp::Gold,
            particle_size: 0.5,
            speed: 0.3,
            cursor_influence: 200.0,
            transition_duration: 1000.0,
        },
    },
];

/// Process-wide configuration holder.
///
/// Owned by the orchestration layer; the void reads [`SceneStore::config`]
/// between frames.
#[derive(Debug, Clone, Default)]
pub struct SceneStore {
    config: SceneConfig,
    revision: u64,
}

impl SceneStore {
    /// Store holding `config`.
    pub fn new(config: SceneConfig) -> Self {
        Self { config, revision: 0 }
    }

    /// Current configuration.
    pub fn config(&self) -> SceneConfig {
        self.config
    }

    /// Bumped on every change; lets readers skip unchanged frames.
    pub fn revision(&self) -> u64 {
        self.revision
    }

    /// Merge a partial update.
    pub fn set(&mut self, overrides: &SceneOverrides) {
        if overrides.is_empty() {
            return;
        }
        self.config = overrides.apply(self.config);
        self.revision += 1;
        tracing::debug!(formation = %self.config.formation, color = %self.config.color_temp, "scene config merged");
    }

    /// Replace the configuration wholesale.
    pub fn replace(&mut self, config: SceneConfig) {
        self.config = config;
        self.revision += 1;
        tracing::debug!(formation = %config.formation, color = %config.color_temp, "scene config replaced");
    }

    /// Switch to a named preset.
    pub fn apply_preset(&mut self, name: &str) -> Result<(), ConfigError> {
        let preset = ScenePreset::find(name).ok_or_else(|| ConfigError::UnknownPreset(name.to_string()))?;
        tracing::info!(preset = preset.name, "scene preset applied");
        self.replace(preset.config());
        Ok(())
    }

    /// Back to [`SceneConfig::default`].
    pub fn reset(&mut self) {
        self.config = SceneConfig::default();
        self.revision += 1;
        tracing::info!("scene config reset");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = SceneConfig::default();
        assert_eq!(config.formation, Formation::Default);
        assert_eq!(config.color_temp, ColorTemp::Cool);
        assert_eq!(config.density, 0.5);
        assert_eq!(config.cursor_influence, 120.0);
        assert_eq!(config.transition_duration, 1200.0);
    }

    #[test]
    fn test_every_preset_resolves() {
        for preset in PRESETS {
            let config = SceneConfig::resolve(preset.name, &SceneOverrides::default()).unwrap();
            assert_eq!(config, preset.config());
            assert_eq!(config.sanitized(), config);
        }
        assert_eq!(SceneConfig::resolve("HOME", &SceneOverrides::default()).unwrap().formation, Formation::Cosmic);
    }

    #[test]
    fn test_resolve_applies_overrides() {
        let overrides = SceneOverrides {
            density: Some(0.9),
            color_temp: Some(ColorTemp::Storm),
            ..Default::default()
        };
        let config = SceneConfig::resolve("about", &overrides).unwrap();
        assert_eq!(config.formation, Formation::Orbit);
        assert_eq!(config.density, 0.9);
        assert_eq!(config.color_temp, ColorTemp::Storm);
        assert_eq!(config.transition_duration, 1800.0);
    }

    #[test]
    fn test_unknown_preset() {
        let err = SceneConfig::resolve("lobby", &SceneOverrides::default()).unwrap_err();
        assert!(matches!(err, ConfigError::UnknownPreset(name) if name == "lobby"));
    }

    #[test]
    fn test_sanitized_degrades_bad_values() {
        let config = SceneConfig {
            density: 4.0,
            particle_size: -1.0,
            speed: f32::NAN,
            cursor_influence: f32::INFINITY,
            transition_duration: -50.0,
            ..Default::default()
        }
        .sanitized();

        assert_eq!(config.density, 1.0);
        assert_eq!(config.particle_size, 0.0);
        assert_eq!(config.speed, 0.3);
        assert_eq!(config.cursor_influence, 120.0);
        assert_eq!(config.transition_duration, 0.0);
    }

    #[test]
    fn test_json_partial_and_names() {
        let config = SceneConfig::from_json(r#"{ "formation": "pulse", "color_temp": "gold" }"#).unwrap();
        assert_eq!(config.formation, Formation::Pulse);
        assert_eq!(config.color_temp, ColorTemp::Gold);
        assert_eq!(config.speed, 0.3);

        assert!(matches!(
            SceneConfig::from_json(r#"{ "formation": "spiral" }"#),
            Err(ConfigError::Parse(_))
        ));
    }

    #[test]
    fn test_save_load() {
        let path = std::env::temp_dir().join(format!("voidfield-config-{}.json", std::process::id()));
        let config = SceneConfig::resolve("team", &SceneOverrides::default()).unwrap();
        config.save(&path).unwrap();
        let loaded = SceneConfig::load(&path).unwrap();
        let _ = fs::remove_file(&path);
        assert_eq!(loaded, config);
    }

    #[test]
    fn test_load_missing_file() {
        let err = SceneConfig::load("/definitely/not/here.json").unwrap_err();
        assert!(matches!(err, ConfigError::Io(_)));
    }

    #[test]
    fn test_store_set_replace_reset() {
        let mut store = SceneStore::default();
        store.set(&SceneOverrides::default());
        assert_eq!(store.revision(), 0);

        store.set(&SceneOverrides {
            formation: Some(Formation::Grid),
            ..Default::default()
        });
        assert_eq!(store.config().formation, Formation::Grid);
        assert_eq!(store.config().density, 0.5);

        store.apply_preset("contact").unwrap();
        assert_eq!(store.config().formation, Formation::Converge);
        assert!(store.apply_preset("nowhere").is_err());

        store.reset();
        assert_eq!(store.config(), SceneConfig::default());
        assert_eq!(store.revision(), 3);
    }
}
