//! Game settings
//!
//! Loaded once at startup from an optional JSON file. Missing fields fall back
//! to their defaults, so a settings file only needs the values it overrides.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::consts::*;
use crate::tuning::Tuning;

/// Play field dimensions
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FieldSettings {
    pub width: f32,
    pub height: f32,
}

impl Default for FieldSettings {
    fn default() -> Self {
        Self {
            width: FIELD_WIDTH,
            height: FIELD_HEIGHT,
        }
    }
}

/// Debug overlays requested from the presentation layer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DebugFlags {
    /// Draw collision boxes
    pub collisions: bool,
}

impl Default for DebugFlags {
    fn default() -> Self {
        Self { collisions: true }
    }
}

/// Game settings
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub field: FieldSettings,
    pub debug: DebugFlags,
    pub tuning: Tuning,
    /// RNG seed; `None` lets the platform pick one
    pub seed: Option<u64>,
}

impl Settings {
    /// Parse settings from JSON
    pub fn from_json(json: &str) -> serde_json::Result<Self> {
        serde_json::from_str(json)
    }

    /// Seed to use for a new run
    pub fn seed_or(&self, fallback: u64) -> u64 {
        self.seed.unwrap_or(fallback)
    }

    /// Load settings from a file, falling back to defaults on any error
    pub fn load_or_default(path: impl AsRef<Path>) -> Self {
        let path = path.as_ref();
        let json = match std::fs::read_to_string(path) {
            Ok(json) => json,
            Err(e) => {
                log::warn!("Could not read settings {}: {}", path.display(), e);
                return Self::default();
            }
        };

        match Self::from_json(&json) {
            Ok(settings) => {
                log::info!("Loaded settings from {}", path.display());
                settings
            }
            Err(e) => {
                log::warn!("Invalid settings {}: {}, using defaults", path.display(), e);
                Self::default()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let settings = Settings::default();
        assert_eq!(settings.field.width, 700.0);
        assert_eq!(settings.field.height, 500.0);
        assert!(settings.debug.collisions);
        assert_eq!(settings.seed_or(7), 7);
    }

    #[test]
    fn test_partial_json() {
        let settings =
            Settings::from_json(r#"{ "field": { "width": 800 }, "seed": 42 }"#).unwrap();
        assert_eq!(settings.field.width, 800.0);
        assert_eq!(settings.field.height, FIELD_HEIGHT);
        assert_eq!(settings.seed_or(7), 42);
        assert_eq!(settings.tuning, Tuning::default());
    }

    #[test]
    fn test_invalid_json_is_an_error() {
        assert!(Settings::from_json("{ field: ").is_err());
    }

    #[test]
    fn test_missing_file_falls_back() {
        let settings = Settings::load_or_default("/definitely/not/here/settings.json");
        assert_eq!(settings, Settings::default());
    }
}
