//! Game settings and preferences
//!
//! Persisted as a JSON file next to the binary; a missing or unreadable
//! file falls back to defaults.

use std::fs;
use std::io;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::procgen::{GenConfig, PaintPattern, SymmetryMode};

/// Game settings/preferences
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    // === Level generation ===
    /// Quadrant mirroring policy
    pub symmetry: SymmetryMode,
    /// Tier gradient (ignored in chaos mode)
    pub paint: PaintPattern,
    /// Distinct geometry templates per level
    pub geometry_templates: usize,
    /// Distinct obstacle templates per level
    pub obstacle_templates: usize,

    // === Gameplay ===
    pub starting_lives: u8,
    /// Launch speed multiplier (1.0 = normal)
    pub ball_speed_scale: f32,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            symmetry: SymmetryMode::default(),
            paint: PaintPattern::default(),
            geometry_templates: 2,
            obstacle_templates: 2,
            starting_lives: 3,
            ball_speed_scale: 1.0,
        }
    }
}

impl Settings {
    /// Generator tuning derived from these settings
    pub fn gen_config(&self) -> GenConfig {
        GenConfig {
            symmetry: self.symmetry,
            paint: self.paint,
            geometry_templates: self.geometry_templates,
            obstacle_templates: self.obstacle_templates,
        }
    }

    /// Load settings from a JSON file, falling back to defaults
    pub fn load_from(path: &Path) -> Self {
        match fs::read_to_string(path) {
            Ok(json) => match serde_json::from_str(&json) {
                Ok(settings) => {
                    log::info!("loaded settings from {}", path.display());
                    settings
                }
                Err(err) => {
                    log::warn!("settings file {} is invalid: {err}", path.display());
                    Self::default()
                }
            },
            Err(_) => {
                log::info!("no settings at {}, using defaults", path.display());
                Self::default()
            }
        }
    }

    /// Save settings as pretty JSON
    pub fn save_to(&self, path: &Path) -> io::Result<()> {
        let json = serde_json::to_string_pretty(self)?;
        fs::write(path, json)?;
        log::info!("settings saved to {}", path.display());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_playable() {
        let settings = Settings::default();
        assert!(settings.starting_lives > 0);
        assert!(settings.geometry_templates >= 1);
        assert!(settings.ball_speed_scale > 0.0);
    }

    #[test]
    fn test_gen_config_mirrors_settings() {
        let mut settings = Settings::default();
        settings.symmetry = SymmetryMode::Chaos;
        settings.obstacle_templates = 3;
        let config = settings.gen_config();
        assert_eq!(config.symmetry, SymmetryMode::Chaos);
        assert_eq!(config.obstacle_templates, 3);
    }

    #[test]
    fn test_json_roundtrip() {
        let settings = Settings {
            symmetry: SymmetryMode::MirrorVertical,
            paint: PaintPattern::CenterOut,
            ..Settings::default()
        };
        let json = serde_json::to_string(&settings).unwrap();
        let back: Settings = serde_json::from_str(&json).unwrap();
        assert_eq!(back.symmetry, SymmetryMode::MirrorVertical);
        assert_eq!(back.paint, PaintPattern::CenterOut);
    }

    #[test]
    fn test_missing_file_falls_back_to_defaults() {
        let settings = Settings::load_from(Path::new("/nonexistent/settings.json"));
        assert_eq!(settings.starting_lives, Settings::default().starting_lives);
    }
}
