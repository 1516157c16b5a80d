//! Game settings and preferences
//!
//! Persisted separately from the leaderboard as a JSON file.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::consts;
use crate::persistence::{self, StorageError};
use crate::tuning::Tuning;

/// Difficulty preset levels
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum DifficultyPreset {
    Easy,
    #[default]
    Normal,
    Hard,
}

impl DifficultyPreset {
    pub fn as_str(&self) -> &'static str {
        match self {
            DifficultyPreset::Easy => "Easy",
            DifficultyPreset::Normal => "Normal",
            DifficultyPreset::Hard => "Hard",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "easy" => Some(DifficultyPreset::Easy),
            "normal" | "norm" => Some(DifficultyPreset::Normal),
            "hard" => Some(DifficultyPreset::Hard),
            _ => None,
        }
    }

    /// Bird spawn multiplier
    pub fn spawn_factor(&self) -> f64 {
        match self {
            DifficultyPreset::Easy => 0.5,
            DifficultyPreset::Normal => 1.0,
            DifficultyPreset::Hard => 1.75,
        }
    }

    /// Bird speed multiplier
    pub fn speed_factor(&self) -> f32 {
        match self {
            DifficultyPreset::Easy => 0.75,
            DifficultyPreset::Normal => 1.0,
            DifficultyPreset::Hard => 1.3,
        }
    }

    /// Gameplay numbers for this preset
    pub fn tuning(&self) -> Tuning {
        match self {
            DifficultyPreset::Normal => Tuning::default(),
            _ => Tuning::default().scaled(self.spawn_factor(), self.speed_factor()),
        }
    }
}

/// Game settings/preferences
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub difficulty: DifficultyPreset,
    /// Replaces the preset's tuning entirely when present
    pub tuning_override: Option<Tuning>,

    // === Play field ===
    pub field_width: u32,
    pub field_height: u32,

    // === Clocks ===
    /// Seconds per fuel unit
    pub decay_interval: f32,
    /// Frames per second the headless driver simulates
    pub frame_rate: u32,

    // === Visuals ===
    pub cloud_count: usize,
    /// Reduced motion (no drifting clouds)
    pub reduced_motion: bool,

    // === Leaderboard ===
    pub pilot_name: String,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            difficulty: DifficultyPreset::Normal,
            tuning_override: None,

            field_width: consts::FIELD_WIDTH,
            field_height: consts::FIELD_HEIGHT,

            decay_interval: consts::DECAY_INTERVAL_SECS,
            frame_rate: consts::FRAME_RATE,

            cloud_count: consts::CLOUD_COUNT,
            reduced_motion: false,

            pilot_name: "Pilot".to_string(),
        }
    }
}

impl Settings {
    /// Create settings from a difficulty preset
    pub fn from_preset(preset: DifficultyPreset) -> Self {
        Self {
            difficulty: preset,
            ..Self::default()
        }
    }

    /// Tuning the next session should use
    pub fn effective_tuning(&self) -> Tuning {
        self.tuning_override
            .clone()
            .unwrap_or_else(|| self.difficulty.tuning())
    }

    /// Effective cloud count (respects reduced_motion)
    pub fn effective_cloud_count(&self) -> usize {
        if self.reduced_motion {
            0
        } else {
            self.cloud_count
        }
    }

    /// Seconds per simulated frame
    pub fn frame_dt(&self) -> f32 {
        1.0 / self.frame_rate.max(1) as f32
    }

    /// Load settings from disk, falling back to defaults
    pub fn load(path: &Path) -> Self {
        match persistence::load_json::<Settings>(path) {
            Ok(settings) => {
                log::info!("Loaded settings from {}", path.display());
                settings
            }
            Err(e) if e.is_not_found() => {
                log::info!("Using default settings");
                Self::default()
            }
            Err(e) => {
                log::warn!("Ignoring unreadable settings: {e}");
                Self::default()
            }
        }
    }

    /// Save settings to disk
    pub fn save(&self, path: &Path) -> Result<(), StorageError> {
        persistence::save_json(path, self)?;
        log::info!("Settings saved");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_preset_names_round_trip() {
        for preset in [
            DifficultyPreset::Easy,
            DifficultyPreset::Normal,
            DifficultyPreset::Hard,
        ] {
            assert_eq!(DifficultyPreset::from_str(preset.as_str()), Some(preset));
        }
        assert_eq!(DifficultyPreset::from_str("HARD"), Some(DifficultyPreset::Hard));
        assert_eq!(DifficultyPreset::from_str("insane"), None);
    }

    #[test]
    fn test_normal_uses_reference_tuning() {
        assert_eq!(DifficultyPreset::Normal.tuning(), Tuning::default());
    }

    #[test]
    fn test_hard_spawns_more_birds() {
        let hard = DifficultyPreset::Hard.tuning();
        let normal = Tuning::default();
        assert!(hard.obstacle_spawn_chance > normal.obstacle_spawn_chance);
        assert!(hard.obstacle_speed.min > normal.obstacle_speed.min);
        assert!(hard.validate().is_ok());
        assert!(DifficultyPreset::Easy.tuning().validate().is_ok());
    }

    #[test]
    fn test_override_wins() {
        let custom = Tuning {
            fuel_bonus: 3,
            ..Default::default()
        };
        let settings = Settings {
            difficulty: DifficultyPreset::Hard,
            tuning_override: Some(custom.clone()),
            ..Default::default()
        };
        assert_eq!(settings.effective_tuning(), custom);
    }

    #[test]
    fn test_reduced_motion_hides_clouds() {
        let mut settings = Settings::default();
        assert_eq!(settings.effective_cloud_count(), 5);
        settings.reduced_motion = true;
        assert_eq!(settings.effective_cloud_count(), 0);
    }

    #[test]
    fn test_frame_dt_guards_zero() {
        let settings = Settings {
            frame_rate: 0,
            ..Default::default()
        };
        assert_eq!(settings.frame_dt(), 1.0);
    }

    #[test]
    fn test_save_and_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("settings.json");
        let settings = Settings {
            difficulty: DifficultyPreset::Easy,
            pilot_name: "Maverick".to_string(),
            ..Default::default()
        };
        settings.save(&path).unwrap();

        let loaded = Settings::load(&path);
        assert_eq!(loaded.difficulty, DifficultyPreset::Easy);
        assert_eq!(loaded.pilot_name, "Maverick");
        assert_eq!(loaded.field_width, consts::FIELD_WIDTH);
    }

    #[test]
    fn test_partial_file_keeps_defaults() {
        let settings: Settings = serde_json::from_str(r#"{ "difficulty": "Hard" }"#).unwrap();
        assert_eq!(settings.difficulty, DifficultyPreset::Hard);
        assert_eq!(settings.frame_rate, consts::FRAME_RATE);
    }
}
