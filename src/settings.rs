//! Game settings and preferences
//!
//! Persisted to a JSON file next to the executable. A missing or corrupt
//! file never blocks play: load falls back to defaults and only logs.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

/// Supported frame-rate targets for the render loop
pub const FRAME_RATES: [u32; 3] = [30, 60, 120];

/// Control bindings, stored as plain key names so the file stays editable
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct KeyBindings {
    pub up: String,
    pub down: String,
    pub left: String,
    pub right: String,
    pub sprint: String,
    pub pause: String,
}

impl Default for KeyBindings {
    fn default() -> Self {
        Self {
            up: "W".to_string(),
            down: "S".to_string(),
            left: "A".to_string(),
            right: "D".to_string(),
            sprint: "LShift".to_string(),
            pause: "Escape".to_string(),
        }
    }
}

/// Persisted preferences shared by both games
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    /// Master volume (0.0 - 1.0)
    pub master_volume: f32,
    /// Music volume (0.0 - 1.0)
    pub music_volume: f32,
    /// Sound effects volume (0.0 - 1.0)
    pub sfx_volume: f32,
    pub fullscreen: bool,
    /// Render frame-rate target; simulation pacing is independent of this
    pub frame_rate: u32,
    pub bindings: KeyBindings,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            master_volume: 0.7,
            music_volume: 0.5,
            sfx_volume: 0.8,
            fullscreen: false,
            frame_rate: 60,
            bindings: KeyBindings::default(),
        }
    }
}

impl Settings {
    /// Default on-disk file name
    pub const FILE_NAME: &'static str = "settings.json";

    /// Load settings, falling back to defaults on any failure
    pub fn load(path: &Path) -> Self {
        match fs::read_to_string(path) {
            Ok(json) => match serde_json::from_str(&json) {
                Ok(settings) => {
                    log::info!("Loaded settings from {}", path.display());
                    settings
                }
                Err(e) => {
                    log::warn!("Ignoring corrupt settings file {}: {}", path.display(), e);
                    Self::default()
                }
            },
            Err(_) => {
                log::info!("No settings file at {}, using defaults", path.display());
                Self::default()
            }
        }
    }

    /// Best-effort save; failures are logged, never propagated
    pub fn save(&self, path: &Path) {
        let json = match serde_json::to_string_pretty(self) {
            Ok(json) => json,
            Err(e) => {
                log::warn!("Failed to serialize settings: {}", e);
                return;
            }
        };
        match fs::write(path, json) {
            Ok(()) => log::info!("Settings saved to {}", path.display()),
            Err(e) => log::warn!("Failed to save settings to {}: {}", path.display(), e),
        }
    }

    /// Step the frame-rate target through the supported values
    pub fn cycle_frame_rate(&mut self, step: i32) {
        let index = FRAME_RATES
            .iter()
            .position(|r| *r == self.frame_rate)
            .unwrap_or(1) as i32;
        let next = (index + step).rem_euclid(FRAME_RATES.len() as i32) as usize;
        self.frame_rate = FRAME_RATES[next];
    }
}

/// Nudge a volume level by a step, clamped to [0, 1]
pub fn adjust_volume(volume: &mut f32, step: f32) {
    *volume = (*volume + step).clamp(0.0, 1.0);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_load_missing_file_uses_defaults() {
        let settings = Settings::load(Path::new("/nonexistent/settings.json"));
        assert_eq!(settings.frame_rate, 60);
        assert_eq!(settings.bindings, KeyBindings::default());
    }

    #[test]
    fn test_save_and_load_round_trip() {
        let dir = std::env::temp_dir().join("cosmic-arcade-settings-test");
        fs::create_dir_all(&dir).unwrap();
        let path = dir.join(Settings::FILE_NAME);

        let mut settings = Settings::default();
        settings.fullscreen = true;
        settings.frame_rate = 120;
        settings.master_volume = 0.25;
        settings.save(&path);

        let loaded = Settings::load(&path);
        assert!(loaded.fullscreen);
        assert_eq!(loaded.frame_rate, 120);
        assert!((loaded.master_volume - 0.25).abs() < f32::EPSILON);

        fs::remove_file(&path).ok();
    }

    #[test]
    fn test_corrupt_file_uses_defaults() {
        let dir = std::env::temp_dir().join("cosmic-arcade-settings-test");
        fs::create_dir_all(&dir).unwrap();
        let path = dir.join("corrupt.json");
        fs::write(&path, "{not json").unwrap();

        let settings = Settings::load(&path);
        assert_eq!(settings.frame_rate, Settings::default().frame_rate);

        fs::remove_file(&path).ok();
    }

    #[test]
    fn test_cycle_frame_rate_wraps() {
        let mut settings = Settings::default();
        settings.cycle_frame_rate(1);
        assert_eq!(settings.frame_rate, 120);
        settings.cycle_frame_rate(1);
        assert_eq!(settings.frame_rate, 30);
        settings.cycle_frame_rate(-1);
        assert_eq!(settings.frame_rate, 120);
    }

    #[test]
    fn test_adjust_volume_clamps() {
        let mut volume = 0.95;
        adjust_volume(&mut volume, 0.1);
        assert_eq!(volume, 1.0);
        adjust_volume(&mut volume, -0.1);
        assert!((volume - 0.9).abs() < 1e-6);
    }
}
