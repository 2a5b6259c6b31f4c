//! Game settings and preferences
//!
//! Persisted separately from progress in its own save file.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::PersistenceError;
use crate::persistence::{self, SaveFile};
use crate::skins::Environment;

/// Game settings/preferences
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    // === Audio ===
    /// Master volume (0.0 - 1.0)
    pub master_volume: f32,
    /// Sound effects volume (0.0 - 1.0)
    pub sfx_volume: f32,
    /// Music volume (0.0 - 1.0)
    pub music_volume: f32,

    // === Display ===
    pub fullscreen: bool,
    /// Show FPS counter
    pub show_fps: bool,
    /// Particle effects (hit sparks, trails)
    pub particles: bool,
    /// Screen shake on scoring
    pub screen_shake: bool,

    /// Arena theme key, see [`Environment::theme_key`]
    pub current_theme: String,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            master_volume: 0.8,
            sfx_volume: 1.0,
            music_volume: 0.7,
            fullscreen: false,
            show_fps: false,
            particles: true,
            screen_shake: true,
            current_theme: Environment::default().theme_key().to_string(),
        }
    }
}

impl SaveFile for Settings {
    const KIND: &'static str = "settings";
    const VERSION: u32 = 1;
}

impl Settings {
    /// Active environment; unknown keys fall back to the default theme
    pub fn environment(&self) -> Environment {
        Environment::from_theme_key(&self.current_theme).unwrap_or_default()
    }

    pub fn set_environment(&mut self, env: Environment) {
        self.current_theme = env.theme_key().to_string();
    }

    /// Advance to the next theme (settings menu button)
    pub fn cycle_theme(&mut self) {
        self.set_environment(self.environment().next());
    }

    /// Clamp volumes into range after loading hand-edited files
    pub fn sanitize(&mut self) {
        for vol in [
            &mut self.master_volume,
            &mut self.sfx_volume,
            &mut self.music_volume,
        ] {
            *vol = if vol.is_finite() {
                vol.clamp(0.0, 1.0)
            } else {
                0.0
            };
        }
    }

    pub fn load_from(path: &Path) -> Result<Self, PersistenceError> {
        let mut settings: Self = persistence::load_json(path)?;
        settings.sanitize();
        Ok(settings)
    }

    pub fn load_or_default(path: &Path) -> Self {
        let mut settings: Self = persistence::load_or_default(path);
        settings.sanitize();
        settings
    }

    pub fn save_to(&self, path: &Path) -> Result<(), PersistenceError> {
        persistence::save_json(path, self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::persistence::test_util::temp_dir;

    #[test]
    fn test_defaults() {
        let settings = Settings::default();
        assert_eq!(settings.master_volume, 0.8);
        assert_eq!(settings.sfx_volume, 1.0);
        assert_eq!(settings.music_volume, 0.7);
        assert!(!settings.fullscreen);
        assert_eq!(settings.current_theme, "neon");
        assert_eq!(settings.environment(), Environment::NeonArena);
    }

    #[test]
    fn test_theme_cycle() {
        let mut settings = Settings::default();
        settings.cycle_theme();
        assert_eq!(settings.current_theme, "cyberpunk");

        settings.current_theme = "vaporwave".to_string();
        assert_eq!(settings.environment(), Environment::NeonArena);
    }

    #[test]
    fn test_save_and_load() {
        let path = temp_dir("settings").join("settings.json");
        let mut settings = Settings {
            show_fps: true,
            ..Settings::default()
        };
        settings.set_environment(Environment::OceanDepths);
        settings.save_to(&path).unwrap();

        assert_eq!(Settings::load_from(&path).unwrap(), settings);
    }

    #[test]
    fn test_partial_file_fills_defaults() {
        let path = temp_dir("settings_partial").join("settings.json");
        std::fs::write(
            &path,
            r#"{"kind":"settings","version":1,"data":{"sfx_volume":3.5,"fullscreen":true}}"#,
        )
        .unwrap();
        let settings = Settings::load_or_default(&path);
        assert!(settings.fullscreen);
        assert_eq!(settings.sfx_volume, 1.0);
        assert_eq!(settings.music_volume, 0.7);
    }
}
