//! Demo settings persistence
//!
//! Handles loading the countdown attributes and display preferences from a
//! JSON file in the platform config directory.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::countdown::{Argb, CountdownConfig, Density};

/// Application settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Settings {
    /// Attributes the demo countdown widget is built from
    #[serde(default = "demo_countdown")]
    pub countdown: CountdownConfig,
    /// Display and interface settings
    #[serde(default)]
    pub display: DisplaySettings,
}

/// Display-related settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DisplaySettings {
    /// Dark mode enabled
    pub dark_mode: bool,
    /// Pixels per density-independent pixel
    #[serde(default = "default_density")]
    pub density: f32,
    /// Pixels per scale-independent pixel
    #[serde(default = "default_density")]
    pub scaled_density: f32,
}

/// Splash-screen style countdown: five seconds behind a "Skip" caption
pub fn demo_countdown() -> CountdownConfig {
    CountdownConfig {
        duration_secs: 5.0,
        progress_color: Argb(0xFFFF_4081),
        ring_color: Argb(0xFF3F_51B5),
        center_text: Some("Skip".to_string()),
        text_color: Argb(0xFFFF_4081),
        ..CountdownConfig::default()
    }
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            countdown: demo_countdown(),
            display: DisplaySettings::default(),
        }
    }
}

fn default_density() -> f32 {
    1.0
}

impl Default for DisplaySettings {
    fn default() -> Self {
        Self {
            dark_mode: true,
            density: default_density(),
            scaled_density: default_density(),
        }
    }
}

impl DisplaySettings {
    pub fn density(&self) -> Density {
        Density::new(self.density, self.scaled_density)
    }
}

impl Settings {
    /// Get the settings file path
    pub fn file_path() -> Option<PathBuf> {
        directories::ProjectDirs::from("com", "countdown-ring", "CountdownRing")
            .map(|dirs| dirs.config_dir().join("settings.json"))
    }

    /// Load settings from file, or return defaults if not found
    pub fn load() -> Self {
        let Some(path) = Self::file_path() else {
            tracing::warn!("Could not determine config directory, using default settings");
            return Self::default();
        };

        match Self::load_from_file(&path) {
            Ok(settings) => {
                tracing::info!("Loaded settings from {:?}", path);
                settings
            }
            Err(SettingsError::Io(e)) if e.kind() == std::io::ErrorKind::NotFound => {
                tracing::debug!("No settings file at {:?}, using defaults", path);
                Self::default()
            }
            Err(e) => {
                tracing::warn!("Ignoring settings file {:?}: {}", path, e);
                Self::default()
            }
        }
    }

    /// Load settings from a specific file
    pub fn load_from_file(path: &Path) -> Result<Self, SettingsError> {
        let content = std::fs::read_to_string(path)?;
        Ok(serde_json::from_str(&content)?)
    }

    /// Save settings to a specific file
    pub fn save_to_file(&self, path: &Path) -> Result<(), SettingsError> {
        // Ensure parent directory exists
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let content = serde_json::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }
}

/// Errors that can occur with settings
#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Parse error: {0}")]
    Parse(#[from] serde_json::Error),
}
