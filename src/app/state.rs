//! Application state definitions

use std::path::PathBuf;
use std::sync::Arc;

use crate::features::Settings;
use crate::features::countdown::{Countdown, Tick};
use crate::ui::text_metrics::TextMeasurer;

/// What the status line under the ring reports
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Status {
    Idle,
    Running { progress: u8 },
    Finished,
}

impl Status {
    /// Status after a countdown tick
    pub fn from_tick(tick: &Tick) -> Self {
        if tick.finished {
            Self::Finished
        } else {
            Self::Running {
                progress: tick.progress,
            }
        }
    }

    pub fn describe(&self) -> String {
        match self {
            Self::Idle => "Press start to begin the countdown".to_string(),
            Self::Running { progress } => format!("Counting down... {}%", progress),
            Self::Finished => "Countdown finished".to_string(),
        }
    }
}

/// Main application state
pub struct App {
    pub settings: Settings,
    /// Where caption changes are persisted; `None` keeps them in memory
    pub settings_path: Option<PathBuf>,
    pub countdown: Countdown,
    /// Caption toggled on and off by the caption button
    pub caption: String,
    pub status: Status,
    /// Font metrics for baseline centering, once the font system has loaded
    pub measurer: Option<Arc<TextMeasurer>>,
}

/// Caption used when the settings do not provide one
pub const FALLBACK_CAPTION: &str = "Skip";

impl App {
    /// Build state from loaded settings
    pub fn with_settings(settings: Settings) -> Self {
        let density = settings.display.density();
        let mut countdown = Countdown::from_config(&settings.countdown, density);
        countdown.set_countdown_listener(|progress, finished| {
            tracing::trace!(progress, finished, "countdown listener");
        });

        let caption = settings
            .countdown
            .center_text
            .clone()
            .unwrap_or_else(|| FALLBACK_CAPTION.to_string());

        Self {
            settings,
            settings_path: None,
            countdown,
            caption,
            status: Status::Idle,
            measurer: None,
        }
    }

    /// Persist settings changes to `path`
    pub fn with_settings_path(mut self, path: PathBuf) -> Self {
        self.settings_path = Some(path);
        self
    }

    /// Write the current settings, logging rather than failing
    pub(crate) fn persist_settings(&self) {
        let Some(path) = &self.settings_path else {
            return;
        };
        match self.settings.save_to_file(path) {
            Ok(()) => tracing::debug!("Saved settings to {:?}", path),
            Err(e) => tracing::warn!("Failed to save settings to {:?}: {}", path, e),
        }
    }
}
