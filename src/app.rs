//! Demo application hosting a countdown ring

mod message;
mod state;
mod update;
mod view;

use std::sync::Arc;

use iced::{Subscription, Task, Theme};

use crate::ui::text_metrics::{TextMeasurer, init_font_system};
pub use message::Message;
pub use state::{App, Status};

impl App {
    /// Create new application instance
    pub fn new() -> (Self, Task<Message>) {
        let settings = crate::features::Settings::load();
        let mut app = Self::with_settings(settings);
        if let Some(path) = crate::features::Settings::file_path() {
            app = app.with_settings_path(path);
        }

        // Font loading is slow; the ring draws with toolkit centering until it is ready
        let init_task = Task::perform(init_font_system(), |font_system| {
            Message::MeasurerReady(font_system.map(|fs| Arc::new(TextMeasurer::new(fs))))
        });

        (app, init_task)
    }

    /// Application theme
    pub fn theme(&self) -> Theme {
        if self.settings.display.dark_mode {
            Theme::Dark
        } else {
            Theme::Light
        }
    }

    /// Window title with the countdown state
    pub fn title(&self) -> String {
        match self.status {
            Status::Running { progress } => format!("Countdown Ring - {}%", progress),
            _ => "Countdown Ring".to_string(),
        }
    }

    /// Frame subscription, active only while a countdown run is animating.
    ///
    /// Frames carry the run id so a restarted countdown never receives
    /// frames meant for the run it replaced.
    pub fn subscription(&self) -> Subscription<Message> {
        match self.countdown.active_run() {
            Some(run) => iced::window::frames()
                .with(run)
                .map(|(run, at)| Message::Frame(run, at)),
            None => Subscription::none(),
        }
    }
}

impl Default for App {
    fn default() -> Self {
        Self::with_settings(crate::features::Settings::default())
    }
}
