//! Message update handlers

use iced::Task;
use iced::time::Instant;

use super::state::Status;
use super::{App, Message};

impl App {
    /// Handle messages by delegating to the matching handler
    pub fn update(&mut self, message: Message) -> Task<Message> {
        if let Some(task) = self.handle_countdown(&message) {
            return task;
        }
        if let Some(task) = self.handle_fonts(message) {
            return task;
        }
        Task::none()
    }

    /// Handle countdown control and animation frames
    fn handle_countdown(&mut self, message: &Message) -> Option<Task<Message>> {
        match message {
            Message::Start => {
                self.countdown.start(Instant::now());
                self.status = Status::Running { progress: 0 };
                Some(Task::none())
            }

            Message::Frame(run, at) => {
                if let Some(tick) = self.countdown.tick_run(*run, *at) {
                    self.status = Status::from_tick(&tick);
                }
                Some(Task::none())
            }

            Message::ToggleCaption => {
                if self.countdown.is_showing_interval() {
                    self.countdown.set_text(self.caption.clone());
                } else {
                    self.countdown.clear_text();
                }
                self.settings.countdown.center_text =
                    self.countdown.center_text().map(str::to_string);
                tracing::debug!(
                    showing_interval = self.countdown.is_showing_interval(),
                    "caption toggled"
                );
                self.persist_settings();
                Some(Task::none())
            }

            _ => None,
        }
    }

    /// Handle font system initialization
    fn handle_fonts(&mut self, message: Message) -> Option<Task<Message>> {
        match message {
            Message::MeasurerReady(measurer) => {
                if measurer.is_none() {
                    tracing::warn!("Label metrics unavailable, falling back to centered layout");
                }
                self.measurer = measurer;
                Some(Task::none())
            }
            _ => None,
        }
    }
}
