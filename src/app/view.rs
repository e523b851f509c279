//! Application view rendering

use iced::widget::{button, column, container, row, text};
use iced::{Alignment, Element, Fill};

use super::App;
use super::message::Message;
use crate::features::countdown::Constraint;
use crate::ui::{primitives, theme};

/// Width the layout gives the ring; its height is left to the widget
const RING_WIDTH: f32 = 120.0;

impl App {
    /// Build the view for the main window
    pub fn view(&self) -> Element<'_, Message> {
        let ring = primitives::countdown_ring(
            &self.countdown,
            Constraint::Exactly(RING_WIDTH),
            Constraint::Unspecified,
            self.measurer.clone(),
        );

        let status = text(self.status.describe())
            .size(14)
            .style(|theme| text::Style {
                color: Some(theme::text_muted(theme)),
            });

        let start_label = if self.countdown.is_running() {
            "Restart"
        } else {
            "Start countdown"
        };
        let caption_label = if self.countdown.is_showing_interval() {
            "Show caption"
        } else {
            "Show seconds"
        };

        let controls = row![
            button(text(start_label).size(14))
                .padding([10, 20])
                .style(theme::primary_button)
                .on_press(Message::Start),
            button(text(caption_label).size(14))
                .padding([10, 20])
                .style(theme::secondary_button)
                .on_press(Message::ToggleCaption),
        ]
        .spacing(12)
        .align_y(Alignment::Center);

        let content = column![ring, status, controls]
            .spacing(24)
            .align_x(Alignment::Center);

        container(content)
            .center_x(Fill)
            .center_y(Fill)
            .style(theme::page)
            .into()
    }
}
