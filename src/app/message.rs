//! Application messages

use std::sync::Arc;

use iced::time::Instant;

use crate::features::countdown::RunId;
use crate::ui::text_metrics::TextMeasurer;

/// Application messages
#[derive(Clone)]
pub enum Message {
    /// Start (or restart) the countdown
    Start,
    /// Switch between the fixed caption and the remaining seconds
    ToggleCaption,
    /// Animation frame for one countdown run
    Frame(RunId, Instant),
    /// Font metrics are available; `None` if the font system failed to load
    MeasurerReady(Option<Arc<TextMeasurer>>),
}

impl std::fmt::Debug for Message {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Start => write!(f, "Start"),
            Self::ToggleCaption => write!(f, "ToggleCaption"),
            Self::Frame(run, _) => write!(f, "Frame({:?})", run),
            Self::MeasurerReady(m) => write!(f, "MeasurerReady(ready={})", m.is_some()),
        }
    }
}
