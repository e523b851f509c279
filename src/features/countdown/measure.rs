//! Square sizing for the countdown ring

use iced::Size;

use super::config::{DEFAULT_SIDE_DP, Density};

/// Sizing constraint a host layout places on one axis
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Constraint {
    /// The layout dictates this exact size in pixels
    Exactly(f32),
    /// Anything up to this many pixels
    AtMost(f32),
    /// No opinion
    Unspecified,
}

impl Constraint {
    fn resolve(self, density: Density) -> f32 {
        match self {
            Self::Exactly(px) => px,
            Self::AtMost(_) | Self::Unspecified => density.dp_to_px(DEFAULT_SIDE_DP),
        }
    }
}

/// Measure the widget: always square, so the ring and arc stay true circles.
///
/// A flexible axis falls back to 50dp. When the two sides disagree both take
/// the larger one.
pub fn measure(width: Constraint, height: Constraint, density: Density) -> Size {
    let width = width.resolve(density);
    let height = height.resolve(density);
    let side = width.max(height);
    Size::new(side, side)
}
