//! Scene description and painting for the countdown ring
//!
//! Painting is written against the [`Surface`] capability rather than a
//! concrete renderer. The iced canvas adapter lives in
//! `crate::ui::primitives::countdown_ring`; tests use a recording surface.
//!
//! # Layering
//!
//! Each frame is painted bottom to top:
//!
//! 1. background disc
//! 2. base ring
//! 3. label
//! 4. progress arc, rotated so 0° points at twelve o'clock

use iced::{Point, Size};

use super::config::Argb;
use super::timeline::PROGRESS_MAX;

/// Rotation applied before drawing the arc so it starts at the top
pub const ARC_ROTATION_DEGREES: f32 = -90.0;

/// Font measurements for one piece of text at one size
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TextMetrics {
    /// Advance width of the whole string
    pub width: f32,
    /// Distance from the baseline up to the top of the line, positive
    pub ascent: f32,
    /// Distance from the baseline down to the bottom of the line, positive
    pub descent: f32,
}

/// Where a text run is placed
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum TextAnchor {
    /// Left edge and baseline of the run
    Baseline(Point),
    /// Visual center of the run; the surface does the centering itself
    Center(Point),
}

/// Immediate-mode 2D drawing target
///
/// Angles are in degrees, clockwise, with 0° at three o'clock, matching
/// screen coordinates where y grows downward.
pub trait Surface {
    fn fill_circle(&mut self, center: Point, radius: f32, color: Argb);

    fn stroke_circle(&mut self, center: Point, radius: f32, width: f32, color: Argb);

    fn stroke_arc(
        &mut self,
        center: Point,
        radius: f32,
        start_degrees: f32,
        sweep_degrees: f32,
        width: f32,
        color: Argb,
    );

    /// Measure `content` at `size`; `None` when no font information is available
    fn measure_text(&mut self, content: &str, size: f32) -> Option<TextMetrics>;

    fn fill_text(&mut self, content: &str, anchor: TextAnchor, size: f32, color: Argb);

    /// Push the current transform
    fn save(&mut self);

    /// Pop back to the last saved transform
    fn restore(&mut self);

    /// Rotate subsequent drawing by `degrees` around `pivot`
    fn rotate(&mut self, degrees: f32, pivot: Point);
}

/// Colors of the four layers
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Palette {
    pub background: Argb,
    pub base_ring: Argb,
    pub progress_arc: Argb,
    pub text: Argb,
}

/// Ring placement derived from the current bounds
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RingGeometry {
    pub center: Point,
    pub radius: f32,
    pub stroke_width: f32,
}

impl RingGeometry {
    /// The ring is inset by one stroke width from the shorter side
    pub fn from_bounds(bounds: Size, stroke_width: f32) -> Self {
        let side = bounds.width.min(bounds.height);
        Self {
            center: Point::new(bounds.width / 2.0, bounds.height / 2.0),
            radius: (side / 2.0 - stroke_width).max(0.0),
            stroke_width,
        }
    }
}

/// Sweep of the progress arc in degrees
pub fn sweep_degrees(progress: u8) -> f32 {
    progress.min(PROGRESS_MAX) as f32 / PROGRESS_MAX as f32 * 360.0
}

/// Left/baseline origin that centers text of `metrics` on `center`
pub fn centered_baseline(center: Point, metrics: &TextMetrics) -> Point {
    Point::new(
        center.x - metrics.width / 2.0,
        center.y + (metrics.ascent - metrics.descent) / 2.0,
    )
}

/// Everything needed to paint one frame, detached from the widget state
#[derive(Debug, Clone, PartialEq)]
pub struct RingScene {
    pub palette: Palette,
    pub label: String,
    pub text_size: f32,
    pub stroke_width: f32,
    pub progress: u8,
}

impl RingScene {
    pub fn sweep_degrees(&self) -> f32 {
        sweep_degrees(self.progress)
    }

    /// Paint all four layers into `surface` for the given bounds
    pub fn paint<S: Surface + ?Sized>(&self, surface: &mut S, bounds: Size) {
        let ring = RingGeometry::from_bounds(bounds, self.stroke_width);

        surface.fill_circle(ring.center, ring.radius, self.palette.background);
        surface.stroke_circle(
            ring.center,
            ring.radius,
            ring.stroke_width,
            self.palette.base_ring,
        );

        self.paint_label(surface, ring.center);

        surface.save();
        surface.rotate(ARC_ROTATION_DEGREES, ring.center);
        surface.stroke_arc(
            ring.center,
            ring.radius,
            0.0,
            self.sweep_degrees(),
            ring.stroke_width,
            self.palette.progress_arc,
        );
        surface.restore();
    }

    fn paint_label<S: Surface + ?Sized>(&self, surface: &mut S, center: Point) {
        if self.text_size.is_nan() || self.text_size <= 0.0 {
            return;
        }

        let anchor = match surface.measure_text(&self.label, self.text_size) {
            Some(metrics) => TextAnchor::Baseline(centered_baseline(center, &metrics)),
            None => TextAnchor::Center(center),
        };
        surface.fill_text(&self.label, anchor, self.text_size, self.palette.text);
    }
}
