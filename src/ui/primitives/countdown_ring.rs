//! Countdown ring primitive
//!
//! Paints a [`RingScene`] with iced's Canvas.
//!
//! # Design
//!
//! This is a primitive component that implements `canvas::Program` trait.
//! It uses generic Message types and does not depend on application-specific types.
//! The layering and geometry live in `crate::features::countdown::render`;
//! this module only maps the [`Surface`] calls onto a canvas [`Frame`].

use std::sync::Arc;

use iced::alignment::{Horizontal, Vertical};
use iced::widget::Canvas;
use iced::widget::canvas::{Frame, Geometry, Path, Program, Stroke, Text, path};
use iced::widget::text::LineHeight;
use iced::{Element, Pixels, Point, Radians, Rectangle, Renderer, Theme, Vector, mouse};

use crate::features::countdown::{
    Argb, Constraint, Countdown, RingScene, Surface, TextAnchor, TextMetrics,
};
use crate::ui::text_metrics::TextMeasurer;

/// Canvas program drawing one countdown frame
#[derive(Debug, Clone)]
pub struct RingCanvas {
    scene: RingScene,
    measurer: Option<Arc<TextMeasurer>>,
}

impl RingCanvas {
    pub fn new(scene: RingScene) -> Self {
        Self {
            scene,
            measurer: None,
        }
    }

    /// Center the label on its baseline using real font metrics
    pub fn with_measurer(mut self, measurer: Arc<TextMeasurer>) -> Self {
        self.measurer = Some(measurer);
        self
    }
}

impl<Message> Program<Message> for RingCanvas {
    type State = ();

    fn draw(
        &self,
        _state: &Self::State,
        renderer: &Renderer,
        _theme: &Theme,
        bounds: Rectangle,
        _cursor: mouse::Cursor,
    ) -> Vec<Geometry> {
        let mut frame = Frame::new(renderer, bounds.size());

        let mut surface = CanvasSurface {
            frame: &mut frame,
            measurer: self.measurer.as_deref(),
        };
        self.scene.paint(&mut surface, bounds.size());

        vec![frame.into_geometry()]
    }
}

/// [`Surface`] over an iced canvas frame
struct CanvasSurface<'a> {
    frame: &'a mut Frame,
    measurer: Option<&'a TextMeasurer>,
}

impl CanvasSurface<'_> {
    fn stroke(width: f32, color: Argb) -> Stroke<'static> {
        Stroke::default()
            .with_width(width)
            .with_color(color.to_color())
    }
}

impl Surface for CanvasSurface<'_> {
    fn fill_circle(&mut self, center: Point, radius: f32, color: Argb) {
        self.frame
            .fill(&Path::circle(center, radius), color.to_color());
    }

    fn stroke_circle(&mut self, center: Point, radius: f32, width: f32, color: Argb) {
        self.frame
            .stroke(&Path::circle(center, radius), Self::stroke(width, color));
    }

    fn stroke_arc(
        &mut self,
        center: Point,
        radius: f32,
        start_degrees: f32,
        sweep_degrees: f32,
        width: f32,
        color: Argb,
    ) {
        // An empty arc still leaves a dot behind with some tessellators
        if sweep_degrees <= 0.0 {
            return;
        }

        let start_angle = start_degrees.to_radians();
        let end_angle = (start_degrees + sweep_degrees).to_radians();

        let arc = Path::new(|builder| {
            builder.arc(path::Arc {
                center,
                radius,
                start_angle: Radians(start_angle),
                end_angle: Radians(end_angle),
            });
        });

        self.frame.stroke(&arc, Self::stroke(width, color));
    }

    fn measure_text(&mut self, content: &str, size: f32) -> Option<TextMetrics> {
        self.measurer.map(|m| m.measure(content, size))
    }

    fn fill_text(&mut self, content: &str, anchor: TextAnchor, size: f32, color: Argb) {
        let text = match (anchor, self.measure_text(content, size)) {
            (TextAnchor::Baseline(origin), Some(metrics)) => {
                let (position, line_height) = baseline_to_top_left(origin, &metrics);
                Text {
                    content: content.to_string(),
                    position,
                    color: color.to_color(),
                    size: Pixels(size),
                    line_height: LineHeight::Absolute(Pixels(line_height)),
                    align_x: Horizontal::Left.into(),
                    align_y: Vertical::Top,
                    ..Text::default()
                }
            }
            (TextAnchor::Baseline(origin), None) => Text {
                content: content.to_string(),
                position: origin,
                color: color.to_color(),
                size: Pixels(size),
                align_x: Horizontal::Left.into(),
                align_y: Vertical::Bottom,
                ..Text::default()
            },
            (TextAnchor::Center(center), _) => Text {
                content: content.to_string(),
                position: center,
                color: color.to_color(),
                size: Pixels(size),
                align_x: Horizontal::Center.into(),
                align_y: Vertical::Center,
                ..Text::default()
            },
        };
        self.frame.fill_text(text);
    }

    fn save(&mut self) {
        self.frame.push_transform();
    }

    fn restore(&mut self) {
        self.frame.pop_transform();
    }

    fn rotate(&mut self, degrees: f32, pivot: Point) {
        let (to_pivot, angle, from_pivot) = rotation_about(degrees, pivot);
        self.frame.translate(to_pivot);
        self.frame.rotate(angle);
        self.frame.translate(from_pivot);
    }
}

/// Top-left text position and line height that put the baseline at `origin`
fn baseline_to_top_left(origin: Point, metrics: &TextMetrics) -> (Point, f32) {
    (
        Point::new(origin.x, origin.y - metrics.ascent),
        metrics.ascent + metrics.descent,
    )
}

/// Frame transforms, in call order, for a rotation about `pivot`
fn rotation_about(degrees: f32, pivot: Point) -> (Vector, Radians, Vector) {
    (
        Vector::new(pivot.x, pivot.y),
        Radians(degrees.to_radians()),
        Vector::new(-pivot.x, -pivot.y),
    )
}

/// Create a countdown ring element sized by the host's constraints
pub fn view<'a, Message: 'a>(
    countdown: &Countdown,
    width: Constraint,
    height: Constraint,
    measurer: Option<Arc<TextMeasurer>>,
) -> Element<'a, Message> {
    let size = countdown.measure(width, height);

    let program = match measurer {
        Some(measurer) => RingCanvas::new(countdown.scene()).with_measurer(measurer),
        None => RingCanvas::new(countdown.scene()),
    };

    Canvas::new(program)
        .width(size.width)
        .height(size.height)
        .into()
}
