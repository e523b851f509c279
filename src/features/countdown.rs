//! Circular countdown widget state
//!
//! [`Countdown`] owns the configuration, the running timeline and the
//! listener. It does not know which toolkit draws it: hosts drive it with
//! [`Countdown::tick`] from their frame clock, size it with [`measure`], and
//! paint the [`RingScene`] it produces onto any [`Surface`].
//!
//! # Usage
//!
//! ```rust,ignore
//! let mut countdown = Countdown::new(Density::default());
//! countdown.set_duration(5000);
//! countdown.set_countdown_listener(|progress, finished| {
//!     tracing::debug!(progress, finished, "countdown tick");
//! });
//! let run = countdown.start(Instant::now());
//! // on every frame:
//! countdown.tick_run(run, now);
//! ```

pub mod config;
pub mod label;
pub mod measure;
pub mod render;
pub mod timeline;

use std::time::Instant;

pub use config::{Argb, ColorParseError, CountdownConfig, Density};
pub use label::countdown_label;
pub use measure::{Constraint, measure};
pub use render::{Palette, RingScene, Surface, TextAnchor, TextMetrics};
pub use timeline::{RunId, Sample, Timeline};

use config::{
    DEFAULT_BACKGROUND, DEFAULT_DURATION_SECS, DEFAULT_PROGRESS, DEFAULT_RING, DEFAULT_TEXT,
    DEFAULT_TEXT_SIZE_SP, STROKE_WIDTH_DP,
};

/// Progress callback: `(progress, finished)`
pub type CountdownListener = Box<dyn FnMut(u8, bool) + Send>;

/// Result of one animation tick
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Tick {
    pub run: RunId,
    pub progress: u8,
    pub remaining_ms: i64,
    pub finished: bool,
}

/// A circular countdown indicator
pub struct Countdown {
    duration_ms: i64,
    remaining_ms: i64,
    progress: u8,
    center_text: Option<String>,
    palette: Palette,
    text_size_px: f32,
    stroke_width_px: f32,
    density: Density,
    active: Option<Timeline>,
    next_run: RunId,
    listener: Option<CountdownListener>,
}

impl std::fmt::Debug for Countdown {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Countdown")
            .field("duration_ms", &self.duration_ms)
            .field("remaining_ms", &self.remaining_ms)
            .field("progress", &self.progress)
            .field("center_text", &self.center_text)
            .field("active", &self.active.map(|t| t.id()))
            .field("has_listener", &self.listener.is_some())
            .finish_non_exhaustive()
    }
}

impl Countdown {
    /// Create a widget with default styling and a 3 second duration
    pub fn new(density: Density) -> Self {
        let duration_ms = (DEFAULT_DURATION_SECS * 1000.0) as i64;
        Self {
            duration_ms,
            remaining_ms: duration_ms,
            progress: 0,
            center_text: None,
            palette: Palette {
                background: DEFAULT_BACKGROUND,
                base_ring: DEFAULT_RING,
                progress_arc: DEFAULT_PROGRESS,
                text: DEFAULT_TEXT,
            },
            text_size_px: density.sp_to_px(DEFAULT_TEXT_SIZE_SP),
            stroke_width_px: density.dp_to_px(STROKE_WIDTH_DP),
            density,
            active: None,
            next_run: RunId::first(),
            listener: None,
        }
    }

    /// Create a widget from declarative attributes
    pub fn from_config(config: &CountdownConfig, density: Density) -> Self {
        let mut countdown = Self::new(density);
        countdown.set_duration(config.duration_ms());
        countdown.palette = Palette {
            background: config.background_color,
            base_ring: config.ring_color,
            progress_arc: config.progress_color,
            text: config.text_color,
        };
        countdown.center_text = config.center_text.clone();
        countdown.set_text_size(config.text_size_sp);
        countdown
    }

    // ========================================================================
    // Configuration
    // ========================================================================

    /// Set the countdown length in milliseconds; applies to the next `start`
    pub fn set_duration(&mut self, duration_ms: i64) {
        self.duration_ms = duration_ms;
        if self.active.is_none() && self.progress == 0 {
            self.remaining_ms = duration_ms;
        }
        tracing::debug!(duration_ms, "countdown duration set");
    }

    /// Color of the base ring
    pub fn set_ring_color(&mut self, color: Argb) {
        self.palette.base_ring = color;
    }

    /// Color of the sweeping arc
    pub fn set_progress_color(&mut self, color: Argb) {
        self.palette.progress_arc = color;
    }

    pub fn set_background_color(&mut self, color: Argb) {
        self.palette.background = color;
    }

    pub fn set_text_color(&mut self, color: Argb) {
        self.palette.text = color;
    }

    /// Show a fixed caption instead of the remaining seconds
    pub fn set_text(&mut self, text: impl Into<String>) {
        self.center_text = Some(text.into());
    }

    /// Drop the fixed caption and go back to showing remaining seconds
    pub fn clear_text(&mut self) {
        self.center_text = None;
    }

    /// Label size in scale-independent pixels
    pub fn set_text_size(&mut self, sp: f32) {
        self.text_size_px = self.density.sp_to_px(sp);
    }

    pub fn set_countdown_listener<F>(&mut self, listener: F)
    where
        F: FnMut(u8, bool) + Send + 'static,
    {
        self.listener = Some(Box::new(listener));
    }

    pub fn clear_countdown_listener(&mut self) {
        self.listener = None;
    }

    // ========================================================================
    // Animation
    // ========================================================================

    /// Start a fresh run at `now`, discarding any progress of a previous one.
    ///
    /// The returned id addresses this run in [`Countdown::tick_run`]; a run
    /// that was still active becomes stale and its ticks are ignored.
    pub fn start(&mut self, now: Instant) -> RunId {
        let id = self.next_run;
        self.next_run = id.next();

        if let Some(previous) = self.active.replace(Timeline::new(id, now, self.duration_ms)) {
            tracing::debug!(?previous, "countdown restarted, previous run superseded");
        }
        self.progress = 0;
        self.remaining_ms = self.duration_ms;

        tracing::info!(?id, duration_ms = self.duration_ms, "countdown started");
        id
    }

    /// Advance whichever run is active
    pub fn tick(&mut self, now: Instant) -> Option<Tick> {
        let id = self.active.as_ref()?.id();
        self.tick_run(id, now)
    }

    /// Advance run `id`; ticks for a superseded or finished run do nothing
    pub fn tick_run(&mut self, id: RunId, now: Instant) -> Option<Tick> {
        let timeline = match self.active {
            Some(timeline) if timeline.id() == id => timeline,
            _ => {
                tracing::debug!(?id, "ignoring tick for inactive countdown run");
                return None;
            }
        };

        let sample = timeline.sample(now);
        self.progress = sample.progress;
        self.remaining_ms = sample.remaining_ms;

        let finished = sample.is_finished();
        if finished {
            self.active = None;
            tracing::info!(?id, "countdown finished");
        } else {
            tracing::trace!(?id, progress = sample.progress, "countdown tick");
        }

        if let Some(listener) = self.listener.as_mut() {
            listener(sample.progress, finished);
        }

        Some(Tick {
            run: id,
            progress: sample.progress,
            remaining_ms: sample.remaining_ms,
            finished,
        })
    }

    /// Id of the run currently animating, if any
    pub fn active_run(&self) -> Option<RunId> {
        self.active.map(|t| t.id())
    }

    pub fn is_running(&self) -> bool {
        self.active.is_some()
    }

    // ========================================================================
    // Accessors
    // ========================================================================

    pub fn duration_ms(&self) -> i64 {
        self.duration_ms
    }

    pub fn remaining_ms(&self) -> i64 {
        self.remaining_ms
    }

    pub fn progress(&self) -> u8 {
        self.progress
    }

    pub fn center_text(&self) -> Option<&str> {
        self.center_text.as_deref()
    }

    /// True while the label shows remaining seconds rather than a caption
    pub fn is_showing_interval(&self) -> bool {
        self.center_text.is_none()
    }

    pub fn palette(&self) -> Palette {
        self.palette
    }

    pub fn text_size_px(&self) -> f32 {
        self.text_size_px
    }

    pub fn stroke_width_px(&self) -> f32 {
        self.stroke_width_px
    }

    pub fn density(&self) -> Density {
        self.density
    }

    /// Text drawn in the middle of the ring
    pub fn label(&self) -> String {
        match &self.center_text {
            Some(text) => text.clone(),
            None => countdown_label(self.remaining_ms, self.duration_ms),
        }
    }

    /// Snapshot of what the next frame should show
    pub fn scene(&self) -> RingScene {
        RingScene {
            palette: self.palette,
            label: self.label(),
            text_size: self.text_size_px,
            stroke_width: self.stroke_width_px,
            progress: self.progress,
        }
    }

    /// Square size for the given layout constraints
    pub fn measure(&self, width: Constraint, height: Constraint) -> iced::Size {
        measure(width, height, self.density)
    }
}

#[cfg(test)]
mod tests {
    use super::render::tests::Recorder;
    use super::*;
    use std::sync::{Arc, Mutex};
    use std::time::Duration;

    fn at(start: Instant, ms: u64) -> Instant {
        start + Duration::from_millis(ms)
    }

    fn recording_listener(countdown: &mut Countdown) -> Arc<Mutex<Vec<(u8, bool)>>> {
        let calls = Arc::new(Mutex::new(Vec::new()));
        let sink = Arc::clone(&calls);
        countdown.set_countdown_listener(move |progress, finished| {
            sink.lock().unwrap().push((progress, finished));
        });
        calls
    }

    #[test]
    fn test_defaults() {
        let countdown = Countdown::new(Density::default());
        assert_eq!(countdown.duration_ms(), 3000);
        assert_eq!(countdown.remaining_ms(), 3000);
        assert_eq!(countdown.progress(), 0);
        assert_eq!(countdown.stroke_width_px(), 3.0);
        assert_eq!(countdown.text_size_px(), 12.0);
        assert!(countdown.is_showing_interval());
        assert_eq!(countdown.label(), "3s");
        assert!(!countdown.is_running());
    }

    #[test]
    fn test_progress_is_monotonic_and_ends_at_100() {
        let start = Instant::now();
        let mut countdown = Countdown::new(Density::default());
        countdown.set_duration(5000);
        let calls = recording_listener(&mut countdown);

        let run = countdown.start(start);
        let mut ms = 0;
        while countdown.is_running() {
            ms += 16;
            countdown.tick_run(run, at(start, ms));
        }

        let calls = calls.lock().unwrap();
        assert!(calls.windows(2).all(|w| w[0].0 <= w[1].0));
        assert_eq!(calls.last(), Some(&(100, true)));
        assert!(calls[..calls.len() - 1].iter().all(|&(p, done)| p < 100 && !done));
        assert_eq!(countdown.progress(), 100);
        assert_eq!(countdown.label(), "0s");
    }

    #[test]
    fn test_remaining_and_label_mid_run() {
        let start = Instant::now();
        let mut countdown = Countdown::new(Density::default());
        countdown.set_duration(5000);
        countdown.start(start);

        let tick = countdown.tick(at(start, 2500)).unwrap();
        assert_eq!(tick.progress, 50);
        assert_eq!(tick.remaining_ms, 2500);
        assert!(!tick.finished);
        assert_eq!(countdown.label(), "3s");
    }

    #[test]
    fn test_fixed_text_overrides_label_until_cleared() {
        let start = Instant::now();
        let mut countdown = Countdown::new(Density::default());
        countdown.set_text("Skip");
        let run = countdown.start(start);

        for ms in [0, 700, 1900, 3000] {
            countdown.tick_run(run, at(start, ms));
            assert_eq!(countdown.label(), "Skip");
            assert_eq!(countdown.scene().label, "Skip");
        }

        countdown.clear_text();
        assert!(countdown.is_showing_interval());
        assert_eq!(countdown.label(), "0s");
    }

    #[test]
    fn test_restart_ignores_stale_ticks() {
        let start = Instant::now();
        let mut countdown = Countdown::new(Density::default());
        countdown.set_duration(1000);
        let calls = recording_listener(&mut countdown);

        let first = countdown.start(start);
        countdown.tick_run(first, at(start, 600));
        assert_eq!(countdown.progress(), 60);

        let second = countdown.start(at(start, 700));
        assert_ne!(first, second);
        assert_eq!(countdown.progress(), 0);

        assert_eq!(countdown.tick_run(first, at(start, 900)), None);
        assert_eq!(countdown.progress(), 0);

        let tick = countdown.tick_run(second, at(start, 800)).unwrap();
        assert_eq!(tick.progress, 10);
        assert_eq!(countdown.active_run(), Some(second));

        let calls = calls.lock().unwrap();
        assert_eq!(*calls, vec![(60, false), (10, false)]);
    }

    #[test]
    fn test_finished_run_ignores_further_ticks() {
        let start = Instant::now();
        let mut countdown = Countdown::new(Density::default());
        countdown.set_duration(100);
        let run = countdown.start(start);

        assert!(countdown.tick_run(run, at(start, 150)).unwrap().finished);
        assert_eq!(countdown.tick_run(run, at(start, 200)), None);
        assert_eq!(countdown.tick(at(start, 200)), None);
    }

    #[test]
    fn test_zero_duration_completes_on_first_tick() {
        let start = Instant::now();
        let mut countdown = Countdown::new(Density::default());
        countdown.set_duration(0);
        let calls = recording_listener(&mut countdown);
        countdown.start(start);

        let tick = countdown.tick(start).unwrap();
        assert_eq!(tick.progress, 100);
        assert!(tick.finished);
        assert_eq!(countdown.label(), "0s");
        assert_eq!(*calls.lock().unwrap(), vec![(100, true)]);
    }

    #[test]
    fn test_missing_listener_is_skipped() {
        let start = Instant::now();
        let mut countdown = Countdown::new(Density::default());
        let calls = recording_listener(&mut countdown);
        countdown.clear_countdown_listener();

        countdown.start(start);
        assert!(countdown.tick(at(start, 500)).is_some());
        assert!(calls.lock().unwrap().is_empty());
    }

    #[test]
    fn test_duration_change_while_idle_resyncs_label() {
        let mut countdown = Countdown::new(Density::default());
        countdown.set_duration(5000);
        assert_eq!(countdown.remaining_ms(), 5000);
        assert_eq!(countdown.label(), "5s");
    }

    #[test]
    fn test_from_config_applies_attributes() {
        let config = CountdownConfig {
            duration_secs: 2.5,
            progress_color: Argb(0xFFFF_4081),
            ring_color: Argb(0xFF3F_51B5),
            center_text: Some("Skip".to_string()),
            text_size_sp: 14.0,
            ..Default::default()
        };
        let countdown = Countdown::from_config(&config, Density::new(2.0, 2.0));

        assert_eq!(countdown.duration_ms(), 2500);
        assert_eq!(countdown.palette().progress_arc, Argb(0xFFFF_4081));
        assert_eq!(countdown.palette().base_ring, Argb(0xFF3F_51B5));
        assert_eq!(countdown.center_text(), Some("Skip"));
        assert_eq!(countdown.text_size_px(), 28.0);
        assert_eq!(countdown.stroke_width_px(), 6.0);
    }

    #[test]
    fn test_setters_take_effect_on_next_paint() {
        let mut countdown = Countdown::new(Density::default());
        countdown.set_progress_color(Argb(0xFFFF_4081));
        countdown.set_background_color(Argb(0xFF00_0000));

        let mut surface = Recorder::default();
        countdown
            .scene()
            .paint(&mut surface, iced::Size::new(50.0, 50.0));
        assert_eq!(surface.texts(), vec!["3s"]);
        assert_eq!(surface.arc_sweep(), Some(0.0));

        countdown.set_text("Skip");
        let mut surface = Recorder::default();
        countdown
            .scene()
            .paint(&mut surface, iced::Size::new(50.0, 50.0));
        assert_eq!(surface.texts(), vec!["Skip"]);
    }

    #[test]
    fn test_measure_uses_widget_density() {
        let countdown = Countdown::new(Density::new(3.0, 3.0));
        let size = countdown.measure(Constraint::Unspecified, Constraint::Unspecified);
        assert_eq!(size, iced::Size::new(150.0, 150.0));
    }
}
