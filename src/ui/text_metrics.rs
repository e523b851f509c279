//! Text measurement using cosmic-text
//!
//! iced's canvas does not expose font metrics, but the countdown label is
//! centered on its baseline, so the canvas surface asks this measurer for the
//! width, ascent and descent of each label.
//!
//! ## Caching
//!
//! Labels repeat every frame ("3s", "3s", ... "2s"), so results are cached by
//! text content and font size (rounded to hundredths).

use std::collections::HashMap;
use std::sync::Arc;

use cosmic_text::{Attrs, Buffer, Family, FontSystem, Metrics, Shaping};
use parking_lot::Mutex;

use crate::features::countdown::TextMetrics;

/// Font system shared between measurers
pub type SharedFontSystem = Arc<Mutex<FontSystem>>;

/// Entries kept before the cache is flushed
const CACHE_LIMIT: usize = 256;

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
struct MeasureKey {
    text: String,
    /// Font size multiplied by 100 and rounded
    size_x100: u32,
}

impl MeasureKey {
    fn new(text: &str, size: f32) -> Self {
        Self {
            text: text.to_string(),
            size_x100: (size * 100.0).round() as u32,
        }
    }
}

/// Measures single-line labels with a shared [`FontSystem`]
pub struct TextMeasurer {
    font_system: SharedFontSystem,
    cache: Mutex<HashMap<MeasureKey, TextMetrics>>,
}

impl std::fmt::Debug for TextMeasurer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TextMeasurer")
            .field("cached", &self.cache.lock().len())
            .finish_non_exhaustive()
    }
}

impl TextMeasurer {
    pub fn new(font_system: SharedFontSystem) -> Self {
        Self {
            font_system,
            cache: Mutex::new(HashMap::new()),
        }
    }

    /// Width, ascent and descent of `text` at `size` pixels
    pub fn measure(&self, text: &str, size: f32) -> TextMetrics {
        // cosmic-text rejects a zero line height
        if text.is_empty() || size.is_nan() || size <= 0.0 {
            return TextMetrics {
                width: 0.0,
                ascent: size.max(0.0),
                descent: 0.0,
            };
        }

        let key = MeasureKey::new(text, size);
        if let Some(cached) = self.cache.lock().get(&key) {
            return *cached;
        }

        let metrics = self.measure_uncached(text, size);

        let mut cache = self.cache.lock();
        if cache.len() >= CACHE_LIMIT {
            cache.clear();
        }
        cache.insert(key, metrics);

        metrics
    }

    fn measure_uncached(&self, text: &str, size: f32) -> TextMetrics {
        let mut font_system = self.font_system.lock();

        let mut buffer = Buffer::new(&mut font_system, Metrics::new(size, size));
        buffer.set_size(&mut font_system, None, None);

        let attrs = Attrs::new().family(Family::SansSerif);
        buffer.set_text(&mut font_system, text, &attrs, Shaping::Advanced, None);
        buffer.shape_until_scroll(&mut font_system, false);

        match buffer.layout_runs().next() {
            Some(run) => {
                let ascent = run.line_y - run.line_top;
                TextMetrics {
                    width: run.line_w,
                    ascent,
                    descent: (run.line_height - ascent).max(0.0),
                }
            }
            None => {
                tracing::debug!(text, "no layout run produced, using font size as ascent");
                TextMetrics {
                    width: 0.0,
                    ascent: size,
                    descent: 0.0,
                }
            }
        }
    }

    /// Number of cached measurements
    pub fn cached_len(&self) -> usize {
        self.cache.lock().len()
    }
}

/// Build a font system on a blocking thread; loading system fonts is slow
pub async fn init_font_system() -> Option<SharedFontSystem> {
    let result = tokio::task::spawn_blocking(|| {
        tracing::info!("Initializing FontSystem for label metrics...");
        let start = std::time::Instant::now();
        let font_system = FontSystem::new();
        tracing::info!("FontSystem initialized in {:?}", start.elapsed());
        Arc::new(Mutex::new(font_system))
    })
    .await;

    match result {
        Ok(font_system) => Some(font_system),
        Err(e) => {
            tracing::warn!("FontSystem initialization failed: {}", e);
            None
        }
    }
}
