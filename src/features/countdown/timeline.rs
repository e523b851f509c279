//! Linear countdown timeline
//!
//! A [`Timeline`] maps wall-clock time onto the `0..=100` progress range.
//! Every call to [`Countdown::start`] creates a fresh timeline with a new
//! [`RunId`]; ticks addressed to an older id are stale and get dropped.
//!
//! [`Countdown::start`]: super::Countdown::start

use std::time::Instant;

/// Progress value at completion
pub const PROGRESS_MAX: u8 = 100;

/// Identifies one animation run of a widget
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct RunId(u64);

impl RunId {
    pub(crate) fn first() -> Self {
        Self(1)
    }

    pub(crate) fn next(self) -> Self {
        Self(self.0.wrapping_add(1))
    }
}

/// Snapshot of a timeline at one instant
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Sample {
    /// Interpolated progress, floored to a whole percent
    pub progress: u8,
    /// Duration minus elapsed time; zero or negative once finished
    pub remaining_ms: i64,
}

impl Sample {
    pub fn is_finished(&self) -> bool {
        self.progress == PROGRESS_MAX
    }
}

/// One linear 0 → 100 interpolation over a fixed duration
#[derive(Debug, Clone, Copy)]
pub struct Timeline {
    id: RunId,
    started_at: Instant,
    duration_ms: i64,
}

impl Timeline {
    pub fn new(id: RunId, started_at: Instant, duration_ms: i64) -> Self {
        Self {
            id,
            started_at,
            duration_ms,
        }
    }

    pub fn id(&self) -> RunId {
        self.id
    }

    /// Milliseconds since the run started; instants before the start count as zero
    pub fn elapsed_ms(&self, now: Instant) -> i64 {
        let elapsed = now.saturating_duration_since(self.started_at).as_millis();
        i64::try_from(elapsed).unwrap_or(i64::MAX)
    }

    /// Sample progress and remaining time at `now`
    pub fn sample(&self, now: Instant) -> Sample {
        let elapsed = self.elapsed_ms(now);
        Sample {
            progress: progress_at(elapsed, self.duration_ms),
            remaining_ms: self.duration_ms.saturating_sub(elapsed),
        }
    }
}

/// Whole-percent progress after `elapsed_ms` of a `duration_ms` run.
///
/// Integer arithmetic keeps exact fractions exact (1450 of 5000 is 29, not 28).
/// A non-positive duration is complete immediately.
pub fn progress_at(elapsed_ms: i64, duration_ms: i64) -> u8 {
    if duration_ms <= 0 || elapsed_ms >= duration_ms {
        return PROGRESS_MAX;
    }
    let elapsed = elapsed_ms.max(0) as i128;
    let percent = elapsed * PROGRESS_MAX as i128 / duration_ms as i128;
    percent as u8
}
