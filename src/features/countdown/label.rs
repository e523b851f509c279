//! Countdown label text

/// Suffix appended to the remaining seconds
pub const SECONDS_SUFFIX: &str = "s";

/// Label shown while no fixed caption is set.
///
/// Whole seconds of `remaining_ms`, bumped by one once the run has begun so a
/// partially elapsed second still counts. Non-positive time reads `"0s"`.
pub fn countdown_label(remaining_ms: i64, duration_ms: i64) -> String {
    if remaining_ms <= 0 {
        return format!("0{SECONDS_SUFFIX}");
    }

    let mut secs = remaining_ms / 1000;
    if remaining_ms != duration_ms {
        secs += 1;
    }
    format!("{secs}{SECONDS_SUFFIX}")
}
