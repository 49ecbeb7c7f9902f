use chrono::Duration;

/// Rounds the duration to whole seconds, negative durations become zero.
#[must_use]
pub fn round_seconds(duration: Duration) -> u32 {
    let millis = duration.num_milliseconds().max(0);
    (millis as f64 / 1000.0).round().min(f64::from(u32::MAX)) as u32
}

/// Human-friendly reading time: seconds under a minute, otherwise rounded minutes.
#[must_use]
pub fn format_seconds(seconds: u32) -> String {
    if seconds < 60 {
        format!("{}s", seconds)
    } else {
        format!("{} min", (f64::from(seconds) / 60.0).round() as u32)
    }
}
