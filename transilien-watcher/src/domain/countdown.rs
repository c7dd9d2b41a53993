//! Countdown formatting.
//!
//! Turns the time left before a departure into the compact strings shown on
//! the display: whole minutes below one hour, whole hours above.

use chrono::Duration;

/// Seconds in one hour.
const HOUR_SECS: i64 = 60 * 60;

/// Format a time span as a compact countdown.
///
/// - Negative spans (train already due) count as zero.
/// - Anything under a minute, zero included, reports `"1min"`.
/// - Under an hour reports whole minutes, rounded down.
/// - An hour or more reports whole hours, rounded down; minutes are dropped.
///
/// # Examples
///
/// ```
/// use chrono::Duration;
/// use transilien_watcher::domain::format_countdown;
///
/// assert_eq!(format_countdown(Duration::seconds(40)), "1min");
/// assert_eq!(format_countdown(Duration::seconds(120)), "2min");
/// assert_eq!(format_countdown(Duration::seconds(3599)), "59min");
/// assert_eq!(format_countdown(Duration::seconds(7400)), "2h");
/// ```
pub fn format_countdown(remaining: Duration) -> String {
    let secs = remaining.num_seconds().max(0);

    if secs >= HOUR_SECS {
        return format!("{}h", secs / HOUR_SECS);
    }

    let minutes = (secs / 60).max(1);
    format!("{minutes}min")
}
