use std::time::Duration;
use crate::constants::{MILLIS_PER_SECOND, SECONDS_PER_HOUR, SECONDS_PER_MINUTE};

/// Sub-second durations print as milliseconds, longer ones as `HH:MM:SS`.
pub fn format_duration(duration: Duration) -> String {
    if duration.as_millis() < MILLIS_PER_SECOND {
        return format!("{}ms", duration.as_millis());
    }

    let total_seconds = duration.as_secs();
    let hours = total_seconds / SECONDS_PER_HOUR;
    let minutes = (total_seconds % SECONDS_PER_HOUR) / SECONDS_PER_MINUTE;
    let seconds = total_seconds % SECONDS_PER_MINUTE;

    format!("{:02}:{:02}:{:02}", hours, minutes, seconds)
}
