use crate::constants::LOG_TIMESTAMP_FORMAT;
use chrono::NaiveDateTime;

/// Rounds half away from zero to two decimal places.
pub fn round_two_decimals(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// Formats a timestamp the way progress log lines expect it (`2024-Mar-07-14:32:09`).
pub fn format_log_timestamp(at: &NaiveDateTime) -> String {
    at.format(LOG_TIMESTAMP_FORMAT).to_string()
}
