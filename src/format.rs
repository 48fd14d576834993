//! Human-readable renderings of byte counts and elapsed time.

use crate::constants::{
    BYTE_STEP, BYTE_UNITS, DATE_FORMAT, NAIVE_DATE_TIME_FORMATS, TIME_INTERVALS,
};
use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};

/// Above this magnitude `x * 100 + 0.5` is no longer exact in an f64.
const TIE_EXACT_LIMIT: f64 = 1e13;

/// Render a byte count with binary units, capped at GB.
///
/// A missing count renders as `0 B`; anything else gets two decimals,
/// so `0` renders as `0.00 B`. Negative counts are not clamped.
pub fn format_bytes(bytes: Option<f64>) -> String {
    let Some(mut value) = bytes else {
        return "0 B".to_string();
    };
    let mut index = 0;
    while value >= BYTE_STEP && index < BYTE_UNITS.len() - 1 {
        value /= BYTE_STEP;
        index += 1;
    }
    format!("{} {}", to_fixed_2(value), BYTE_UNITS[index])
}

/// Two-decimal rendering that rounds exact ties away from zero.
///
/// Non-finite values print as `NaN`, `Infinity` and `-Infinity`, and
/// negative zero prints without its sign.
fn to_fixed_2(value: f64) -> String {
    if value.is_nan() {
        return "NaN".to_string();
    }
    if value.is_infinite() {
        let label = if value > 0.0 { "Infinity" } else { "-Infinity" };
        return label.to_string();
    }
    let sign = if value < 0.0 { "-" } else { "" };
    let mut magnitude = value.abs();
    // Only odd multiples of 1/8 sit exactly halfway between two hundredths.
    let eighths = magnitude * 8.0;
    if magnitude < TIE_EXACT_LIMIT && eighths.fract() == 0.0 && eighths % 2.0 == 1.0 {
        magnitude = (magnitude * 100.0 + 0.5).floor() / 100.0;
    }
    format!("{sign}{magnitude:.2}")
}

/// Parse a textual timestamp into an absolute point in time.
///
/// Accepts RFC 3339, RFC 2822, offset-less date-times and bare dates.
/// Offset-less inputs are taken as UTC.
pub fn parse_timestamp(value: &str) -> Option<DateTime<Utc>> {
    let value = value.trim();
    if let Ok(parsed) = DateTime::parse_from_rfc3339(value) {
        return Some(parsed.with_timezone(&Utc));
    }
    if let Ok(parsed) = DateTime::parse_from_rfc2822(value) {
        return Some(parsed.with_timezone(&Utc));
    }
    for layout in NAIVE_DATE_TIME_FORMATS {
        if let Ok(parsed) = NaiveDateTime::parse_from_str(value, layout) {
            return Some(parsed.and_utc());
        }
    }
    NaiveDate::parse_from_str(value, DATE_FORMAT)
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .map(|midnight| midnight.and_utc())
}

/// Relative "time ago" phrase for `last_time`, measured against the system clock.
pub fn format_time_ago(last_time: &str) -> String {
    format_time_ago_at(last_time, Utc::now())
}

/// Relative "time ago" phrase for `last_time`, measured against `now`.
///
/// Empty input yields an empty string. Input that does not parse yields
/// `NaN seconds ago` so the caller can tell it apart from a real duration.
pub fn format_time_ago_at(last_time: &str, now: DateTime<Utc>) -> String {
    if last_time.is_empty() {
        return String::new();
    }
    let Some(then) = parse_timestamp(last_time) else {
        tracing::debug!(timestamp = last_time, "unparseable timestamp");
        return "NaN seconds ago".to_string();
    };
    format_time_ago_since(then, now)
}

/// Relative "time ago" phrase for an already parsed point in time.
pub fn format_time_ago_since(then: DateTime<Utc>, now: DateTime<Utc>) -> String {
    let seconds = (now - then).num_milliseconds().div_euclid(1000);
    describe_elapsed(seconds)
}

/// Pick the largest bucket whose whole count is strictly greater than one.
///
/// Exactly one unit falls through to the next smaller bucket, e.g. one year
/// reads as `12 months ago`. Below two minutes the raw seconds are reported.
pub fn describe_elapsed(seconds: i64) -> String {
    TIME_INTERVALS
        .iter()
        .map(|&(span, unit)| (seconds.div_euclid(span), unit))
        .find(|&(count, _)| count > 1)
        .map_or_else(
            || format!("{seconds} seconds ago"),
            |(count, unit)| format!("{count} {unit} ago"),
        )
}
