use chrono::prelude::*;
use chrono_tz::Tz;

const MILLIS_IN_DAY: i64 = 1000 * 60 * 60 * 24;

/// Resolves a stored timezone name to a usable `Tz`. Missing, empty or
/// malformed names resolve to UTC so that callers never have to handle
/// a timezone error.
pub fn safe_timezone(timezone: Option<&str>) -> Tz {
    timezone
        .and_then(|timezone| timezone.parse::<Tz>().ok())
        .unwrap_or(chrono_tz::UTC)
}

fn local(timestamp_millis: i64, tz: Tz) -> DateTime<Tz> {
    // Timestamps outside the representable range clamp to the epoch
    // rather than failing the pass that asked
    DateTime::from_timestamp_millis(timestamp_millis)
        .unwrap_or_default()
        .with_timezone(&tz)
}

/// Hour of day (0-23) on the wall clock in `tz`
pub fn local_hour(timestamp_millis: i64, tz: Tz) -> u32 {
    local(timestamp_millis, tz).hour()
}

/// Minute within the hour (0-59) on the wall clock in `tz`
pub fn local_minute(timestamp_millis: i64, tz: Tz) -> u32 {
    local(timestamp_millis, tz).minute()
}

/// Calendar date in `tz` formatted as `YYYY-MM-DD`. Used as the day part
/// of digest dedupe keys.
pub fn local_date_string(timestamp_millis: i64, tz: Tz) -> String {
    local(timestamp_millis, tz).format("%Y-%m-%d").to_string()
}

/// Wall clock time in `tz` formatted as `HH:MM`
pub fn local_time_string(timestamp_millis: i64, tz: Tz) -> String {
    local(timestamp_millis, tz).format("%H:%M").to_string()
}

/// Spelled out date in `tz`, e.g. "Sunday, February 21, 2021"
pub fn local_long_date_string(timestamp_millis: i64, tz: Tz) -> String {
    local(timestamp_millis, tz).format("%A, %B %-d, %Y").to_string()
}

/// The UTC timestamp range `[start, end)` covering the local calendar day
/// that `timestamp_millis` falls on in `tz`. The range is always exactly
/// 24 hours long, with the UTC offset sampled at the given instant, so a
/// digest never double counts activities around a DST transition.
pub fn day_bounds(timestamp_millis: i64, tz: Tz) -> (i64, i64) {
    let local = local(timestamp_millis, tz);
    let offset_millis = i64::from(local.offset().fix().local_minus_utc()) * 1000;
    let utc_midnight = local
        .date_naive()
        .and_time(NaiveTime::MIN)
        .and_utc()
        .timestamp_millis();
    let day_start = utc_midnight - offset_millis;
    (day_start, day_start + MILLIS_IN_DAY)
}
