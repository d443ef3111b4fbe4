use chrono_tz::Tz;
use herald_domain::time_window;
use herald_infra::Config;

/// The closed `scheduled_at` range `[start, end]` that the pre-start pass
/// selects on. Wide enough that an `Activity` stays selectable across
/// several run cadences before its start.
pub fn pre_start_window(now: i64, config: &Config) -> (i64, i64) {
    (
        now + config.pre_start_lead_time_min,
        now + config.pre_start_lead_time_max,
    )
}

/// The closed `scheduled_at` range `[start, end]` that the overdue pass
/// selects on. Ends `overdue_grace_period` in the past so freshly started
/// activities get a chance to be completed, and starts at the lookback
/// limit so stale todos from before that stay quiet.
pub fn overdue_window(now: i64, config: &Config) -> (i64, i64) {
    (
        now - config.overdue_lookback_limit,
        now - config.overdue_grace_period,
    )
}

/// Whether `now` is the digest occasion on a recipient's wall clock: the
/// digest hour, within the first `digest_window_minutes` minutes
pub fn in_digest_window(now: i64, tz: Tz, config: &Config) -> bool {
    time_window::local_hour(now, tz) == config.digest_local_hour
        && time_window::local_minute(now, tz) < config.digest_window_minutes
}
