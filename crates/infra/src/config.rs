use tracing::{info, warn};

#[derive(Debug, Clone)]
pub struct Config {
    /// How far ahead of `scheduled_at` the pre-start window opens, in millis.
    /// An `Activity` closer to its start than this has already had its
    /// chance and is left to the overdue pass.
    pub pre_start_lead_time_min: i64,
    /// How far ahead of `scheduled_at` the pre-start window closes, in millis.
    /// Together with the run cadence this bounds how often an `Activity`
    /// can be considered before its reminder is sent.
    pub pre_start_lead_time_max: i64,
    /// How long after `scheduled_at` an open `Activity` is left alone
    /// before it counts as overdue, in millis
    pub overdue_grace_period: i64,
    /// Open activities older than this are assumed to be abandoned and are
    /// never nagged about, in millis. This keeps a backlog of stale todos
    /// from flooding recipients when the engine comes back after downtime.
    pub overdue_lookback_limit: i64,
    /// Local hour of day (0-23) at which the daily digest goes out
    pub digest_local_hour: u32,
    /// Minutes past `digest_local_hour` during which an invocation still
    /// counts as the digest occasion. Must be at least the digest run
    /// cadence or a whole day can slip through between two runs.
    pub digest_window_minutes: u32,
    /// Seconds between two runs of each activity reminder pass
    pub activity_pass_interval_secs: u64,
    /// Seconds between two runs of the daily digest pass
    pub digest_pass_interval_secs: u64,
    /// Upper bound in millis for a single notification dispatch before it
    /// is treated as failed
    pub dispatch_timeout_millis: u64,
    /// How many candidates a pass works on concurrently
    pub candidate_concurrency: usize,
    /// Outgoing email settings. `None` disables the SMTP mailer, which is
    /// the case for tests and local runs against in-memory fakes.
    pub smtp: Option<SmtpConfig>,
}

#[derive(Debug, Clone)]
pub struct SmtpConfig {
    pub host: String,
    pub port: u16,
    pub username: Option<String>,
    pub password: Option<String>,
    /// Sender mailbox, e.g. "Herald <no-reply@herald.app>"
    pub from: String,
}

impl SmtpConfig {
    fn from_env() -> Option<Self> {
        let host = match std::env::var("SMTP_HOST") {
            Ok(host) => host,
            Err(_) => {
                info!("Did not find SMTP_HOST environment variable. Outgoing email is disabled.");
                return None;
            }
        };
        let default_port = "587";
        let port = std::env::var("SMTP_PORT").unwrap_or(default_port.into());
        let port = match port.parse::<u16>() {
            Ok(port) => port,
            Err(_) => {
                warn!(
                    "The given SMTP_PORT: {} is not valid, falling back to the default port: {}.",
                    port, default_port
                );
                default_port.parse::<u16>().unwrap()
            }
        };
        let from = match std::env::var("SMTP_FROM") {
            Ok(from) => from,
            Err(_) => {
                warn!("Did not find SMTP_FROM environment variable. Outgoing email is disabled.");
                return None;
            }
        };
        Some(Self {
            host,
            port,
            username: std::env::var("SMTP_USERNAME").ok(),
            password: std::env::var("SMTP_PASSWORD").ok(),
            from,
        })
    }
}

impl Config {
    pub fn new() -> Self {
        Self {
            pre_start_lead_time_min: 1000 * 60 * 50, // 50 minutes
            pre_start_lead_time_max: 1000 * 60 * 70, // 70 minutes
            overdue_grace_period: 1000 * 60 * 50,    // 50 minutes
            overdue_lookback_limit: 1000 * 60 * 60 * 24, // 24 hours
            digest_local_hour: 8,
            digest_window_minutes: 15,
            activity_pass_interval_secs: 60 * 5, // 5 minutes
            digest_pass_interval_secs: 60 * 15,  // 15 minutes
            dispatch_timeout_millis: 1000 * 10,  // 10 seconds
            candidate_concurrency: 8,
            smtp: SmtpConfig::from_env(),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::new()
    }
}
