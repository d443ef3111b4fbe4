use crate::shared::entity::ID;
use std::fmt::Display;
use std::str::FromStr;
use thiserror::Error;

/// Which reminder pass produced a notification
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReminderType {
    PreStart,
    Overdue,
    DailyDigest,
}

impl ReminderType {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::PreStart => "pre_start",
            Self::Overdue => "overdue",
            Self::DailyDigest => "daily_digest",
        }
    }
}

impl Display for ReminderType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[derive(Error, Debug)]
pub enum InvalidReminderTypeError {
    #[error("Reminder type: {0} is not known")]
    Unknown(String),
}

impl FromStr for ReminderType {
    type Err = InvalidReminderTypeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "pre_start" => Ok(Self::PreStart),
            "overdue" => Ok(Self::Overdue),
            "daily_digest" => Ok(Self::DailyDigest),
            _ => Err(InvalidReminderTypeError::Unknown(s.to_string())),
        }
    }
}

/// A `ReminderEvent` records that a notification for one occasion has been
/// handed to the notification channel. Rows are written once and never
/// updated. Its `dedupe_key` is what keeps every reminder pass idempotent:
/// as long as a row with the key exists the occasion will not be notified
/// about again.
#[derive(Debug, Clone, PartialEq)]
pub struct ReminderEvent {
    /// Identifies the occasion. `"{reminder_type}:{activity_id}"` for
    /// activity reminders, `"daily_digest:{user_id}:{local_date}"` for
    /// digests.
    pub dedupe_key: String,
    pub reminder_type: ReminderType,
    /// The `Activity` that was notified about. Empty for digests, which
    /// cover a whole day rather than a single `Activity`.
    pub activity_id: Option<ID>,
    /// The `User` the notification went to
    pub user_id: ID,
    /// The local calendar date (`YYYY-MM-DD` in the recipient's timezone)
    /// a digest covered
    pub digest_date: Option<String>,
    /// When the notification was handed to the channel, in millis
    pub sent_at: i64,
}

impl ReminderEvent {
    pub fn activity_scoped(
        reminder_type: ReminderType,
        activity_id: &ID,
        user_id: &ID,
        sent_at: i64,
    ) -> Self {
        Self {
            dedupe_key: Self::activity_key(reminder_type, activity_id),
            reminder_type,
            activity_id: Some(activity_id.clone()),
            user_id: user_id.clone(),
            digest_date: None,
            sent_at,
        }
    }

    pub fn daily_digest(user_id: &ID, digest_date: &str, sent_at: i64) -> Self {
        Self {
            dedupe_key: Self::digest_key(user_id, digest_date),
            reminder_type: ReminderType::DailyDigest,
            activity_id: None,
            user_id: user_id.clone(),
            digest_date: Some(digest_date.to_string()),
            sent_at,
        }
    }

    /// Key for a reminder about a single `Activity`. One reminder of each
    /// type per activity, ever.
    pub fn activity_key(reminder_type: ReminderType, activity_id: &ID) -> String {
        format!("{}:{}", reminder_type, activity_id)
    }

    /// Key for a daily digest. One digest per user per local calendar day.
    pub fn digest_key(user_id: &ID, digest_date: &str) -> String {
        format!("{}:{}:{}", ReminderType::DailyDigest, user_id, digest_date)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn activity_keys_embed_type_and_activity() {
        let activity_id = ID::new();
        assert_eq!(
            ReminderEvent::activity_key(ReminderType::PreStart, &activity_id),
            format!("pre_start:{}", activity_id)
        );
        assert_eq!(
            ReminderEvent::activity_key(ReminderType::Overdue, &activity_id),
            format!("overdue:{}", activity_id)
        );
    }

    #[test]
    fn digest_keys_embed_user_and_local_date() {
        let user_id = ID::new();
        assert_eq!(
            ReminderEvent::digest_key(&user_id, "2021-02-21"),
            format!("daily_digest:{}:2021-02-21", user_id)
        );
    }

    #[test]
    fn reminder_types_roundtrip_through_their_raw_value() {
        for reminder_type in [
            ReminderType::PreStart,
            ReminderType::Overdue,
            ReminderType::DailyDigest,
        ] {
            assert_eq!(
                reminder_type.as_str().parse::<ReminderType>().unwrap(),
                reminder_type
            );
        }
        assert!("weekly_digest".parse::<ReminderType>().is_err());
    }
}
