use crate::shared::entity::{Entity, ID};

/// An `Activity` is a unit of work a `User` has planned around a `Lead`,
/// for example a call, a meeting or a viewing. Reminders are generated
/// from its `scheduled_at` timestamp and its `status`.
#[derive(Debug, Clone)]
pub struct Activity {
    pub id: ID,
    /// The `Account` (tenant) this `Activity` belongs to
    pub account_id: ID,
    pub activity_type: ActivityType,
    pub title: String,
    /// When the `Activity` is planned to start, in millis since the unix
    /// epoch. Unscheduled activities have no value here and are never
    /// picked up by any reminder pass.
    pub scheduled_at: Option<i64>,
    pub status: ActivityStatus,
    /// The `User` responsible for carrying out this `Activity` and the
    /// recipient of any reminder about it
    pub assigned_to: ID,
    /// The `Lead` this `Activity` revolves around
    pub lead_id: ID,
}

impl Activity {
    pub fn new(account_id: ID, assigned_to: ID, lead_id: ID) -> Self {
        Self {
            id: Default::default(),
            account_id,
            activity_type: ActivityType::Call,
            title: Default::default(),
            scheduled_at: None,
            status: ActivityStatus::Todo,
            assigned_to,
            lead_id,
        }
    }

    pub fn is_open(&self) -> bool {
        self.status == ActivityStatus::Todo
    }
}

impl Entity for Activity {
    fn id(&self) -> &ID {
        &self.id
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActivityStatus {
    Todo,
    Completed,
}

impl ActivityStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Todo => "todo",
            Self::Completed => "completed",
        }
    }
}

impl From<&str> for ActivityStatus {
    fn from(status: &str) -> Self {
        match status {
            "todo" => Self::Todo,
            // Anything unrecognized is treated as handled so that it can
            // never trigger a reminder
            _ => Self::Completed,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ActivityType {
    Call,
    Message,
    WhatsApp,
    Email,
    Meeting,
    Viewing,
    Note,
    Other(String),
}

impl ActivityType {
    /// The raw value as stored by the record store
    pub fn as_str(&self) -> &str {
        match self {
            Self::Call => "call",
            Self::Message => "message",
            Self::WhatsApp => "whatsapp",
            Self::Email => "email",
            Self::Meeting => "meeting",
            Self::Viewing => "viewing",
            Self::Note => "note",
            Self::Other(activity_type) => activity_type,
        }
    }

    /// Human readable label used in notification subjects and bodies.
    /// Unknown types pass through unchanged instead of failing the
    /// notification.
    pub fn label(&self) -> &str {
        match self {
            Self::Call => "Call",
            Self::Message => "Message",
            Self::WhatsApp => "WhatsApp",
            Self::Email => "Email",
            Self::Meeting => "Meeting",
            Self::Viewing => "Viewing",
            Self::Note => "Note",
            Self::Other(activity_type) => activity_type,
        }
    }
}

impl From<&str> for ActivityType {
    fn from(activity_type: &str) -> Self {
        match activity_type {
            "call" => Self::Call,
            "message" => Self::Message,
            "whatsapp" => Self::WhatsApp,
            "email" => Self::Email,
            "meeting" => Self::Meeting,
            "viewing" => Self::Viewing,
            "note" => Self::Note,
            _ => Self::Other(activity_type.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn known_activity_types_get_labels() {
        assert_eq!(ActivityType::from("call").label(), "Call");
        assert_eq!(ActivityType::from("viewing").label(), "Viewing");
        assert_eq!(ActivityType::from("whatsapp").label(), "WhatsApp");
        assert_eq!(ActivityType::from("meeting").as_str(), "meeting");
    }

    #[test]
    fn unknown_activity_types_pass_through() {
        let activity_type = ActivityType::from("site-inspection");
        assert_eq!(activity_type, ActivityType::Other("site-inspection".into()));
        assert_eq!(activity_type.label(), "site-inspection");
        assert_eq!(activity_type.as_str(), "site-inspection");
    }

    #[test]
    fn unknown_status_never_counts_as_open() {
        let mut activity = Activity::new(Default::default(), Default::default(), Default::default());
        activity.status = ActivityStatus::from("cancelled");
        assert!(!activity.is_open());
    }
}
