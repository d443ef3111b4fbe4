use crate::shared::entity::{Entity, ID};

/// A `User` is a member of an `Account` (tenant) that owns activities
/// and receives reminder notifications.
#[derive(Debug, Clone)]
pub struct User {
    pub id: ID,
    pub account_id: ID,
    pub email: Option<String>,
    pub full_name: Option<String>,
    pub name: Option<String>,
    /// IANA timezone name, e.g. "Europe/Oslo". May be missing or garbage,
    /// in which case all local time math falls back to UTC.
    pub timezone: Option<String>,
    /// Deactivated users keep their data but are excluded from the
    /// daily digest
    pub active: bool,
}

impl User {
    pub fn new(account_id: ID) -> Self {
        Self {
            id: Default::default(),
            account_id,
            email: None,
            full_name: None,
            name: None,
            timezone: None,
            active: true,
        }
    }

    /// The address notifications for this `User` go to, if there is a
    /// usable one. An empty email is treated the same as a missing one.
    pub fn notification_email(&self) -> Option<&str> {
        self.email.as_deref().filter(|email| !email.is_empty())
    }
}

impl Entity for User {
    fn id(&self) -> &ID {
        &self.id
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_email_is_no_recipient() {
        let mut user = User::new(Default::default());
        assert_eq!(user.notification_email(), None);
        user.email = Some("".into());
        assert_eq!(user.notification_email(), None);
        user.email = Some("jane@company.org".into());
        assert_eq!(user.notification_email(), Some("jane@company.org"));
    }
}
