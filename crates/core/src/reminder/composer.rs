use chrono_tz::Tz;
use herald_domain::{time_window, Activity, Lead, User, ID};
use itertools::Itertools;
use std::collections::HashMap;

/// A rendered notification. The html and text bodies carry the same
/// content, the text body is the fallback for clients that do not render
/// html.
#[derive(Debug, Clone, PartialEq)]
pub struct ComposedEmail {
    pub subject: String,
    pub html: String,
    pub text: String,
}

/// What a recipient is addressed by: their full name, their short name,
/// the local part of their email, then "there" when all of those are
/// missing or empty.
pub fn display_name(user: &User) -> String {
    let full_name = user.full_name.as_deref().filter(|name| !name.is_empty());
    let name = user.name.as_deref().filter(|name| !name.is_empty());
    let email_prefix = user
        .email
        .as_deref()
        .and_then(|email| email.split('@').next())
        .filter(|prefix| !prefix.is_empty());

    full_name
        .or(name)
        .or(email_prefix)
        .unwrap_or("there")
        .to_string()
}

fn escape_html(input: &str) -> String {
    input
        .replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
}

fn scheduled_time(activity: &Activity, tz: Tz) -> String {
    activity
        .scheduled_at
        .map(|scheduled_at| time_window::local_time_string(scheduled_at, tz))
        .unwrap_or_else(|| "--:--".to_string())
}

pub fn pre_start_email(
    activity: &Activity,
    user: &User,
    lead: Option<&Lead>,
    tz: Tz,
) -> ComposedEmail {
    let name = display_name(user);
    let label = activity.activity_type.label();
    let time = scheduled_time(activity, tz);
    let with_lead = lead
        .map(|lead| format!(" with {}", lead.full_name))
        .unwrap_or_default();
    let phone = lead
        .and_then(|lead| lead.phone.as_deref())
        .map(|phone| format!("Phone: {}", phone));

    let subject = format!("Reminder: {} at {}", label, time);
    let html = format!(
        "<p>Hi {},</p>\
         <p>Your {} <strong>{}</strong>{} starts at {}.</p>\
         {}\
         <p>Sent by Herald</p>",
        escape_html(&name),
        escape_html(label),
        escape_html(&activity.title),
        escape_html(&with_lead),
        time,
        phone
            .as_deref()
            .map(|phone| format!("<p>{}</p>", escape_html(phone)))
            .unwrap_or_default(),
    );
    let text = format!(
        "Hi {},\n\nYour {} \"{}\"{} starts at {}.\n{}\nSent by Herald\n",
        name,
        label,
        activity.title,
        with_lead,
        time,
        phone
            .map(|phone| format!("{}\n", phone))
            .unwrap_or_default(),
    );

    ComposedEmail {
        subject,
        html,
        text,
    }
}

pub fn overdue_email(
    activity: &Activity,
    user: &User,
    lead: Option<&Lead>,
    tz: Tz,
) -> ComposedEmail {
    let name = display_name(user);
    let label = activity.activity_type.label();
    let time = scheduled_time(activity, tz);
    let with_lead = lead
        .map(|lead| format!(" with {}", lead.full_name))
        .unwrap_or_default();

    let subject = format!("Overdue: {} from {}", label, time);
    let html = format!(
        "<p>Hi {},</p>\
         <p>Your {} <strong>{}</strong>{} was scheduled for {} and is still open.</p>\
         <p>Sent by Herald</p>",
        escape_html(&name),
        escape_html(label),
        escape_html(&activity.title),
        escape_html(&with_lead),
        time,
    );
    let text = format!(
        "Hi {},\n\nYour {} \"{}\"{} was scheduled for {} and is still open.\n\nSent by Herald\n",
        name, label, activity.title, with_lead, time,
    );

    ComposedEmail {
        subject,
        html,
        text,
    }
}

/// Everything a digest for one recipient on one local day is rendered
/// from: that day's activities sorted by start time, the leads they
/// point at and the open/done split.
#[derive(Debug)]
pub struct DayDigest {
    pub activities: Vec<Activity>,
    pub leads: HashMap<ID, Lead>,
    pub todo_count: usize,
    pub completed_count: usize,
}

impl DayDigest {
    pub fn new(mut activities: Vec<Activity>, leads: Vec<Lead>) -> Self {
        activities.sort_by_key(|activity| activity.scheduled_at);
        let todo_count = activities.iter().filter(|a| a.is_open()).count();
        let completed_count = activities.len() - todo_count;

        Self {
            activities,
            leads: leads.into_iter().map(|lead| (lead.id.clone(), lead)).collect(),
            todo_count,
            completed_count,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.activities.is_empty()
    }

    /// The distinct leads referenced by a day's activities, in first-seen
    /// order, so each one can be fetched once
    pub fn distinct_lead_ids(activities: &[Activity]) -> Vec<ID> {
        activities
            .iter()
            .map(|activity| activity.lead_id.clone())
            .unique()
            .collect()
    }

    fn line(&self, activity: &Activity, tz: Tz) -> String {
        let with_lead = self
            .leads
            .get(&activity.lead_id)
            .map(|lead| format!(" with {}", lead.full_name))
            .unwrap_or_default();
        let done = if activity.is_open() { "" } else { " (done)" };
        format!(
            "{} {}: {}{}{}",
            scheduled_time(activity, tz),
            activity.activity_type.label(),
            activity.title,
            with_lead,
            done,
        )
    }
}

pub fn digest_email(user: &User, digest: &DayDigest, now: i64, tz: Tz) -> ComposedEmail {
    let name = display_name(user);
    let date = time_window::local_long_date_string(now, tz);
    let summary = format!(
        "You have {} activities today: {} to do, {} already done.",
        digest.activities.len(),
        digest.todo_count,
        digest.completed_count,
    );
    let lines = digest
        .activities
        .iter()
        .map(|activity| digest.line(activity, tz))
        .collect::<Vec<_>>();

    let subject = format!("Your day ahead: {}", date);
    let html = format!(
        "<h2>Your day ahead</h2>\
         <p>Hi {},</p>\
         <p>{}</p>\
         <ul>{}</ul>\
         <p>Sent by Herald</p>",
        escape_html(&name),
        escape_html(&summary),
        lines
            .iter()
            .map(|line| format!("<li>{}</li>", escape_html(line)))
            .collect::<Vec<_>>()
            .join(""),
    );
    let text = format!(
        "Your day ahead: {}\n\nHi {},\n\n{}\n\n{}\n\nSent by Herald\n",
        date,
        name,
        summary,
        lines
            .iter()
            .map(|line| format!("- {}", line))
            .collect::<Vec<_>>()
            .join("\n"),
    );

    ComposedEmail {
        subject,
        html,
        text,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use herald_domain::{ActivityStatus, ActivityType};

    const TS: i64 = 1613862000000; // Sun Feb 21 2021 00:00:00 GMT+0100 (Central European Standard Time)
    const MINUTE: i64 = 1000 * 60;

    fn oslo() -> Tz {
        "Europe/Oslo".parse().unwrap()
    }

    fn test_user() -> User {
        let mut user = User::new(Default::default());
        user.email = Some("jane.doe@company.org".into());
        user
    }

    fn test_activity(scheduled_at: i64) -> Activity {
        let mut activity = Activity::new(Default::default(), Default::default(), Default::default());
        activity.title = "Follow up on offer".into();
        activity.activity_type = ActivityType::Call;
        activity.scheduled_at = Some(scheduled_at);
        activity
    }

    #[test]
    fn display_name_walks_the_fallback_chain() {
        let mut user = test_user();
        user.full_name = Some("Jane Doe".into());
        user.name = Some("Jane".into());
        assert_eq!(display_name(&user), "Jane Doe");

        user.full_name = None;
        assert_eq!(display_name(&user), "Jane");

        user.name = Some("".into());
        assert_eq!(display_name(&user), "jane.doe");

        user.email = None;
        assert_eq!(display_name(&user), "there");
    }

    #[test]
    fn display_name_ignores_empty_strings() {
        let mut user = User::new(Default::default());
        user.full_name = Some("".into());
        user.email = Some("@company.org".into());
        assert_eq!(display_name(&user), "there");
    }

    #[test]
    fn pre_start_email_says_what_when_and_who() {
        let activity = test_activity(TS + 570 * MINUTE); // 09:30 in Oslo
        let mut lead = Lead::new(Default::default(), "John Buyer".into());
        lead.phone = Some("+47 222 22 222".into());

        let email = pre_start_email(&activity, &test_user(), Some(&lead), oslo());
        assert_eq!(email.subject, "Reminder: Call at 09:30");
        for body in [&email.html, &email.text] {
            assert!(body.contains("Follow up on offer"));
            assert!(body.contains("John Buyer"));
            assert!(body.contains("09:30"));
            assert!(body.contains("+47 222 22 222"));
        }
    }

    #[test]
    fn overdue_email_reads_differently_than_pre_start() {
        let activity = test_activity(TS + 570 * MINUTE);
        let user = test_user();

        let pre_start = pre_start_email(&activity, &user, None, oslo());
        let overdue = overdue_email(&activity, &user, None, oslo());
        assert_ne!(pre_start.subject, overdue.subject);
        assert!(overdue.subject.starts_with("Overdue:"));
        assert!(overdue.text.contains("still open"));
    }

    #[test]
    fn unknown_activity_types_show_up_verbatim() {
        let mut activity = test_activity(TS + 570 * MINUTE);
        activity.activity_type = ActivityType::Other("site-inspection".into());

        let email = pre_start_email(&activity, &test_user(), None, oslo());
        assert_eq!(email.subject, "Reminder: site-inspection at 09:30");
    }

    #[test]
    fn html_bodies_are_escaped() {
        let mut activity = test_activity(TS + 570 * MINUTE);
        activity.title = "Discuss <script>alert(1)</script> & more".into();

        let email = pre_start_email(&activity, &test_user(), None, oslo());
        assert!(!email.html.contains("<script>"));
        assert!(email.html.contains("&lt;script&gt;"));
        assert!(email.html.contains("&amp; more"));
        // The plain text body is left alone
        assert!(email.text.contains("<script>"));
    }

    #[test]
    fn digest_sorts_ascending_and_counts_by_status() {
        let morning = test_activity(TS + 9 * 60 * MINUTE);
        let mut midday = test_activity(TS + 12 * 60 * MINUTE);
        midday.title = "Lunch meeting".into();
        midday.status = ActivityStatus::Completed;
        let mut evening = test_activity(TS + 18 * 60 * MINUTE);
        evening.title = "Evening viewing".into();

        let digest = DayDigest::new(
            vec![evening.clone(), morning.clone(), midday.clone()],
            vec![],
        );
        assert_eq!(digest.todo_count, 2);
        assert_eq!(digest.completed_count, 1);
        assert_eq!(digest.activities[0].id, morning.id);
        assert_eq!(digest.activities[2].id, evening.id);

        let email = digest_email(&test_user(), &digest, TS + 8 * 60 * MINUTE, oslo());
        assert!(email.subject.contains("Sunday, February 21, 2021"));
        assert!(email.text.contains("3 activities today: 2 to do, 1 already done"));
        assert!(email.text.contains("12:00 Call: Lunch meeting (done)"));
        let first = email.text.find("09:00").unwrap();
        let second = email.text.find("12:00").unwrap();
        let third = email.text.find("18:00").unwrap();
        assert!(first < second && second < third);
    }

    #[test]
    fn digest_lines_name_their_leads() {
        let lead = Lead::new(Default::default(), "John Buyer".into());
        let mut activity = test_activity(TS + 9 * 60 * MINUTE);
        activity.lead_id = lead.id.clone();

        let digest = DayDigest::new(vec![activity], vec![lead]);
        let email = digest_email(&test_user(), &digest, TS + 8 * 60 * MINUTE, oslo());
        assert!(email.text.contains("09:00 Call: Follow up on offer with John Buyer"));
        assert!(email.html.contains("with John Buyer"));
    }

    #[test]
    fn distinct_lead_ids_drop_duplicates() {
        let lead_id = ID::new();
        let mut first = test_activity(TS);
        first.lead_id = lead_id.clone();
        let mut second = test_activity(TS + MINUTE);
        second.lead_id = lead_id.clone();
        let third = test_activity(TS + 2 * MINUTE);

        let ids = DayDigest::distinct_lead_ids(&[first, second, third.clone()]);
        assert_eq!(ids.len(), 2);
        assert_eq!(ids[0], lead_id);
        assert_eq!(ids[1], third.lead_id);
    }
}
