use herald_core::{run_daily_digest_pass, run_overdue_pass, run_pre_start_pass};
use herald_domain::{Activity, ActivityStatus, ActivityType, Lead, User};
use herald_infra::{setup_context_inmemory, HeraldContext, ISys, InMemoryMailer};
use std::sync::atomic::{AtomicI64, Ordering};
use std::sync::Arc;

const TS: i64 = 1613862000000; // Sun Feb 21 2021 00:00:00 GMT+0100 (Central European Standard Time)
const MINUTE: i64 = 1000 * 60;
const HOUR: i64 = 60 * MINUTE;

struct AdjustableTimeSys {
    now: AtomicI64,
}

impl AdjustableTimeSys {
    fn new(now: i64) -> Self {
        Self {
            now: AtomicI64::new(now),
        }
    }

    fn set(&self, now: i64) {
        self.now.store(now, Ordering::SeqCst);
    }
}

impl ISys for AdjustableTimeSys {
    fn get_timestamp_millis(&self) -> i64 {
        self.now.load(Ordering::SeqCst)
    }
}

struct TestApp {
    ctx: HeraldContext,
    mailer: Arc<InMemoryMailer>,
    clock: Arc<AdjustableTimeSys>,
}

fn spawn_app(now: i64) -> TestApp {
    let mut ctx = setup_context_inmemory();
    let mailer = Arc::new(InMemoryMailer::new());
    let clock = Arc::new(AdjustableTimeSys::new(now));
    ctx.mailer = mailer.clone();
    ctx.sys = clock.clone();
    TestApp { ctx, mailer, clock }
}

async fn insert_user(ctx: &HeraldContext, email: &str, timezone: &str) -> User {
    let mut user = User::new(Default::default());
    user.email = Some(email.into());
    user.full_name = Some("Jane Doe".into());
    user.timezone = Some(timezone.into());
    ctx.repos.users.insert(&user).await.unwrap();
    user
}

async fn insert_activity(ctx: &HeraldContext, user: &User, scheduled_at: i64) -> Activity {
    let lead = Lead::new(user.account_id.clone(), "John Buyer".into());
    ctx.repos.leads.insert(&lead).await.unwrap();

    let mut activity = Activity::new(user.account_id.clone(), user.id.clone(), lead.id.clone());
    activity.title = "Viewing at Main St 5".into();
    activity.activity_type = ActivityType::Viewing;
    activity.scheduled_at = Some(scheduled_at);
    ctx.repos.activities.insert(&activity).await.unwrap();
    activity
}

#[tokio::test]
async fn reminders_follow_an_activity_through_its_day() {
    let app = spawn_app(TS);
    let user = insert_user(&app.ctx, "jane@company.org", "Europe/Oslo").await;
    insert_activity(&app.ctx, &user, TS + 60 * MINUTE).await;

    // An hour before the start the pre-start pass picks it up
    let summary = run_pre_start_pass(&app.ctx).await.expect("Pass to run");
    assert_eq!(summary.sent, 1);

    // Later the same morning it is still open and now overdue
    app.clock.set(TS + 115 * MINUTE);
    let summary = run_overdue_pass(&app.ctx).await.expect("Pass to run");
    assert_eq!(summary.sent, 1);

    // At 08:05 the daily digest lists it
    app.clock.set(TS + 8 * HOUR + 5 * MINUTE);
    let summary = run_daily_digest_pass(&app.ctx).await.expect("Pass to run");
    assert_eq!(summary.sent, 1);

    let outbox = app.mailer.outbox();
    assert_eq!(outbox.len(), 3);
    assert!(outbox[0].subject.starts_with("Reminder: Viewing at"));
    assert!(outbox[1].subject.starts_with("Overdue: Viewing from"));
    assert!(outbox[2].subject.starts_with("Your day ahead:"));
    for email in &outbox {
        assert_eq!(email.to, "jane@company.org");
    }

    // Running every pass again adds nothing
    run_pre_start_pass(&app.ctx).await.expect("Pass to run");
    run_overdue_pass(&app.ctx).await.expect("Pass to run");
    run_daily_digest_pass(&app.ctx).await.expect("Pass to run");
    assert_eq!(app.mailer.outbox().len(), 3);
}

#[tokio::test]
async fn a_completed_activity_is_never_nudged_again() {
    let app = spawn_app(TS);
    let user = insert_user(&app.ctx, "jane@company.org", "Europe/Oslo").await;
    let mut activity = insert_activity(&app.ctx, &user, TS + 60 * MINUTE).await;

    activity.status = ActivityStatus::Completed;
    app.ctx.repos.activities.save(&activity).await.unwrap();

    let summary = run_pre_start_pass(&app.ctx).await.expect("Pass to run");
    assert_eq!(summary.selected, 0);

    app.clock.set(TS + 115 * MINUTE);
    let summary = run_overdue_pass(&app.ctx).await.expect("Pass to run");
    assert_eq!(summary.selected, 0);

    // The digest still shows it, marked as done
    app.clock.set(TS + 8 * HOUR + 5 * MINUTE);
    let summary = run_daily_digest_pass(&app.ctx).await.expect("Pass to run");
    assert_eq!(summary.sent, 1);

    let outbox = app.mailer.outbox();
    assert_eq!(outbox.len(), 1);
    assert!(outbox[0].text.contains("Viewing at Main St 5"));
    assert!(outbox[0].text.contains("(done)"));
    assert!(outbox[0].text.contains("0 to do, 1 already done"));
}

#[tokio::test]
async fn a_failed_send_is_retried_later_and_sent_exactly_once() {
    let app = spawn_app(TS);
    let user = insert_user(&app.ctx, "jane@company.org", "Europe/Oslo").await;
    insert_activity(&app.ctx, &user, TS + 60 * MINUTE).await;

    app.mailer.fail_sends.store(true, Ordering::SeqCst);
    let summary = run_pre_start_pass(&app.ctx).await.expect("Pass to run");
    assert_eq!(summary.failed, 1);
    assert!(app.mailer.outbox().is_empty());

    // The channel recovers before the next run, still inside the window
    app.mailer.fail_sends.store(false, Ordering::SeqCst);
    app.clock.set(TS + 5 * MINUTE);
    let summary = run_pre_start_pass(&app.ctx).await.expect("Pass to run");
    assert_eq!(summary.sent, 1);

    let summary = run_pre_start_pass(&app.ctx).await.expect("Pass to run");
    assert_eq!(summary.skipped_already_sent, 1);
    assert_eq!(app.mailer.outbox().len(), 1);
}

#[tokio::test]
async fn digests_go_out_at_eight_on_each_users_own_clock() {
    let app = spawn_app(TS + 8 * HOUR + 5 * MINUTE);
    let oslo = insert_user(&app.ctx, "oslo@company.org", "Europe/Oslo").await;
    let new_york = insert_user(&app.ctx, "ny@company.org", "America/New_York").await;
    insert_activity(&app.ctx, &oslo, TS + 9 * HOUR).await;
    insert_activity(&app.ctx, &new_york, TS + 15 * HOUR).await;

    // 08:05 in Oslo is the middle of the night in New York
    let summary = run_daily_digest_pass(&app.ctx).await.expect("Pass to run");
    assert_eq!(summary.sent, 1);
    assert_eq!(app.mailer.outbox()[0].to, "oslo@company.org");

    // Six hours later New York reaches its own 08:05
    app.clock.set(TS + 14 * HOUR + 5 * MINUTE);
    let summary = run_daily_digest_pass(&app.ctx).await.expect("Pass to run");
    assert_eq!(summary.sent, 1);
    assert_eq!(summary.skipped_already_sent, 0);

    let outbox = app.mailer.outbox();
    assert_eq!(outbox.len(), 2);
    assert_eq!(outbox[1].to, "ny@company.org");
}
