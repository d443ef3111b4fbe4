use super::{activity_pass, composer, eligibility, PassSummary};
use crate::shared::usecase::UseCase;
use herald_domain::ReminderType;
use herald_infra::HeraldContext;
use tracing::error;

/// Nudges assignees about activities whose start time has passed but
/// which are still open. Fresh ones inside the grace period are left
/// alone, as are stale ones from before the lookback limit.
#[derive(Debug)]
pub struct SendOverdueRemindersUseCase;

#[derive(Debug, PartialEq)]
pub enum UseCaseError {
    StorageError,
}

#[async_trait::async_trait]
impl UseCase for SendOverdueRemindersUseCase {
    type Response = PassSummary;

    type Error = UseCaseError;

    const NAME: &'static str = "SendOverdueReminders";

    async fn execute(&mut self, ctx: &HeraldContext) -> Result<Self::Response, Self::Error> {
        let now = ctx.sys.get_timestamp_millis();
        let (start, end) = eligibility::overdue_window(now, &ctx.config);

        let candidates = match ctx
            .repos
            .activities
            .find_todo_scheduled_between(start, end)
            .await
        {
            Ok(candidates) => candidates,
            Err(e) => {
                error!("Unable to query overdue activities: {:?}", e);
                return Err(UseCaseError::StorageError);
            }
        };

        Ok(activity_pass::process_candidates(
            ReminderType::Overdue,
            candidates,
            now,
            ctx,
            composer::overdue_email,
        )
        .await)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::usecase::execute;
    use herald_domain::{Activity, ActivityStatus, Lead, ReminderEvent, User};
    use herald_infra::{setup_context_inmemory, ISys, InMemoryMailer};
    use std::sync::Arc;

    const TS: i64 = 1613862000000; // Sun Feb 21 2021 00:00:00 GMT+0100 (Central European Standard Time)
    const MINUTE: i64 = 1000 * 60;
    const HOUR: i64 = 60 * MINUTE;

    struct StaticTimeSys;
    impl ISys for StaticTimeSys {
        fn get_timestamp_millis(&self) -> i64 {
            TS
        }
    }

    struct TestContext {
        ctx: HeraldContext,
        mailer: Arc<InMemoryMailer>,
    }

    fn setup() -> TestContext {
        let mut ctx = setup_context_inmemory();
        ctx.sys = Arc::new(StaticTimeSys {});
        let mailer = Arc::new(InMemoryMailer::new());
        ctx.mailer = mailer.clone();
        TestContext { ctx, mailer }
    }

    async fn insert_candidate(ctx: &HeraldContext, started_ago: i64) -> (User, Activity) {
        let mut user = User::new(Default::default());
        user.email = Some("jane@company.org".into());
        ctx.repos.users.insert(&user).await.unwrap();

        let lead = Lead::new(user.account_id.clone(), "John Buyer".into());
        ctx.repos.leads.insert(&lead).await.unwrap();

        let mut activity = Activity::new(user.account_id.clone(), user.id.clone(), lead.id.clone());
        activity.title = "Send offer documents".into();
        activity.scheduled_at = Some(TS - started_ago);
        ctx.repos.activities.insert(&activity).await.unwrap();

        (user, activity)
    }

    #[tokio::test]
    async fn sends_one_nudge_for_an_open_overdue_activity() {
        let TestContext { ctx, mailer } = setup();
        let (_, activity) = insert_candidate(&ctx, HOUR).await;

        let summary = execute(SendOverdueRemindersUseCase, &ctx)
            .await
            .expect("Pass to run");

        assert_eq!(summary.sent, 1);
        let outbox = mailer.outbox();
        assert_eq!(outbox.len(), 1);
        assert!(outbox[0].subject.starts_with("Overdue:"));
        assert!(outbox[0].text.contains("still open"));

        let key = ReminderEvent::activity_key(ReminderType::Overdue, &activity.id);
        assert!(ctx.repos.reminder_events.exists(&key).await);
    }

    #[tokio::test]
    async fn completed_activities_are_never_nudged() {
        let TestContext { ctx, mailer } = setup();
        let (_, mut activity) = insert_candidate(&ctx, HOUR).await;
        activity.status = ActivityStatus::Completed;
        ctx.repos.activities.save(&activity).await.unwrap();

        let summary = execute(SendOverdueRemindersUseCase, &ctx)
            .await
            .expect("Pass to run");

        assert_eq!(summary.selected, 0);
        assert!(mailer.outbox().is_empty());
    }

    #[tokio::test]
    async fn leaves_fresh_and_stale_activities_alone() {
        let TestContext { ctx, mailer } = setup();
        // Inside the grace period
        insert_candidate(&ctx, 10 * MINUTE).await;
        // Older than the lookback limit
        insert_candidate(&ctx, 25 * HOUR).await;

        let summary = execute(SendOverdueRemindersUseCase, &ctx)
            .await
            .expect("Pass to run");

        assert_eq!(summary.selected, 0);
        assert!(mailer.outbox().is_empty());
    }

    #[tokio::test]
    async fn overdue_and_pre_start_reminders_do_not_share_a_ledger_row() {
        let TestContext { ctx, mailer } = setup();
        let (user, activity) = insert_candidate(&ctx, HOUR).await;
        let pre_start =
            ReminderEvent::activity_scoped(ReminderType::PreStart, &activity.id, &user.id, TS);
        assert!(ctx.repos.reminder_events.try_claim(&pre_start).await.unwrap());

        let summary = execute(SendOverdueRemindersUseCase, &ctx)
            .await
            .expect("Pass to run");

        assert_eq!(summary.sent, 1);
        assert_eq!(mailer.outbox().len(), 1);
    }
}
