use super::{activity_pass, composer, eligibility, PassSummary};
use crate::shared::usecase::UseCase;
use herald_domain::ReminderType;
use herald_infra::HeraldContext;
use tracing::error;

/// Reminds assignees about their open activities that start in a little
/// while, so the reminder lands roughly an hour before the start.
#[derive(Debug)]
pub struct SendPreStartRemindersUseCase;

#[derive(Debug, PartialEq)]
pub enum UseCaseError {
    StorageError,
}

#[async_trait::async_trait]
impl UseCase for SendPreStartRemindersUseCase {
    type Response = PassSummary;

    type Error = UseCaseError;

    const NAME: &'static str = "SendPreStartReminders";

    async fn execute(&mut self, ctx: &HeraldContext) -> Result<Self::Response, Self::Error> {
        let now = ctx.sys.get_timestamp_millis();
        let (start, end) = eligibility::pre_start_window(now, &ctx.config);

        let candidates = match ctx
            .repos
            .activities
            .find_todo_scheduled_between(start, end)
            .await
        {
            Ok(candidates) => candidates,
            Err(e) => {
                error!("Unable to query upcoming activities: {:?}", e);
                return Err(UseCaseError::StorageError);
            }
        };

        Ok(activity_pass::process_candidates(
            ReminderType::PreStart,
            candidates,
            now,
            ctx,
            composer::pre_start_email,
        )
        .await)
    }
}
