use super::composer::{self, DayDigest};
use super::{dispatcher, eligibility, CandidateOutcome, PassSummary};
use crate::shared::usecase::UseCase;
use futures::StreamExt;
use herald_domain::{time_window, ReminderEvent, User};
use herald_infra::HeraldContext;
use tracing::{debug, error, warn};

/// Sends every active user whose wall clock just entered the digest
/// window a summary of their day: that day's activities in start order
/// with an open/done split. One digest per user per local calendar day,
/// whether or not the day holds anything.
#[derive(Debug)]
pub struct SendDailyDigestsUseCase;

#[derive(Debug, PartialEq)]
pub enum UseCaseError {
    StorageError,
}

#[async_trait::async_trait]
impl UseCase for SendDailyDigestsUseCase {
    type Response = PassSummary;

    type Error = UseCaseError;

    const NAME: &'static str = "SendDailyDigests";

    async fn execute(&mut self, ctx: &HeraldContext) -> Result<Self::Response, Self::Error> {
        let now = ctx.sys.get_timestamp_millis();

        let users = match ctx.repos.users.find_digest_candidates().await {
            Ok(users) => users,
            Err(e) => {
                error!("Unable to query digest candidates: {:?}", e);
                return Err(UseCaseError::StorageError);
            }
        };
        let candidates = users
            .into_iter()
            .filter(|user| {
                let tz = time_window::safe_timezone(user.timezone.as_deref());
                eligibility::in_digest_window(now, tz, &ctx.config)
            })
            .collect::<Vec<_>>();

        let selected = candidates.len();
        let outcomes = futures::stream::iter(candidates)
            .map(|user| process_candidate(user, now, ctx))
            .buffer_unordered(ctx.config.candidate_concurrency.max(1))
            .collect::<Vec<_>>()
            .await;

        Ok(PassSummary::from_outcomes(selected, &outcomes))
    }
}

async fn process_candidate(user: User, now: i64, ctx: &HeraldContext) -> CandidateOutcome {
    let tz = time_window::safe_timezone(user.timezone.as_deref());
    let digest_date = time_window::local_date_string(now, tz);
    let dedupe_key = ReminderEvent::digest_key(&user.id, &digest_date);
    if ctx.repos.reminder_events.exists(&dedupe_key).await {
        return CandidateOutcome::SkippedAlreadySent;
    }

    let to = match user.notification_email() {
        Some(email) => email.to_string(),
        None => {
            debug!(
                "Digest {} skipped, user {} has no usable email",
                dedupe_key, user.id
            );
            return CandidateOutcome::SkippedNoRecipient;
        }
    };

    let (day_start, day_end) = time_window::day_bounds(now, tz);
    let activities = match ctx
        .repos
        .activities
        .find_by_user_scheduled_between(&user.id, day_start, day_end)
        .await
    {
        Ok(activities) => activities,
        Err(e) => {
            error!("Unable to load the day behind digest {}: {:?}", dedupe_key, e);
            return CandidateOutcome::Failed;
        }
    };
    let leads = ctx
        .repos
        .leads
        .find_many(&DayDigest::distinct_lead_ids(&activities))
        .await;
    let digest = DayDigest::new(activities, leads);

    let claim = ReminderEvent::daily_digest(&user.id, &digest_date, now);
    match ctx.repos.reminder_events.try_claim(&claim).await {
        Ok(true) => (),
        Ok(false) => return CandidateOutcome::SkippedAlreadySent,
        Err(e) => {
            error!("Unable to claim digest {}: {:?}", dedupe_key, e);
            return CandidateOutcome::Failed;
        }
    }

    if digest.is_empty() {
        // The ledger row is still written, so later runs inside the
        // window stay quiet about this day
        debug!("Digest {} covers an empty day, nothing sent", dedupe_key);
        return CandidateOutcome::EmptyDigest;
    }

    let email = composer::digest_email(&user, &digest, now, tz);
    match dispatcher::dispatch(ctx, &to, &email).await {
        Ok(()) => CandidateOutcome::Sent,
        Err(e) => {
            warn!("Dispatch of digest {} failed: {}", dedupe_key, e);
            if let Err(release_err) = ctx.repos.reminder_events.release(&dedupe_key).await {
                error!(
                    "Unable to release digest {} after failed dispatch: {:?}. It will not be retried.",
                    dedupe_key, release_err
                );
            }
            CandidateOutcome::Failed
        }
    }
}
