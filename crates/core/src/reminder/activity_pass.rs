use super::composer::ComposedEmail;
use super::{dispatcher, CandidateOutcome, PassSummary};
use chrono_tz::Tz;
use futures::StreamExt;
use herald_domain::{time_window, Activity, Lead, ReminderEvent, ReminderType, User};
use herald_infra::HeraldContext;
use tracing::{debug, error, warn};

/// Renders the notification for one selected `Activity`
pub(super) type ComposeActivityEmail = fn(&Activity, &User, Option<&Lead>, Tz) -> ComposedEmail;

/// The per-candidate pipeline shared by the pre-start and overdue passes:
/// dedupe check, liveness re-check, recipient lookup, ledger claim,
/// dispatch. Candidates run concurrently, at most
/// `candidate_concurrency` at a time, and one candidate going wrong
/// never stops the others.
pub(super) async fn process_candidates(
    reminder_type: ReminderType,
    candidates: Vec<Activity>,
    now: i64,
    ctx: &HeraldContext,
    compose: ComposeActivityEmail,
) -> PassSummary {
    let selected = candidates.len();
    let outcomes = futures::stream::iter(candidates)
        .map(|candidate| process_candidate(reminder_type, candidate, now, ctx, compose))
        .buffer_unordered(ctx.config.candidate_concurrency.max(1))
        .collect::<Vec<_>>()
        .await;

    PassSummary::from_outcomes(selected, &outcomes)
}

async fn process_candidate(
    reminder_type: ReminderType,
    candidate: Activity,
    now: i64,
    ctx: &HeraldContext,
    compose: ComposeActivityEmail,
) -> CandidateOutcome {
    let dedupe_key = ReminderEvent::activity_key(reminder_type, &candidate.id);
    if ctx.repos.reminder_events.exists(&dedupe_key).await {
        return CandidateOutcome::SkippedAlreadySent;
    }

    // The selection snapshot may be stale by the time this candidate is
    // worked on. Only a still open activity gets a reminder.
    let activity = match ctx.repos.activities.find(&candidate.id).await {
        Some(activity) if activity.is_open() => activity,
        _ => {
            debug!(
                "Reminder {} skipped, activity is gone or no longer open",
                dedupe_key
            );
            return CandidateOutcome::SkippedClosed;
        }
    };

    let (user, lead) = futures::join!(
        ctx.repos.users.find(&activity.assigned_to),
        ctx.repos.leads.find(&activity.lead_id),
    );
    let user = match user {
        Some(user) if user.active => user,
        Some(user) => {
            debug!(
                "Reminder {} skipped, user {} is deactivated",
                dedupe_key, user.id
            );
            return CandidateOutcome::SkippedNoRecipient;
        }
        None => {
            warn!(
                "Reminder {} skipped, assigned user {} does not exist",
                dedupe_key, activity.assigned_to
            );
            return CandidateOutcome::SkippedNoRecipient;
        }
    };
    let to = match user.notification_email() {
        Some(email) => email.to_string(),
        None => {
            debug!(
                "Reminder {} skipped, user {} has no usable email",
                dedupe_key, user.id
            );
            return CandidateOutcome::SkippedNoRecipient;
        }
    };

    let tz = time_window::safe_timezone(user.timezone.as_deref());
    let email = compose(&activity, &user, lead.as_ref(), tz);

    let claim = ReminderEvent::activity_scoped(reminder_type, &activity.id, &user.id, now);
    match ctx.repos.reminder_events.try_claim(&claim).await {
        Ok(true) => (),
        Ok(false) => return CandidateOutcome::SkippedAlreadySent,
        Err(e) => {
            error!("Unable to claim reminder {}: {:?}", dedupe_key, e);
            return CandidateOutcome::Failed;
        }
    }

    match dispatcher::dispatch(ctx, &to, &email).await {
        Ok(()) => CandidateOutcome::Sent,
        Err(e) => {
            warn!("Dispatch of reminder {} failed: {}", dedupe_key, e);
            // Hand the key back so a later run retries while the
            // activity is still eligible
            if let Err(release_err) = ctx.repos.reminder_events.release(&dedupe_key).await {
                error!(
                    "Unable to release reminder {} after failed dispatch: {:?}. It will not be retried.",
                    dedupe_key, release_err
                );
            }
            CandidateOutcome::Failed
        }
    }
}
