mod activity_pass;
pub mod composer;
pub mod dispatcher;
pub mod eligibility;
pub mod send_daily_digests;
pub mod send_overdue_reminders;
pub mod send_pre_start_reminders;

use crate::shared::usecase::execute;
use herald_infra::HeraldContext;

pub use send_daily_digests::SendDailyDigestsUseCase;
pub use send_overdue_reminders::SendOverdueRemindersUseCase;
pub use send_pre_start_reminders::SendPreStartRemindersUseCase;

/// How handling one selected candidate ended
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CandidateOutcome {
    Sent,
    /// The ledger already holds a row for this occasion
    SkippedAlreadySent,
    /// The recipient has no usable email address
    SkippedNoRecipient,
    /// The activity was completed or deleted between selection and send
    SkippedClosed,
    /// A digest occasion with no activities behind it. Claimed in the
    /// ledger but nothing was sent.
    EmptyDigest,
    /// Dispatch or ledger trouble. The occasion stays unclaimed and will
    /// be picked up again on a later run.
    Failed,
}

/// What one pass run did, for the job scheduler logs
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PassSummary {
    /// How many candidates the selection query returned
    pub selected: usize,
    /// Notifications handed to the channel
    pub sent: usize,
    /// Digest occasions claimed without anything to send
    pub empty_digests: usize,
    pub skipped_already_sent: usize,
    pub skipped_no_recipient: usize,
    pub skipped_closed: usize,
    /// Candidates that hit dispatch or ledger trouble and stay eligible
    pub failed: usize,
}

impl PassSummary {
    fn from_outcomes(selected: usize, outcomes: &[CandidateOutcome]) -> Self {
        let mut summary = Self {
            selected,
            ..Default::default()
        };
        for outcome in outcomes {
            match outcome {
                CandidateOutcome::Sent => summary.sent += 1,
                CandidateOutcome::SkippedAlreadySent => summary.skipped_already_sent += 1,
                CandidateOutcome::SkippedNoRecipient => summary.skipped_no_recipient += 1,
                CandidateOutcome::SkippedClosed => summary.skipped_closed += 1,
                CandidateOutcome::EmptyDigest => summary.empty_digests += 1,
                CandidateOutcome::Failed => summary.failed += 1,
            }
        }
        summary
    }
}

/// Runs one pre-start reminder pass against the current clock
pub async fn run_pre_start_pass(
    ctx: &HeraldContext,
) -> Result<PassSummary, send_pre_start_reminders::UseCaseError> {
    execute(SendPreStartRemindersUseCase, ctx).await
}

/// Runs one overdue reminder pass against the current clock
pub async fn run_overdue_pass(
    ctx: &HeraldContext,
) -> Result<PassSummary, send_overdue_reminders::UseCaseError> {
    execute(SendOverdueRemindersUseCase, ctx).await
}

/// Runs one daily digest pass against the current clock
pub async fn run_daily_digest_pass(
    ctx: &HeraldContext,
) -> Result<PassSummary, send_daily_digests::UseCaseError> {
    execute(SendDailyDigestsUseCase, ctx).await
}
