mod job_schedulers;
pub mod reminder;
mod shared;

pub use job_schedulers::start_reminder_jobs;
pub use reminder::{
    run_daily_digest_pass, run_overdue_pass, run_pre_start_pass, CandidateOutcome, PassSummary,
    SendDailyDigestsUseCase, SendOverdueRemindersUseCase, SendPreStartRemindersUseCase,
};
