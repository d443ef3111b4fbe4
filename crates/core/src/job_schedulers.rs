use crate::reminder::{run_daily_digest_pass, run_overdue_pass, run_pre_start_pass};
use herald_infra::HeraldContext;
use std::time::Duration;
use tokio::time::interval;
use tracing::info;

/// Starts the three recurring reminder jobs. Each job runs its pass on
/// its own cadence and awaits it in place, so two runs of the same pass
/// never overlap inside one process.
pub fn start_reminder_jobs(ctx: HeraldContext) {
    start_pre_start_job(ctx.clone());
    start_overdue_job(ctx.clone());
    start_daily_digest_job(ctx);
}

fn start_pre_start_job(ctx: HeraldContext) {
    tokio::spawn(async move {
        let mut interval = interval(Duration::from_secs(ctx.config.activity_pass_interval_secs));
        loop {
            interval.tick().await;
            if let Ok(summary) = run_pre_start_pass(&ctx).await {
                info!("Pre-start reminder pass done: {:?}", summary);
            }
        }
    });
}

fn start_overdue_job(ctx: HeraldContext) {
    tokio::spawn(async move {
        let mut interval = interval(Duration::from_secs(ctx.config.activity_pass_interval_secs));
        loop {
            interval.tick().await;
            if let Ok(summary) = run_overdue_pass(&ctx).await {
                info!("Overdue reminder pass done: {:?}", summary);
            }
        }
    });
}

fn start_daily_digest_job(ctx: HeraldContext) {
    tokio::spawn(async move {
        let mut interval = interval(Duration::from_secs(ctx.config.digest_pass_interval_secs));
        loop {
            interval.tick().await;
            if let Ok(summary) = run_daily_digest_pass(&ctx).await {
                info!("Daily digest pass done: {:?}", summary);
            }
        }
    });
}
