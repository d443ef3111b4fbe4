mod telemetry;

use herald_core::start_reminder_jobs;
use herald_infra::setup_context;
use telemetry::{get_subscriber, init_subscriber};

#[tokio::main]
async fn main() -> std::io::Result<()> {
    let subscriber = get_subscriber("herald".into(), "info".into());
    init_subscriber(subscriber);

    let context = setup_context().await;

    start_reminder_jobs(context);

    // The reminder jobs carry the process, there is nothing else to serve
    tokio::signal::ctrl_c().await
}
