mod config;
mod repos;
mod services;
mod system;

pub use config::{Config, SmtpConfig};
pub use repos::{
    IActivityRepo, ILeadRepo, IReminderEventRepo, IUserRepo, InMemoryActivityRepo,
    InMemoryLeadRepo, InMemoryReminderEventRepo, InMemoryUserRepo, Repos,
};
pub use services::{IMailer, InMemoryMailer, OutgoingEmail, SmtpMailer};
use std::sync::Arc;
pub use system::ISys;
use system::RealSys;

#[derive(Clone)]
pub struct HeraldContext {
    pub repos: Repos,
    pub config: Config,
    pub mailer: Arc<dyn IMailer>,
    pub sys: Arc<dyn ISys>,
}

/// Will setup the infrastructure context given the environment
pub async fn setup_context() -> HeraldContext {
    let config = Config::new();
    let smtp = config
        .smtp
        .clone()
        .expect("SMTP_HOST and SMTP_FROM env vars to be present.");
    let mailer = SmtpMailer::new(&smtp).expect("SMTP configuration must be valid");
    let repos = Repos::create_postgres(&get_psql_connection_string())
        .await
        .expect("Postgres credentials must be set and valid");

    HeraldContext {
        repos,
        config,
        mailer: Arc::new(mailer),
        sys: Arc::new(RealSys {}),
    }
}

/// Context wired against in-memory fakes. Used by tests, which usually
/// swap in their own `sys` and `mailer` afterwards.
pub fn setup_context_inmemory() -> HeraldContext {
    HeraldContext {
        repos: Repos::create_inmemory(),
        config: Config::new(),
        mailer: Arc::new(InMemoryMailer::new()),
        sys: Arc::new(RealSys {}),
    }
}

fn get_psql_connection_string() -> String {
    const PSQL_CONNECTION_STRING: &str = "DATABASE_URL";

    std::env::var(PSQL_CONNECTION_STRING)
        .unwrap_or_else(|_| panic!("{} env var to be present.", PSQL_CONNECTION_STRING))
}
