mod activity;
mod lead;
mod reminder_event;
mod shared;
mod user;

pub use activity::{IActivityRepo, InMemoryActivityRepo, PostgresActivityRepo};
pub use lead::{ILeadRepo, InMemoryLeadRepo, PostgresLeadRepo};
pub use reminder_event::{
    IReminderEventRepo, InMemoryReminderEventRepo, PostgresReminderEventRepo,
};
use sqlx::postgres::PgPoolOptions;
use std::sync::Arc;
pub use user::{IUserRepo, InMemoryUserRepo, PostgresUserRepo};

#[derive(Clone)]
pub struct Repos {
    pub activities: Arc<dyn IActivityRepo>,
    pub users: Arc<dyn IUserRepo>,
    pub leads: Arc<dyn ILeadRepo>,
    pub reminder_events: Arc<dyn IReminderEventRepo>,
}

impl Repos {
    pub async fn create_postgres(connection_string: &str) -> anyhow::Result<Self> {
        let pool = PgPoolOptions::new()
            .max_connections(5)
            .connect(connection_string)
            .await?;

        Ok(Self {
            activities: Arc::new(PostgresActivityRepo::new(pool.clone())),
            users: Arc::new(PostgresUserRepo::new(pool.clone())),
            leads: Arc::new(PostgresLeadRepo::new(pool.clone())),
            reminder_events: Arc::new(PostgresReminderEventRepo::new(pool)),
        })
    }

    pub fn create_inmemory() -> Self {
        Self {
            activities: Arc::new(InMemoryActivityRepo::new()),
            users: Arc::new(InMemoryUserRepo::new()),
            leads: Arc::new(InMemoryLeadRepo::new()),
            reminder_events: Arc::new(InMemoryReminderEventRepo::new()),
        }
    }
}
