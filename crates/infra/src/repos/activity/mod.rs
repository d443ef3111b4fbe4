mod inmemory;
mod postgres;

use herald_domain::{Activity, ID};
pub use inmemory::InMemoryActivityRepo;
pub use postgres::PostgresActivityRepo;

#[async_trait::async_trait]
pub trait IActivityRepo: Send + Sync {
    async fn insert(&self, activity: &Activity) -> anyhow::Result<()>;
    async fn save(&self, activity: &Activity) -> anyhow::Result<()>;
    async fn find(&self, activity_id: &ID) -> Option<Activity>;
    /// Open activities with `scheduled_at` inside the closed range
    /// `[start, end]`. This is the selection both activity reminder
    /// passes run on, so an error here has to reach the caller instead
    /// of looking like an empty day.
    async fn find_todo_scheduled_between(
        &self,
        start: i64,
        end: i64,
    ) -> anyhow::Result<Vec<Activity>>;
    /// All of one user's activities, open or completed, with
    /// `scheduled_at` inside the half open range `[start, end)`
    async fn find_by_user_scheduled_between(
        &self,
        user_id: &ID,
        start: i64,
        end: i64,
    ) -> anyhow::Result<Vec<Activity>>;
}
