mod inmemory;
mod postgres;

use herald_domain::{User, ID};
pub use inmemory::InMemoryUserRepo;
pub use postgres::PostgresUserRepo;

#[async_trait::async_trait]
pub trait IUserRepo: Send + Sync {
    async fn insert(&self, user: &User) -> anyhow::Result<()>;
    async fn save(&self, user: &User) -> anyhow::Result<()>;
    async fn find(&self, user_id: &ID) -> Option<User>;
    /// Active users with a usable email address. These are the only users
    /// the daily digest pass ever looks at; whether their local clock is
    /// inside the digest window is decided by the caller.
    async fn find_digest_candidates(&self) -> anyhow::Result<Vec<User>>;
}
