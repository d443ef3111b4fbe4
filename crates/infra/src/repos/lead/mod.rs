mod inmemory;
mod postgres;

use herald_domain::{Lead, ID};
pub use inmemory::InMemoryLeadRepo;
pub use postgres::PostgresLeadRepo;

#[async_trait::async_trait]
pub trait ILeadRepo: Send + Sync {
    async fn insert(&self, lead: &Lead) -> anyhow::Result<()>;
    async fn find(&self, lead_id: &ID) -> Option<Lead>;
    /// Batch lookup used when rendering digests, so that each distinct
    /// `Lead` is fetched once per digest. Lookup problems degrade to an
    /// empty list rather than an error.
    async fn find_many(&self, lead_ids: &[ID]) -> Vec<Lead>;
}
