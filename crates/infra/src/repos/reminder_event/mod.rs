mod inmemory;
mod postgres;

use herald_domain::ReminderEvent;
pub use inmemory::InMemoryReminderEventRepo;
pub use postgres::PostgresReminderEventRepo;

/// The dedupe ledger. One row per notified occasion, keyed by the
/// occasion's `dedupe_key`, written before the notification is handed
/// to the channel.
#[async_trait::async_trait]
pub trait IReminderEventRepo: Send + Sync {
    /// Inserts the ledger row if and only if no row with the same
    /// `dedupe_key` exists yet, in one atomic step. Returns whether this
    /// caller won the key. Two concurrent passes can both see the key as
    /// absent, but only one of them gets `true` here.
    async fn try_claim(&self, event: &ReminderEvent) -> anyhow::Result<bool>;
    /// Whether a row with this key exists. Only a cheap pre-filter,
    /// `try_claim` is what actually guards against duplicates.
    async fn exists(&self, dedupe_key: &str) -> bool;
    /// Removes a claimed key so the occasion can be retried on a later
    /// run. Called when dispatch fails after a claim.
    async fn release(&self, dedupe_key: &str) -> anyhow::Result<()>;
    async fn find_by_key(&self, dedupe_key: &str) -> Option<ReminderEvent>;
}
