use async_trait::async_trait;

use crate::models::account::{Account, AccountPatch, NewAccount};

pub mod factory;
pub mod memory;

pub use factory::{BackendError, BackendKind, RepositoryFactory};
pub use memory::InMemoryAccountRepository;

/// Persistence contract for account records.
///
/// Not-found is a plain `None`/`false` result, never an error: soft-deleted
/// and unknown ids are indistinguishable to callers. Implementations must
/// keep id assignment atomic under concurrent creates and serialize
/// mutations on the same record.
#[async_trait]
pub trait AccountRepository: Send + Sync + std::fmt::Debug {
    /// Creates a new account, assigning the next sequential id and setting
    /// both timestamps to now (UTC).
    async fn create(&self, account: NewAccount) -> Account;

    /// Returns the account only if it exists and is active.
    async fn get_by_id(&self, id: u64) -> Option<Account>;

    /// Returns accounts in insertion order. `active_only = false` is the
    /// administrative view and includes soft-deleted records.
    async fn get_all(&self, active_only: bool) -> Vec<Account>;

    /// Full replacement of the mutable fields. The target must exist and be
    /// active; soft-deleted records cannot be resurrected this way.
    /// Preserves `id` and `created_at`, refreshes `updated_at`.
    async fn update(&self, id: u64, replacement: NewAccount) -> Option<Account>;

    /// Overlays only the fields present in the patch; same precondition as
    /// `update`. An empty patch is a legal no-op that still refreshes
    /// `updated_at`.
    async fn partial_update(&self, id: u64, patch: AccountPatch) -> Option<Account>;

    /// Soft delete: marks the record inactive and refreshes `updated_at`.
    /// Returns `true` whenever the id was ever created, including records
    /// that are already inactive. The record is never physically removed.
    async fn delete(&self, id: u64) -> bool;

    /// `true` only if the id is known and currently active.
    async fn exists(&self, id: u64) -> bool;
}
