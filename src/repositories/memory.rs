use std::collections::BTreeMap;

use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::RwLock;
use tracing::info;

use super::AccountRepository;
use crate::models::account::{Account, AccountPatch, NewAccount};

/// Single visibility predicate for the soft-delete rule, shared by every
/// read path and mutation precondition.
fn is_visible(account: &Account) -> bool {
    account.active
}

#[derive(Debug)]
struct StoreInner {
    /// Keyed by id; ids are strictly increasing, so iteration order is
    /// insertion order.
    accounts: BTreeMap<u64, Account>,
    next_id: u64,
}

/// In-memory account store with soft-delete semantics.
///
/// All state sits behind one `RwLock`: reads run concurrently, mutations
/// (including id assignment) serialize, so two concurrent creates can never
/// observe the same counter value.
#[derive(Debug)]
pub struct InMemoryAccountRepository {
    inner: RwLock<StoreInner>,
}

impl InMemoryAccountRepository {
    pub fn new() -> Self {
        Self {
            inner: RwLock::new(StoreInner {
                accounts: BTreeMap::new(),
                next_id: 1,
            }),
        }
    }
}

impl Default for InMemoryAccountRepository {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl AccountRepository for InMemoryAccountRepository {
    async fn create(&self, account: NewAccount) -> Account {
        let mut inner = self.inner.write().await;
        let id = inner.next_id;
        inner.next_id += 1;

        let now = Utc::now();
        let record = Account {
            id,
            name: account.name,
            description: account.description,
            balance: account.balance,
            active: account.active,
            created_at: now,
            updated_at: now,
        };
        inner.accounts.insert(id, record.clone());

        info!("Created account with ID: {}", id);
        record
    }

    async fn get_by_id(&self, id: u64) -> Option<Account> {
        let inner = self.inner.read().await;
        inner.accounts.get(&id).filter(|a| is_visible(a)).cloned()
    }

    async fn get_all(&self, active_only: bool) -> Vec<Account> {
        let inner = self.inner.read().await;
        inner
            .accounts
            .values()
            .filter(|a| !active_only || is_visible(a))
            .cloned()
            .collect()
    }

    async fn update(&self, id: u64, replacement: NewAccount) -> Option<Account> {
        let mut inner = self.inner.write().await;
        let account = inner.accounts.get_mut(&id).filter(|a| is_visible(a))?;

        account.name = replacement.name;
        account.description = replacement.description;
        account.balance = replacement.balance;
        account.active = replacement.active;
        account.updated_at = Utc::now();

        info!("Updated account ID: {}", id);
        Some(account.clone())
    }

    async fn partial_update(&self, id: u64, patch: AccountPatch) -> Option<Account> {
        let mut inner = self.inner.write().await;
        let account = inner.accounts.get_mut(&id).filter(|a| is_visible(a))?;

        patch.apply_to(account);
        account.updated_at = Utc::now();

        info!("Partially updated account ID: {}", id);
        Some(account.clone())
    }

    async fn delete(&self, id: u64) -> bool {
        let mut inner = self.inner.write().await;
        match inner.accounts.get_mut(&id) {
            Some(account) => {
                account.active = false;
                account.updated_at = Utc::now();
                info!("Soft deleted account ID: {} (marked as inactive)", id);
                true
            }
            None => false,
        }
    }

    async fn exists(&self, id: u64) -> bool {
        let inner = self.inner.read().await;
        inner.accounts.get(&id).map_or(false, is_visible)
    }
}
