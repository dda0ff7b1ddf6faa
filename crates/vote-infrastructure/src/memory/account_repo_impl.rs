// ============================================================================
// Vote Infrastructure - In-Memory Account Repository
// File: crates/vote-infrastructure/src/memory/account_repo_impl.rs
// ============================================================================

use async_trait::async_trait;
use parking_lot::RwLock;
use tracing::info;

use vote_core::domain::Account;
use vote_core::error::DomainError;
use vote_core::repositories::AccountRepository;

/// Fixed account table. Lookups are linear scans over a handful of rows.
pub struct InMemoryAccountRepository {
    accounts: RwLock<Vec<Account>>,
}

impl InMemoryAccountRepository {
    pub fn new(accounts: Vec<Account>) -> Self {
        info!("Identity store seeded with {} accounts", accounts.len());
        Self {
            accounts: RwLock::new(accounts),
        }
    }

    pub fn seeded() -> Self {
        Self::new(Account::seed())
    }
}

#[async_trait]
impl AccountRepository for InMemoryAccountRepository {
    async fn find_by_username(&self, username: &str) -> Result<Option<Account>, DomainError> {
        Ok(self
            .accounts
            .read()
            .iter()
            .find(|a| a.username == username)
            .cloned())
    }
}
