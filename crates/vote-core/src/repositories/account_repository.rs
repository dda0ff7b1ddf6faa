//! Account repository trait (port)

use async_trait::async_trait;
use crate::domain::Account;
use crate::error::DomainError;

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait AccountRepository: Send + Sync {
    /// Exact, case-sensitive match.
    async fn find_by_username(&self, username: &str) -> Result<Option<Account>, DomainError>;
}
