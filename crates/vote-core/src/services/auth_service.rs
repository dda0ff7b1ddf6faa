// ============================================================================
// Vote Core - Authentication Service
// File: crates/vote-core/src/services/auth_service.rs
// ============================================================================
//! Credential checks against the identity store

use std::sync::Arc;
use tracing::{info, warn};

use crate::domain::Account;
use crate::error::DomainError;
use crate::repositories::AccountRepository;

/// Authentication service for the login flow
pub struct AuthService<R: AccountRepository + ?Sized> {
    account_repo: Arc<R>,
}

impl<R: AccountRepository + ?Sized> AuthService<R> {
    pub fn new(account_repo: Arc<R>) -> Self {
        Self { account_repo }
    }

    pub async fn find_by_username(&self, username: &str) -> Result<Option<Account>, DomainError> {
        self.account_repo.find_by_username(username).await
    }

    /// Verify username and password.
    ///
    /// Unknown usernames and wrong passwords both return
    /// [`DomainError::InvalidCredentials`] so callers cannot tell which
    /// field was wrong.
    pub async fn verify_credentials(
        &self,
        username: &str,
        password: &str,
    ) -> Result<Account, DomainError> {
        let account = match self.account_repo.find_by_username(username).await? {
            Some(account) => account,
            None => {
                warn!("Login failed: unknown username: {}", username);
                return Err(DomainError::InvalidCredentials);
            }
        };

        if !account.password_matches(password) {
            warn!("Login failed: wrong password for: {}", username);
            return Err(DomainError::InvalidCredentials);
        }

        info!("Credentials verified for: {} (id {})", account.username, account.id);
        Ok(account)
    }
}
