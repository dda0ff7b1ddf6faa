//! Session records and verification outcomes

use chrono::{DateTime, Duration, Utc};
use serde::Serialize;
use vote_core::Account;

use crate::error::AuthError;

/// Server-side session state, keyed by a [`crate::SessionHandle`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Session {
    pub subject_id: i64,
    pub username: String,
    pub issued_at: DateTime<Utc>,
}

impl Session {
    /// Sessions are only minted from an existing account.
    pub fn for_account(account: &Account, issued_at: DateTime<Utc>) -> Self {
        Self {
            subject_id: account.id,
            username: account.username.clone(),
            issued_at,
        }
    }

    /// Strictly older than `ttl`.
    pub fn is_expired(&self, now: DateTime<Utc>, ttl: Duration) -> bool {
        now - self.issued_at > ttl
    }
}

/// Identity attached to a request that passed verification.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SessionContext {
    pub subject_id: i64,
    pub username: String,
    pub issued_at: DateTime<Utc>,
}

impl From<Session> for SessionContext {
    fn from(session: Session) -> Self {
        Self {
            subject_id: session.subject_id,
            username: session.username,
            issued_at: session.issued_at,
        }
    }
}

/// Result of `SessionManager::verify`. Never an error.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Verification {
    Active(SessionContext),
    Expired,
    NotFound,
}

impl Verification {
    pub fn is_active(&self) -> bool {
        matches!(self, Self::Active(_))
    }

    pub fn into_result(self) -> Result<SessionContext, AuthError> {
        match self {
            Self::Active(context) => Ok(context),
            Self::Expired => Err(AuthError::SessionExpired),
            Self::NotFound => Err(AuthError::SessionNotFound),
        }
    }
}
