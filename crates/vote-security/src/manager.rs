// ============================================================================
// Vote Security - Session Manager
// File: crates/vote-security/src/manager.rs
// ============================================================================
//! Issues, verifies and destroys sessions
//!
//! Lifecycle of one session: `Created --verify within TTL--> Active`, and
//! `Active --verify after TTL or destroy--> Terminated`. Terminated handles
//! never come back.

use chrono::{Duration, Utc};
use std::sync::Arc;
use tracing::{debug, info, warn};

use vote_core::Account;
use vote_shared::config::{SessionSettings, SessionStrategy};

use crate::handle::SessionHandle;
use crate::session::{Session, SessionContext, Verification};
use crate::store::SessionStore;

pub struct SessionManager {
    store: Arc<dyn SessionStore>,
    ttl: Duration,
    strategy: SessionStrategy,
}

impl SessionManager {
    pub fn new(store: Arc<dyn SessionStore>, ttl: Duration, strategy: SessionStrategy) -> Self {
        info!(
            "Session manager ready: strategy={}, ttl={}h",
            strategy.as_str(),
            ttl.num_hours()
        );
        Self { store, ttl, strategy }
    }

    pub fn from_settings(store: Arc<dyn SessionStore>, settings: &SessionSettings) -> Self {
        Self::new(store, Duration::hours(settings.ttl_hours), settings.strategy)
    }

    pub fn strategy(&self) -> SessionStrategy {
        self.strategy
    }

    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    /// Mint a session for `account` and return the handle the client must
    /// carry. The token strategy evicts expired entries first.
    pub async fn create(&self, account: &Account) -> SessionHandle {
        if self.strategy == SessionStrategy::Token {
            self.sweep().await;
        }

        let mut handle = SessionHandle::generate();
        while self.store.contains(&handle).await {
            handle = SessionHandle::generate();
        }

        let session = Session::for_account(account, Utc::now());
        self.store.insert(handle.clone(), session).await;

        info!(
            "Session {} created for {} (id {})",
            handle.redacted(),
            account.username,
            account.id
        );
        handle
    }

    /// Look up `handle`. Expired sessions are removed as part of the check.
    pub async fn verify(&self, handle: &SessionHandle) -> Verification {
        let Some(session) = self.store.get(handle).await else {
            debug!("Session {} not found", handle.redacted());
            return Verification::NotFound;
        };

        if session.is_expired(Utc::now(), self.ttl) {
            self.store.remove(handle).await;
            warn!(
                "Session {} for {} expired (issued {})",
                handle.redacted(),
                session.username,
                session.issued_at
            );
            return Verification::Expired;
        }

        Verification::Active(SessionContext::from(session))
    }

    /// Idempotent.
    pub async fn destroy(&self, handle: &SessionHandle) {
        if let Some(session) = self.store.remove(handle).await {
            info!("Session {} for {} destroyed", handle.redacted(), session.username);
        }
    }

    /// Remove every expired session.
    pub async fn sweep(&self) -> usize {
        let removed = self.store.remove_issued_before(Utc::now() - self.ttl).await;
        if removed > 0 {
            info!("Swept {} expired sessions", removed);
        }
        removed
    }

    pub async fn active_sessions(&self) -> usize {
        self.store.len().await
    }

    /// Periodic sweep loop for the cookie strategy. Runs until the task is
    /// dropped.
    pub async fn run_sweeper(self: Arc<Self>, period: std::time::Duration) {
        let mut ticker = tokio::time::interval(period);
        // first tick completes immediately
        ticker.tick().await;
        loop {
            ticker.tick().await;
            let removed = self.sweep().await;
            debug!("Session sweep finished: removed={}", removed);
        }
    }
}
