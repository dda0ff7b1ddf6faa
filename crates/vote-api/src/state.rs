use axum::extract::FromRef;
use axum_extra::extract::cookie::Key;
use std::sync::Arc;

use vote_core::repositories::{AccountRepository, TrackRepository};
use vote_core::services::{AuthService, TrackService};
use vote_infrastructure::{InMemoryAccountRepository, InMemoryTrackRepository};
use vote_security::{MemorySessionStore, SessionManager, SessionStore};
use vote_shared::config::AppConfig;

use crate::error::ApiError;
use crate::transport::SessionTransport;
use crate::views::Views;

/// Application state shared across handlers. Built once at startup.
#[derive(Clone)]
pub struct AppState {
    pub auth: Arc<AuthService<dyn AccountRepository>>,
    pub tracks: Arc<TrackService<dyn TrackRepository>>,
    pub sessions: Arc<SessionManager>,
    pub transport: Arc<SessionTransport>,
    pub views: Arc<Views>,
}

impl AppState {
    pub fn new(
        config: &AppConfig,
        accounts: Arc<dyn AccountRepository>,
        tracks: Arc<dyn TrackRepository>,
        store: Arc<dyn SessionStore>,
    ) -> Result<Self, ApiError> {
        Ok(Self {
            auth: Arc::new(AuthService::new(accounts)),
            tracks: Arc::new(TrackService::new(tracks)),
            sessions: Arc::new(SessionManager::from_settings(store, &config.session)),
            transport: Arc::new(SessionTransport::from_settings(&config.session)),
            views: Arc::new(Views::new()?),
        })
    }

    /// Seeded accounts and tracks with a process-local session table.
    pub fn in_memory(config: &AppConfig) -> Result<Self, ApiError> {
        Self::new(
            config,
            Arc::new(InMemoryAccountRepository::seeded()),
            Arc::new(InMemoryTrackRepository::seeded()),
            Arc::new(MemorySessionStore::new()),
        )
    }
}

impl FromRef<AppState> for Key {
    fn from_ref(state: &AppState) -> Self {
        state.transport.key().clone()
    }
}
