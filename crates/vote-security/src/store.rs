//! Session store port and the in-memory implementation

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use dashmap::DashMap;

use crate::handle::SessionHandle;
use crate::session::Session;

/// Backing table for sessions. The in-memory store is process-local; a
/// shared key-value backend can implement the same trait.
#[async_trait]
pub trait SessionStore: Send + Sync {
    async fn insert(&self, handle: SessionHandle, session: Session);
    async fn get(&self, handle: &SessionHandle) -> Option<Session>;
    async fn remove(&self, handle: &SessionHandle) -> Option<Session>;
    async fn contains(&self, handle: &SessionHandle) -> bool;
    /// Drop every session issued before `cutoff`. Returns the number removed.
    async fn remove_issued_before(&self, cutoff: DateTime<Utc>) -> usize;
    async fn len(&self) -> usize;
}

/// DashMap-backed session table.
#[derive(Default)]
pub struct MemorySessionStore {
    sessions: DashMap<SessionHandle, Session>,
}

impl MemorySessionStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl SessionStore for MemorySessionStore {
    async fn insert(&self, handle: SessionHandle, session: Session) {
        self.sessions.insert(handle, session);
    }

    async fn get(&self, handle: &SessionHandle) -> Option<Session> {
        self.sessions.get(handle).map(|entry| entry.value().clone())
    }

    async fn remove(&self, handle: &SessionHandle) -> Option<Session> {
        self.sessions.remove(handle).map(|(_, session)| session)
    }

    async fn contains(&self, handle: &SessionHandle) -> bool {
        self.sessions.contains_key(handle)
    }

    async fn remove_issued_before(&self, cutoff: DateTime<Utc>) -> usize {
        let mut removed = 0;
        self.sessions.retain(|_, session| {
            let keep = session.issued_at >= cutoff;
            if !keep {
                removed += 1;
            }
            keep
        });
        removed
    }

    async fn len(&self) -> usize {
        self.sessions.len()
    }
}
