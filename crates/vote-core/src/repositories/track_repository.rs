//! Track repository trait (port)

use async_trait::async_trait;
use crate::domain::{Track, TrackDraft};
use crate::error::DomainError;

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait TrackRepository: Send + Sync {
    /// All tracks in insertion order.
    async fn list(&self) -> Result<Vec<Track>, DomainError>;
    async fn find_by_id(&self, id: i64) -> Result<Option<Track>, DomainError>;
    /// Appends a track with zero votes and the next free id.
    async fn create(&self, draft: TrackDraft) -> Result<Track, DomainError>;
    async fn update(&self, id: i64, draft: TrackDraft) -> Result<Track, DomainError>;
    async fn delete(&self, id: i64) -> Result<(), DomainError>;
    async fn vote(&self, id: i64) -> Result<Track, DomainError>;
}
