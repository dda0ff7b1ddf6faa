// ============================================================================
// Vote Infrastructure - In-Memory Track Repository
// File: crates/vote-infrastructure/src/memory/track_repo_impl.rs
// ============================================================================

use async_trait::async_trait;
use parking_lot::RwLock;
use tracing::debug;

use vote_core::domain::{Track, TrackDraft};
use vote_core::error::DomainError;
use vote_core::repositories::TrackRepository;

struct TrackTable {
    tracks: Vec<Track>,
    /// Ids are never reused, even after a delete.
    next_id: i64,
}

pub struct InMemoryTrackRepository {
    table: RwLock<TrackTable>,
}

impl InMemoryTrackRepository {
    pub fn new(tracks: Vec<Track>) -> Self {
        let next_id = tracks.iter().map(|t| t.id).max().unwrap_or(0) + 1;
        Self {
            table: RwLock::new(TrackTable { tracks, next_id }),
        }
    }

    pub fn seeded() -> Self {
        Self::new(Track::seed())
    }
}

#[async_trait]
impl TrackRepository for InMemoryTrackRepository {
    async fn list(&self) -> Result<Vec<Track>, DomainError> {
        Ok(self.table.read().tracks.clone())
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<Track>, DomainError> {
        Ok(self.table.read().tracks.iter().find(|t| t.id == id).cloned())
    }

    async fn create(&self, draft: TrackDraft) -> Result<Track, DomainError> {
        let mut table = self.table.write();
        let track = Track {
            id: table.next_id,
            title: draft.title,
            artist: draft.artist,
            votes: 0,
        };
        table.next_id += 1;
        table.tracks.push(track.clone());
        debug!("Track table size: {}", table.tracks.len());
        Ok(track)
    }

    async fn update(&self, id: i64, draft: TrackDraft) -> Result<Track, DomainError> {
        let mut table = self.table.write();
        let track = table
            .tracks
            .iter_mut()
            .find(|t| t.id == id)
            .ok_or(DomainError::TrackNotFound(id))?;
        track.apply(draft);
        Ok(track.clone())
    }

    async fn delete(&self, id: i64) -> Result<(), DomainError> {
        let mut table = self.table.write();
        let index = table
            .tracks
            .iter()
            .position(|t| t.id == id)
            .ok_or(DomainError::TrackNotFound(id))?;
        table.tracks.remove(index);
        Ok(())
    }

    async fn vote(&self, id: i64) -> Result<Track, DomainError> {
        let mut table = self.table.write();
        let track = table
            .tracks
            .iter_mut()
            .find(|t| t.id == id)
            .ok_or(DomainError::TrackNotFound(id))?;
        track.vote();
        Ok(track.clone())
    }
}
