//! Track list operations behind the gated routes

use std::sync::Arc;
use tracing::info;

use crate::domain::{Track, TrackDraft};
use crate::error::DomainError;
use crate::repositories::TrackRepository;

pub struct TrackService<R: TrackRepository + ?Sized> {
    track_repo: Arc<R>,
}

impl<R: TrackRepository + ?Sized> TrackService<R> {
    pub fn new(track_repo: Arc<R>) -> Self {
        Self { track_repo }
    }

    /// Tracks ordered by votes, highest first. Ties keep insertion order.
    pub async fn leaderboard(&self) -> Result<Vec<Track>, DomainError> {
        let mut tracks = self.track_repo.list().await?;
        tracks.sort_by(|a, b| b.votes.cmp(&a.votes));
        Ok(tracks)
    }

    pub async fn get(&self, id: i64) -> Result<Track, DomainError> {
        self.track_repo
            .find_by_id(id)
            .await?
            .ok_or(DomainError::TrackNotFound(id))
    }

    pub async fn add(&self, title: &str, artist: &str, by: &str) -> Result<Track, DomainError> {
        let draft = TrackDraft::new(title, artist)?;
        let track = self.track_repo.create(draft).await?;
        info!("Track {} added by {}: {} - {}", track.id, by, track.title, track.artist);
        Ok(track)
    }

    pub async fn edit(
        &self,
        id: i64,
        title: &str,
        artist: &str,
        by: &str,
    ) -> Result<Track, DomainError> {
        let draft = TrackDraft::new(title, artist)?;
        let track = self.track_repo.update(id, draft).await?;
        info!("Track {} edited by {}", track.id, by);
        Ok(track)
    }

    pub async fn remove(&self, id: i64, by: &str) -> Result<(), DomainError> {
        self.track_repo.delete(id).await?;
        info!("Track {} deleted by {}", id, by);
        Ok(())
    }

    pub async fn vote(&self, id: i64, by: &str) -> Result<Track, DomainError> {
        let track = self.track_repo.vote(id).await?;
        info!("Vote for track {} by {} (now {})", track.id, by, track.votes);
        Ok(track)
    }
}
