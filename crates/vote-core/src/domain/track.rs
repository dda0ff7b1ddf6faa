// ============================================================================
// Vote Core - Track Entity
// File: crates/vote-core/src/domain/track.rs
// Description: Song entry on the voting leaderboard
// ============================================================================

use serde::{Deserialize, Serialize};
use validator::Validate;

/// A song on the leaderboard.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Track {
    pub id: i64,
    pub title: String,
    pub artist: String,
    pub votes: u32,
}

impl Track {
    pub fn vote(&mut self) {
        self.votes = self.votes.saturating_add(1);
    }

    pub fn apply(&mut self, draft: TrackDraft) {
        self.title = draft.title;
        self.artist = draft.artist;
    }

    pub fn seed() -> Vec<Track> {
        vec![
            Track { id: 1, title: "Sample Song 1".into(), artist: "Artist A".into(), votes: 5 },
            Track { id: 2, title: "Sample Song 2".into(), artist: "Artist B".into(), votes: 3 },
            Track { id: 3, title: "Sample Song 3".into(), artist: "Artist C".into(), votes: 7 },
        ]
    }
}

/// Validated title/artist pair used for both adding and editing a track.
#[derive(Debug, Clone, PartialEq, Eq, Validate)]
pub struct TrackDraft {
    #[validate(length(min = 1, max = 200, message = "Title must be between 1 and 200 characters"))]
    pub title: String,

    #[validate(length(min = 1, max = 200, message = "Artist must be between 1 and 200 characters"))]
    pub artist: String,
}

impl TrackDraft {
    /// Trims both fields before validating, so whitespace-only input is rejected.
    pub fn new(title: &str, artist: &str) -> Result<Self, validator::ValidationErrors> {
        let draft = Self {
            title: title.trim().to_string(),
            artist: artist.trim().to_string(),
        };
        draft.validate()?;
        Ok(draft)
    }
}
