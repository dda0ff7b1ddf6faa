//! JSON views over the leaderboard and the caller's session

use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    Extension, Json,
};
use chrono::{DateTime, Utc};
use serde::Serialize;
use tracing::error;

use vote_core::DomainError;

use crate::middleware::CurrentUser;
use crate::response::ApiResponse;
use crate::state::AppState;

#[derive(Debug, Serialize)]
pub struct SessionInfo {
    pub subject_id: i64,
    pub username: String,
    pub issued_at: DateTime<Utc>,
    pub expires_at: DateTime<Utc>,
}

/// JSON routes answer failures with the envelope instead of the HTML page.
fn failure(err: DomainError) -> Response {
    let (status, code, message) = match &err {
        DomainError::TrackNotFound(_) => (StatusCode::NOT_FOUND, "track_not_found", "Track not found"),
        DomainError::ValidationError(_) => (StatusCode::BAD_REQUEST, "invalid_track", "Invalid track"),
        _ => (
            StatusCode::INTERNAL_SERVER_ERROR,
            "storage_error",
            "Tracks are unavailable right now",
        ),
    };
    error!("API request failed ({}): {}", code, err);
    (status, Json(ApiResponse::<()>::error(code, message))).into_response()
}

/// GET /api/tracks
pub async fn list_tracks(State(state): State<AppState>) -> Response {
    match state.tracks.leaderboard().await {
        Ok(tracks) => Json(ApiResponse::success(tracks)).into_response(),
        Err(e) => failure(e),
    }
}

/// GET /api/session
pub async fn current_session(
    State(state): State<AppState>,
    Extension(user): Extension<CurrentUser>,
) -> Json<ApiResponse<SessionInfo>> {
    let context = user.context;
    Json(ApiResponse::success(SessionInfo {
        expires_at: context.issued_at + state.sessions.ttl(),
        subject_id: context.subject_id,
        username: context.username,
        issued_at: context.issued_at,
    }))
}
