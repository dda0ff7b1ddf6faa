//! Gated track routes: dashboard, add, edit, delete, vote

use axum::{
    extract::{rejection::FormRejection, Path, Query, State},
    response::{Html, IntoResponse, Redirect, Response},
    Extension, Form,
};
use serde::Deserialize;
use tracing::warn;

use vote_core::DomainError;
use vote_shared::config::SessionStrategy;
use vote_shared::constants::DASHBOARD_PATH;

use crate::error::ApiError;
use crate::middleware::CurrentUser;
use crate::state::AppState;
use crate::views::{DashboardPage, EditPage, TrackRow};

const TRACK_NOT_FOUND: &str = "Track not found";
const INVALID_TRACK: &str = "Title and artist must be between 1 and 200 characters";

#[derive(Debug, Deserialize)]
pub struct TrackForm {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub artist: String,
}

#[derive(Debug, Deserialize)]
pub struct PageQuery {
    pub error: Option<String>,
}

/// Value for hidden `token` form fields. `None` in cookie mode.
fn form_token(state: &AppState, user: &CurrentUser) -> Option<String> {
    match state.transport.strategy() {
        SessionStrategy::Token => Some(user.handle.as_str().to_string()),
        SessionStrategy::Cookie => None,
    }
}

/// Redirect to the dashboard, turning expected track errors into an
/// on-page message.
fn back_to_dashboard<T>(
    state: &AppState,
    user: &CurrentUser,
    result: Result<T, DomainError>,
) -> Result<Redirect, ApiError> {
    let transport = &state.transport;
    match result {
        Ok(_) => Ok(transport.redirect(DASHBOARD_PATH, &user.handle)),
        Err(DomainError::TrackNotFound(id)) => {
            warn!("{} asked for missing track {}", user.context.username, id);
            Ok(transport.redirect_with_error(DASHBOARD_PATH, &user.handle, TRACK_NOT_FOUND))
        }
        Err(DomainError::ValidationError(msg)) => {
            warn!("Rejected track input from {}: {}", user.context.username, msg);
            Ok(transport.redirect_with_error(DASHBOARD_PATH, &user.handle, INVALID_TRACK))
        }
        Err(e) => Err(e.into()),
    }
}

/// GET /dashboard
pub async fn dashboard(
    State(state): State<AppState>,
    Extension(user): Extension<CurrentUser>,
    Query(query): Query<PageQuery>,
) -> Result<Html<String>, ApiError> {
    let tracks = state.tracks.leaderboard().await?;
    let token = form_token(&state, &user);
    let transport = &state.transport;

    let rows = tracks
        .into_iter()
        .enumerate()
        .map(|(index, track)| TrackRow {
            rank: index + 1,
            edit_url: transport.url(&format!("/edit-music/{}", track.id), Some(&user.handle), None),
            delete_url: format!("/delete-music/{}", track.id),
            vote_url: format!("/vote/{}", track.id),
            token: token.clone(),
            id: track.id,
            title: track.title,
            artist: track.artist,
            votes: track.votes,
        })
        .collect();

    let page = DashboardPage {
        username: user.context.username.clone(),
        error: query.error,
        tracks: rows,
        add_url: "/add-music".to_string(),
        logout_url: transport.url("/logout", Some(&user.handle), None),
        token,
    };
    state.views.render("dashboard", &page)
}

/// POST /add-music
pub async fn add_track(
    State(state): State<AppState>,
    Extension(user): Extension<CurrentUser>,
    form: Result<Form<TrackForm>, FormRejection>,
) -> Result<Redirect, ApiError> {
    let Form(form) = form?;
    let result = state
        .tracks
        .add(&form.title, &form.artist, &user.context.username)
        .await;
    back_to_dashboard(&state, &user, result)
}

/// GET /edit-music/{id}
pub async fn edit_page(
    State(state): State<AppState>,
    Extension(user): Extension<CurrentUser>,
    Path(id): Path<i64>,
) -> Result<Response, ApiError> {
    let track = match state.tracks.get(id).await {
        Ok(track) => track,
        Err(e) => {
            return back_to_dashboard(&state, &user, Err::<(), _>(e))
                .map(IntoResponse::into_response)
        }
    };

    let page = EditPage {
        username: user.context.username.clone(),
        action_url: format!("/edit-music/{}", track.id),
        back_url: state.transport.url(DASHBOARD_PATH, Some(&user.handle), None),
        token: form_token(&state, &user),
        track,
    };
    Ok(state.views.render("edit", &page)?.into_response())
}

/// POST /edit-music/{id}
pub async fn edit_track(
    State(state): State<AppState>,
    Extension(user): Extension<CurrentUser>,
    Path(id): Path<i64>,
    form: Result<Form<TrackForm>, FormRejection>,
) -> Result<Redirect, ApiError> {
    let Form(form) = form?;
    let result = state
        .tracks
        .edit(id, &form.title, &form.artist, &user.context.username)
        .await;
    back_to_dashboard(&state, &user, result)
}

/// POST /delete-music/{id}
pub async fn delete_track(
    State(state): State<AppState>,
    Extension(user): Extension<CurrentUser>,
    Path(id): Path<i64>,
) -> Result<Redirect, ApiError> {
    let result = state.tracks.remove(id, &user.context.username).await;
    back_to_dashboard(&state, &user, result)
}

/// POST /vote/{id}
pub async fn vote_track(
    State(state): State<AppState>,
    Extension(user): Extension<CurrentUser>,
    Path(id): Path<i64>,
) -> Result<Redirect, ApiError> {
    let result = state.tracks.vote(id, &user.context.username).await;
    back_to_dashboard(&state, &user, result)
}
