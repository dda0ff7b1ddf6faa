// ============================================================================
// Vote API - Router
// File: crates/vote-api/src/router.rs
// ============================================================================

use axum::{
    middleware,
    routing::{get, post},
    Router,
};
use tower_http::{
    catch_panic::CatchPanicLayer,
    trace::{DefaultMakeSpan, TraceLayer},
};

use crate::error::panic_response;
use crate::handlers::{api, auth, health, tracks};
use crate::middleware::require_session;
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    let public = Router::new()
        .route("/", get(auth::root))
        .route("/login", get(auth::login_page).post(auth::login))
        .route("/logout", get(auth::logout))
        .route("/health", get(health::health_check));

    // route_layer keeps unmatched paths as 404 instead of a login redirect
    let gated = Router::new()
        .route("/dashboard", get(tracks::dashboard))
        .route("/add-music", post(tracks::add_track))
        .route(
            "/edit-music/{id}",
            get(tracks::edit_page).post(tracks::edit_track),
        )
        .route("/delete-music/{id}", post(tracks::delete_track))
        .route("/vote/{id}", post(tracks::vote_track))
        .route("/api/tracks", get(api::list_tracks))
        .route("/api/session", get(api::current_session))
        .route_layer(middleware::from_fn_with_state(state.clone(), require_session));

    with_layers(Router::new().merge(public).merge(gated).with_state(state))
}

/// Panic recovery and request tracing around a finished router.
fn with_layers(router: Router) -> Router {
    router
        .layer(CatchPanicLayer::custom(panic_response))
        .layer(TraceLayer::new_for_http().make_span_with(DefaultMakeSpan::default()))
}
