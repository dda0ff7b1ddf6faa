//! Access gating for track routes

use axum::{
    extract::{Request, State},
    middleware::Next,
    response::Response,
};
use tracing::debug;

use vote_security::{AuthError, SessionContext, SessionHandle};

use crate::error::ApiError;
use crate::state::AppState;

/// Identity attached to a request that passed the gate.
#[derive(Debug, Clone)]
pub struct CurrentUser {
    pub context: SessionContext,
    pub handle: SessionHandle,
}

/// Verify the session handle before the route runs. Any non-active result
/// becomes a redirect to the login page with a reason.
pub async fn require_session(
    State(state): State<AppState>,
    request: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let (mut request, handle) = state.transport.extract(request).await?;
    let handle = handle.ok_or(AuthError::MissingHandle)?;
    let context = state.sessions.verify(&handle).await.into_result()?;

    debug!(
        "Session {} verified for {} on {}",
        handle.redacted(),
        context.username,
        request.uri().path()
    );

    request.extensions_mut().insert(CurrentUser { context, handle });
    Ok(next.run(request).await)
}
