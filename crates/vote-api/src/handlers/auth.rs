// ============================================================================
// Vote API - Auth Handlers
// File: crates/vote-api/src/handlers/auth.rs
// ============================================================================
//! Login and logout

use axum::{
    extract::{FromRequest, Query, RawQuery, Request, State},
    http::{header::CONTENT_TYPE, HeaderMap},
    response::{Html, IntoResponse, Redirect, Response},
    Form, Json,
};
use axum_extra::extract::cookie::SignedCookieJar;
use serde::Deserialize;
use tracing::{error, info, warn};

use vote_core::DomainError;
use vote_security::AuthError;
use vote_shared::constants::{DASHBOARD_PATH, LOGIN_PATH};

use crate::error::{login_redirect, ApiError};
use crate::state::AppState;
use crate::views::LoginPage;

/// Login form payload
#[derive(Debug, Deserialize)]
pub struct LoginForm {
    #[serde(default)]
    pub username: String,
    #[serde(default)]
    pub password: String,
}

const SERVER_ERROR: &str = "Server error";

/// Login credentials from either a urlencoded form or a JSON body.
#[derive(Debug)]
pub struct LoginInput(pub LoginForm);

impl<S: Send + Sync> FromRequest<S> for LoginInput {
    type Rejection = ApiError;

    async fn from_request(request: Request, state: &S) -> Result<Self, Self::Rejection> {
        let is_json = request
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .is_some_and(|v| v.starts_with("application/json"));

        if is_json {
            let Json(form) = Json::<LoginForm>::from_request(request, state).await?;
            Ok(Self(form))
        } else {
            let Form(form) = Form::<LoginForm>::from_request(request, state).await?;
            Ok(Self(form))
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct LoginQuery {
    pub error: Option<String>,
}

/// GET /
pub async fn root() -> Redirect {
    Redirect::to(LOGIN_PATH)
}

/// GET /login
pub async fn login_page(
    State(state): State<AppState>,
    Query(query): Query<LoginQuery>,
) -> Result<Html<String>, ApiError> {
    state.views.render("login", &LoginPage { error: query.error })
}

/// POST /login
///
/// Always answers with a redirect: the dashboard on success, the login page
/// with a reason otherwise.
pub async fn login(
    State(state): State<AppState>,
    jar: SignedCookieJar,
    input: Result<LoginInput, ApiError>,
) -> Response {
    let LoginInput(form) = match input {
        Ok(input) => input,
        Err(e) => {
            warn!("Unreadable login request: {}", e);
            return login_redirect(SERVER_ERROR).into_response();
        }
    };

    let account = match state
        .auth
        .verify_credentials(&form.username, &form.password)
        .await
    {
        Ok(account) => account,
        Err(DomainError::InvalidCredentials) => {
            return login_redirect(&AuthError::InvalidCredentials.to_string()).into_response();
        }
        Err(e) => {
            error!("Login failed for {}: {}", form.username, e);
            return login_redirect(SERVER_ERROR).into_response();
        }
    };

    let handle = state.sessions.create(&account).await;
    info!("Login successful for: {}", account.username);
    state.transport.issue(jar, &handle, DASHBOARD_PATH)
}

/// GET /logout
pub async fn logout(
    State(state): State<AppState>,
    jar: SignedCookieJar,
    headers: HeaderMap,
    RawQuery(query): RawQuery,
) -> Response {
    let handle = state.transport.extract_without_body(&headers, query.as_deref());
    if let Some(handle) = handle {
        state.sessions.destroy(&handle).await;
    }
    (state.transport.revoke(jar), Redirect::to(LOGIN_PATH)).into_response()
}
