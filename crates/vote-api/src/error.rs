use axum::{
    extract::rejection::{FormRejection, JsonRejection},
    http::StatusCode,
    response::{Html, IntoResponse, Redirect, Response},
};
use std::any::Any;
use thiserror::Error;

use vote_core::DomainError;
use vote_security::AuthError;
use vote_shared::constants::{ERROR_PARAM, LOGIN_PATH};

const FAILURE_PAGE: &str = include_str!("../templates/failure.html");

#[derive(Error, Debug)]
pub enum ApiError {
    #[error("Unauthorized: {0}")]
    Auth(#[from] AuthError),

    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl From<DomainError> for ApiError {
    fn from(err: DomainError) -> Self {
        match err {
            DomainError::InvalidCredentials => ApiError::Auth(AuthError::InvalidCredentials),
            other => ApiError::Internal(other.to_string()),
        }
    }
}

impl From<FormRejection> for ApiError {
    fn from(rejection: FormRejection) -> Self {
        ApiError::BadRequest(rejection.body_text())
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        ApiError::BadRequest(rejection.body_text())
    }
}

/// `/login?error=<reason>`
pub fn login_redirect(reason: &str) -> Redirect {
    Redirect::to(&format!(
        "{}?{}={}",
        LOGIN_PATH,
        ERROR_PARAM,
        urlencoding::encode(reason)
    ))
}

/// Generic failure page. Never includes error details.
pub fn failure_page(status: StatusCode) -> Response {
    (status, Html(FAILURE_PAGE)).into_response()
}

/// Response used by the panic-catching layer.
pub fn panic_response(panic: Box<dyn Any + Send + 'static>) -> Response {
    let detail = panic
        .downcast_ref::<String>()
        .map(String::as_str)
        .or_else(|| panic.downcast_ref::<&str>().copied())
        .unwrap_or("unknown panic");
    tracing::error!("Handler panicked: {}", detail);
    failure_page(StatusCode::INTERNAL_SERVER_ERROR)
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match self {
            ApiError::Auth(err) => {
                tracing::warn!("Unauthorized ({}): {}", err.code(), err);
                login_redirect(&err.to_string()).into_response()
            }
            ApiError::BadRequest(msg) => {
                tracing::warn!("Bad request: {}", msg);
                failure_page(StatusCode::BAD_REQUEST)
            }
            ApiError::Internal(msg) => {
                tracing::error!("Internal error: {}", msg);
                failure_page(StatusCode::INTERNAL_SERVER_ERROR)
            }
        }
    }
}
