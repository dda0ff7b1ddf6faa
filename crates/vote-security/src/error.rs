//! Authentication failures recovered at the gating boundary

use thiserror::Error;

#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthError {
    #[error("Invalid credentials")]
    InvalidCredentials,

    #[error("Session not found, please log in")]
    SessionNotFound,

    #[error("Session expired, please log in again")]
    SessionExpired,

    #[error("Please log in to continue")]
    MissingHandle,
}

impl AuthError {
    pub fn code(&self) -> &'static str {
        match self {
            Self::InvalidCredentials => "invalid_credentials",
            Self::SessionNotFound => "session_not_found",
            Self::SessionExpired => "session_expired",
            Self::MissingHandle => "missing_handle",
        }
    }
}
