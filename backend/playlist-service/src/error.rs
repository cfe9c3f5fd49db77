/// Error types for Playlist Service
///
/// Every failure in the aggregation core is representable as data: handlers
/// render errors as the uniform `CallResult` envelope, never as a crash.
use actix_web::{error::ResponseError, http::StatusCode, HttpResponse};
use playback_token::TokenError;
use std::fmt;

use crate::models::CallResult;

/// Result type for playlist-service operations
pub type Result<T> = std::result::Result<T, AppError>;

/// Business result codes carried in the response envelope.
///
/// `SUCCESS` is zero; every failure category is nonzero.
pub mod result_codes {
    pub const SUCCESS: i32 = 0;
    /// Caller-supplied or internally-constructed input failed validation
    pub const PARAM_IS_INVALID: i32 = 10001;
    /// No playlist / empty result set
    pub const PLAYLIST_NOT_FOUND: i32 = 20001;
    /// A required upstream call errored or timed out
    pub const UPSTREAM_ERROR: i32 = 30001;
    /// A required precondition is missing after a successful upstream call
    pub const INVALID_STATE: i32 = 30002;
    /// Unexpected internal failure
    pub const SYSTEM_INNER_ERROR: i32 = 40001;
}

/// Application error types
#[derive(Debug)]
pub enum AppError {
    /// No playlist or empty result set
    NotFound(String),

    /// A required upstream VOD call failed or timed out
    Upstream(String),

    /// A required precondition (e.g. the play key) is missing
    InvalidState(String),

    /// Invalid caller-supplied or signing input
    InvalidInput(String),

    /// Internal server error
    Internal(String),
}

impl AppError {
    /// Business code used in the response envelope
    pub fn result_code(&self) -> i32 {
        match self {
            AppError::NotFound(_) => result_codes::PLAYLIST_NOT_FOUND,
            AppError::Upstream(_) => result_codes::UPSTREAM_ERROR,
            AppError::InvalidState(_) => result_codes::INVALID_STATE,
            AppError::InvalidInput(_) => result_codes::PARAM_IS_INVALID,
            AppError::Internal(_) => result_codes::SYSTEM_INNER_ERROR,
        }
    }
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AppError::NotFound(msg) => write!(f, "Not found: {}", msg),
            AppError::Upstream(msg) => write!(f, "Upstream error: {}", msg),
            AppError::InvalidState(msg) => write!(f, "Invalid state: {}", msg),
            AppError::InvalidInput(msg) => write!(f, "Invalid input: {}", msg),
            AppError::Internal(msg) => write!(f, "Internal error: {}", msg),
        }
    }
}

impl std::error::Error for AppError {}

impl From<TokenError> for AppError {
    fn from(err: TokenError) -> Self {
        match err {
            TokenError::InvalidInput(msg) => AppError::InvalidInput(msg.to_string()),
            other => AppError::Internal(other.to_string()),
        }
    }
}

impl ResponseError for AppError {
    fn status_code(&self) -> StatusCode {
        match self {
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::Upstream(_) => StatusCode::BAD_GATEWAY,
            AppError::InvalidState(_) => StatusCode::INTERNAL_SERVER_ERROR,
            AppError::InvalidInput(_) => StatusCode::BAD_REQUEST,
            AppError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        let envelope = CallResult::<()>::err(self.result_code(), self.to_string());
        HttpResponse::build(self.status_code()).json(envelope)
    }
}
