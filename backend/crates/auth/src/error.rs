//! Auth Error Types
//!
//! This module provides auth-specific error variants that integrate
//! with the unified `kernel::error::AppError` system.

use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use kernel::error::{app_error::AppError, kind::ErrorKind};
use thiserror::Error;

/// Auth-specific result type alias
pub type AuthResult<T> = Result<T, AuthError>;

/// Auth-specific error variants
///
/// `InvalidCredentials`, `Unauthenticated` and `StoreUnavailable` stay
/// distinct internally (logs) but render identically to clients.
#[derive(Debug, Error)]
pub enum AuthError {
    /// Unknown email or wrong password at login
    #[error("Invalid credentials")]
    InvalidCredentials,

    /// Token missing, unknown, revoked or expired
    #[error("Missing, unknown or expired token")]
    Unauthenticated,

    /// Session backend unreachable or failing
    #[error("Session store unavailable: {0}")]
    StoreUnavailable(String),

    #[error("Missing email")]
    MissingEmail,

    #[error("Missing password")]
    MissingPassword,

    #[error("Invalid email")]
    InvalidEmail,

    #[error("Already exist")]
    EmailTaken,

    /// Request body could not be used
    #[error("{0}")]
    InvalidRequest(String),

    /// Credential store error
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl AuthError {
    /// True for the failures every client sees as a bare 401
    pub fn is_unauthorized(&self) -> bool {
        matches!(
            self,
            AuthError::InvalidCredentials
                | AuthError::Unauthenticated
                | AuthError::StoreUnavailable(_)
        )
    }

    /// Get the HTTP status code for this error
    pub fn status_code(&self) -> StatusCode {
        match self {
            AuthError::InvalidCredentials
            | AuthError::Unauthenticated
            | AuthError::StoreUnavailable(_) => StatusCode::UNAUTHORIZED,
            AuthError::MissingEmail
            | AuthError::MissingPassword
            | AuthError::InvalidEmail
            | AuthError::EmailTaken
            | AuthError::InvalidRequest(_) => StatusCode::BAD_REQUEST,
            AuthError::Database(_) | AuthError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Get the ErrorKind for this error
    pub fn kind(&self) -> ErrorKind {
        match self {
            AuthError::InvalidCredentials
            | AuthError::Unauthenticated
            | AuthError::StoreUnavailable(_) => ErrorKind::Unauthorized,
            AuthError::MissingEmail
            | AuthError::MissingPassword
            | AuthError::InvalidEmail
            | AuthError::EmailTaken
            | AuthError::InvalidRequest(_) => ErrorKind::BadRequest,
            AuthError::Database(_) | AuthError::Internal(_) => ErrorKind::InternalServerError,
        }
    }

    /// Convert to the client-facing AppError.
    ///
    /// Unauthorized and server-side failures carry only the reason phrase.
    pub fn to_app_error(&self) -> AppError {
        let kind = self.kind();
        if self.is_unauthorized() || kind.is_server_error() {
            AppError::new(kind, kind.as_str())
        } else {
            AppError::new(kind, self.to_string())
        }
    }

    /// Log the error with appropriate level
    fn log(&self) {
        match self {
            AuthError::StoreUnavailable(reason) => {
                tracing::error!(reason = %reason, "Session store unavailable");
            }
            AuthError::Database(e) => {
                tracing::error!(error = %e, "Auth database error");
            }
            AuthError::Internal(msg) => {
                tracing::error!(message = %msg, "Auth internal error");
            }
            AuthError::InvalidCredentials => {
                tracing::warn!("Invalid login attempt");
            }
            _ => {
                tracing::debug!(error = %self, "Auth error");
            }
        }
    }
}

impl IntoResponse for AuthError {
    fn into_response(self) -> Response {
        self.log();
        self.to_app_error().into_response()
    }
}

impl From<JsonRejection> for AuthError {
    fn from(err: JsonRejection) -> Self {
        tracing::debug!(error = %err, "Rejected request body");
        AuthError::InvalidRequest("Invalid JSON body".to_string())
    }
}
