//! Identity Error Types
//!
//! Identity-specific error variants that integrate with the unified
//! `kernel::error::AppError` system.

use axum::response::{IntoResponse, Response};
use kernel::error::{app_error::AppError, kind::ErrorKind};
use thiserror::Error;

pub type AuthResult<T> = Result<T, AuthError>;

#[derive(Debug, Error)]
pub enum AuthError {
    /// Unknown login identifier or wrong password; callers never learn which
    #[error("Invalid credentials")]
    InvalidCredentials,

    /// Email, phone number or user name already registered
    #[error("{0}")]
    DuplicateIdentity(String),

    /// Signature did not verify or token is malformed
    #[error("Invalid token")]
    TokenInvalid,

    #[error("Token expired")]
    TokenExpired,

    /// Protected operation without a valid principal
    #[error("Authentication required")]
    Unauthenticated,

    /// Valid principal, but role and ownership both fail
    #[error("Access denied")]
    Forbidden,

    #[error("User not found")]
    UserNotFound,

    #[error("Patient not found")]
    PatientNotFound,

    /// Input failed boundary validation
    #[error("{0}")]
    Validation(String),

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl AuthError {
    /// Outward form. Server-side details go to `source`, never to the message.
    pub fn into_app_error(self) -> AppError {
        match self {
            AuthError::InvalidCredentials => AppError::unauthorized("Invalid credentials"),
            AuthError::TokenInvalid | AuthError::TokenExpired | AuthError::Unauthenticated => {
                AppError::unauthorized("Authentication required")
                    .with_action("Log in and send the token as 'Authorization: Bearer <token>'")
            }
            AuthError::Forbidden => AppError::forbidden("Access denied"),
            AuthError::DuplicateIdentity(message) | AuthError::Validation(message) => {
                AppError::bad_request(message)
            }
            AuthError::UserNotFound => AppError::not_found("User not found"),
            AuthError::PatientNotFound => AppError::not_found("Patient not found"),
            AuthError::Database(e) => AppError::internal("Internal server error").with_source(e),
            AuthError::Internal(_) => AppError::internal("Internal server error"),
        }
    }

    fn log(&self) {
        match self {
            AuthError::Database(e) => {
                tracing::error!(error = %e, "Identity database error");
            }
            AuthError::Internal(msg) => {
                tracing::error!(message = %msg, "Identity internal error");
            }
            AuthError::InvalidCredentials => {
                tracing::warn!("Invalid login attempt");
            }
            _ => {
                tracing::debug!(error = %self, "Identity error");
            }
        }
    }
}

impl IntoResponse for AuthError {
    fn into_response(self) -> Response {
        self.log();
        self.into_app_error().into_response()
    }
}

/// Value objects report validation failures as `AppError::bad_request`.
impl From<AppError> for AuthError {
    fn from(err: AppError) -> Self {
        match err.kind() {
            ErrorKind::BadRequest => AuthError::Validation(err.message().to_string()),
            _ => AuthError::Internal(err.to_string()),
        }
    }
}
