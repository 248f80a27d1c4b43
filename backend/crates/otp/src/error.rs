//! OTP error types
//!
//! Domain outcomes render as plain-text messages with `200 OK`; the endpoints
//! never expose a structured error body.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use thiserror::Error;

pub type OtpResult<T> = Result<T, OtpError>;

#[derive(Debug, Error)]
pub enum OtpError {
    /// No identity record for the identifier
    #[error("User not found with email or phone number: {0}")]
    UserNotFound(String),

    /// Unknown channel, or the record has no contact value for it
    #[error("Invalid delivery method or missing contact details")]
    InvalidDeliveryMethod,

    /// No live or dead challenge stored for the identifier
    #[error("No OTP found for: {0}")]
    OtpNotFound(String),

    #[error("Invalid or expired OTP")]
    InvalidOrExpiredOtp,

    /// Request parameters missing or malformed
    #[error("Missing or invalid parameter: {0}")]
    BadRequest(String),

    /// Mail or SMS transport refused the message
    #[error("Delivery failed: {0}")]
    DeliveryFailed(String),

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl OtpError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            OtpError::UserNotFound(_)
            | OtpError::InvalidDeliveryMethod
            | OtpError::OtpNotFound(_)
            | OtpError::InvalidOrExpiredOtp => StatusCode::OK,
            OtpError::BadRequest(_) => StatusCode::BAD_REQUEST,
            OtpError::DeliveryFailed(_) => StatusCode::BAD_GATEWAY,
            OtpError::Database(_) | OtpError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Text sent to the caller. Transport and storage details stay in the logs.
    pub fn public_message(&self) -> String {
        match self {
            OtpError::DeliveryFailed(_) => "Could not deliver OTP, please try again".to_string(),
            OtpError::Database(_) | OtpError::Internal(_) => "Internal server error".to_string(),
            _ => self.to_string(),
        }
    }

    fn log(&self) {
        match self {
            OtpError::Database(e) => {
                tracing::error!(error = %e, "OTP database error");
            }
            OtpError::Internal(msg) => {
                tracing::error!(message = %msg, "OTP internal error");
            }
            OtpError::DeliveryFailed(reason) => {
                tracing::error!(reason = %reason, "OTP delivery failed");
            }
            OtpError::InvalidOrExpiredOtp => {
                tracing::warn!("OTP verification rejected");
            }
            _ => {
                tracing::debug!(error = %self, "OTP outcome");
            }
        }
    }
}

impl IntoResponse for OtpError {
    fn into_response(self) -> Response {
        self.log();
        (self.status_code(), self.public_message()).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn domain_outcomes_are_plain_ok() {
        for err in [
            OtpError::UserNotFound("a@x.com".into()),
            OtpError::InvalidDeliveryMethod,
            OtpError::OtpNotFound("a@x.com".into()),
            OtpError::InvalidOrExpiredOtp,
        ] {
            assert_eq!(err.status_code(), StatusCode::OK);
        }
    }

    #[test]
    fn messages_match_the_wire_texts() {
        assert_eq!(
            OtpError::UserNotFound("555".into()).public_message(),
            "User not found with email or phone number: 555"
        );
        assert_eq!(
            OtpError::OtpNotFound("555".into()).public_message(),
            "No OTP found for: 555"
        );
        assert_eq!(
            OtpError::InvalidOrExpiredOtp.public_message(),
            "Invalid or expired OTP"
        );
    }

    #[test]
    fn internal_details_are_hidden() {
        let err = OtpError::Internal("pool exhausted".into());
        assert_eq!(err.status_code(), StatusCode::INTERNAL_SERVER_ERROR);
        assert!(!err.public_message().contains("pool"));

        let err = OtpError::DeliveryFailed("550 mailbox unavailable".into());
        assert!(!err.public_message().contains("550"));
    }
}
