//! Outbound SMS
//!
//! No SMS provider is wired in yet; [`LogSmsSender`] stands in for one.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum SmsError {
    #[error("Invalid phone number: {0}")]
    InvalidNumber(String),

    #[error("SMS transport failed: {0}")]
    Transport(String),
}

#[trait_variant::make(SmsSender: Send)]
pub trait LocalSmsSender {
    async fn send(&self, to: &str, text: &str) -> Result<(), SmsError>;
}

#[derive(Debug, Clone, Default)]
pub struct LogSmsSender;

impl SmsSender for LogSmsSender {
    async fn send(&self, to: &str, text: &str) -> Result<(), SmsError> {
        if to.trim().is_empty() {
            return Err(SmsError::InvalidNumber(to.to_string()));
        }
        // Message text is not logged: it carries one-time codes.
        tracing::info!(to = %to, length = text.len(), "SMS not sent (no provider configured)");
        Ok(())
    }
}
