//! Verify OTP use case

use std::sync::Arc;

use chrono::{DateTime, Utc};

use crate::domain::repository::OtpRepository;
use crate::domain::services::challenge_key;
use crate::error::{OtpError, OtpResult};

pub struct VerifyOtpInput {
    pub identifier: String,
    pub code: String,
}

pub struct VerifyOtpUseCase<R> {
    repo: Arc<R>,
}

impl<R> VerifyOtpUseCase<R>
where
    R: OtpRepository,
{
    pub fn new(repo: Arc<R>) -> Self {
        Self { repo }
    }

    pub async fn execute(&self, input: VerifyOtpInput) -> OtpResult<()> {
        self.execute_at(input, Utc::now()).await
    }

    /// Succeeds once per challenge; wrong and expired codes are indistinguishable
    pub async fn execute_at(&self, input: VerifyOtpInput, now: DateTime<Utc>) -> OtpResult<()> {
        let identifier = input.identifier.trim().to_string();
        let key = challenge_key(&identifier);

        let challenge = self
            .repo
            .find(&key)
            .await?
            .ok_or(OtpError::OtpNotFound(identifier))?;

        if !challenge.accepts(input.code.trim(), now) {
            return Err(OtpError::InvalidOrExpiredOtp);
        }

        // A concurrent verify may have consumed it, or a re-request replaced it
        if !self.repo.consume(&challenge).await? {
            return Err(OtpError::InvalidOrExpiredOtp);
        }

        tracing::info!("OTP verified");
        Ok(())
    }
}
