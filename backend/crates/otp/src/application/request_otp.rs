//! Request OTP use case

use std::fmt;
use std::sync::Arc;

use chrono::{DateTime, Utc};

use crate::application::config::OtpConfig;
use crate::domain::entities::OtpChallenge;
use crate::domain::repository::{ContactDirectory, OtpNotifier, OtpRepository};
use crate::domain::services::{challenge_key, delivery_text};
use crate::domain::value_objects::{DeliveryMethod, Destination, OtpCode};
use crate::error::{OtpError, OtpResult};

pub struct RequestOtpInput {
    pub identifier: String,
    pub delivery_method: String,
}

/// Where the code went
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OtpSent(pub Destination);

impl fmt::Display for OtpSent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.0 {
            Destination::Email(to) => write!(f, "OTP sent to email: {to}"),
            Destination::Phone(to) => write!(f, "OTP sent to phone: {to}"),
        }
    }
}

pub struct RequestOtpUseCase<R, C, N> {
    repo: Arc<R>,
    contacts: Arc<C>,
    notifier: Arc<N>,
    config: OtpConfig,
}

impl<R, C, N> RequestOtpUseCase<R, C, N>
where
    R: OtpRepository,
    C: ContactDirectory,
    N: OtpNotifier,
{
    pub fn new(repo: Arc<R>, contacts: Arc<C>, notifier: Arc<N>, config: OtpConfig) -> Self {
        Self {
            repo,
            contacts,
            notifier,
            config,
        }
    }

    pub async fn execute(&self, input: RequestOtpInput) -> OtpResult<OtpSent> {
        self.execute_at(input, Utc::now()).await
    }

    /// Replaces any outstanding challenge for the identifier.
    ///
    /// The channel is checked before anything is stored. A failed delivery keeps
    /// the stored challenge.
    pub async fn execute_at(
        &self,
        input: RequestOtpInput,
        now: DateTime<Utc>,
    ) -> OtpResult<OtpSent> {
        let identifier = input.identifier.trim().to_string();

        let contact = self
            .contacts
            .find_contact(&identifier)
            .await?
            .ok_or_else(|| OtpError::UserNotFound(identifier.clone()))?;

        let method: DeliveryMethod = input.delivery_method.parse()?;
        let destination = contact
            .destination(method)
            .ok_or(OtpError::InvalidDeliveryMethod)?;

        let code = OtpCode::generate(self.config.code_width);
        let text = delivery_text(&code, self.config.code_ttl);
        let challenge = OtpChallenge::issue(
            challenge_key(&identifier),
            code,
            now,
            self.config.code_ttl,
        );
        self.repo.upsert(&challenge).await?;

        self.notifier.deliver(&destination, &text).await?;

        tracing::info!(
            method = ?method,
            expires_at = %challenge.expires_at,
            "OTP issued"
        );

        Ok(OtpSent(destination))
    }
}
