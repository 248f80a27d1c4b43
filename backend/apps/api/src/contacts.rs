//! OTP contact lookup backed by the credential store

use std::sync::Arc;

use identity::domain::entity::user::normalize_login_identifier;
use identity::domain::repository::CredentialStore;
use otp::{ContactDetails, ContactDirectory, OtpError, OtpResult};

pub struct IdentityContacts<R> {
    store: Arc<R>,
}

impl<R> IdentityContacts<R> {
    pub fn new(store: Arc<R>) -> Self {
        Self { store }
    }
}

impl<R> ContactDirectory for IdentityContacts<R>
where
    R: CredentialStore + Send + Sync,
{
    async fn find_contact(&self, identifier: &str) -> OtpResult<Option<ContactDetails>> {
        let user = self
            .store
            .find_by_login_identifier(&normalize_login_identifier(identifier))
            .await
            .map_err(|e| OtpError::Internal(format!("Credential store: {e}")))?;

        Ok(user.map(|user| ContactDetails {
            email: user.email.as_ref().map(|e| e.as_str().to_string()),
            phone_number: Some(user.phone_number.as_str().to_string()),
        }))
    }
}
