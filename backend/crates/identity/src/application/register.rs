//! Register Use Case
//!
//! Validates a profile, rejects already-registered identifiers, stores the
//! new record and sends a best-effort welcome mail.

use std::sync::Arc;

use chrono::Utc;

use crate::application::config::AuthConfig;
use crate::domain::entity::user::{NewUser, User};
use crate::domain::repository::{CredentialStore, WelcomeNotifier};
use crate::domain::value_object::{
    Email, PersonName, PhoneNumber, RawPassword, UserName, UserPassword, UserRole,
};
use crate::error::{AuthError, AuthResult};

pub const EMAIL_TAKEN: &str = "Email is already in use";
pub const PHONE_TAKEN: &str = "Phone number is already in use";
pub const USER_NAME_TAKEN: &str = "User name is already in use";

pub struct RegisterInput {
    pub first_name: String,
    pub last_name: String,
    pub user_name: String,
    pub email: Option<String>,
    pub phone_number: String,
    pub password: String,
    pub role: String,
}

impl RegisterInput {
    /// Boundary validation into domain types. An empty email counts as absent.
    fn validate(self) -> AuthResult<(NewUser, RawPassword)> {
        let email = match self.email.as_deref().map(str::trim) {
            None | Some("") => None,
            Some(raw) => Some(Email::new(raw)?),
        };

        let profile = NewUser {
            first_name: PersonName::new(&self.first_name, "First name")?,
            last_name: PersonName::new(&self.last_name, "Last name")?,
            user_name: UserName::new(&self.user_name)?,
            email,
            phone_number: PhoneNumber::new(&self.phone_number)?,
            role: UserRole::from_code(&self.role)?,
        };
        let password = RawPassword::new(self.password)?;

        Ok((profile, password))
    }
}

pub struct RegisterUseCase<R, N>
where
    R: CredentialStore,
    N: WelcomeNotifier,
{
    repo: Arc<R>,
    notifier: Arc<N>,
    config: Arc<AuthConfig>,
}

impl<R, N> RegisterUseCase<R, N>
where
    R: CredentialStore,
    N: WelcomeNotifier,
{
    pub fn new(repo: Arc<R>, notifier: Arc<N>, config: Arc<AuthConfig>) -> Self {
        Self {
            repo,
            notifier,
            config,
        }
    }

    pub async fn execute(&self, input: RegisterInput) -> AuthResult<User> {
        let (profile, password) = input.validate()?;

        // Advisory only: the store rejects duplicates again on save.
        if let Some(email) = &profile.email {
            if self.repo.exists_by_email(email).await? {
                return Err(AuthError::DuplicateIdentity(EMAIL_TAKEN.to_string()));
            }
        }
        if self.repo.exists_by_user_name(&profile.user_name).await? {
            return Err(AuthError::DuplicateIdentity(USER_NAME_TAKEN.to_string()));
        }
        if self.repo.exists_by_phone_number(&profile.phone_number).await? {
            return Err(AuthError::DuplicateIdentity(PHONE_TAKEN.to_string()));
        }

        let password = UserPassword::from_raw(&password, self.config.pepper())?;
        let user = User::new(profile, password, Utc::now());

        self.repo.save(&user).await?;

        tracing::info!(
            user_id = %user.user_id,
            user_name = %user.user_name,
            role = %user.role,
            "User registered"
        );

        if user.email.is_some() {
            if let Err(e) = self.notifier.send_welcome(&user).await {
                tracing::warn!(user_id = %user.user_id, error = %e, "Welcome mail failed");
            }
        }

        Ok(user)
    }
}
