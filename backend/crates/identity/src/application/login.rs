//! Login Use Case
//!
//! Resolves an identity by email or phone number, verifies the password and
//! issues a bearer token carrying the record's current role.

use std::sync::Arc;

use crate::application::config::AuthConfig;
use crate::application::token::{IssuedToken, TokenService};
use crate::domain::entity::user::{User, normalize_login_identifier};
use crate::domain::repository::CredentialStore;
use crate::domain::value_object::LoginPassword;
use crate::error::{AuthError, AuthResult};

pub struct LoginInput {
    /// Email or phone number
    pub identifier: String,
    pub password: String,
}

pub struct LoginOutput {
    pub token: IssuedToken,
    pub user: User,
}

pub struct LoginUseCase<R>
where
    R: CredentialStore,
{
    repo: Arc<R>,
    tokens: TokenService,
    config: Arc<AuthConfig>,
}

impl<R> LoginUseCase<R>
where
    R: CredentialStore,
{
    pub fn new(repo: Arc<R>, tokens: TokenService, config: Arc<AuthConfig>) -> Self {
        Self {
            repo,
            tokens,
            config,
        }
    }

    /// Every failure to authenticate is `InvalidCredentials`; which part was
    /// wrong is never reported.
    pub async fn execute(&self, input: LoginInput) -> AuthResult<LoginOutput> {
        let identifier = normalize_login_identifier(&input.identifier);
        let password = LoginPassword::new(input.password);

        let Some(user) = self.repo.find_by_login_identifier(&identifier).await? else {
            return Err(AuthError::InvalidCredentials);
        };

        if !user.password.verify(&password, self.config.pepper()) {
            return Err(AuthError::InvalidCredentials);
        }

        let token = self.tokens.issue(&user)?;

        tracing::info!(
            user_id = %user.user_id,
            role = %user.role,
            expires_at = %token.expires_at,
            "User logged in"
        );

        Ok(LoginOutput { token, user })
    }
}
