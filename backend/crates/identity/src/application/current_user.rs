//! Current User Use Case

use std::sync::Arc;

use crate::domain::entity::{principal::Principal, user::User};
use crate::domain::repository::CredentialStore;
use crate::error::{AuthError, AuthResult};

pub struct CurrentUserUseCase<R>
where
    R: CredentialStore,
{
    repo: Arc<R>,
}

impl<R> CurrentUserUseCase<R>
where
    R: CredentialStore,
{
    pub fn new(repo: Arc<R>) -> Self {
        Self { repo }
    }

    /// Full record behind the request's principal.
    pub async fn execute(&self, principal: Option<&Principal>) -> AuthResult<User> {
        let principal = principal.ok_or(AuthError::Unauthenticated)?;

        self.repo
            .find_by_id(&principal.user_id)
            .await?
            .ok_or(AuthError::UserNotFound)
    }
}
