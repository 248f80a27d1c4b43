//! Change Role Use Case
//!
//! The only way an identity's role changes. Tokens issued before the change
//! keep their old role claim until the holder logs in again.

use std::sync::Arc;

use chrono::Utc;

use crate::domain::entity::{principal::Principal, user::User};
use crate::domain::repository::CredentialStore;
use crate::domain::value_object::{UserId, UserRole};
use crate::error::{AuthError, AuthResult};

pub struct ChangeRoleInput {
    pub user_id: UserId,
    pub role: String,
}

pub struct ChangeRoleUseCase<R>
where
    R: CredentialStore,
{
    repo: Arc<R>,
}

impl<R> ChangeRoleUseCase<R>
where
    R: CredentialStore,
{
    pub fn new(repo: Arc<R>) -> Self {
        Self { repo }
    }

    /// `actor` is the administrator performing the change (audit only).
    pub async fn execute(&self, actor: &Principal, input: ChangeRoleInput) -> AuthResult<User> {
        let role = UserRole::from_code(&input.role)?;

        let updated = self
            .repo
            .update_role(&input.user_id, role, Utc::now())
            .await?;
        if !updated {
            return Err(AuthError::UserNotFound);
        }

        let user = self
            .repo
            .find_by_id(&input.user_id)
            .await?
            .ok_or(AuthError::UserNotFound)?;

        tracing::info!(
            actor = %actor.subject,
            user_id = %user.user_id,
            role = %role,
            "User role changed"
        );

        Ok(user)
    }
}
