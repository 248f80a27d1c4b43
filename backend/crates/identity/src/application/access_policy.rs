//! Access Control Policy
//!
//! Routes declare an [`AccessRule`] where they are defined; the policy
//! evaluates it against the request's principal.
//!
//! Order of evaluation:
//! 1. A rule other than `Public` needs a principal, else `Unauthenticated`.
//! 2. The principal's role must be allowed, or (for owner rules) the
//!    principal must own the addressed resource, else `Forbidden`.

use std::sync::Arc;

use crate::domain::entity::principal::Principal;
use crate::domain::repository::{ResourceKind, ResourceOwnership};
use crate::domain::value_object::UserRole;
use crate::error::{AuthError, AuthResult};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AccessRule {
    /// No principal required
    Public,
    /// Principal required and its role must be listed
    Roles(&'static [UserRole]),
    /// Principal required; listed roles pass, anyone else must own the
    /// resource named by the `id` path parameter
    OwnerOrRoles {
        resource: ResourceKind,
        roles: &'static [UserRole],
    },
}

impl AccessRule {
    /// Any authenticated principal
    pub const AUTHENTICATED: AccessRule = AccessRule::Roles(UserRole::ALL);

    pub fn requires_resource_id(&self) -> bool {
        matches!(self, AccessRule::OwnerOrRoles { .. })
    }
}

pub struct AccessPolicy<R>
where
    R: ResourceOwnership,
{
    ownership: Arc<R>,
}

impl<R> AccessPolicy<R>
where
    R: ResourceOwnership,
{
    pub fn new(ownership: Arc<R>) -> Self {
        Self { ownership }
    }

    /// `resource_id` is only consulted for owner rules; a missing id there
    /// denies the request.
    pub async fn evaluate(
        &self,
        rule: &AccessRule,
        principal: Option<&Principal>,
        resource_id: Option<&str>,
    ) -> AuthResult<()> {
        let roles = match rule {
            AccessRule::Public => return Ok(()),
            AccessRule::Roles(roles) | AccessRule::OwnerOrRoles { roles, .. } => *roles,
        };

        let principal = principal.ok_or(AuthError::Unauthenticated)?;

        if principal.has_any_role(roles) {
            return Ok(());
        }

        if let AccessRule::OwnerOrRoles { resource, .. } = rule {
            if let Some(id) = resource_id {
                if self.is_owner(principal, *resource, id).await? {
                    return Ok(());
                }
            }
        }

        Err(AuthError::Forbidden)
    }

    async fn is_owner(
        &self,
        principal: &Principal,
        resource: ResourceKind,
        id: &str,
    ) -> AuthResult<bool> {
        let owner = self.ownership.owner_of(resource, id).await?;
        Ok(owner.is_some_and(|o| o.login_identifier == principal.subject))
    }
}
