//! Authenticated principal
//!
//! Built from a validated token by the authentication middleware and stored in
//! the request's extensions. It lives exactly as long as that request.

use serde::Serialize;

use crate::domain::value_object::{UserId, UserRole};

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Principal {
    /// Login identifier the token was issued to
    pub subject: String,
    pub user_id: UserId,
    /// Role at token issuance; not re-read from the store
    pub role: UserRole,
}

impl Principal {
    pub fn has_any_role(&self, roles: &[UserRole]) -> bool {
        roles.contains(&self.role)
    }
}
