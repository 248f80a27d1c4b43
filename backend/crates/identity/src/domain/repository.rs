//! Repository Traits
//!
//! Contracts for the collaborators of the identity core. Implementations
//! live in the infrastructure layer.

use crate::domain::entity::user::User;
use crate::domain::value_object::{Email, PhoneNumber, UserId, UserName, UserRole};
use crate::error::AuthResult;
use chrono::{DateTime, Utc};

/// Credential store
#[trait_variant::make(CredentialStore: Send)]
pub trait LocalCredentialStore {
    /// Find by email or phone number (normalised, see
    /// [`normalize_login_identifier`](crate::domain::entity::user::normalize_login_identifier))
    async fn find_by_login_identifier(&self, identifier: &str) -> AuthResult<Option<User>>;

    async fn find_by_id(&self, user_id: &UserId) -> AuthResult<Option<User>>;

    async fn exists_by_email(&self, email: &Email) -> AuthResult<bool>;

    async fn exists_by_user_name(&self, user_name: &UserName) -> AuthResult<bool>;

    async fn exists_by_phone_number(&self, phone_number: &PhoneNumber) -> AuthResult<bool>;

    /// Persist a new record.
    ///
    /// Must reject a duplicate email, phone number or user name with
    /// `AuthError::DuplicateIdentity`, whatever the callers checked before.
    async fn save(&self, user: &User) -> AuthResult<()>;

    /// Returns `false` when no record has `user_id`.
    async fn update_role(
        &self,
        user_id: &UserId,
        role: UserRole,
        updated_at: DateTime<Utc>,
    ) -> AuthResult<bool>;
}

/// Resource types whose ownership can be checked
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResourceKind {
    Patient,
}

impl ResourceKind {
    pub const fn as_str(&self) -> &'static str {
        match self {
            ResourceKind::Patient => "patient",
        }
    }
}

/// Identity record that owns a resource
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResourceOwner {
    pub user_id: UserId,
    /// Same form as [`User::login_identifier`]
    pub login_identifier: String,
}

/// Ownership lookup served by the clinical records layer
#[trait_variant::make(ResourceOwnership: Send)]
pub trait LocalResourceOwnership {
    /// `Ok(None)` when the resource does not exist or `id` is malformed.
    async fn owner_of(&self, kind: ResourceKind, id: &str) -> AuthResult<Option<ResourceOwner>>;
}

/// Best-effort greeting after registration
#[trait_variant::make(WelcomeNotifier: Send)]
pub trait LocalWelcomeNotifier {
    async fn send_welcome(&self, user: &User) -> AuthResult<()>;
}
