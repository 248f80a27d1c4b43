//! Identity Backend Module
//!
//! Clean Architecture structure:
//! - `domain/` - Identity records, principals, value objects, store contracts
//! - `application/` - Token service, access policy, login / register / current user / role change
//! - `infra/` - PostgreSQL and in-memory credential stores, welcome mail
//! - `presentation/` - HTTP handlers, DTOs, middleware, routers
//!
//! ## Security Model
//! - Passwords hashed with Argon2id, never logged
//! - Stateless HMAC-SHA256 bearer tokens carrying subject and role
//! - Every request passes through `authenticate` (token -> principal) and,
//!   on protected routes, `enforce` (principal + rule -> allow / 401 / 403)
//! - The role claim is fixed at issuance; a role change applies on next login

pub mod application;
pub mod domain;
pub mod error;
pub mod infra;
pub mod presentation;

#[cfg(test)]
mod tests;

// Re-exports for convenience
pub use application::config::AuthConfig;
pub use application::token::TokenService;
pub use error::{AuthError, AuthResult};
pub use infra::{MailWelcomeNotifier, MemoryCredentialStore, PgCredentialStore};

pub use kernel::error::{
    app_error::{AppError, AppResult},
    kind::ErrorKind,
};

pub mod models {
    pub use crate::domain::entity::*;
    pub use crate::domain::value_object::*;
    pub use crate::presentation::dto::*;
}

pub mod router {
    pub use crate::presentation::router::*;
}

pub mod middleware {
    pub use crate::presentation::middleware::*;
}
