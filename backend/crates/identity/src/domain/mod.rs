//! Domain Layer
//!
//! Contains entities, value objects, and the contracts of the collaborators
//! this crate depends on (credential store, resource ownership, welcome mail).

pub mod entity;
pub mod repository;
pub mod value_object;

pub use entity::{principal::Principal, user::User};
pub use repository::{
    CredentialStore, ResourceKind, ResourceOwner, ResourceOwnership, WelcomeNotifier,
};
