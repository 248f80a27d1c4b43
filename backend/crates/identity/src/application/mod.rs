//! Application Layer
//!
//! Use cases and application services.

pub mod access_policy;
pub mod change_role;
pub mod config;
pub mod current_user;
pub mod login;
pub mod register;
pub mod token;

// Re-exports
pub use access_policy::{AccessPolicy, AccessRule};
pub use change_role::{ChangeRoleInput, ChangeRoleUseCase};
pub use config::AuthConfig;
pub use current_user::CurrentUserUseCase;
pub use login::{LoginInput, LoginOutput, LoginUseCase};
pub use register::{RegisterInput, RegisterUseCase};
pub use token::{IssuedToken, TokenClaims, TokenService};
