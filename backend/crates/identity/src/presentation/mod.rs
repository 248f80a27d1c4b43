//! Presentation Layer
//!
//! HTTP handlers, DTOs, extractors, middleware and routers.

pub mod dto;
pub mod extract;
pub mod handlers;
pub mod middleware;
pub mod router;

pub use extract::{CurrentPrincipal, MaybePrincipal};
pub use handlers::IdentityState;
pub use middleware::{PolicyState, authenticate, enforce};
pub use router::{identity_routes, protect, with_authentication};
