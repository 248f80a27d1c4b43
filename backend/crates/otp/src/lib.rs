//! One-time passcode backend module
//!
//! Layout:
//! - `domain/` - challenge entity, code and delivery value objects, repository traits
//! - `application/` - request / verify use cases
//! - `infra/` - PostgreSQL and in-memory challenge stores, channel notifier
//! - `presentation/` - plain-text HTTP endpoints
//!
//! ## Lifecycle
//! - At most one live challenge per identifier; re-requesting replaces it
//! - A challenge is valid strictly before its expiry and is deleted on first success
//! - Wrong code and expired code produce the same outcome

pub mod application;
pub mod domain;
pub mod error;
pub mod infra;
pub mod presentation;

pub use application::config::OtpConfig;
pub use domain::repository::{ContactDirectory, OtpNotifier, OtpRepository};
pub use domain::value_objects::ContactDetails;
pub use error::{OtpError, OtpResult};
pub use infra::memory::MemoryOtpRepository;
pub use infra::notifier::ChannelNotifier;
pub use infra::postgres::PgOtpRepository;
pub use presentation::handlers::OtpState;
pub use presentation::router::otp_router;
