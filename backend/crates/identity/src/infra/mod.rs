//! Infrastructure Layer
//!
//! Credential store implementations and the welcome mail sender.

pub mod mail;
pub mod memory;
pub mod postgres;

pub use mail::MailWelcomeNotifier;
pub use memory::MemoryCredentialStore;
pub use postgres::PgCredentialStore;
