//! Shared Kernel - vocabulary shared by every clinic backend crate
//!
//! This crate contains only what has the same meaning in every domain:
//! - The unified error type and its HTTP-shaped taxonomy
//! - Typed identifiers for the records other crates refer to
//!
//! Anything specific to identity or OTP lives in its own crate.

pub mod error {
    pub mod app_error;
    pub mod kind;
    #[cfg(feature = "axum")]
    pub mod response;
}
pub mod id;
