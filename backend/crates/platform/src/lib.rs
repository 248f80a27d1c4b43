//! Platform Crate - Technical Infrastructure
//!
//! This crate provides shared technical foundations:
//! - Cryptographic utilities (SHA-256, Base64, random codes, constant-time compare)
//! - Password hashing (Argon2id, NIST SP 800-63B compliant)
//! - Request header helpers (bearer token, client IP)
//! - Login identifier canonicalisation (email / phone number)
//! - Outbound mail and SMS transports

pub mod client;
pub mod crypto;
pub mod identifier;
pub mod mail;
pub mod password;
pub mod sms;
