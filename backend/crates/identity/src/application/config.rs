//! Application Configuration
//!
//! Configuration for the identity application layer.

use std::time::Duration;

/// Shortest token lifetime accepted from configuration
pub const MIN_TOKEN_TTL: Duration = Duration::from_secs(15 * 60);
/// Longest token lifetime accepted from configuration
pub const MAX_TOKEN_TTL: Duration = Duration::from_secs(60 * 60);

/// Minimum signing key length in bytes
pub const MIN_TOKEN_SECRET_LEN: usize = 32;

#[derive(Clone)]
pub struct AuthConfig {
    /// HMAC-SHA256 signing key; loaded once, never mutated
    pub token_secret: Vec<u8>,
    /// Bearer token lifetime
    pub token_ttl: Duration,
    /// Password pepper (optional, application-wide secret)
    pub password_pepper: Option<Vec<u8>>,
}

/// Fresh random signing key on every call; tokens do not survive a restart.
impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            token_secret: platform::crypto::random_bytes(MIN_TOKEN_SECRET_LEN),
            token_ttl: Duration::from_secs(30 * 60),
            password_pepper: None,
        }
    }
}

impl std::fmt::Debug for AuthConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AuthConfig")
            .field("token_secret", &"[REDACTED]")
            .field("token_ttl", &self.token_ttl)
            .field("password_pepper", &self.password_pepper.as_ref().map(|_| "[REDACTED]"))
            .finish()
    }
}

impl AuthConfig {
    /// Create config with a random signing key (for development)
    pub fn development() -> Self {
        Self::default()
    }

    /// Build a config from an explicit key and TTL, enforcing key length and
    /// the allowed TTL range.
    pub fn new(token_secret: Vec<u8>, token_ttl: Duration) -> Result<Self, String> {
        if token_secret.len() < MIN_TOKEN_SECRET_LEN {
            return Err(format!(
                "token secret must be at least {MIN_TOKEN_SECRET_LEN} bytes (got {})",
                token_secret.len()
            ));
        }
        if !(MIN_TOKEN_TTL..=MAX_TOKEN_TTL).contains(&token_ttl) {
            return Err(format!(
                "token TTL must be between {} and {} minutes",
                MIN_TOKEN_TTL.as_secs() / 60,
                MAX_TOKEN_TTL.as_secs() / 60
            ));
        }
        Ok(Self {
            token_secret,
            token_ttl,
            password_pepper: None,
        })
    }

    pub fn with_pepper(mut self, pepper: Option<Vec<u8>>) -> Self {
        self.password_pepper = pepper;
        self
    }

    pub fn pepper(&self) -> Option<&[u8]> {
        self.password_pepper.as_deref()
    }
}
