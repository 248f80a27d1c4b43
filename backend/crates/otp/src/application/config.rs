//! OTP configuration

use chrono::Duration;

#[derive(Debug, Clone)]
pub struct OtpConfig {
    /// Lifetime of an issued code
    pub code_ttl: Duration,
    /// Number of digits
    pub code_width: u32,
}

impl Default for OtpConfig {
    fn default() -> Self {
        Self {
            code_ttl: Duration::minutes(5),
            code_width: 6,
        }
    }
}

impl OtpConfig {
    /// Same values as `Default`; codes are only ever logged by the log-backed transports
    pub fn development() -> Self {
        Self::default()
    }
}
