//! Domain entities

use chrono::{DateTime, Duration, Utc};

use crate::domain::value_objects::OtpCode;

/// Outstanding challenge for one identifier
#[derive(Debug, Clone)]
pub struct OtpChallenge {
    pub identifier: String,
    pub code: OtpCode,
    pub created_at: DateTime<Utc>,
    pub expires_at: DateTime<Utc>,
}

impl OtpChallenge {
    pub fn issue(identifier: String, code: OtpCode, now: DateTime<Utc>, ttl: Duration) -> Self {
        Self {
            identifier,
            code,
            created_at: now,
            expires_at: now + ttl,
        }
    }

    /// Valid strictly before `expires_at`
    pub fn is_live_at(&self, now: DateTime<Utc>) -> bool {
        now < self.expires_at
    }

    /// Code matches and the challenge is still live
    pub fn accepts(&self, candidate: &str, now: DateTime<Utc>) -> bool {
        // Both checks always run
        let code_ok = self.code.matches(candidate);
        let live = self.is_live_at(now);
        code_ok & live
    }

    /// Same identifier, issue time and code: `other` is this exact issuance
    /// and not a later replacement.
    pub fn is_same_issue(&self, other: &OtpChallenge) -> bool {
        self.identifier == other.identifier
            && self.created_at == other.created_at
            && self.code == other.code
    }
}
