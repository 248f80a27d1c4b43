//! Token Service
//!
//! Stateless bearer tokens: `base64url(claims JSON) "." base64url(HMAC-SHA256)`.
//!
//! Validation checks the signature first and expiry second, so a forged
//! token is always reported as [`AuthError::TokenInvalid`] even when its
//! claimed expiry has passed. A token is valid while `now < expires_at`.

use std::sync::Arc;

use chrono::{DateTime, TimeDelta, Utc};
use hmac::{Hmac, Mac};
use platform::crypto::{from_base64_url, to_base64_url};
use serde::{Deserialize, Serialize};
use sha2::Sha256;

use crate::application::config::AuthConfig;
use crate::domain::entity::{principal::Principal, user::User};
use crate::domain::value_object::{UserId, UserRole};
use crate::error::{AuthError, AuthResult};

type HmacSha256 = Hmac<Sha256>;

/// Signed claims
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenClaims {
    /// Login identifier
    pub sub: String,
    pub uid: UserId,
    pub role: UserRole,
    pub issued_at: DateTime<Utc>,
    pub expires_at: DateTime<Utc>,
}

#[derive(Debug, Clone)]
pub struct IssuedToken {
    pub token: String,
    pub expires_at: DateTime<Utc>,
}

#[derive(Clone)]
pub struct TokenService {
    config: Arc<AuthConfig>,
}

impl TokenService {
    pub fn new(config: Arc<AuthConfig>) -> Self {
        Self { config }
    }

    fn mac(&self) -> AuthResult<HmacSha256> {
        HmacSha256::new_from_slice(&self.config.token_secret)
            .map_err(|e| AuthError::Internal(format!("Invalid token key: {e}")))
    }

    fn ttl(&self) -> AuthResult<TimeDelta> {
        TimeDelta::from_std(self.config.token_ttl)
            .map_err(|e| AuthError::Internal(format!("Invalid token TTL: {e}")))
    }

    /// Issue a token for `user` valid from now for the configured TTL
    pub fn issue(&self, user: &User) -> AuthResult<IssuedToken> {
        self.issue_at(user.login_identifier(), user.user_id, user.role, Utc::now())
    }

    pub fn issue_at(
        &self,
        subject: &str,
        user_id: UserId,
        role: UserRole,
        now: DateTime<Utc>,
    ) -> AuthResult<IssuedToken> {
        let claims = TokenClaims {
            sub: subject.to_string(),
            uid: user_id,
            role,
            issued_at: now,
            expires_at: now + self.ttl()?,
        };

        let payload = serde_json::to_vec(&claims)
            .map_err(|e| AuthError::Internal(format!("Failed to encode claims: {e}")))?;
        let payload = to_base64_url(&payload);

        let mut mac = self.mac()?;
        mac.update(payload.as_bytes());
        let signature = to_base64_url(&mac.finalize().into_bytes());

        Ok(IssuedToken {
            token: format!("{payload}.{signature}"),
            expires_at: claims.expires_at,
        })
    }

    pub fn validate(&self, token: &str) -> AuthResult<Principal> {
        self.validate_at(token, Utc::now())
    }

    pub fn validate_at(&self, token: &str, now: DateTime<Utc>) -> AuthResult<Principal> {
        let claims = self.verify_signature(token)?;

        if now >= claims.expires_at {
            return Err(AuthError::TokenExpired);
        }

        Ok(Principal {
            subject: claims.sub,
            user_id: claims.uid,
            role: claims.role,
        })
    }

    fn verify_signature(&self, token: &str) -> AuthResult<TokenClaims> {
        let (payload, signature) = token.split_once('.').ok_or(AuthError::TokenInvalid)?;
        if signature.contains('.') {
            return Err(AuthError::TokenInvalid);
        }

        let signature = from_base64_url(signature).map_err(|_| AuthError::TokenInvalid)?;
        let mut mac = self.mac()?;
        mac.update(payload.as_bytes());
        mac.verify_slice(&signature)
            .map_err(|_| AuthError::TokenInvalid)?;

        let payload = from_base64_url(payload).map_err(|_| AuthError::TokenInvalid)?;
        serde_json::from_slice(&payload).map_err(|_| AuthError::TokenInvalid)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use std::time::Duration;

    fn service() -> TokenService {
        TokenService::new(Arc::new(
            AuthConfig::new(vec![7u8; 32], Duration::from_secs(30 * 60)).unwrap(),
        ))
    }

    fn t0() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 3, 1, 9, 0, 0).unwrap()
    }

    #[test]
    fn test_issue_then_validate_round_trips() {
        let tokens = service();
        let uid = UserId::new();
        let issued = tokens
            .issue_at("a@x.com", uid, UserRole::Patient, t0())
            .unwrap();
        assert_eq!(issued.expires_at, t0() + TimeDelta::minutes(30));

        let principal = tokens
            .validate_at(&issued.token, t0() + TimeDelta::minutes(10))
            .unwrap();
        assert_eq!(principal.subject, "a@x.com");
        assert_eq!(principal.user_id, uid);
        assert_eq!(principal.role, UserRole::Patient);
    }

    #[test]
    fn test_expiry_boundary() {
        let tokens = service();
        let issued = tokens
            .issue_at("a@x.com", UserId::new(), UserRole::Clinician, t0())
            .unwrap();

        let just_before = issued.expires_at - TimeDelta::microseconds(1);
        assert!(tokens.validate_at(&issued.token, just_before).is_ok());

        assert!(matches!(
            tokens.validate_at(&issued.token, issued.expires_at),
            Err(AuthError::TokenExpired)
        ));
        assert!(matches!(
            tokens.validate_at(&issued.token, issued.expires_at + TimeDelta::seconds(1)),
            Err(AuthError::TokenExpired)
        ));
    }

    #[test]
    fn test_any_flipped_signature_bit_is_invalid() {
        let tokens = service();
        let issued = tokens
            .issue_at("a@x.com", UserId::new(), UserRole::Administrator, t0())
            .unwrap();
        let (payload, signature) = issued.token.split_once('.').unwrap();
        let signature = from_base64_url(signature).unwrap();

        for byte in 0..signature.len() {
            for bit in 0..8 {
                let mut tampered = signature.clone();
                tampered[byte] ^= 1 << bit;
                let forged = format!("{payload}.{}", to_base64_url(&tampered));
                assert!(matches!(
                    tokens.validate_at(&forged, t0()),
                    Err(AuthError::TokenInvalid)
                ));
            }
        }
    }

    #[test]
    fn test_edited_claims_are_invalid() {
        let tokens = service();
        let issued = tokens
            .issue_at("p@x.com", UserId::new(), UserRole::Patient, t0())
            .unwrap();
        let (payload, signature) = issued.token.split_once('.').unwrap();

        let json = String::from_utf8(from_base64_url(payload).unwrap()).unwrap();
        let escalated = json.replace("\"PATIENT\"", "\"ADMIN\"");
        let forged = format!("{}.{}", to_base64_url(escalated.as_bytes()), signature);

        assert!(matches!(
            tokens.validate_at(&forged, t0()),
            Err(AuthError::TokenInvalid)
        ));
    }

    #[test]
    fn test_forged_expired_token_reports_invalid_not_expired() {
        let tokens = service();
        let other = TokenService::new(Arc::new(
            AuthConfig::new(vec![9u8; 32], Duration::from_secs(30 * 60)).unwrap(),
        ));
        let issued = other
            .issue_at("a@x.com", UserId::new(), UserRole::Patient, t0())
            .unwrap();

        assert!(matches!(
            tokens.validate_at(&issued.token, t0() + TimeDelta::days(1)),
            Err(AuthError::TokenInvalid)
        ));
    }

    #[test]
    fn test_malformed_tokens() {
        let tokens = service();
        for bad in ["", "abc", "a.b.c", "!!!.???", "e30.AAAA"] {
            assert!(matches!(
                tokens.validate_at(bad, t0()),
                Err(AuthError::TokenInvalid)
            ));
        }
    }
}
