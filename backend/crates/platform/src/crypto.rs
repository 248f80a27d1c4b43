//! Cryptographic Utilities

use base64::{Engine, engine::general_purpose};
use rand::{Rng, RngCore, rngs::OsRng};
use sha2::{Digest, Sha256};

/// Generate cryptographically secure random bytes
pub fn random_bytes(len: usize) -> Vec<u8> {
    let mut bytes = vec![0u8; len];
    OsRng.fill_bytes(&mut bytes);
    bytes
}

/// Uniform random integer in `[low, high]`, drawn from the OS CSPRNG
pub fn random_in_range(low: u32, high: u32) -> u32 {
    OsRng.gen_range(low..=high)
}

/// Compute SHA-256 hash
pub fn sha256(data: &[u8]) -> [u8; 32] {
    let mut hasher = Sha256::new();
    hasher.update(data);
    hasher.finalize().into()
}

/// Short, non-reversible label for a secret, safe to put in logs.
///
/// First 8 bytes of SHA-256, URL-safe base64.
pub fn fingerprint(secret: &[u8]) -> String {
    to_base64_url(&sha256(secret)[..8])
}

/// Decode standard (padded) base64, as used for configured secrets
pub fn from_base64(s: &str) -> Result<Vec<u8>, base64::DecodeError> {
    general_purpose::STANDARD.decode(s)
}

/// Encode bytes as unpadded URL-safe base64 (token segments)
pub fn to_base64_url(bytes: &[u8]) -> String {
    general_purpose::URL_SAFE_NO_PAD.encode(bytes)
}

pub fn from_base64_url(s: &str) -> Result<Vec<u8>, base64::DecodeError> {
    general_purpose::URL_SAFE_NO_PAD.decode(s)
}

/// Constant-time comparison to prevent timing attacks
pub fn constant_time_eq(a: &[u8], b: &[u8]) -> bool {
    if a.len() != b.len() {
        return false;
    }
    let mut result = 0u8;
    for (x, y) in a.iter().zip(b.iter()) {
        result |= x ^ y;
    }
    result == 0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sha256_known_values() {
        let hash = sha256(b"");
        let expected =
            hex::decode("e3b0c44298fc1c149afbf4c8996fb92427ae41e4649b934ca495991b7852b855")
                .unwrap();
        assert_eq!(hash.to_vec(), expected);
    }

    #[test]
    fn test_random_bytes() {
        let bytes = random_bytes(32);
        assert_eq!(bytes.len(), 32);
        assert!(bytes.iter().any(|&b| b != 0));
    }

    #[test]
    fn test_random_in_range_stays_in_bounds() {
        for _ in 0..1_000 {
            let n = random_in_range(100_000, 999_999);
            assert!((100_000..=999_999).contains(&n));
        }
    }

    #[test]
    fn test_fingerprint_is_stable_and_short() {
        let a = fingerprint(b"some.token.value");
        assert_eq!(a, fingerprint(b"some.token.value"));
        assert_ne!(a, fingerprint(b"some.token.valuf"));
        assert_eq!(a.len(), 11);
    }

    #[test]
    fn test_base64_url_has_no_padding() {
        let encoded = to_base64_url(b"ab");
        assert!(!encoded.contains('='));
        assert_eq!(from_base64_url(&encoded).unwrap(), b"ab");
        assert!(from_base64_url("not base64!").is_err());
    }

    #[test]
    fn test_from_base64_accepts_padding() {
        assert_eq!(from_base64("YWI=").unwrap(), b"ab");
        assert!(from_base64("YWI").is_err());
    }

    #[test]
    fn test_constant_time_eq() {
        assert!(constant_time_eq(b"123456", b"123456"));
        assert!(!constant_time_eq(b"123456", b"123457"));
        assert!(!constant_time_eq(b"123456", b"12345"));
    }
}
