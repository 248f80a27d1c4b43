//! Repository traits
//!
//! Storage and delivery seams. Implementations live in `infra` or in the binary.

use chrono::{DateTime, Utc};

use crate::domain::entities::OtpChallenge;
use crate::domain::value_objects::{ContactDetails, Destination};
use crate::error::OtpResult;

/// Challenge storage, one row per identifier
#[trait_variant::make(OtpRepository: Send)]
pub trait LocalOtpRepository {
    /// Insert or replace the challenge for `challenge.identifier`
    async fn upsert(&self, challenge: &OtpChallenge) -> OtpResult<()>;

    async fn find(&self, identifier: &str) -> OtpResult<Option<OtpChallenge>>;

    /// Remove `challenge` only if it is still the stored issuance for its
    /// identifier; returns whether a row was deleted. A challenge replaced by
    /// a newer request is left alone.
    async fn consume(&self, challenge: &OtpChallenge) -> OtpResult<bool>;

    /// Housekeeping only; verification checks expiry itself
    async fn delete_expired_before(&self, cutoff: DateTime<Utc>) -> OtpResult<u64>;
}

/// Resolves an identifier to the identity record's contact values
#[trait_variant::make(ContactDirectory: Send)]
pub trait LocalContactDirectory {
    async fn find_contact(&self, identifier: &str) -> OtpResult<Option<ContactDetails>>;
}

/// Sends a code to a destination
#[trait_variant::make(OtpNotifier: Send)]
pub trait LocalOtpNotifier {
    async fn deliver(&self, destination: &Destination, text: &str) -> OtpResult<()>;
}
