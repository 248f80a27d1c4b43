//! In-memory challenge store

use std::collections::HashMap;
use std::sync::Arc;

use chrono::{DateTime, Utc};
use tokio::sync::RwLock;

use crate::domain::entities::OtpChallenge;
use crate::domain::repository::OtpRepository;
use crate::error::OtpResult;

#[derive(Clone, Default)]
pub struct MemoryOtpRepository {
    challenges: Arc<RwLock<HashMap<String, OtpChallenge>>>,
}

impl MemoryOtpRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn len(&self) -> usize {
        self.challenges.read().await.len()
    }
}

impl OtpRepository for MemoryOtpRepository {
    async fn upsert(&self, challenge: &OtpChallenge) -> OtpResult<()> {
        self.challenges
            .write()
            .await
            .insert(challenge.identifier.clone(), challenge.clone());
        Ok(())
    }

    async fn find(&self, identifier: &str) -> OtpResult<Option<OtpChallenge>> {
        Ok(self.challenges.read().await.get(identifier).cloned())
    }

    async fn consume(&self, challenge: &OtpChallenge) -> OtpResult<bool> {
        let mut challenges = self.challenges.write().await;
        let current = challenges
            .get(&challenge.identifier)
            .is_some_and(|stored| stored.is_same_issue(challenge));
        if current {
            challenges.remove(&challenge.identifier);
        }
        Ok(current)
    }

    async fn delete_expired_before(&self, cutoff: DateTime<Utc>) -> OtpResult<u64> {
        let mut challenges = self.challenges.write().await;
        let before = challenges.len();
        challenges.retain(|_, c| c.expires_at >= cutoff);
        Ok((before - challenges.len()) as u64)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::value_objects::OtpCode;
    use chrono::{Duration, TimeZone};

    fn challenge(identifier: &str, code: &str, now: DateTime<Utc>) -> OtpChallenge {
        OtpChallenge::issue(
            identifier.into(),
            OtpCode::from_stored(code),
            now,
            Duration::minutes(5),
        )
    }

    #[tokio::test]
    async fn upsert_replaces_the_previous_challenge() {
        let repo = MemoryOtpRepository::new();
        let t0 = Utc.with_ymd_and_hms(2026, 1, 1, 9, 0, 0).unwrap();

        repo.upsert(&challenge("a@x.com", "111111", t0)).await.unwrap();
        repo.upsert(&challenge("a@x.com", "222222", t0)).await.unwrap();

        assert_eq!(repo.len().await, 1);
        let stored = repo.find("a@x.com").await.unwrap().unwrap();
        assert!(stored.code.matches("222222"));
    }

    #[tokio::test]
    async fn consume_reports_whether_a_row_existed() {
        let repo = MemoryOtpRepository::new();
        let t0 = Utc.with_ymd_and_hms(2026, 1, 1, 9, 0, 0).unwrap();
        let issued = challenge("555", "111111", t0);
        repo.upsert(&issued).await.unwrap();

        assert!(repo.consume(&issued).await.unwrap());
        assert!(!repo.consume(&issued).await.unwrap());
    }

    #[tokio::test]
    async fn consume_leaves_a_newer_issuance() {
        let repo = MemoryOtpRepository::new();
        let t0 = Utc.with_ymd_and_hms(2026, 1, 1, 9, 0, 0).unwrap();
        let read_by_verifier = challenge("555", "111111", t0);
        repo.upsert(&read_by_verifier).await.unwrap();

        // Re-requested between the verifier's read and its delete
        let fresh = challenge("555", "222222", t0 + Duration::seconds(30));
        repo.upsert(&fresh).await.unwrap();

        assert!(!repo.consume(&read_by_verifier).await.unwrap());
        let stored = repo.find("555").await.unwrap().unwrap();
        assert!(stored.is_same_issue(&fresh));
    }

    #[tokio::test]
    async fn consume_compares_the_code_when_times_collide() {
        let repo = MemoryOtpRepository::new();
        let t0 = Utc.with_ymd_and_hms(2026, 1, 1, 9, 0, 0).unwrap();
        let first = challenge("555", "111111", t0);
        repo.upsert(&first).await.unwrap();
        repo.upsert(&challenge("555", "222222", t0)).await.unwrap();

        assert!(!repo.consume(&first).await.unwrap());
        assert_eq!(repo.len().await, 1);
    }

    #[tokio::test]
    async fn housekeeping_removes_only_expired() {
        let repo = MemoryOtpRepository::new();
        let t0 = Utc.with_ymd_and_hms(2026, 1, 1, 9, 0, 0).unwrap();
        repo.upsert(&challenge("old", "111111", t0)).await.unwrap();
        repo.upsert(&challenge("new", "222222", t0 + Duration::minutes(10)))
            .await
            .unwrap();

        let removed = repo
            .delete_expired_before(t0 + Duration::minutes(6))
            .await
            .unwrap();

        assert_eq!(removed, 1);
        assert!(repo.find("old").await.unwrap().is_none());
        assert!(repo.find("new").await.unwrap().is_some());
    }
}
