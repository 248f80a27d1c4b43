//! PostgreSQL challenge store

use chrono::{DateTime, Utc};
use sqlx::PgPool;

use crate::domain::entities::OtpChallenge;
use crate::domain::repository::OtpRepository;
use crate::domain::value_objects::OtpCode;
use crate::error::OtpResult;

#[derive(Clone)]
pub struct PgOtpRepository {
    pool: PgPool,
}

impl PgOtpRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(sqlx::FromRow)]
struct ChallengeRow {
    identifier: String,
    code: String,
    created_at: DateTime<Utc>,
    expires_at: DateTime<Utc>,
}

impl From<ChallengeRow> for OtpChallenge {
    fn from(row: ChallengeRow) -> Self {
        OtpChallenge {
            identifier: row.identifier,
            code: OtpCode::from_stored(row.code),
            created_at: row.created_at,
            expires_at: row.expires_at,
        }
    }
}

impl OtpRepository for PgOtpRepository {
    async fn upsert(&self, challenge: &OtpChallenge) -> OtpResult<()> {
        sqlx::query(
            r#"
            INSERT INTO otp_challenges (identifier, code, created_at, expires_at)
            VALUES ($1, $2, $3, $4)
            ON CONFLICT (identifier) DO UPDATE SET
                code = EXCLUDED.code,
                created_at = EXCLUDED.created_at,
                expires_at = EXCLUDED.expires_at
            "#,
        )
        .bind(&challenge.identifier)
        .bind(challenge.code.as_str())
        .bind(challenge.created_at)
        .bind(challenge.expires_at)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    async fn find(&self, identifier: &str) -> OtpResult<Option<OtpChallenge>> {
        let row = sqlx::query_as::<_, ChallengeRow>(
            r#"
            SELECT identifier, code, created_at, expires_at
            FROM otp_challenges
            WHERE identifier = $1
            "#,
        )
        .bind(identifier)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(OtpChallenge::from))
    }

    async fn consume(&self, challenge: &OtpChallenge) -> OtpResult<bool> {
        let result = sqlx::query(
            r#"
            DELETE FROM otp_challenges
            WHERE identifier = $1 AND created_at = $2 AND code = $3
            "#,
        )
        .bind(&challenge.identifier)
        .bind(challenge.created_at)
        .bind(challenge.code.as_str())
        .execute(&self.pool)
        .await?;

        Ok(result.rows_affected() > 0)
    }

    async fn delete_expired_before(&self, cutoff: DateTime<Utc>) -> OtpResult<u64> {
        let deleted = sqlx::query("DELETE FROM otp_challenges WHERE expires_at < $1")
            .bind(cutoff)
            .execute(&self.pool)
            .await?
            .rows_affected();

        tracing::info!(challenges = deleted, "Cleaned up expired OTP challenges");
        Ok(deleted)
    }
}
