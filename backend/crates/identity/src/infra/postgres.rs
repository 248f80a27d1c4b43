//! PostgreSQL Credential Store

use chrono::{DateTime, Utc};
use sqlx::PgPool;
use uuid::Uuid;

use crate::application::register::{EMAIL_TAKEN, PHONE_TAKEN, USER_NAME_TAKEN};
use crate::domain::entity::user::User;
use crate::domain::repository::{
    CredentialStore, ResourceKind, ResourceOwner, ResourceOwnership,
};
use crate::domain::value_object::{
    Email, PatientId, PersonName, PhoneNumber, UserId, UserName, UserPassword, UserRole,
};
use crate::error::{AuthError, AuthResult};

const USER_COLUMNS: &str = r#"
    user_id,
    first_name,
    last_name,
    user_name,
    email,
    phone_number,
    password_hash,
    user_role,
    created_at,
    updated_at
"#;

/// PostgreSQL-backed credential store
#[derive(Clone)]
pub struct PgCredentialStore {
    pool: PgPool,
}

impl PgCredentialStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    async fn fetch_user(&self, filter: &str, value: &str) -> AuthResult<Option<User>> {
        let sql = format!("SELECT {USER_COLUMNS} FROM users WHERE {filter}");
        let row = sqlx::query_as::<_, UserRow>(&sql)
            .bind(value)
            .fetch_optional(&self.pool)
            .await?;

        row.map(UserRow::into_user).transpose()
    }

    async fn exists(&self, filter: &str, value: &str) -> AuthResult<bool> {
        let sql = format!("SELECT EXISTS (SELECT 1 FROM users WHERE {filter})");
        let exists: bool = sqlx::query_scalar(&sql)
            .bind(value)
            .fetch_one(&self.pool)
            .await?;
        Ok(exists)
    }
}

impl CredentialStore for PgCredentialStore {
    async fn find_by_login_identifier(&self, identifier: &str) -> AuthResult<Option<User>> {
        self.fetch_user("email = $1 OR phone_number = $1", identifier)
            .await
    }

    async fn find_by_id(&self, user_id: &UserId) -> AuthResult<Option<User>> {
        let sql = format!("SELECT {USER_COLUMNS} FROM users WHERE user_id = $1");
        let row = sqlx::query_as::<_, UserRow>(&sql)
            .bind(user_id.as_uuid())
            .fetch_optional(&self.pool)
            .await?;

        row.map(UserRow::into_user).transpose()
    }

    async fn exists_by_email(&self, email: &Email) -> AuthResult<bool> {
        self.exists("email = $1", email.as_str()).await
    }

    async fn exists_by_user_name(&self, user_name: &UserName) -> AuthResult<bool> {
        self.exists("user_name_canonical = $1", user_name.canonical())
            .await
    }

    async fn exists_by_phone_number(&self, phone_number: &PhoneNumber) -> AuthResult<bool> {
        self.exists("phone_number = $1", phone_number.as_str()).await
    }

    async fn save(&self, user: &User) -> AuthResult<()> {
        sqlx::query(
            r#"
            INSERT INTO users (
                user_id,
                first_name,
                last_name,
                user_name,
                user_name_canonical,
                email,
                phone_number,
                password_hash,
                user_role,
                created_at,
                updated_at
            ) VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11)
            "#,
        )
        .bind(user.user_id.as_uuid())
        .bind(user.first_name.as_str())
        .bind(user.last_name.as_str())
        .bind(user.user_name.original())
        .bind(user.user_name.canonical())
        .bind(user.email.as_ref().map(Email::as_str))
        .bind(user.phone_number.as_str())
        .bind(user.password.as_phc_string())
        .bind(user.role.code())
        .bind(user.created_at)
        .bind(user.updated_at)
        .execute(&self.pool)
        .await
        .map_err(map_unique_violation)?;

        Ok(())
    }

    async fn update_role(
        &self,
        user_id: &UserId,
        role: UserRole,
        updated_at: DateTime<Utc>,
    ) -> AuthResult<bool> {
        let updated = sqlx::query(
            "UPDATE users SET user_role = $2, updated_at = $3 WHERE user_id = $1",
        )
        .bind(user_id.as_uuid())
        .bind(role.code())
        .bind(updated_at)
        .execute(&self.pool)
        .await?
        .rows_affected();

        Ok(updated > 0)
    }
}

impl ResourceOwnership for PgCredentialStore {
    async fn owner_of(&self, kind: ResourceKind, id: &str) -> AuthResult<Option<ResourceOwner>> {
        let ResourceKind::Patient = kind;
        let Ok(patient_id) = id.parse::<PatientId>() else {
            return Ok(None);
        };

        let row: Option<(Uuid, String)> = sqlx::query_as(
            r#"
            SELECT u.user_id, COALESCE(u.email, u.phone_number)
            FROM patients p
            JOIN users u ON u.user_id = p.user_id
            WHERE p.patient_id = $1
            "#,
        )
        .bind(patient_id.as_uuid())
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(|(user_id, login_identifier)| ResourceOwner {
            user_id: UserId::from_uuid(user_id),
            login_identifier,
        }))
    }
}

/// Unique indexes are the final word on duplicates; name the field that clashed.
fn map_unique_violation(err: sqlx::Error) -> AuthError {
    if let sqlx::Error::Database(db_err) = &err {
        if db_err.is_unique_violation() {
            let message = match db_err.constraint() {
                Some("users_email_key") => EMAIL_TAKEN,
                Some("users_phone_number_key") => PHONE_TAKEN,
                Some("users_user_name_canonical_key") => USER_NAME_TAKEN,
                _ => "Identity is already registered",
            };
            return AuthError::DuplicateIdentity(message.to_string());
        }
    }
    AuthError::Database(err)
}

#[derive(sqlx::FromRow)]
struct UserRow {
    user_id: Uuid,
    first_name: String,
    last_name: String,
    user_name: String,
    email: Option<String>,
    phone_number: String,
    password_hash: String,
    user_role: String,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl UserRow {
    fn into_user(self) -> AuthResult<User> {
        let role = UserRole::from_code(&self.user_role)
            .map_err(|e| AuthError::Internal(format!("Invalid stored role: {e}")))?;
        let password = UserPassword::from_db(self.password_hash)
            .map_err(|e| AuthError::Internal(e.to_string()))?;

        Ok(User {
            user_id: UserId::from_uuid(self.user_id),
            first_name: PersonName::from_db(self.first_name),
            last_name: PersonName::from_db(self.last_name),
            user_name: UserName::from_db(self.user_name),
            email: self.email.map(Email::from_db),
            phone_number: PhoneNumber::from_db(self.phone_number),
            password,
            role,
            created_at: self.created_at,
            updated_at: self.updated_at,
        })
    }
}
