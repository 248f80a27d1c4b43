//! In-Memory Credential Store
//!
//! Used when no database is configured and by the test suites. Uniqueness
//! is checked and the record inserted under one write lock, so concurrent
//! registrations cannot both win.

use std::collections::HashMap;
use std::sync::Arc;

use chrono::{DateTime, Utc};
use tokio::sync::RwLock;

use crate::application::register::{EMAIL_TAKEN, PHONE_TAKEN, USER_NAME_TAKEN};
use crate::domain::entity::user::User;
use crate::domain::repository::{
    CredentialStore, ResourceKind, ResourceOwner, ResourceOwnership,
};
use crate::domain::value_object::{Email, PatientId, PhoneNumber, UserId, UserName, UserRole};
use crate::error::{AuthError, AuthResult};

#[derive(Default)]
struct Tables {
    users: HashMap<UserId, User>,
    /// patient profile -> owning identity
    patients: HashMap<PatientId, UserId>,
}

#[derive(Clone, Default)]
pub struct MemoryCredentialStore {
    inner: Arc<RwLock<Tables>>,
}

impl MemoryCredentialStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Link a patient profile to an identity record
    pub async fn link_patient(&self, patient_id: PatientId, user_id: UserId) {
        self.inner.write().await.patients.insert(patient_id, user_id);
    }

    pub async fn len(&self) -> usize {
        self.inner.read().await.users.len()
    }
}

impl CredentialStore for MemoryCredentialStore {
    async fn find_by_login_identifier(&self, identifier: &str) -> AuthResult<Option<User>> {
        let tables = self.inner.read().await;
        Ok(tables
            .users
            .values()
            .find(|u| u.answers_to(identifier))
            .cloned())
    }

    async fn find_by_id(&self, user_id: &UserId) -> AuthResult<Option<User>> {
        Ok(self.inner.read().await.users.get(user_id).cloned())
    }

    async fn exists_by_email(&self, email: &Email) -> AuthResult<bool> {
        let tables = self.inner.read().await;
        Ok(tables.users.values().any(|u| u.email.as_ref() == Some(email)))
    }

    async fn exists_by_user_name(&self, user_name: &UserName) -> AuthResult<bool> {
        let tables = self.inner.read().await;
        Ok(tables
            .users
            .values()
            .any(|u| u.user_name.canonical() == user_name.canonical()))
    }

    async fn exists_by_phone_number(&self, phone_number: &PhoneNumber) -> AuthResult<bool> {
        let tables = self.inner.read().await;
        Ok(tables
            .users
            .values()
            .any(|u| &u.phone_number == phone_number))
    }

    async fn save(&self, user: &User) -> AuthResult<()> {
        let mut tables = self.inner.write().await;

        for existing in tables.users.values() {
            if user.email.is_some() && existing.email == user.email {
                return Err(AuthError::DuplicateIdentity(EMAIL_TAKEN.to_string()));
            }
            if existing.phone_number == user.phone_number {
                return Err(AuthError::DuplicateIdentity(PHONE_TAKEN.to_string()));
            }
            if existing.user_name.canonical() == user.user_name.canonical() {
                return Err(AuthError::DuplicateIdentity(USER_NAME_TAKEN.to_string()));
            }
        }

        tables.users.insert(user.user_id, user.clone());
        Ok(())
    }

    async fn update_role(
        &self,
        user_id: &UserId,
        role: UserRole,
        updated_at: DateTime<Utc>,
    ) -> AuthResult<bool> {
        let mut tables = self.inner.write().await;
        match tables.users.get_mut(user_id) {
            Some(user) => {
                user.set_role(role, updated_at);
                Ok(true)
            }
            None => Ok(false),
        }
    }
}

impl ResourceOwnership for MemoryCredentialStore {
    async fn owner_of(&self, kind: ResourceKind, id: &str) -> AuthResult<Option<ResourceOwner>> {
        let ResourceKind::Patient = kind;
        let Ok(patient_id) = id.parse::<PatientId>() else {
            return Ok(None);
        };

        let tables = self.inner.read().await;
        Ok(tables
            .patients
            .get(&patient_id)
            .and_then(|user_id| tables.users.get(user_id))
            .map(|user| ResourceOwner {
                user_id: user.user_id,
                login_identifier: user.login_identifier().to_string(),
            }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::entity::user::NewUser;
    use crate::domain::value_object::{PersonName, RawPassword, UserPassword};

    fn user(user_name: &str, email: Option<&str>, phone: &str) -> User {
        User::new(
            NewUser {
                first_name: PersonName::new("Test", "First name").unwrap(),
                last_name: PersonName::new("User", "Last name").unwrap(),
                user_name: UserName::new(user_name).unwrap(),
                email: email.map(|e| Email::new(e).unwrap()),
                phone_number: PhoneNumber::new(phone).unwrap(),
                role: UserRole::Patient,
            },
            UserPassword::from_raw(&RawPassword::new("pw123456".to_string()).unwrap(), None)
                .unwrap(),
            Utc::now(),
        )
    }

    #[tokio::test]
    async fn test_save_rejects_duplicates() {
        let store = MemoryCredentialStore::new();
        store.save(&user("alice", Some("a@x.com"), "555")).await.unwrap();

        let err = store
            .save(&user("alice2", Some("a@x.com"), "556"))
            .await
            .unwrap_err();
        assert!(matches!(err, AuthError::DuplicateIdentity(ref m) if m == EMAIL_TAKEN));

        let err = store.save(&user("alice3", None, "555")).await.unwrap_err();
        assert!(matches!(err, AuthError::DuplicateIdentity(ref m) if m == PHONE_TAKEN));

        let err = store.save(&user("ALICE", None, "557")).await.unwrap_err();
        assert!(matches!(err, AuthError::DuplicateIdentity(ref m) if m == USER_NAME_TAKEN));

        assert_eq!(store.len().await, 1);
    }

    #[tokio::test]
    async fn test_records_without_email_do_not_collide() {
        let store = MemoryCredentialStore::new();
        store.save(&user("bob", None, "111")).await.unwrap();
        store.save(&user("carol", None, "222")).await.unwrap();
        assert_eq!(store.len().await, 2);
    }

    #[tokio::test]
    async fn test_find_by_either_identifier() {
        let store = MemoryCredentialStore::new();
        let alice = user("alice", Some("a@x.com"), "555");
        store.save(&alice).await.unwrap();

        let by_email = store.find_by_login_identifier("a@x.com").await.unwrap();
        let by_phone = store.find_by_login_identifier("555").await.unwrap();
        assert_eq!(by_email.map(|u| u.user_id), Some(alice.user_id));
        assert_eq!(by_phone.map(|u| u.user_id), Some(alice.user_id));
        assert!(store.find_by_login_identifier("nobody@x.com").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_owner_of_patient() {
        let store = MemoryCredentialStore::new();
        let alice = user("alice", Some("a@x.com"), "555");
        store.save(&alice).await.unwrap();
        let patient_id = PatientId::new();
        store.link_patient(patient_id, alice.user_id).await;

        let owner = store
            .owner_of(ResourceKind::Patient, &patient_id.to_string())
            .await
            .unwrap()
            .unwrap();
        assert_eq!(owner.login_identifier, "a@x.com");

        assert!(store
            .owner_of(ResourceKind::Patient, "not-a-uuid")
            .await
            .unwrap()
            .is_none());
    }
}
