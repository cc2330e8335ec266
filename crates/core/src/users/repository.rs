//! Users Repository

use std::sync::Arc;

use jiff::Timestamp;
use tokio::sync::{RwLock, RwLockWriteGuard};

use crate::{
    ids::{IdGenerator, TimeOrderedIds},
    users::records::{NewUser, PublicProfile, UserRecord, UserUuid},
};

/// Authoritative, in-memory user list.
///
/// Lives for the whole process; users are never removed.
#[derive(Debug)]
pub struct UsersRepository {
    users: RwLock<Vec<UserRecord>>,
    ids: Arc<dyn IdGenerator>,
}

impl Default for UsersRepository {
    fn default() -> Self {
        Self::new(Arc::new(TimeOrderedIds))
    }
}

impl UsersRepository {
    /// Empty repository drawing ids from `ids`.
    #[must_use]
    pub fn new(ids: Arc<dyn IdGenerator>) -> Self {
        Self {
            users: RwLock::new(Vec::new()),
            ids,
        }
    }

    /// Append users with fresh ids, keeping the given order.
    ///
    /// Email uniqueness is the caller's concern.
    pub async fn seed(&self, users: impl IntoIterator<Item = NewUser>) {
        let records: Vec<UserRecord> = users
            .into_iter()
            .map(|user| self.build_record(user))
            .collect();

        self.users.write().await.extend(records);
    }

    /// Exact, case-sensitive match on both email and password.
    pub async fn find_by_credentials(&self, email: &str, password: &str) -> Option<UserRecord> {
        self.users
            .read()
            .await
            .iter()
            .find(|user| user.email == email && user.password.matches(password))
            .cloned()
    }

    /// Whether any user already signed up with `email` (case-sensitive).
    pub async fn email_exists(&self, email: &str) -> bool {
        has_email(&self.users.read().await, email)
    }

    /// Look up a user by id.
    pub async fn get(&self, uuid: UserUuid) -> Option<UserRecord> {
        self.users
            .read()
            .await
            .iter()
            .find(|user| user.uuid == uuid)
            .cloned()
    }

    /// Insert a user with a fresh id. Does not check email uniqueness.
    pub async fn insert(&self, user: NewUser) -> UserRecord {
        let record = self.build_record(user);

        self.users.write().await.push(record.clone());

        record
    }

    /// Reserve a record for `user` unless the email is taken.
    ///
    /// The write lock is held until the returned [`PendingUser`] is committed
    /// or dropped; dropping it leaves the list untouched.
    pub(crate) async fn reserve_unique(&self, user: NewUser) -> Option<PendingUser<'_>> {
        let users = self.users.write().await;

        if has_email(&users, &user.email) {
            return None;
        }

        let record = self.build_record(user);

        Some(PendingUser { users, record })
    }

    fn build_record(&self, user: NewUser) -> UserRecord {
        UserRecord {
            uuid: UserUuid::from_uuid(self.ids.next_uuid()),
            name: user.name,
            email: user.email,
            password: user.password,
            created_at: Timestamp::now(),
        }
    }

    /// Merge `name` and `email` into the record with the profile's id.
    ///
    /// The password is left untouched. Returns whether a record matched.
    pub async fn apply_profile(&self, profile: &PublicProfile) -> bool {
        let mut users = self.users.write().await;

        let Some(record) = users.iter_mut().find(|user| user.uuid == profile.id) else {
            return false;
        };

        record.name.clone_from(&profile.name);
        record.email.clone_from(&profile.email);

        true
    }

    /// Number of users.
    pub async fn len(&self) -> usize {
        self.users.read().await.len()
    }

    /// Whether no user exists.
    pub async fn is_empty(&self) -> bool {
        self.users.read().await.is_empty()
    }
}

fn has_email(users: &[UserRecord], email: &str) -> bool {
    users.iter().any(|user| user.email == email)
}

/// A user record waiting for its session to be persisted.
#[derive(Debug)]
pub(crate) struct PendingUser<'a> {
    users: RwLockWriteGuard<'a, Vec<UserRecord>>,
    record: UserRecord,
}

impl PendingUser<'_> {
    pub(crate) fn record(&self) -> &UserRecord {
        &self.record
    }

    /// Append the record and release the lock.
    pub(crate) fn commit(mut self) -> UserRecord {
        self.users.push(self.record.clone());

        self.record
    }
}

#[cfg(test)]
mod tests {
    use testresult::TestResult;

    use crate::ids::SequentialIds;

    use super::*;

    fn repository() -> UsersRepository {
        UsersRepository::new(Arc::new(SequentialIds::new()))
    }

    #[tokio::test]
    async fn insert_assigns_fresh_ids() {
        let users = repository();

        let a = users.insert(NewUser::new("A", "a@x.com", "pw")).await;
        let b = users.insert(NewUser::new("B", "b@x.com", "pw")).await;

        assert_ne!(a.uuid, b.uuid);
        assert_eq!(users.len().await, 2);
    }

    #[tokio::test]
    async fn credentials_match_is_case_sensitive() {
        let users = repository();
        users
            .insert(NewUser::new("Alice", "alice@x.com", "pw1"))
            .await;

        assert!(users.find_by_credentials("alice@x.com", "pw1").await.is_some());
        assert!(users.find_by_credentials("Alice@x.com", "pw1").await.is_none());
        assert!(users.find_by_credentials("alice@x.com", "PW1").await.is_none());
    }

    #[tokio::test]
    async fn reserve_unique_rejects_taken_email() {
        let users = repository();
        users.insert(NewUser::new("A", "a@x.com", "pw")).await;

        let duplicate = users.reserve_unique(NewUser::new("B", "a@x.com", "pw")).await;

        assert!(duplicate.is_none());
        assert!(users.email_exists("a@x.com").await);
        assert!(!users.email_exists("A@x.com").await);
        assert_eq!(users.len().await, 1);
    }

    #[tokio::test]
    async fn dropped_reservation_leaves_list_untouched() -> TestResult {
        let users = repository();

        let pending = users
            .reserve_unique(NewUser::new("A", "a@x.com", "pw"))
            .await
            .ok_or("email should be free")?;
        drop(pending);

        assert!(users.is_empty().await);

        let record = users
            .reserve_unique(NewUser::new("A", "a@x.com", "pw"))
            .await
            .ok_or("email should still be free")?
            .commit();

        assert_eq!(users.get(record.uuid).await.map(|user| user.email), Some("a@x.com".to_string()));

        Ok(())
    }

    #[tokio::test]
    async fn seed_appends_in_order() {
        let users = repository();

        users
            .seed([
                NewUser::new("A", "a@x.com", "pw"),
                NewUser::new("B", "b@x.com", "pw"),
            ])
            .await;

        assert_eq!(users.len().await, 2);
        assert!(users.find_by_credentials("b@x.com", "pw").await.is_some());
    }

    #[tokio::test]
    async fn apply_profile_keeps_password() -> TestResult {
        let users = repository();
        let record = users.insert(NewUser::new("A", "a@x.com", "pw")).await;

        let matched = users
            .apply_profile(&PublicProfile {
                id: record.uuid,
                name: "Renamed".to_string(),
                email: "new@x.com".to_string(),
            })
            .await;

        assert!(matched);

        let stored = users.get(record.uuid).await.ok_or("user should exist")?;

        assert_eq!(stored.name, "Renamed");
        assert_eq!(stored.email, "new@x.com");
        assert!(stored.password.matches("pw"));

        Ok(())
    }

    #[tokio::test]
    async fn apply_profile_for_unknown_id_is_a_no_op() {
        let users = repository();

        let matched = users
            .apply_profile(&PublicProfile {
                id: UserUuid::from_uuid(uuid::Uuid::from_u128(99)),
                name: "Ghost".to_string(),
                email: "ghost@x.com".to_string(),
            })
            .await;

        assert!(!matched);
        assert!(users.is_empty().await);
    }
}
