//! User Records

use std::fmt::{Debug, Formatter, Result as FmtResult};

use jiff::Timestamp;
use serde::{Deserialize, Serialize};
use zeroize::Zeroizing;

use crate::ids::TypedUuid;

/// User UUID
pub type UserUuid = TypedUuid<UserRecord>;

/// Plaintext account password.
///
/// Compared as-is on sign-in. Never serialized, never printed.
#[derive(Clone, PartialEq, Eq)]
pub struct Password(Zeroizing<String>);

impl Password {
    /// Wrap a password.
    pub fn new(value: impl Into<String>) -> Self {
        Self(Zeroizing::new(value.into()))
    }

    /// Plaintext comparison against a submitted password.
    #[must_use]
    pub fn matches(&self, candidate: &str) -> bool {
        self.0.as_str() == candidate
    }

    /// Whether the password is blank.
    #[must_use]
    pub fn is_blank(&self) -> bool {
        self.0.trim().is_empty()
    }
}

impl Debug for Password {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        f.write_str("Password([redacted])")
    }
}

impl From<&str> for Password {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

impl From<String> for Password {
    fn from(value: String) -> Self {
        Self::new(value)
    }
}

/// Authoritative user record, credentials included.
#[derive(Debug, Clone)]
pub struct UserRecord {
    pub uuid: UserUuid,
    pub name: String,
    pub email: String,
    pub password: Password,
    pub created_at: Timestamp,
}

/// Credential-free projection of a user, safe to persist and display.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PublicProfile {
    pub id: UserUuid,
    pub name: String,
    pub email: String,
}

impl From<&UserRecord> for PublicProfile {
    fn from(record: &UserRecord) -> Self {
        Self {
            id: record.uuid,
            name: record.name.clone(),
            email: record.email.clone(),
        }
    }
}

/// New User Data
#[derive(Debug, Clone)]
pub struct NewUser {
    pub name: String,
    pub email: String,
    pub password: Password,
}

impl NewUser {
    /// Build sign-up data.
    pub fn new(
        name: impl Into<String>,
        email: impl Into<String>,
        password: impl Into<Password>,
    ) -> Self {
        Self {
            name: name.into(),
            email: email.into(),
            password: password.into(),
        }
    }

    pub(crate) fn has_blank_fields(&self) -> bool {
        self.name.trim().is_empty() || self.email.trim().is_empty() || self.password.is_blank()
    }
}

#[cfg(test)]
mod tests {
    use testresult::TestResult;
    use uuid::Uuid;

    use super::*;

    fn record() -> UserRecord {
        UserRecord {
            uuid: UserUuid::from_uuid(Uuid::from_u128(7)),
            name: "Alice".to_string(),
            email: "alice@x.com".to_string(),
            password: Password::new("pw1"),
            created_at: Timestamp::now(),
        }
    }

    #[test]
    fn profile_json_has_only_public_fields() -> TestResult {
        let profile = PublicProfile::from(&record());
        let value = serde_json::to_value(&profile)?;
        let object = value.as_object().ok_or("profile should be an object")?;

        let mut keys: Vec<&str> = object.keys().map(String::as_str).collect();
        keys.sort_unstable();

        assert_eq!(keys, ["email", "id", "name"]);

        Ok(())
    }

    #[test]
    fn password_debug_is_redacted() {
        let rendered = format!("{:?}", record());

        assert!(!rendered.contains("pw1"), "password leaked: {rendered}");
    }

    #[test]
    fn password_comparison_is_exact() {
        let password = Password::new("Secret");

        assert!(password.matches("Secret"));
        assert!(!password.matches("secret"));
        assert!(!password.matches("Secret "));
    }
}
