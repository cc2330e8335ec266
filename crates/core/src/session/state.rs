//! Session state

use crate::users::{PublicProfile, UserUuid};

/// Authentication state machine.
///
/// `Bootstrapping` only exists until [`restore`](crate::session::SessionService::restore)
/// has run once.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum SessionState {
    #[default]
    Bootstrapping,
    Anonymous,
    Authenticated {
        token: UserUuid,
        profile: PublicProfile,
    },
}

impl SessionState {
    #[must_use]
    pub fn session(&self) -> Session {
        match self {
            Self::Bootstrapping => Session {
                is_loading: true,
                user_token: None,
                user_data: None,
            },
            Self::Anonymous => Session::default(),
            Self::Authenticated { token, profile } => Session {
                is_loading: false,
                user_token: Some(*token),
                user_data: Some(profile.clone()),
            },
        }
    }
}

/// Snapshot of the session as observed by consumers.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Session {
    pub is_loading: bool,
    pub user_token: Option<UserUuid>,
    pub user_data: Option<PublicProfile>,
}

impl Session {
    #[must_use]
    pub fn is_authenticated(&self) -> bool {
        self.user_token.is_some()
    }

    /// Display name of the signed in user.
    #[must_use]
    pub fn user_name(&self) -> Option<&str> {
        self.user_data.as_ref().map(|profile| profile.name.as_str())
    }
}

/// What `update_profile` does when the profile id differs from the token.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ProfileIdPolicy {
    /// Fail with [`SessionError::ProfileMismatch`](crate::session::SessionError::ProfileMismatch).
    #[default]
    Reject,
    /// Persist the profile anyway and keep the current token.
    Allow,
}

/// Session store configuration.
#[derive(Debug, Clone, Copy, Default)]
pub struct SessionConfig {
    pub profile_id_policy: ProfileIdPolicy,
}
