//! Session service.

use std::sync::Arc;

use async_trait::async_trait;
use mockall::automock;
use tokio::sync::RwLock;
use tracing::{debug, info, warn};

use crate::{
    session::{
        errors::SessionError,
        state::{ProfileIdPolicy, Session, SessionConfig, SessionState},
        storage::{KeyValueStore, PROFILE_KEY, StorageError, TOKEN_KEY},
    },
    users::{NewUser, PublicProfile, UserUuid, UsersRepository},
};

/// Session store backed by the authoritative user list and a durable
/// key-value channel.
#[derive(Clone)]
pub struct SessionStore {
    state: Arc<RwLock<SessionState>>,
    users: Arc<UsersRepository>,
    storage: Arc<dyn KeyValueStore>,
    config: SessionConfig,
}

impl std::fmt::Debug for SessionStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SessionStore")
            .field("state", &self.state)
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

impl SessionStore {
    #[must_use]
    pub fn new(users: Arc<UsersRepository>, storage: Arc<dyn KeyValueStore>) -> Self {
        Self::with_config(users, storage, SessionConfig::default())
    }

    #[must_use]
    pub fn with_config(
        users: Arc<UsersRepository>,
        storage: Arc<dyn KeyValueStore>,
        config: SessionConfig,
    ) -> Self {
        Self {
            state: Arc::new(RwLock::new(SessionState::Bootstrapping)),
            users,
            storage,
            config,
        }
    }

    async fn read_persisted(&self) -> Result<Option<(UserUuid, PublicProfile)>, RestoreError> {
        let token = self.storage.get(TOKEN_KEY).await?;
        let profile = self.storage.get(PROFILE_KEY).await?;

        match (token, profile) {
            (Some(token), Some(profile)) => {
                let token = token
                    .parse::<UserUuid>()
                    .map_err(RestoreError::MalformedToken)?;
                let profile = serde_json::from_str::<PublicProfile>(&profile)?;

                Ok(Some((token, profile)))
            }
            (None, None) => Ok(None),
            (Some(_), None) | (None, Some(_)) => Err(RestoreError::Incomplete),
        }
    }

    /// Write token then profile. A failed profile write clears both entries
    /// so a later restore never pairs the new token with an older profile.
    async fn persist(&self, token: UserUuid, profile: &PublicProfile) -> Result<(), SessionError> {
        let encoded = serde_json::to_string(profile).map_err(StorageError::from)?;

        self.storage.set(TOKEN_KEY, &token.to_string()).await?;

        if let Err(error) = self.storage.set(PROFILE_KEY, &encoded).await {
            if let Err(cleanup) = self.storage.remove_all(&[TOKEN_KEY, PROFILE_KEY]).await {
                warn!(user = %token, error = %cleanup, "failed to clear partially persisted session");
            }

            return Err(error.into());
        }

        Ok(())
    }

    async fn authenticate(&self, profile: PublicProfile) -> Result<Session, SessionError> {
        let token = profile.id;

        self.persist(token, &profile).await?;

        let mut state = self.state.write().await;
        *state = SessionState::Authenticated { token, profile };

        Ok(state.session())
    }
}

#[derive(Debug, thiserror::Error)]
enum RestoreError {
    #[error(transparent)]
    Storage(#[from] StorageError),

    #[error("persisted profile is not valid json")]
    Profile(#[from] serde_json::Error),

    #[error("persisted token is not a valid id")]
    MalformedToken(#[source] uuid::Error),

    #[error("only one of token and profile is persisted")]
    Incomplete,
}

#[async_trait]
impl SessionService for SessionStore {
    async fn session(&self) -> Session {
        self.state.read().await.session()
    }

    async fn restore(&self) -> Session {
        let restored = match self.read_persisted().await {
            Ok(Some((token, profile))) => {
                debug!(user = %token, "restored persisted session");

                SessionState::Authenticated { token, profile }
            }
            Ok(None) => SessionState::Anonymous,
            Err(error) => {
                warn!(%error, "failed to restore session, continuing signed out");

                SessionState::Anonymous
            }
        };

        let mut state = self.state.write().await;
        *state = restored;

        state.session()
    }

    async fn sign_in(&self, email: &str, password: &str) -> Result<Session, SessionError> {
        if email.trim().is_empty() || password.trim().is_empty() {
            return Err(SessionError::MissingFields);
        }

        let user = self
            .users
            .find_by_credentials(email, password)
            .await
            .ok_or(SessionError::InvalidCredentials)?;

        let session = self.authenticate(PublicProfile::from(&user)).await?;

        info!(user = %user.uuid, "signed in");

        Ok(session)
    }

    async fn sign_up(&self, user: NewUser) -> Result<Session, SessionError> {
        if user.has_blank_fields() {
            return Err(SessionError::MissingFields);
        }

        let pending = self
            .users
            .reserve_unique(user)
            .await
            .ok_or(SessionError::EmailAlreadyUsed)?;

        let session = self.authenticate(PublicProfile::from(pending.record())).await?;
        let record = pending.commit();

        info!(user = %record.uuid, "signed up");

        Ok(session)
    }

    async fn sign_out(&self) -> Result<Session, SessionError> {
        self.storage.remove_all(&[TOKEN_KEY, PROFILE_KEY]).await?;

        let mut state = self.state.write().await;

        if let SessionState::Authenticated { token, .. } = &*state {
            info!(user = %token, "signed out");
        }

        *state = SessionState::Anonymous;

        Ok(state.session())
    }

    async fn update_profile(&self, profile: PublicProfile) -> Result<Session, SessionError> {
        let token = match &*self.state.read().await {
            SessionState::Authenticated { token, .. } => *token,
            SessionState::Bootstrapping | SessionState::Anonymous => {
                return Err(SessionError::NotAuthenticated);
            }
        };

        if profile.name.trim().is_empty() || profile.email.trim().is_empty() {
            return Err(SessionError::MissingFields);
        }

        if profile.id != token {
            match self.config.profile_id_policy {
                ProfileIdPolicy::Reject => return Err(SessionError::ProfileMismatch),
                ProfileIdPolicy::Allow => {
                    warn!(user = %token, profile = %profile.id, "updating profile with a foreign id");
                }
            }
        }

        let encoded = serde_json::to_string(&profile).map_err(StorageError::from)?;
        self.storage.set(PROFILE_KEY, &encoded).await?;

        self.users.apply_profile(&profile).await;

        let mut state = self.state.write().await;
        *state = SessionState::Authenticated { token, profile };

        info!(user = %token, "profile updated");

        Ok(state.session())
    }
}

#[automock]
#[async_trait]
pub trait SessionService: Send + Sync {
    /// Current session snapshot.
    async fn session(&self) -> Session;

    /// Rebuild the session from durable storage. Never fails: anything
    /// unreadable leaves the user signed out.
    async fn restore(&self) -> Session;

    /// Sign in with an exact email and password match.
    ///
    /// # Errors
    ///
    /// Returns an error on blank input, unknown credentials, or when the
    /// session could not be persisted.
    async fn sign_in(&self, email: &str, password: &str) -> Result<Session, SessionError>;

    /// Create an account with an unused email and sign it in.
    ///
    /// # Errors
    ///
    /// Returns an error on blank input, an email that is already registered,
    /// or when the session could not be persisted.
    async fn sign_up(&self, user: NewUser) -> Result<Session, SessionError>;

    /// Forget the persisted session. Safe to call when already signed out.
    ///
    /// # Errors
    ///
    /// Returns an error when the persisted entries could not be removed.
    async fn sign_out(&self) -> Result<Session, SessionError>;

    /// Replace the signed in user's public profile.
    ///
    /// # Errors
    ///
    /// Returns an error when nobody is signed in, a field is blank, the id
    /// is refused by the configured [`ProfileIdPolicy`], or the profile could
    /// not be persisted.
    async fn update_profile(&self, profile: PublicProfile) -> Result<Session, SessionError>;
}
