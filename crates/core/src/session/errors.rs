//! Session store errors.

use thiserror::Error;

use crate::session::storage::StorageError;

#[derive(Debug, Error)]
pub enum SessionError {
    #[error("invalid email or password")]
    InvalidCredentials,

    #[error("email already in use")]
    EmailAlreadyUsed,

    #[error("all fields are required")]
    MissingFields,

    #[error("no user is signed in")]
    NotAuthenticated,

    #[error("profile does not belong to the signed in user")]
    ProfileMismatch,

    #[error("session storage error")]
    Storage(#[from] StorageError),
}
