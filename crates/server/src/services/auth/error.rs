//! Authentication error types.

use crate::db::RepositoryError;

/// Errors arising from registration and login.
#[derive(Debug, thiserror::Error)]
pub enum AuthError {
    /// Username or password did not match.
    #[error("invalid credentials")]
    InvalidCredentials,

    /// Registration attempted with a username already taken.
    #[error("username already exists")]
    UserAlreadyExists,

    /// Password failed the minimum strength check.
    #[error("password must be at least {0} characters")]
    WeakPassword(usize),

    /// Underlying repository failure.
    #[error("repository error: {0}")]
    Repository(#[from] RepositoryError),

    /// Password hashing failure.
    #[error("password hash error: {0}")]
    PasswordHash(String),
}

impl From<argon2::password_hash::Error> for AuthError {
    fn from(err: argon2::password_hash::Error) -> Self {
        match err {
            argon2::password_hash::Error::Password => Self::InvalidCredentials,
            other => Self::PasswordHash(other.to_string()),
        }
    }
}
