//! Registration and login.
//!
//! Passwords are hashed with Argon2id and never stored or logged in the
//! clear. Login failures collapse to a single `InvalidCredentials` so the
//! response does not reveal whether the username exists.

pub mod error;

use argon2::{
    Argon2,
    password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString, rand_core::OsRng},
};
use sqlx::PgPool;
use tracing::{info, instrument, warn};

use cornershop_core::types::Role;

use crate::db::users::UserRepository;
use crate::models::User;

pub use error::AuthError;

/// Minimum accepted password length.
pub const MIN_PASSWORD_LENGTH: usize = 8;

/// Registration and login over the users table.
pub struct AuthService<'a> {
    pool: &'a PgPool,
}

impl<'a> AuthService<'a> {
    /// Create a service borrowing the given pool.
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// Register a new user with the given role.
    ///
    /// # Errors
    ///
    /// Returns `WeakPassword` when the password is too short,
    /// `UserAlreadyExists` on a username collision, or a repository error.
    #[instrument(skip(self, password), fields(username = %username))]
    pub async fn register(
        &self,
        username: &str,
        password: &str,
        role: Role,
    ) -> Result<User, AuthError> {
        if password.len() < MIN_PASSWORD_LENGTH {
            return Err(AuthError::WeakPassword(MIN_PASSWORD_LENGTH));
        }

        let salt = SaltString::generate(&mut OsRng);
        let password_hash = Argon2::default()
            .hash_password(password.as_bytes(), &salt)?
            .to_string();

        let repo = UserRepository::new(self.pool);
        let user = repo
            .create(username, &password_hash, role)
            .await
            .map_err(|err| match err {
                crate::db::RepositoryError::Conflict(_) => AuthError::UserAlreadyExists,
                other => AuthError::Repository(other),
            })?;

        info!(user_id = %user.id, "registered new user");
        Ok(user)
    }

    /// Verify credentials and return the user on success.
    ///
    /// # Errors
    ///
    /// Returns `InvalidCredentials` for an unknown username or a wrong
    /// password, or a repository error.
    #[instrument(skip(self, password), fields(username = %username))]
    pub async fn login(&self, username: &str, password: &str) -> Result<User, AuthError> {
        let repo = UserRepository::new(self.pool);
        let Some((user, stored_hash)) = repo.get_by_username(username).await? else {
            // Burn a verification anyway so timing does not leak existence
            let _ = Argon2::default().verify_password(
                password.as_bytes(),
                &PasswordHash::new(DUMMY_HASH).map_err(AuthError::from)?,
            );
            warn!("login attempt for unknown username");
            return Err(AuthError::InvalidCredentials);
        };

        let parsed = PasswordHash::new(&stored_hash)?;
        Argon2::default()
            .verify_password(password.as_bytes(), &parsed)
            .map_err(AuthError::from)?;

        info!(user_id = %user.id, "login succeeded");
        Ok(user)
    }
}

// A valid Argon2id hash of an unguessable throwaway value, used to equalize
// timing when the username does not exist.
const DUMMY_HASH: &str = "$argon2id$v=19$m=19456,t=2,p=1$MDEyMzQ1Njc4OWFiY2RlZg$T9h9cQOPzfMBBt9fyqaqYY4cmEtMHzVHaBhpUWPjWUM";

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn dummy_hash_parses() {
        assert!(PasswordHash::new(DUMMY_HASH).is_ok());
    }

    #[test]
    fn weak_password_error_reports_minimum() {
        let err = AuthError::WeakPassword(MIN_PASSWORD_LENGTH);
        assert!(err.to_string().contains('8'));
    }
}
