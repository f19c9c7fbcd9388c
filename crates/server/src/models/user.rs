//! Auth user domain types and session claims.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use cornershop_core::types::{Actor, Role, UserId};

/// An authentication user (domain type).
///
/// Separate from the customer profile in the table store; linked by
/// username.
#[derive(Debug, Clone)]
pub struct User {
    /// Unique user ID.
    pub id: UserId,
    /// Login name, unique.
    pub username: String,
    /// Role granted at registration.
    pub role: Role,
    /// When the user was created.
    pub created_at: DateTime<Utc>,
}

/// Session claims for the logged-in user.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CurrentUser {
    /// Username claim.
    pub username: String,
    /// Role claim.
    pub role: Role,
}

impl CurrentUser {
    /// The workflow actor these claims represent.
    #[must_use]
    pub fn actor(&self) -> Actor {
        Actor::new(self.username.clone(), self.role)
    }
}

impl From<&User> for CurrentUser {
    fn from(user: &User) -> Self {
        Self {
            username: user.username.clone(),
            role: user.role,
        }
    }
}

/// Session storage keys.
pub mod session_keys {
    /// Key holding the [`CurrentUser`](super::CurrentUser) claims.
    pub const CURRENT_USER: &str = "current_user";
}
