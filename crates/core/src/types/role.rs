//! Actor roles and the authenticated actor passed into every workflow call.

use serde::{Deserialize, Serialize};

/// Role carried in the session claims.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Role {
    /// Full access to every record and operation.
    Admin,
    /// Access restricted to the actor's own records.
    Customer,
}

impl Role {
    /// Whether this role grants unrestricted access.
    #[must_use]
    pub const fn is_admin(self) -> bool {
        matches!(self, Self::Admin)
    }
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Admin => write!(f, "Admin"),
            Self::Customer => write!(f, "Customer"),
        }
    }
}

impl std::str::FromStr for Role {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Admin" => Ok(Self::Admin),
            "Customer" => Ok(Self::Customer),
            _ => Err(format!("invalid role: {s}")),
        }
    }
}

/// An authenticated caller.
///
/// Built by the HTTP layer from session claims; unauthenticated requests are
/// rejected before any workflow is reached.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Actor {
    /// Username from the session.
    pub username: String,
    /// Role from the session.
    pub role: Role,
}

impl Actor {
    /// Create an actor.
    #[must_use]
    pub fn new(username: impl Into<String>, role: Role) -> Self {
        Self {
            username: username.into(),
            role,
        }
    }

    /// Whether the actor holds the admin role.
    #[must_use]
    pub const fn is_admin(&self) -> bool {
        self.role.is_admin()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_role_round_trip() {
        assert_eq!("Admin".parse::<Role>(), Ok(Role::Admin));
        assert_eq!("Customer".parse::<Role>(), Ok(Role::Customer));
        assert_eq!(Role::Admin.to_string(), "Admin");
        assert!("admin".parse::<Role>().is_err());
    }

    #[test]
    fn test_actor_is_admin() {
        assert!(Actor::new("root", Role::Admin).is_admin());
        assert!(!Actor::new("alice", Role::Customer).is_admin());
    }
}
