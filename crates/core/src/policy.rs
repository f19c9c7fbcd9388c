//! Role and ownership access policy.
//!
//! One gate, invoked uniformly by every workflow operation instead of
//! per-handler role checks. Pure functions of their inputs; no stored state.

use crate::error::WorkflowError;
use crate::types::Actor;

/// Allow admins unconditionally; allow others only on their own records.
///
/// # Errors
///
/// Returns `WorkflowError::Unauthorized` when a non-admin actor targets a
/// record owned by a different username.
pub fn authorize_owner(actor: &Actor, owner_username: &str) -> Result<(), WorkflowError> {
    if actor.is_admin() || actor.username == owner_username {
        Ok(())
    } else {
        Err(WorkflowError::Unauthorized)
    }
}

/// Allow only admins.
///
/// # Errors
///
/// Returns `WorkflowError::Unauthorized` for any non-admin actor.
pub fn require_admin(actor: &Actor) -> Result<(), WorkflowError> {
    if actor.is_admin() {
        Ok(())
    } else {
        Err(WorkflowError::Unauthorized)
    }
}
