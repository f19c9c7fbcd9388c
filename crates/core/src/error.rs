//! Workflow error taxonomy.
//!
//! Retry semantics: nothing in the core retries automatically. `Storage` is
//! the only transient variant (caller may retry with backoff); a
//! `ConcurrencyConflict` requires the caller to re-fetch and resubmit; all
//! other variants are final.

use thiserror::Error;

use crate::storage::StorageError;

/// Errors surfaced by the order, product, and customer workflows.
#[derive(Debug, Error)]
pub enum WorkflowError {
    /// Missing or malformed input. Returned to the caller for correction.
    #[error("validation failed: {0}")]
    Validation(String),

    /// Quantity was zero or negative.
    #[error("quantity must be a positive integer")]
    InvalidQuantity,

    /// The referenced product row does not exist.
    #[error("product not found")]
    ProductNotFound,

    /// No customer record matches the actor or the requested reference.
    #[error("customer not found")]
    CustomerNotFound,

    /// The targeted record does not exist.
    #[error("record not found")]
    NotFound,

    /// The access policy denied the operation. No partial effect.
    #[error("not authorized to perform this operation")]
    Unauthorized,

    /// The supplied version tag is stale; re-fetch and resubmit.
    #[error("the record was modified by another request")]
    ConcurrencyConflict,

    /// The underlying store is unreachable. Safe to retry; nothing was
    /// committed.
    #[error("storage unavailable: {0}")]
    Storage(StorageError),
}

impl From<StorageError> for WorkflowError {
    fn from(err: StorageError) -> Self {
        match err {
            StorageError::NotFound => Self::NotFound,
            StorageError::Conflict => Self::ConcurrencyConflict,
            err @ (StorageError::Unavailable(_) | StorageError::Corrupt(_)) => Self::Storage(err),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_storage_conflict_maps_to_concurrency_conflict() {
        let err = WorkflowError::from(StorageError::Conflict);
        assert!(matches!(err, WorkflowError::ConcurrencyConflict));
    }

    #[test]
    fn test_storage_not_found_maps_to_not_found() {
        let err = WorkflowError::from(StorageError::NotFound);
        assert!(matches!(err, WorkflowError::NotFound));
    }

    #[test]
    fn test_unavailable_stays_transient() {
        let err = WorkflowError::from(StorageError::Unavailable("down".into()));
        assert!(matches!(err, WorkflowError::Storage(_)));
    }
}
