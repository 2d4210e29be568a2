//! Allocation engine error types.

use resource_store::StoreError;
use thiserror::Error;

/// Errors that can occur in the allocation engine.
#[derive(Debug, Error)]
pub enum AllocationError {
    /// Entity not found, or not of the role the operation requires.
    #[error("{entity_type} not found: {id}")]
    NotFound {
        entity_type: &'static str,
        id: String,
    },

    /// Underlying store failure.
    #[error(transparent)]
    Store(#[from] StoreError),
}

impl AllocationError {
    /// Creates a not found error.
    pub fn not_found(entity_type: &'static str, id: impl Into<String>) -> Self {
        Self::NotFound {
            entity_type,
            id: id.into(),
        }
    }
}

/// Result type for allocation operations.
pub type AllocationResult<T> = Result<T, AllocationError>;
