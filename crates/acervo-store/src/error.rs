//! Store error types.

use thiserror::Error;

/// Error produced by a store operation.
///
/// Handlers never inspect the detail: any `Err` is translated into the
/// route's 400/404/500 answer and the cause goes to the log. Constraint
/// violations (unique email aside, see `criar_cliente`) and foreign-key
/// failures all surface here as generic persistence failures.
#[derive(Debug, Error)]
pub enum StoreError {
    /// Any failure reported by the underlying database.
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),
}

/// Convenience alias for store operation results.
pub type StoreResult<T> = Result<T, StoreError>;
