//! Shared error types for the services crate.

use thiserror::Error;

use storage::repository::StorageError;
use vocab_core::evaluator::EvaluateError;

/// Errors emitted by the study and repeat services.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum StudyError {
    #[error("session lock registry poisoned")]
    LockPoisoned,

    #[error(transparent)]
    Evaluate(#[from] EvaluateError),

    #[error(transparent)]
    Storage(#[from] StorageError),
}
