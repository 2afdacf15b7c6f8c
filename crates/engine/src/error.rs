// SPDX-License-Identifier: MIT

//! Error types for the enrollment services

use rollcall_storage::StorageError;
use thiserror::Error;

/// Request-scoped failures surfaced to the transport layer.
///
/// Nothing here is retried internally. A `Conflict` must be re-submitted
/// by the caller, since the capacity decision may differ on retry.
#[derive(Debug, Error)]
pub enum EngineError {
    #[error("class does not exist")]
    ClassNotFound,
    #[error("enrollment has been frozen")]
    EnrollmentFrozen,
    #[error("waiting list is full")]
    WaitlistFull,
    #[error("student cannot be in more than {0} waiting lists")]
    TooManyWaitlists(i64),
    #[error("student is not enrolled in this class")]
    NotEnrolled,
    #[error("student is not in the waiting list")]
    NotWaitlisted,
    #[error("profile does not exist: {0}")]
    ProfileNotFound(String),
    #[error("conflict: {0}")]
    Conflict(String),
    #[error("validation error: {0}")]
    Validation(String),
    #[error("storage error: {0}")]
    Storage(StorageError),
}

/// Only an integrity violation becomes a `Conflict`; any other storage
/// failure keeps its own face instead of masquerading as contention.
impl From<StorageError> for EngineError {
    fn from(e: StorageError) -> Self {
        match e {
            StorageError::Integrity(message) => EngineError::Conflict(message),
            other => EngineError::Storage(other),
        }
    }
}
