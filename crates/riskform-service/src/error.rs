use thiserror::Error;
use uuid::Uuid;

use riskform_scoring::{SnapshotError, ValidationIssue};
use riskform_storage::StorageError;

#[derive(Debug, Error)]
pub enum ServiceError {
    #[error(transparent)]
    Storage(#[from] StorageError),

    #[error(transparent)]
    Snapshot(#[from] SnapshotError),

    #[error("respondent not found: {0}")]
    RespondentNotFound(Uuid),

    #[error("no assessment matches the presented token")]
    TokenNotFound,

    #[error("assessment has expired")]
    AssessmentExpired,

    /// Also returned when a concurrent submit wins the completion race.
    #[error("assessment is already completed")]
    AlreadyCompleted,

    #[error("submission failed validation with {} issue(s)", .0.len())]
    Validation(Vec<ValidationIssue>),
}
