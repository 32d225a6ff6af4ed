use thiserror::Error;
use uuid::Uuid;

use riskform_core::CoreError;

#[derive(Debug, Error)]
pub enum StorageError {
    #[error("sqlite error: {0}")]
    Sqlite(#[from] rusqlite::Error),

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error(transparent)]
    Core(#[from] CoreError),

    #[error("assessment not found: {0}")]
    AssessmentNotFound(Uuid),

    #[error("respondent not found: {0}")]
    RespondentNotFound(Uuid),

    /// The status guard found the assessment already out of PENDING; the
    /// enclosing transaction has been rolled back and nothing was written.
    #[error("assessment {0} is no longer pending")]
    NotPending(Uuid),
}
