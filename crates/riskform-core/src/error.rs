use thiserror::Error;

#[derive(Debug, Error)]
pub enum CoreError {
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("invalid uuid: {0}")]
    InvalidUuid(#[from] uuid::Error),

    #[error("invalid option type: {0}")]
    InvalidOptionType(String),

    #[error("invalid assessment status: {0}")]
    InvalidStatus(String),

    #[error("invalid risk rating: {0}")]
    InvalidRating(String),

    #[error("invalid respondent kind: {0}")]
    InvalidRespondentKind(String),

    #[error("invalid timestamp: {0}")]
    InvalidTimestamp(String),
}
