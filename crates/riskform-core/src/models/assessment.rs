use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::snapshot::Snapshot;
use crate::error::CoreError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AssessmentStatus {
    Pending,
    Completed,
    Expired,
}

impl AssessmentStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            AssessmentStatus::Pending => "PENDING",
            AssessmentStatus::Completed => "COMPLETED",
            AssessmentStatus::Expired => "EXPIRED",
        }
    }

    pub fn parse(s: &str) -> Result<Self, CoreError> {
        match s {
            "PENDING" => Ok(AssessmentStatus::Pending),
            "COMPLETED" => Ok(AssessmentStatus::Completed),
            "EXPIRED" => Ok(AssessmentStatus::Expired),
            other => Err(CoreError::InvalidStatus(other.to_string())),
        }
    }

    /// COMPLETED and EXPIRED are terminal; no transition leaves them.
    pub fn is_terminal(&self) -> bool {
        !matches!(self, AssessmentStatus::Pending)
    }
}

/// One issued questionnaire instance. Only the SHA-256 hash of the access
/// token is ever stored; the plain token exists solely in the creation
/// response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Assessment {
    pub id: Uuid,
    pub respondent_id: Uuid,
    pub token_hash: String,
    pub selected_type_ids: Vec<Uuid>,
    pub questions_snapshot: Snapshot,
    pub expires_at: jiff::Timestamp,
    pub status: AssessmentStatus,
    pub completed_at: Option<jiff::Timestamp>,
    pub created_at: jiff::Timestamp,
}
