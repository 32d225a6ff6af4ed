use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::answer::AnswerInput;

/// Partially filled form, saved so a respondent can resume later. Drafts only
/// exist while the assessment is PENDING and are swept once it expires.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AssessmentDraft {
    pub assessment_id: Uuid,
    pub answers: Vec<AnswerInput>,
    #[serde(default)]
    pub current_type_index: i64,
    #[serde(default)]
    pub current_group_index: i64,
    pub last_saved_at: jiff::Timestamp,
}
