use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::questionnaire::OptionType;

/// One submitted answer, as it arrives from the form. `attachment_ids` are
/// opaque references into the attachment store; the core never inspects file
/// content.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnswerInput {
    pub question_id: Uuid,
    pub selected_option: OptionType,
    #[serde(default)]
    pub comment: Option<String>,
    #[serde(default)]
    pub attachment_ids: Vec<String>,
}

/// Contact details of the person filling in the form, captured alongside the
/// submission.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SubmissionContact {
    pub last_name: String,
    pub first_name: String,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub position: Option<String>,
}

/// Full submission payload for one assessment.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SubmissionInput {
    pub answers: Vec<AnswerInput>,
    #[serde(default)]
    pub contact: Option<SubmissionContact>,
}

/// Persisted answer. `question_id` references the snapshot question, not the
/// live table; `score_awarded` is derived from the snapshot at submission
/// time and never recomputed.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Answer {
    pub id: Uuid,
    pub assessment_id: Uuid,
    pub question_id: Uuid,
    pub selected_option: OptionType,
    pub comment: Option<String>,
    pub score_awarded: i64,
    pub attachment_ids: Vec<String>,
    pub created_at: jiff::Timestamp,
}
