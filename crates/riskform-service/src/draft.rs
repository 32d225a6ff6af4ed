//! Draft save/load for in-progress assessments. Drafts are token-keyed and
//! only accepted while the assessment is still pending.

use jiff::Timestamp;
use tracing::debug;

use riskform_core::models::{AnswerInput, AssessmentDraft};
use riskform_storage::Store;

use crate::assessment::{resolve_access, AccessState};
use crate::error::ServiceError;

#[derive(Debug, Clone)]
pub struct DraftInput {
    pub answers: Vec<AnswerInput>,
    pub current_type_index: i64,
    pub current_group_index: i64,
}

/// Save (or overwrite) the draft for a pending assessment. Draft contents
/// are not validated; partial and even inconsistent answers are expected
/// here.
pub fn save_draft(
    store: &Store,
    raw_token: &str,
    input: DraftInput,
    now: Timestamp,
) -> Result<AssessmentDraft, ServiceError> {
    let assessment = match resolve_access(store, raw_token, now)? {
        AccessState::Valid(assessment) => assessment,
        AccessState::Expired => return Err(ServiceError::AssessmentExpired),
        AccessState::AlreadyCompleted => return Err(ServiceError::AlreadyCompleted),
        AccessState::NotFound => return Err(ServiceError::TokenNotFound),
    };

    let draft = AssessmentDraft {
        assessment_id: assessment.id,
        answers: input.answers,
        current_type_index: input.current_type_index,
        current_group_index: input.current_group_index,
        last_saved_at: now,
    };
    store.upsert_draft(&draft)?;
    debug!(
        assessment_id = %assessment.id,
        answers = draft.answers.len(),
        "draft saved"
    );
    Ok(draft)
}

/// Drop the draft for a pending assessment. Returns whether one existed.
pub fn discard_draft(
    store: &Store,
    raw_token: &str,
    now: Timestamp,
) -> Result<bool, ServiceError> {
    let assessment = match resolve_access(store, raw_token, now)? {
        AccessState::Valid(assessment) => assessment,
        AccessState::Expired => return Err(ServiceError::AssessmentExpired),
        AccessState::AlreadyCompleted => return Err(ServiceError::AlreadyCompleted),
        AccessState::NotFound => return Err(ServiceError::TokenNotFound),
    };
    Ok(store.delete_draft(assessment.id)?)
}
