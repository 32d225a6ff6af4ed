//! Assessment lifecycle: creation, token resolution, the respondent-facing
//! form view, and the admin listing. Every token access path goes through
//! `resolve_access`, which is also where lazy expiry happens.

use jiff::{SignedDuration, Timestamp};
use tracing::info;
use uuid::Uuid;

use riskform_core::models::{
    Assessment, AssessmentDraft, AssessmentStatus, Snapshot,
};
use riskform_scoring::build_snapshot;
use riskform_storage::assessments::AssessmentFilter;
use riskform_storage::Store;

use crate::config::ServiceConfig;
use crate::error::ServiceError;
use crate::token;

#[derive(Debug, Clone)]
pub struct CreateAssessmentRequest {
    pub respondent_id: Uuid,
    pub type_ids: Vec<Uuid>,
    /// Overrides the configured default when set.
    pub expiry_days: Option<i64>,
}

/// Creation result. `token` and `url` exist only here; the store keeps just
/// the hash.
#[derive(Debug, Clone)]
pub struct CreatedAssessment {
    pub assessment: Assessment,
    pub token: String,
    pub url: String,
}

/// Outcome of presenting a token.
#[derive(Debug, Clone)]
pub enum AccessState {
    Valid(Assessment),
    Expired,
    AlreadyCompleted,
    NotFound,
}

/// What a respondent sees when opening their link.
#[derive(Debug, Clone)]
pub struct FormView {
    pub assessment_id: Uuid,
    pub respondent_name: String,
    pub expires_at: Timestamp,
    pub snapshot: Snapshot,
    pub draft: Option<AssessmentDraft>,
}

#[derive(Debug, Clone)]
pub enum FormAccess {
    Available(Box<FormView>),
    Expired,
    AlreadyCompleted,
    NotFound,
}

pub fn create_assessment(
    store: &Store,
    config: &ServiceConfig,
    request: &CreateAssessmentRequest,
    now: Timestamp,
) -> Result<CreatedAssessment, ServiceError> {
    if store.get_respondent(request.respondent_id)?.is_none() {
        return Err(ServiceError::RespondentNotFound(request.respondent_id));
    }

    let live = store.load_live_config(&request.type_ids)?;
    let snapshot = build_snapshot(
        &request.type_ids,
        &live.types,
        &live.groups,
        &live.questions,
        &live.options,
    )?;

    let expiry_days = request.expiry_days.unwrap_or(config.default_expiry_days);
    let pair = token::generate();
    let assessment = Assessment {
        id: Uuid::new_v4(),
        respondent_id: request.respondent_id,
        token_hash: pair.token_hash,
        selected_type_ids: request.type_ids.clone(),
        questions_snapshot: snapshot,
        expires_at: now + SignedDuration::from_hours(24 * expiry_days),
        status: AssessmentStatus::Pending,
        completed_at: None,
        created_at: now,
    };
    store.insert_assessment(&assessment)?;

    info!(
        assessment_id = %assessment.id,
        respondent_id = %request.respondent_id,
        types = request.type_ids.len(),
        questions = assessment.questions_snapshot.total_questions(),
        "assessment created"
    );
    let url = config.assessment_url(&pair.token);
    Ok(CreatedAssessment {
        assessment,
        token: pair.token,
        url,
    })
}

/// Resolve a raw token to its assessment. A pending assessment past its
/// deadline is flipped to EXPIRED here, on first touch, before the caller
/// sees it.
pub fn resolve_access(
    store: &Store,
    raw_token: &str,
    now: Timestamp,
) -> Result<AccessState, ServiceError> {
    let token_hash = token::hash_token(raw_token);
    let Some(assessment) = store.get_assessment_by_token_hash(&token_hash)? else {
        return Ok(AccessState::NotFound);
    };

    match assessment.status {
        AssessmentStatus::Completed => Ok(AccessState::AlreadyCompleted),
        AssessmentStatus::Expired => Ok(AccessState::Expired),
        AssessmentStatus::Pending if assessment.expires_at <= now => {
            store.mark_expired_if_pending(assessment.id)?;
            Ok(AccessState::Expired)
        }
        AssessmentStatus::Pending => Ok(AccessState::Valid(assessment)),
    }
}

/// Build the respondent-facing form for a token, with any saved draft.
pub fn load_form(
    store: &Store,
    raw_token: &str,
    now: Timestamp,
) -> Result<FormAccess, ServiceError> {
    let assessment = match resolve_access(store, raw_token, now)? {
        AccessState::Valid(assessment) => assessment,
        AccessState::Expired => return Ok(FormAccess::Expired),
        AccessState::AlreadyCompleted => return Ok(FormAccess::AlreadyCompleted),
        AccessState::NotFound => return Ok(FormAccess::NotFound),
    };

    let respondent = store
        .get_respondent(assessment.respondent_id)?
        .ok_or(ServiceError::RespondentNotFound(assessment.respondent_id))?;
    let draft = store.load_draft(assessment.id)?;

    Ok(FormAccess::Available(Box::new(FormView {
        assessment_id: assessment.id,
        respondent_name: respondent.name,
        expires_at: assessment.expires_at,
        snapshot: assessment.questions_snapshot,
        draft,
    })))
}

/// Admin listing. Overdue pending rows are swept first so the filter sees
/// current statuses.
pub fn list_assessments(
    store: &Store,
    filter: &AssessmentFilter,
    now: Timestamp,
) -> Result<(Vec<Assessment>, i64), ServiceError> {
    store.sweep_expired(now)?;
    let items = store.list_assessments(filter)?;
    let total = store.count_assessments(filter)?;
    Ok((items, total))
}
