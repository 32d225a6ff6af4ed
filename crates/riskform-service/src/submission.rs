//! The submission flow: validate against the snapshot, derive awarded
//! scores, compute the hierarchy, and persist everything in one shot.

use std::collections::HashMap;

use jiff::Timestamp;
use tracing::{info, warn};
use uuid::Uuid;

use riskform_core::models::{
    Answer, AssessmentScore, ScoreLevel, ScoreSet, SubmissionInput, SubmitOutcome,
};
use riskform_scoring::{score_snapshot, validate_answers};
use riskform_storage::{StorageError, Store};

use crate::assessment::{resolve_access, AccessState};
use crate::error::ServiceError;

pub fn submit(
    store: &Store,
    raw_token: &str,
    input: &SubmissionInput,
    now: Timestamp,
) -> Result<SubmitOutcome, ServiceError> {
    let assessment = match resolve_access(store, raw_token, now)? {
        AccessState::Valid(assessment) => assessment,
        AccessState::Expired => return Err(ServiceError::AssessmentExpired),
        AccessState::AlreadyCompleted => return Err(ServiceError::AlreadyCompleted),
        AccessState::NotFound => return Err(ServiceError::TokenNotFound),
    };
    let snapshot = &assessment.questions_snapshot;

    let issues = validate_answers(snapshot, &input.answers);
    if !issues.is_empty() {
        warn!(
            assessment_id = %assessment.id,
            issues = issues.len(),
            "submission rejected by validation"
        );
        return Err(ServiceError::Validation(issues));
    }

    // Validation guarantees every question_id resolves in the snapshot.
    let mut awarded: HashMap<Uuid, i64> = HashMap::new();
    let mut answers = Vec::with_capacity(input.answers.len());
    for answer in &input.answers {
        let score_awarded = snapshot
            .score_for(answer.question_id, answer.selected_option)
            .unwrap_or(0);
        awarded.insert(answer.question_id, score_awarded);
        answers.push(Answer {
            id: Uuid::new_v4(),
            assessment_id: assessment.id,
            question_id: answer.question_id,
            selected_option: answer.selected_option,
            comment: answer.comment.clone(),
            score_awarded,
            attachment_ids: answer.attachment_ids.clone(),
            created_at: now,
        });
    }

    let score_set = score_snapshot(snapshot, &awarded);
    let score_rows = score_rows(assessment.id, &score_set);

    match store.record_submission(
        assessment.id,
        &answers,
        &score_rows,
        input.contact.as_ref(),
        now,
    ) {
        Ok(()) => {}
        // Lost the race against a concurrent submit.
        Err(StorageError::NotPending(_)) => return Err(ServiceError::AlreadyCompleted),
        Err(e) => return Err(e.into()),
    }

    info!(
        assessment_id = %assessment.id,
        overall_pct = score_set.overall.percentage,
        overall_rating = score_set.overall.risk_rating.as_str(),
        "submission completed"
    );
    Ok(SubmitOutcome {
        assessment_id: assessment.id,
        types: score_set.types,
        overall: score_set.overall,
    })
}

/// Flatten a score set into persistable rows: one per group, one per type,
/// one overall.
fn score_rows(assessment_id: Uuid, score_set: &ScoreSet) -> Vec<AssessmentScore> {
    let mut rows = Vec::new();
    for type_score in &score_set.types {
        for group in &type_score.groups {
            rows.push(AssessmentScore {
                assessment_id,
                level: ScoreLevel::Group {
                    type_id: type_score.type_id,
                    group_id: group.group_id,
                },
                raw_score: group.raw_score,
                max_score: group.max_score,
                percentage: group.percentage,
                risk_rating: group.risk_rating,
            });
        }
        rows.push(AssessmentScore {
            assessment_id,
            level: ScoreLevel::Type {
                type_id: type_score.type_id,
            },
            raw_score: type_score.raw_score,
            max_score: type_score.max_score,
            percentage: type_score.percentage,
            risk_rating: type_score.risk_rating,
        });
    }
    rows.push(AssessmentScore {
        assessment_id,
        level: ScoreLevel::Overall,
        raw_score: score_set.overall.raw_score,
        max_score: score_set.overall.max_score,
        percentage: score_set.overall.percentage,
        risk_rating: score_set.overall.risk_rating,
    });
    rows
}
