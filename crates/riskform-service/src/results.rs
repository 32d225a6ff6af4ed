//! Results assembly: rebuild the hierarchical score view from persisted
//! rows, resolving names and structure from the frozen snapshot.

use std::collections::HashMap;

use uuid::Uuid;

use riskform_core::models::{
    AnswerBreakdown, AssessmentResults, AssessmentScore, GroupScore, OverallScore, RiskRating,
    ScoreLevel, Snapshot, TypeScore,
};
use riskform_storage::Store;

use crate::error::ServiceError;

pub fn assessment_results(
    store: &Store,
    assessment_id: Uuid,
    include_breakdown: bool,
) -> Result<AssessmentResults, ServiceError> {
    let assessment = store.get_assessment(assessment_id)?;
    let respondent = store
        .get_respondent(assessment.respondent_id)?
        .ok_or(ServiceError::RespondentNotFound(assessment.respondent_id))?;
    let rows = store.fetch_scores(assessment_id)?;
    let contact = store.fetch_contact(assessment_id)?;

    let (type_scores, overall_score) = assemble(&assessment.questions_snapshot, &rows);

    let answer_breakdown = if include_breakdown {
        Some(breakdown(store, assessment_id, &assessment.questions_snapshot)?)
    } else {
        None
    };

    Ok(AssessmentResults {
        assessment_id,
        respondent_id: assessment.respondent_id,
        respondent_name: respondent.name,
        status: assessment.status,
        completed_at: assessment.completed_at,
        contact,
        type_scores,
        overall_score,
        answer_breakdown,
    })
}

/// Rebuild the tree in snapshot order from the flat score rows. Rows are
/// keyed by their level; anything the rows don't cover (an assessment that
/// was never submitted) comes back zero-valued and HIGH.
fn assemble(snapshot: &Snapshot, rows: &[AssessmentScore]) -> (Vec<TypeScore>, OverallScore) {
    let mut by_level: HashMap<(Option<Uuid>, Option<Uuid>), &AssessmentScore> = HashMap::new();
    for row in rows {
        by_level.insert((row.level.type_id(), row.level.group_id()), row);
    }

    let mut type_scores = Vec::with_capacity(snapshot.types.len());
    for stype in &snapshot.types {
        let groups: Vec<GroupScore> = stype
            .groups
            .iter()
            .map(|group| {
                let row = by_level.get(&(Some(stype.id), Some(group.id)));
                GroupScore {
                    group_id: group.id,
                    group_name: group.name.clone(),
                    raw_score: row.map_or(0, |r| r.raw_score),
                    max_score: row.map_or(0, |r| r.max_score),
                    percentage: row.map_or(0.0, |r| r.percentage),
                    risk_rating: row.map_or(RiskRating::High, |r| r.risk_rating),
                    weight: group.weight,
                }
            })
            .collect();

        let row = by_level.get(&(Some(stype.id), None));
        type_scores.push(TypeScore {
            type_id: stype.id,
            type_name: stype.name.clone(),
            raw_score: row.map_or(0, |r| r.raw_score),
            max_score: row.map_or(0, |r| r.max_score),
            percentage: row.map_or(0.0, |r| r.percentage),
            risk_rating: row.map_or(RiskRating::High, |r| r.risk_rating),
            weight: stype.weight,
            groups,
        });
    }

    let overall_row = rows
        .iter()
        .find(|r| matches!(r.level, ScoreLevel::Overall));
    let overall_score = match overall_row {
        Some(row) => OverallScore {
            raw_score: row.raw_score,
            max_score: row.max_score,
            percentage: row.percentage,
            risk_rating: row.risk_rating,
        },
        None => OverallScore {
            raw_score: 0,
            max_score: 0,
            percentage: 0.0,
            risk_rating: RiskRating::High,
        },
    };

    (type_scores, overall_score)
}

fn breakdown(
    store: &Store,
    assessment_id: Uuid,
    snapshot: &Snapshot,
) -> Result<Vec<AnswerBreakdown>, ServiceError> {
    let answers = store.fetch_answers(assessment_id)?;
    let mut by_question: HashMap<Uuid, _> = HashMap::new();
    for answer in answers {
        by_question.insert(answer.question_id, answer);
    }

    // Snapshot order, so the breakdown reads like the form did.
    let mut out = Vec::new();
    for (stype, group, question) in snapshot.questions() {
        let Some(answer) = by_question.get(&question.id) else {
            continue;
        };
        out.push(AnswerBreakdown {
            question_id: question.id,
            question_text: question.text.clone(),
            type_id: stype.id,
            type_name: stype.name.clone(),
            group_id: group.id,
            group_name: group.name.clone(),
            selected_option: answer.selected_option,
            comment: answer.comment.clone(),
            score_awarded: answer.score_awarded,
            max_score: question.max_score(),
            attachment_count: answer.attachment_ids.len(),
        });
    }
    Ok(out)
}
