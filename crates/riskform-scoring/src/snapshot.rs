use std::collections::HashMap;

use uuid::Uuid;

use riskform_core::models::{
    OptionPair, OptionSnapshot, OptionType, Question, QuestionGroup, QuestionOption,
    QuestionnaireType, Snapshot, SnapshotGroup, SnapshotQuestion, SnapshotType,
};

use crate::error::SnapshotError;

/// Materialize an immutable snapshot of the requested questionnaire types
/// from the live configuration.
///
/// Only active groups and questions are included; inactive descendants are
/// silently excluded so content can be retired without breaking historical
/// assessments. Groups and questions are ordered by `display_order` with a
/// stable sort, which fixes both the form presentation order and the
/// iteration order used during scoring.
pub fn build_snapshot(
    requested: &[Uuid],
    types: &[QuestionnaireType],
    groups: &[QuestionGroup],
    questions: &[Question],
    options: &[QuestionOption],
) -> Result<Snapshot, SnapshotError> {
    let active_types: HashMap<Uuid, &QuestionnaireType> = types
        .iter()
        .filter(|t| t.is_active)
        .map(|t| (t.id, t))
        .collect();

    let missing: Vec<Uuid> = requested
        .iter()
        .filter(|id| !active_types.contains_key(id))
        .copied()
        .collect();
    if !missing.is_empty() {
        return Err(SnapshotError::TypesNotFoundOrInactive(missing));
    }

    let mut groups_by_type: HashMap<Uuid, Vec<&QuestionGroup>> = HashMap::new();
    for group in groups.iter().filter(|g| g.is_active) {
        groups_by_type.entry(group.type_id).or_default().push(group);
    }

    let mut questions_by_group: HashMap<Uuid, Vec<&Question>> = HashMap::new();
    for question in questions.iter().filter(|q| q.is_active) {
        questions_by_group
            .entry(question.group_id)
            .or_default()
            .push(question);
    }

    let mut options_by_question: HashMap<(Uuid, OptionType), &QuestionOption> = HashMap::new();
    for option in options {
        options_by_question.insert((option.question_id, option.option_type), option);
    }

    let mut snapshot_types = Vec::with_capacity(requested.len());

    for type_id in requested {
        let qtype = active_types[type_id];
        let mut snapshot_groups = Vec::new();

        let mut type_groups = groups_by_type.remove(type_id).unwrap_or_default();
        type_groups.sort_by_key(|g| g.display_order);

        for group in type_groups {
            let mut group_questions = questions_by_group.remove(&group.id).unwrap_or_default();
            group_questions.sort_by_key(|q| q.display_order);

            let mut snapshot_questions = Vec::with_capacity(group_questions.len());
            for question in group_questions {
                snapshot_questions.push(SnapshotQuestion {
                    id: question.id,
                    text: question.text.clone(),
                    display_order: question.display_order,
                    weight: question.weight,
                    is_critical: question.is_critical,
                    options: snapshot_options(question.id, &options_by_question)?,
                });
            }

            snapshot_groups.push(SnapshotGroup {
                id: group.id,
                name: group.name.clone(),
                display_order: group.display_order,
                weight: group.weight,
                questions: snapshot_questions,
            });
        }

        snapshot_types.push(SnapshotType {
            id: qtype.id,
            name: qtype.name.clone(),
            threshold_high: qtype.threshold_high,
            threshold_medium: qtype.threshold_medium,
            weight: qtype.weight,
            groups: snapshot_groups,
        });
    }

    let snapshot = Snapshot {
        types: snapshot_types,
    };

    if snapshot.total_questions() == 0 {
        return Err(SnapshotError::EmptySnapshot);
    }

    Ok(snapshot)
}

fn snapshot_options(
    question_id: Uuid,
    options: &HashMap<(Uuid, OptionType), &QuestionOption>,
) -> Result<OptionPair, SnapshotError> {
    let get = |option_type: OptionType| {
        options
            .get(&(question_id, option_type))
            .map(|o| OptionSnapshot {
                score: o.score,
                require_comment: o.require_comment,
                require_image: o.require_image,
                comment_min_len: o.comment_min_len,
                max_images: o.max_images,
                image_max_mb: o.image_max_mb,
            })
            .ok_or(SnapshotError::IncompleteOptions {
                question_id,
                option: option_type,
            })
    };

    Ok(OptionPair {
        yes: get(OptionType::Yes)?,
        no: get(OptionType::No)?,
    })
}
