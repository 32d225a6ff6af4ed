use std::collections::{HashMap, HashSet};

use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

use riskform_core::models::{AnswerInput, Snapshot, SnapshotQuestion};

/// One problem with a submitted answer set. All checks run for every answer
/// and every issue is collected — this is the normal "please fix your form"
/// path back to the respondent, not a failure.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Error)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ValidationIssue {
    #[error("question {question_id} not found in assessment")]
    UnknownQuestion { question_id: Uuid },

    #[error("question {question_id}: comment required with minimum {min_len} characters")]
    CommentRequired { question_id: Uuid, min_len: i64 },

    #[error("question {question_id}: at least one image required")]
    ImageRequired { question_id: Uuid },

    #[error("question {question_id}: maximum {max_images} images allowed")]
    TooManyImages { question_id: Uuid, max_images: i64 },

    #[error("question {question_id} not answered")]
    QuestionNotAnswered { question_id: Uuid },
}

impl ValidationIssue {
    pub fn question_id(&self) -> Uuid {
        match self {
            ValidationIssue::UnknownQuestion { question_id }
            | ValidationIssue::CommentRequired { question_id, .. }
            | ValidationIssue::ImageRequired { question_id }
            | ValidationIssue::TooManyImages { question_id, .. }
            | ValidationIssue::QuestionNotAnswered { question_id } => *question_id,
        }
    }
}

/// Check a submitted answer set against the snapshot's per-option
/// requirements and completeness. An empty result means the submission may
/// proceed.
pub fn validate_answers(snapshot: &Snapshot, answers: &[AnswerInput]) -> Vec<ValidationIssue> {
    let questions_by_id: HashMap<Uuid, &SnapshotQuestion> =
        snapshot.questions().map(|(_, _, q)| (q.id, q)).collect();

    let mut issues = Vec::new();
    let mut answered: HashSet<Uuid> = HashSet::new();

    for answer in answers {
        answered.insert(answer.question_id);

        let Some(question) = questions_by_id.get(&answer.question_id) else {
            issues.push(ValidationIssue::UnknownQuestion {
                question_id: answer.question_id,
            });
            continue;
        };

        let option = question.options.get(answer.selected_option);

        if option.require_comment {
            let comment_len = answer
                .comment
                .as_deref()
                .map(|c| c.chars().count() as i64)
                .unwrap_or(0);
            if comment_len < option.comment_min_len || comment_len == 0 {
                issues.push(ValidationIssue::CommentRequired {
                    question_id: answer.question_id,
                    min_len: option.comment_min_len,
                });
            }
        }

        if option.require_image && answer.attachment_ids.is_empty() {
            issues.push(ValidationIssue::ImageRequired {
                question_id: answer.question_id,
            });
        }

        if answer.attachment_ids.len() as i64 > option.max_images {
            issues.push(ValidationIssue::TooManyImages {
                question_id: answer.question_id,
                max_images: option.max_images,
            });
        }
    }

    // Completeness: every snapshot question needs an answer, reported in
    // presentation order.
    for (_, _, question) in snapshot.questions() {
        if !answered.contains(&question.id) {
            issues.push(ValidationIssue::QuestionNotAnswered {
                question_id: question.id,
            });
        }
    }

    issues
}
