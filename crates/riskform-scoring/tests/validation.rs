use uuid::Uuid;

use riskform_core::models::{
    AnswerInput, OptionPair, OptionSnapshot, OptionType, Snapshot, SnapshotGroup,
    SnapshotQuestion, SnapshotType,
};
use riskform_scoring::validate::{validate_answers, ValidationIssue};

fn plain_option() -> OptionSnapshot {
    OptionSnapshot {
        score: 1,
        require_comment: false,
        require_image: false,
        comment_min_len: 0,
        max_images: 3,
        image_max_mb: 5,
    }
}

fn question_with(no: OptionSnapshot) -> SnapshotQuestion {
    SnapshotQuestion {
        id: Uuid::new_v4(),
        text: "q".to_string(),
        display_order: 0,
        weight: 1.0,
        is_critical: false,
        options: OptionPair {
            yes: plain_option(),
            no,
        },
    }
}

fn snapshot_of(questions: Vec<SnapshotQuestion>) -> Snapshot {
    Snapshot {
        types: vec![SnapshotType {
            id: Uuid::new_v4(),
            name: "t".to_string(),
            threshold_high: 80,
            threshold_medium: 50,
            weight: 1.0,
            groups: vec![SnapshotGroup {
                id: Uuid::new_v4(),
                name: "g".to_string(),
                display_order: 0,
                weight: 1.0,
                questions,
            }],
        }],
    }
}

fn answer(question_id: Uuid, option: OptionType) -> AnswerInput {
    AnswerInput {
        question_id,
        selected_option: option,
        comment: None,
        attachment_ids: vec![],
    }
}

#[test]
fn complete_valid_submission_produces_no_issues() {
    let snapshot = snapshot_of(vec![question_with(plain_option()), question_with(plain_option())]);
    let answers: Vec<AnswerInput> = snapshot
        .question_ids()
        .into_iter()
        .map(|id| answer(id, OptionType::No))
        .collect();

    assert!(validate_answers(&snapshot, &answers).is_empty());
}

#[test]
fn short_comment_yields_exactly_one_comment_issue_for_that_question() {
    let strict = OptionSnapshot {
        require_comment: true,
        comment_min_len: 10,
        ..plain_option()
    };
    let snapshot = snapshot_of(vec![question_with(strict), question_with(plain_option())]);
    let strict_id = snapshot.types[0].groups[0].questions[0].id;
    let other_id = snapshot.types[0].groups[0].questions[1].id;

    let answers = vec![
        AnswerInput {
            comment: Some("8 chars!".to_string()),
            ..answer(strict_id, OptionType::No)
        },
        answer(other_id, OptionType::Yes),
    ];

    let issues = validate_answers(&snapshot, &answers);
    assert_eq!(
        issues,
        vec![ValidationIssue::CommentRequired {
            question_id: strict_id,
            min_len: 10,
        }]
    );
}

#[test]
fn comment_length_counts_characters_not_bytes() {
    let strict = OptionSnapshot {
        require_comment: true,
        comment_min_len: 10,
        ..plain_option()
    };
    let snapshot = snapshot_of(vec![question_with(strict)]);
    let id = snapshot.types[0].groups[0].questions[0].id;

    // Ten Cyrillic characters, twenty bytes.
    let answers = vec![AnswerInput {
        comment: Some("Тайлбартай".to_string()),
        ..answer(id, OptionType::No)
    }];

    assert!(validate_answers(&snapshot, &answers).is_empty());
}

#[test]
fn independent_failures_all_reported_in_one_call() {
    let needs_comment = OptionSnapshot {
        require_comment: true,
        comment_min_len: 5,
        ..plain_option()
    };
    let needs_image = OptionSnapshot {
        require_image: true,
        ..plain_option()
    };
    let snapshot = snapshot_of(vec![
        question_with(needs_comment),
        question_with(needs_image),
        question_with(plain_option()),
    ]);
    let ids = snapshot.question_ids();

    // First two answers each fail their own check; the third question is
    // never answered; a fourth answer references an unknown question.
    let stray = Uuid::new_v4();
    let answers = vec![
        answer(ids[0], OptionType::No),
        answer(ids[1], OptionType::No),
        answer(stray, OptionType::Yes),
    ];

    let issues = validate_answers(&snapshot, &answers);
    assert_eq!(issues.len(), 4);
    assert!(issues.contains(&ValidationIssue::CommentRequired {
        question_id: ids[0],
        min_len: 5,
    }));
    assert!(issues.contains(&ValidationIssue::ImageRequired { question_id: ids[1] }));
    assert!(issues.contains(&ValidationIssue::UnknownQuestion { question_id: stray }));
    assert!(issues.contains(&ValidationIssue::QuestionNotAnswered { question_id: ids[2] }));
}

#[test]
fn attachment_count_over_limit_is_rejected() {
    let capped = OptionSnapshot {
        max_images: 2,
        ..plain_option()
    };
    let snapshot = snapshot_of(vec![question_with(capped)]);
    let id = snapshot.types[0].groups[0].questions[0].id;

    let answers = vec![AnswerInput {
        attachment_ids: vec!["a".into(), "b".into(), "c".into()],
        ..answer(id, OptionType::No)
    }];

    let issues = validate_answers(&snapshot, &answers);
    assert_eq!(
        issues,
        vec![ValidationIssue::TooManyImages {
            question_id: id,
            max_images: 2,
        }]
    );
}

#[test]
fn requirements_apply_to_selected_option_only() {
    // NO requires a comment, YES does not; answering YES passes bare.
    let strict_no = OptionSnapshot {
        require_comment: true,
        comment_min_len: 10,
        ..plain_option()
    };
    let snapshot = snapshot_of(vec![question_with(strict_no)]);
    let id = snapshot.types[0].groups[0].questions[0].id;

    let answers = vec![answer(id, OptionType::Yes)];
    assert!(validate_answers(&snapshot, &answers).is_empty());
}
