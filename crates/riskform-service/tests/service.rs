use jiff::{SignedDuration, Timestamp};
use uuid::Uuid;

use riskform_core::models::{
    AnswerInput, AssessmentStatus, OptionType, Question, QuestionGroup, QuestionOption,
    QuestionnaireType, Respondent, RespondentKind, RiskRating, SubmissionContact,
    SubmissionInput,
};
use riskform_scoring::ValidationIssue;
use riskform_service::assessment::{
    create_assessment, list_assessments, load_form, resolve_access, AccessState,
    CreateAssessmentRequest, CreatedAssessment, FormAccess,
};
use riskform_service::cleanup::run_cleanup;
use riskform_service::draft::{discard_draft, save_draft, DraftInput};
use riskform_service::results::assessment_results;
use riskform_service::submission::submit;
use riskform_service::{ServiceConfig, ServiceError};
use riskform_storage::assessments::AssessmentFilter;
use riskform_storage::Store;

struct Fixture {
    store: Store,
    config: ServiceConfig,
    respondent_id: Uuid,
    type_id: Uuid,
    q1: Uuid,
    q2: Uuid,
}

/// One type with one group of two questions. q1 is a plain 2-point yes/no;
/// answering NO on q2 requires a comment of at least 10 characters.
fn fixture() -> Fixture {
    let store = Store::memory().unwrap();
    store.init_schema().unwrap();

    let respondent = Respondent {
        id: Uuid::new_v4(),
        kind: RespondentKind::Org,
        name: "Acme LLC".to_owned(),
        registration_no: None,
        created_at: Timestamp::now(),
    };
    store.insert_respondent(&respondent).unwrap();

    let qtype = QuestionnaireType {
        id: Uuid::new_v4(),
        name: "Security".to_owned(),
        threshold_high: 80,
        threshold_medium: 50,
        weight: 1.0,
        is_active: true,
    };
    store.insert_type(&qtype).unwrap();

    let group = QuestionGroup {
        id: Uuid::new_v4(),
        type_id: qtype.id,
        name: "Access control".to_owned(),
        display_order: 0,
        weight: 1.0,
        is_active: true,
    };
    store.insert_group(&group).unwrap();

    let q1 = Uuid::new_v4();
    let q2 = Uuid::new_v4();
    for (id, text, order) in [
        (q1, "Is access logged?", 0),
        (q2, "Are backups tested?", 1),
    ] {
        store
            .insert_question(&Question {
                id,
                group_id: group.id,
                text: text.to_owned(),
                display_order: order,
                weight: 1.0,
                is_critical: false,
                is_active: true,
            })
            .unwrap();
    }

    let insert_option =
        |question_id: Uuid, option_type: OptionType, score: i64, require_comment: bool| {
            store
                .insert_option(&QuestionOption {
                    id: Uuid::new_v4(),
                    question_id,
                    option_type,
                    score,
                    require_comment,
                    require_image: false,
                    comment_min_len: if require_comment { 10 } else { 0 },
                    max_images: 3,
                    image_max_mb: 5,
                })
                .unwrap();
        };
    insert_option(q1, OptionType::Yes, 2, false);
    insert_option(q1, OptionType::No, 0, false);
    insert_option(q2, OptionType::Yes, 3, false);
    insert_option(q2, OptionType::No, 0, true);

    Fixture {
        store,
        config: ServiceConfig::default(),
        respondent_id: respondent.id,
        type_id: qtype.id,
        q1,
        q2,
    }
}

fn create(fix: &Fixture, expiry_days: Option<i64>, now: Timestamp) -> CreatedAssessment {
    create_assessment(
        &fix.store,
        &fix.config,
        &CreateAssessmentRequest {
            respondent_id: fix.respondent_id,
            type_ids: vec![fix.type_id],
            expiry_days,
        },
        now,
    )
    .unwrap()
}

fn answer(question_id: Uuid, option: OptionType) -> AnswerInput {
    AnswerInput {
        question_id,
        selected_option: option,
        comment: None,
        attachment_ids: vec![],
    }
}

fn all_yes(fix: &Fixture) -> SubmissionInput {
    SubmissionInput {
        answers: vec![
            answer(fix.q1, OptionType::Yes),
            answer(fix.q2, OptionType::Yes),
        ],
        contact: Some(SubmissionContact {
            last_name: "Бат".to_owned(),
            first_name: "Дорж".to_owned(),
            email: Some("dorj@example.mn".to_owned()),
            phone: None,
            position: None,
        }),
    }
}

#[test]
fn creation_issues_token_and_freezes_questions() {
    let fix = fixture();
    let now = Timestamp::now();
    let created = create(&fix, None, now);

    assert_eq!(created.token.len(), 64);
    assert!(created.url.ends_with(&created.token));
    assert_eq!(created.assessment.status, AssessmentStatus::Pending);
    assert_eq!(created.assessment.questions_snapshot.total_questions(), 2);
    assert!(created.assessment.expires_at > now);

    // Only the hash is stored, and the raw token resolves through it.
    let stored = fix.store.get_assessment(created.assessment.id).unwrap();
    assert_ne!(stored.token_hash, created.token);
    match resolve_access(&fix.store, &created.token, now).unwrap() {
        AccessState::Valid(a) => assert_eq!(a.id, created.assessment.id),
        other => panic!("expected valid access, got {other:?}"),
    }
    assert!(matches!(
        resolve_access(&fix.store, "not-a-token", now).unwrap(),
        AccessState::NotFound
    ));
}

#[test]
fn creation_requires_known_respondent() {
    let fix = fixture();
    let missing = Uuid::new_v4();
    let result = create_assessment(
        &fix.store,
        &fix.config,
        &CreateAssessmentRequest {
            respondent_id: missing,
            type_ids: vec![fix.type_id],
            expiry_days: None,
        },
        Timestamp::now(),
    );
    assert!(matches!(result, Err(ServiceError::RespondentNotFound(id)) if id == missing));
}

#[test]
fn submit_scores_and_completes() {
    let fix = fixture();
    let now = Timestamp::now();
    let created = create(&fix, None, now);

    let outcome = submit(&fix.store, &created.token, &all_yes(&fix), now).unwrap();
    assert_eq!(outcome.overall.raw_score, 5);
    assert_eq!(outcome.overall.max_score, 5);
    assert_eq!(outcome.overall.percentage, 100.0);
    assert_eq!(outcome.overall.risk_rating, RiskRating::Low);
    assert_eq!(outcome.types.len(), 1);
    assert_eq!(outcome.types[0].groups.len(), 1);

    let stored = fix.store.get_assessment(created.assessment.id).unwrap();
    assert_eq!(stored.status, AssessmentStatus::Completed);
    assert!(stored.completed_at.is_some());

    // The assembled results reproduce the submit outcome.
    let results = assessment_results(&fix.store, created.assessment.id, true).unwrap();
    assert_eq!(results.respondent_name, "Acme LLC");
    assert_eq!(results.overall_score.percentage, 100.0);
    assert_eq!(results.type_scores, outcome.types);
    assert_eq!(results.contact.unwrap().last_name, "Бат");
    let breakdown = results.answer_breakdown.unwrap();
    assert_eq!(breakdown.len(), 2);
    assert_eq!(breakdown[0].question_id, fix.q1);
    assert_eq!(breakdown[1].max_score, 3);
}

#[test]
fn second_submit_is_rejected() {
    let fix = fixture();
    let now = Timestamp::now();
    let created = create(&fix, None, now);

    submit(&fix.store, &created.token, &all_yes(&fix), now).unwrap();
    let result = submit(&fix.store, &created.token, &all_yes(&fix), now);
    assert!(matches!(result, Err(ServiceError::AlreadyCompleted)));
}

#[test]
fn invalid_submission_writes_nothing() {
    let fix = fixture();
    let now = Timestamp::now();
    let created = create(&fix, None, now);

    // NO on q2 with a comment that is too short.
    let input = SubmissionInput {
        answers: vec![
            answer(fix.q1, OptionType::Yes),
            AnswerInput {
                question_id: fix.q2,
                selected_option: OptionType::No,
                comment: Some("short".to_owned()),
                attachment_ids: vec![],
            },
        ],
        contact: None,
    };
    match submit(&fix.store, &created.token, &input, now) {
        Err(ServiceError::Validation(issues)) => {
            assert_eq!(issues.len(), 1);
            assert!(matches!(
                issues[0],
                ValidationIssue::CommentRequired { question_id, min_len: 10 }
                    if question_id == fix.q2
            ));
        }
        other => panic!("expected validation failure, got {other:?}"),
    }

    let stored = fix.store.get_assessment(created.assessment.id).unwrap();
    assert_eq!(stored.status, AssessmentStatus::Pending);
    assert!(fix.store.fetch_answers(created.assessment.id).unwrap().is_empty());
}

#[test]
fn expiry_is_applied_lazily_on_access() {
    let fix = fixture();
    let now = Timestamp::now();
    let created = create(&fix, Some(0), now);

    let later = now + SignedDuration::from_hours(1);
    assert!(matches!(
        resolve_access(&fix.store, &created.token, later).unwrap(),
        AccessState::Expired
    ));
    assert_eq!(
        fix.store.get_assessment(created.assessment.id).unwrap().status,
        AssessmentStatus::Expired
    );

    let result = submit(&fix.store, &created.token, &all_yes(&fix), later);
    assert!(matches!(result, Err(ServiceError::AssessmentExpired)));
}

#[test]
fn snapshot_ignores_later_config_edits() {
    let fix = fixture();
    let now = Timestamp::now();
    let created = create(&fix, None, now);

    // Deactivating a question after creation must not change the frozen form.
    fix.store.set_question_active(fix.q2, false).unwrap();

    let outcome = submit(&fix.store, &created.token, &all_yes(&fix), now).unwrap();
    assert_eq!(outcome.overall.max_score, 5);

    // A new assessment built from the edited config no longer carries q2.
    let fresh = create(&fix, None, now);
    assert_eq!(fresh.assessment.questions_snapshot.total_questions(), 1);
}

#[test]
fn drafts_follow_the_pending_state() {
    let fix = fixture();
    let now = Timestamp::now();
    let created = create(&fix, None, now);

    let draft = save_draft(
        &fix.store,
        &created.token,
        DraftInput {
            answers: vec![answer(fix.q1, OptionType::Yes)],
            current_type_index: 0,
            current_group_index: 0,
        },
        now,
    )
    .unwrap();
    assert_eq!(draft.answers.len(), 1);

    match load_form(&fix.store, &created.token, now).unwrap() {
        FormAccess::Available(view) => {
            assert_eq!(view.respondent_name, "Acme LLC");
            assert_eq!(view.draft.unwrap().answers.len(), 1);
        }
        other => panic!("expected available form, got {other:?}"),
    }

    submit(&fix.store, &created.token, &all_yes(&fix), now).unwrap();
    let result = save_draft(
        &fix.store,
        &created.token,
        DraftInput {
            answers: vec![],
            current_type_index: 0,
            current_group_index: 0,
        },
        now,
    );
    assert!(matches!(result, Err(ServiceError::AlreadyCompleted)));
    assert!(matches!(
        load_form(&fix.store, &created.token, now).unwrap(),
        FormAccess::AlreadyCompleted
    ));
}

#[test]
fn discard_reports_whether_a_draft_existed() {
    let fix = fixture();
    let now = Timestamp::now();
    let created = create(&fix, None, now);

    assert!(!discard_draft(&fix.store, &created.token, now).unwrap());
    save_draft(
        &fix.store,
        &created.token,
        DraftInput {
            answers: vec![],
            current_type_index: 0,
            current_group_index: 0,
        },
        now,
    )
    .unwrap();
    assert!(discard_draft(&fix.store, &created.token, now).unwrap());
}

#[test]
fn listing_reflects_swept_statuses() {
    let fix = fixture();
    let now = Timestamp::now();
    create(&fix, Some(0), now);
    create(&fix, None, now);

    let later = now + SignedDuration::from_hours(1);
    let filter = AssessmentFilter {
        status: Some(AssessmentStatus::Expired),
        ..Default::default()
    };
    let (items, total) = list_assessments(&fix.store, &filter, later).unwrap();
    assert_eq!(items.len(), 1);
    assert_eq!(total, 1);
}

#[test]
fn cleanup_dry_run_counts_without_writing() {
    let fix = fixture();
    let now = Timestamp::now();

    // Deadline passed ten days ago; the draft is seeded directly since the
    // token-keyed path would refuse it.
    let stale = create(&fix, Some(-10), now - SignedDuration::from_hours(1));
    fix.store
        .upsert_draft(&riskform_core::models::AssessmentDraft {
            assessment_id: stale.assessment.id,
            answers: vec![],
            current_type_index: 0,
            current_group_index: 0,
            last_saved_at: now,
        })
        .unwrap();

    let live = create(&fix, None, now);
    save_draft(
        &fix.store,
        &live.token,
        DraftInput {
            answers: vec![],
            current_type_index: 0,
            current_group_index: 0,
        },
        now,
    )
    .unwrap();

    // Dry run reports the overdue assessment but leaves it pending. Its
    // draft only counts as stale once the expiry has actually been flipped.
    let report = run_cleanup(&fix.store, &fix.config, true, now).unwrap();
    assert!(report.dry_run);
    assert_eq!(report.assessments_expired, 1);
    assert_eq!(
        fix.store.get_assessment(stale.assessment.id).unwrap().status,
        AssessmentStatus::Pending
    );

    let report = run_cleanup(&fix.store, &fix.config, false, now).unwrap();
    assert!(!report.dry_run);
    assert_eq!(report.assessments_expired, 1);
    assert_eq!(report.drafts_deleted, 1);
    assert!(fix.store.load_draft(stale.assessment.id).unwrap().is_none());
    assert!(fix.store.load_draft(live.assessment.id).unwrap().is_some());
}
