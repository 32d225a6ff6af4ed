use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::answer::SubmissionContact;
use super::assessment::AssessmentStatus;
use super::questionnaire::OptionType;
use super::score::RiskRating;

/// Computed score for one group. `weight` is the group's configured weight,
/// carried so the type aggregation can be reproduced from this value alone.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GroupScore {
    pub group_id: Uuid,
    pub group_name: String,
    pub raw_score: i64,
    pub max_score: i64,
    pub percentage: f64,
    pub risk_rating: RiskRating,
    pub weight: f64,
}

/// Computed score for one questionnaire type, with its group breakdown.
/// `raw_score`/`max_score` are plain sums across groups; `percentage` is the
/// weighted average of group percentages.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TypeScore {
    pub type_id: Uuid,
    pub type_name: String,
    pub raw_score: i64,
    pub max_score: i64,
    pub percentage: f64,
    pub risk_rating: RiskRating,
    pub weight: f64,
    pub groups: Vec<GroupScore>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OverallScore {
    pub raw_score: i64,
    pub max_score: i64,
    pub percentage: f64,
    pub risk_rating: RiskRating,
}

/// Complete hierarchical scoring outcome for one snapshot + answer set.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoreSet {
    pub types: Vec<TypeScore>,
    pub overall: OverallScore,
}

/// What the submitter gets back after a successful submission.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SubmitOutcome {
    pub assessment_id: Uuid,
    pub types: Vec<TypeScore>,
    pub overall: OverallScore,
}

/// One answer, resolved against the snapshot for display.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnswerBreakdown {
    pub question_id: Uuid,
    pub question_text: String,
    pub type_id: Uuid,
    pub type_name: String,
    pub group_id: Uuid,
    pub group_name: String,
    pub selected_option: OptionType,
    pub comment: Option<String>,
    pub score_awarded: i64,
    pub max_score: i64,
    pub attachment_count: usize,
}

/// Full results view reconstructed from persisted scores + the snapshot.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AssessmentResults {
    pub assessment_id: Uuid,
    pub respondent_id: Uuid,
    pub respondent_name: String,
    pub status: AssessmentStatus,
    pub completed_at: Option<jiff::Timestamp>,
    pub contact: Option<SubmissionContact>,
    pub type_scores: Vec<TypeScore>,
    pub overall_score: OverallScore,
    pub answer_breakdown: Option<Vec<AnswerBreakdown>>,
}
