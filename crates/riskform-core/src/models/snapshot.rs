use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::questionnaire::OptionType;

/// Frozen deep copy of questionnaire structure, taken once at
/// assessment-creation time and never mutated afterwards. Scoring, validation,
/// and result assembly all read this value, never the live tables, so results
/// stay reproducible regardless of later edits to the questionnaire.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Snapshot {
    pub types: Vec<SnapshotType>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SnapshotType {
    pub id: Uuid,
    pub name: String,
    pub threshold_high: i64,
    pub threshold_medium: i64,
    pub weight: f64,
    pub groups: Vec<SnapshotGroup>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SnapshotGroup {
    pub id: Uuid,
    pub name: String,
    pub display_order: i64,
    pub weight: f64,
    pub questions: Vec<SnapshotQuestion>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SnapshotQuestion {
    pub id: Uuid,
    pub text: String,
    pub display_order: i64,
    pub weight: f64,
    pub is_critical: bool,
    pub options: OptionPair,
}

/// Both option configurations for a question. A snapshot question is only
/// valid with both present; the builder rejects anything else.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OptionPair {
    #[serde(rename = "YES")]
    pub yes: OptionSnapshot,
    #[serde(rename = "NO")]
    pub no: OptionSnapshot,
}

impl OptionPair {
    pub fn get(&self, option: OptionType) -> &OptionSnapshot {
        match option {
            OptionType::Yes => &self.yes,
            OptionType::No => &self.no,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OptionSnapshot {
    pub score: i64,
    pub require_comment: bool,
    pub require_image: bool,
    pub comment_min_len: i64,
    pub max_images: i64,
    pub image_max_mb: i64,
}

impl SnapshotQuestion {
    /// Highest score this question can contribute.
    pub fn max_score(&self) -> i64 {
        self.options.yes.score.max(self.options.no.score)
    }

    /// Score awarded when the given option is selected.
    pub fn score_for(&self, option: OptionType) -> i64 {
        self.options.get(option).score
    }
}

impl Snapshot {
    pub fn total_questions(&self) -> usize {
        self.types
            .iter()
            .flat_map(|t| &t.groups)
            .map(|g| g.questions.len())
            .sum()
    }

    /// All question ids, in form presentation order.
    pub fn question_ids(&self) -> Vec<Uuid> {
        self.questions().map(|(_, _, q)| q.id).collect()
    }

    /// Iterate every question with its owning type and group, in presentation
    /// order (types as requested, groups and questions by display_order).
    pub fn questions(
        &self,
    ) -> impl Iterator<Item = (&SnapshotType, &SnapshotGroup, &SnapshotQuestion)> {
        self.types.iter().flat_map(|t| {
            t.groups
                .iter()
                .flat_map(move |g| g.questions.iter().map(move |q| (t, g, q)))
        })
    }

    pub fn find_question(&self, question_id: Uuid) -> Option<&SnapshotQuestion> {
        self.questions()
            .find(|(_, _, q)| q.id == question_id)
            .map(|(_, _, q)| q)
    }

    pub fn find_type(&self, type_id: Uuid) -> Option<&SnapshotType> {
        self.types.iter().find(|t| t.id == type_id)
    }

    /// Locate a group together with its owning type.
    pub fn find_group(&self, group_id: Uuid) -> Option<(&SnapshotType, &SnapshotGroup)> {
        self.types.iter().find_map(|t| {
            t.groups
                .iter()
                .find(|g| g.id == group_id)
                .map(|g| (t, g))
        })
    }

    /// Score awarded for selecting `option` on `question_id`, or None when
    /// the question is not part of this snapshot.
    pub fn score_for(&self, question_id: Uuid, option: OptionType) -> Option<i64> {
        self.find_question(question_id).map(|q| q.score_for(option))
    }
}
