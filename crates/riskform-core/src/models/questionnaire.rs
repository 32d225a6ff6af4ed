use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::CoreError;

/// The two answer options every question carries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum OptionType {
    Yes,
    No,
}

impl OptionType {
    pub fn as_str(&self) -> &'static str {
        match self {
            OptionType::Yes => "YES",
            OptionType::No => "NO",
        }
    }

    pub fn parse(s: &str) -> Result<Self, CoreError> {
        match s {
            "YES" => Ok(OptionType::Yes),
            "NO" => Ok(OptionType::No),
            other => Err(CoreError::InvalidOptionType(other.to_string())),
        }
    }
}

/// Top-level questionnaire category with its own risk thresholds and weight.
///
/// Invariant: `threshold_high > threshold_medium`. A percentage at or above
/// `threshold_high` rates LOW risk, at or above `threshold_medium` MEDIUM,
/// anything below HIGH.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QuestionnaireType {
    pub id: Uuid,
    pub name: String,
    pub threshold_high: i64,
    pub threshold_medium: i64,
    pub weight: f64,
    pub is_active: bool,
}

/// Named subset of questions within a type, independently weighted.
/// Deactivation is soft: an inactive group is excluded from new snapshots but
/// survives inside old ones.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QuestionGroup {
    pub id: Uuid,
    pub type_id: Uuid,
    pub name: String,
    pub display_order: i64,
    pub weight: f64,
    pub is_active: bool,
}

/// A single YES/NO question. `weight` and `is_critical` are carried through
/// snapshots but not used in aggregation yet.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Question {
    pub id: Uuid,
    pub group_id: Uuid,
    pub text: String,
    pub display_order: i64,
    pub weight: f64,
    pub is_critical: bool,
    pub is_active: bool,
}

/// Per-option configuration: the score awarded when selected plus the
/// evidence requirements imposed on the respondent.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QuestionOption {
    pub id: Uuid,
    pub question_id: Uuid,
    pub option_type: OptionType,
    pub score: i64,
    pub require_comment: bool,
    pub require_image: bool,
    pub comment_min_len: i64,
    pub max_images: i64,
    pub image_max_mb: i64,
}
