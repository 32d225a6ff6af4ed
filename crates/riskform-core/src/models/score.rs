use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::CoreError;

/// Risk tier derived from a percentage and two thresholds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RiskRating {
    Low,
    Medium,
    High,
}

impl RiskRating {
    pub fn as_str(&self) -> &'static str {
        match self {
            RiskRating::Low => "LOW",
            RiskRating::Medium => "MEDIUM",
            RiskRating::High => "HIGH",
        }
    }

    pub fn parse(s: &str) -> Result<Self, CoreError> {
        match s {
            "LOW" => Ok(RiskRating::Low),
            "MEDIUM" => Ok(RiskRating::Medium),
            "HIGH" => Ok(RiskRating::High),
            other => Err(CoreError::InvalidRating(other.to_string())),
        }
    }
}

/// Which slice of the hierarchy a score row covers. The database encodes
/// this through nullable type_id/group_id columns; the domain type makes
/// the three levels explicit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "level", rename_all = "snake_case")]
pub enum ScoreLevel {
    Overall,
    Type { type_id: Uuid },
    Group { type_id: Uuid, group_id: Uuid },
}

impl ScoreLevel {
    pub fn type_id(&self) -> Option<Uuid> {
        match self {
            ScoreLevel::Overall => None,
            ScoreLevel::Type { type_id } | ScoreLevel::Group { type_id, .. } => Some(*type_id),
        }
    }

    pub fn group_id(&self) -> Option<Uuid> {
        match self {
            ScoreLevel::Group { group_id, .. } => Some(*group_id),
            _ => None,
        }
    }

    /// Reassemble the level from the stored nullable-id pair.
    pub fn from_ids(type_id: Option<Uuid>, group_id: Option<Uuid>) -> Self {
        match (type_id, group_id) {
            (Some(type_id), Some(group_id)) => ScoreLevel::Group { type_id, group_id },
            (Some(type_id), None) => ScoreLevel::Type { type_id },
            _ => ScoreLevel::Overall,
        }
    }
}

/// One persisted score row. Invariant: `raw_score <= max_score`; uniqueness
/// per (assessment_id, level).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AssessmentScore {
    pub assessment_id: Uuid,
    #[serde(flatten)]
    pub level: ScoreLevel,
    pub raw_score: i64,
    pub max_score: i64,
    pub percentage: f64,
    pub risk_rating: RiskRating,
}
