use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::CoreError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RespondentKind {
    Org,
    Person,
}

impl RespondentKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            RespondentKind::Org => "ORG",
            RespondentKind::Person => "PERSON",
        }
    }

    pub fn parse(s: &str) -> Result<Self, CoreError> {
        match s {
            "ORG" => Ok(RespondentKind::Org),
            "PERSON" => Ok(RespondentKind::Person),
            other => Err(CoreError::InvalidRespondentKind(other.to_string())),
        }
    }
}

/// Organization or person an assessment is issued to.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Respondent {
    pub id: Uuid,
    pub kind: RespondentKind,
    pub name: String,
    #[serde(default)]
    pub registration_no: Option<String>,
    pub created_at: jiff::Timestamp,
}
