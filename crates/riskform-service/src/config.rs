use serde::{Deserialize, Serialize};

/// Runtime settings, passed explicitly to every operation that needs them.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServiceConfig {
    /// Base URL the public assessment links are built against.
    pub public_url: String,
    /// Token lifetime applied when the creation request carries none.
    pub default_expiry_days: i64,
    pub upload_max_size_mb: i64,
    pub upload_max_images_per_question: i64,
    /// Drafts of assessments expired longer than this are swept.
    pub draft_retention_days: i64,
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            public_url: "http://localhost:8000".to_owned(),
            default_expiry_days: 30,
            upload_max_size_mb: 5,
            upload_max_images_per_question: 3,
            draft_retention_days: 7,
        }
    }
}

impl ServiceConfig {
    /// Public link a respondent opens the assessment with.
    pub fn assessment_url(&self, token: &str) -> String {
        format!("{}/a/{}", self.public_url.trim_end_matches('/'), token)
    }
}
