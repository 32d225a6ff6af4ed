use thiserror::Error;
use uuid::Uuid;

use riskform_core::models::OptionType;

/// Why a snapshot could not be built. These surface to the
/// assessment-creation caller; the assessment is never created.
#[derive(Debug, Error)]
pub enum SnapshotError {
    /// Every requested id that did not resolve to an active type, not just
    /// the first one.
    #[error("questionnaire types not found or inactive: {0:?}")]
    TypesNotFoundOrInactive(Vec<Uuid>),

    #[error("question {question_id} is missing its {} option configuration", .option.as_str())]
    IncompleteOptions {
        question_id: Uuid,
        option: OptionType,
    },

    /// The requested types resolve to zero questions; an assessment nobody
    /// can usefully answer must not be created.
    #[error("selected questionnaire types have no active questions")]
    EmptySnapshot,
}
