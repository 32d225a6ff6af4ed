pub mod answer;
pub mod assessment;
pub mod draft;
pub mod questionnaire;
pub mod respondent;
pub mod results;
pub mod score;
pub mod snapshot;

pub use answer::{Answer, AnswerInput, SubmissionContact, SubmissionInput};
pub use assessment::{Assessment, AssessmentStatus};
pub use draft::AssessmentDraft;
pub use questionnaire::{
    OptionType, Question, QuestionGroup, QuestionOption, QuestionnaireType,
};
pub use respondent::{Respondent, RespondentKind};
pub use results::{
    AnswerBreakdown, AssessmentResults, GroupScore, OverallScore, ScoreSet, SubmitOutcome,
    TypeScore,
};
pub use score::{AssessmentScore, RiskRating, ScoreLevel};
pub use snapshot::{OptionPair, OptionSnapshot, Snapshot, SnapshotGroup, SnapshotQuestion, SnapshotType};
