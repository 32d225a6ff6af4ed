//! riskform-scoring
//!
//! Snapshot construction, submission validation, and hierarchical scoring.
//! Pure computation — no I/O dependency. Everything here is a function of a
//! snapshot value plus an answer set, so scores are reproducible for as long
//! as the snapshot is retained.

pub mod error;
pub mod score;
pub mod seed;
pub mod snapshot;
pub mod validate;

pub use error::SnapshotError;
pub use score::{calculate_risk_rating, round2, score_snapshot};
pub use snapshot::build_snapshot;
pub use validate::{validate_answers, ValidationIssue};
