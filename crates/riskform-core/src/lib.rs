//! riskform-core
//!
//! Pure domain types for the risk-assessment questionnaire system.
//! No I/O dependency — this is the shared vocabulary of the riskform system:
//! live questionnaire configuration, the frozen per-assessment snapshot,
//! answers, scores, and result views.

pub mod error;
pub mod models;

pub use error::CoreError;
