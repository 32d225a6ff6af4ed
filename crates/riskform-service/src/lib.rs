//! riskform-service
//!
//! Orchestration over the scoring engine and the sqlite store: assessment
//! creation and token access, the submission flow, results assembly, drafts,
//! and the cleanup sweep. Every operation takes its dependencies explicitly;
//! nothing here reads ambient configuration.

pub mod assessment;
pub mod cleanup;
pub mod config;
pub mod draft;
pub mod error;
pub mod results;
pub mod submission;
pub mod token;

pub use config::ServiceConfig;
pub use error::ServiceError;
