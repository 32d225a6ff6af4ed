//! riskform-storage
//!
//! Transactional persistence for assessments, answers, and scores over an
//! embedded sqlite database. The submission write path is a single
//! transaction: either the answers, every score row, and the status flip all
//! land, or none of them do.

pub mod assessments;
pub mod config;
pub mod drafts;
pub mod error;
pub mod schema;
pub mod store;

pub use error::StorageError;
pub use store::Store;
