//! Agent Records
//!
//! The catalog entity, its id-less draft and the validation applied before a draft reaches
//! a store.

pub mod domain;

pub use domain::validation::draft_from_json;
pub use domain::{validate_draft, AgentDraft, AgentRecord};
