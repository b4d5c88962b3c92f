pub mod record;
pub mod validation;

pub use record::{AgentDraft, AgentRecord};
pub use validation::validate_draft;
