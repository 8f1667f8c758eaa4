//! Prompt composition.
//!
//! One pure function per template family, each rendering upstream domain
//! objects into model-ready prompt text. The templates keep the service's
//! original wire language (Spanish) because downstream extraction and
//! defaulting key on the Spanish field names the model is asked to emit.
//!
//! Every function degrades gracefully: a missing optional field renders as
//! an explicit "not specified" marker, never as an empty hole. The fixed
//! structural skeleton — section headers, instructions, and an example of
//! the expected output shape — is what lets structured extraction succeed
//! downstream; keep it when editing wording.

mod chat;
mod project;
mod resources;
mod task;

pub use chat::chat_continuation;
pub use project::project_analysis;
pub use resources::{project_resource_assignment, resource_assignment};
pub use task::{code_suggestion, task_analysis, task_documentation, time_estimation};

pub(crate) const NOT_SPECIFIED: &str = "No especificado";

/// Render an optional field, or the given marker when absent.
pub(crate) fn or_marker<'a>(field: &'a Option<String>, marker: &'a str) -> &'a str {
    field.as_deref().filter(|s| !s.is_empty()).unwrap_or(marker)
}
