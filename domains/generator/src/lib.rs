//! Generator domain: PRD/design/database generation, workflow runs, v0 hand-off
//!
//! Every endpoint here is a thin broker: validate the caller's fields,
//! build workflow inputs, run the MISO workflow, pull the named output
//! through the shared response-shape normalizer. The optional last step
//! hands a generated prompt to v0 for UI generation.

pub mod api;
pub mod domain;

// Re-export domain types at the crate root for convenience
pub use domain::entities::{render_context, QuestionAnswer};

// Re-export API types
pub use api::routes;
pub use api::GeneratorState;
