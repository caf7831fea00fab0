//! Chat domain: streaming chat relay, conversations, messages, file uploads
//!
//! This domain fronts the MISO Agent API. Nothing here is authoritative:
//! conversations and messages live upstream, and Ally reshapes them into
//! the view models its clients render.

pub mod api;
pub mod domain;

// Re-export domain types at the crate root for convenience
pub use domain::entities::{AttachedFile, Conversation, Message, MessageRole};

// Re-export API types
pub use api::routes;
pub use api::ChatState;
