//! Chat domain state

use ally_miso::AgentApi;
use std::sync::Arc;

/// Application state for the Chat domain
#[derive(Clone)]
pub struct ChatState {
    pub agent: Arc<dyn AgentApi>,
}
