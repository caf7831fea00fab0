//! Generator domain state

use ally_miso::WorkflowApi;
use ally_v0::V0Api;
use std::sync::Arc;

/// Application state for the Generator domain
#[derive(Clone)]
pub struct GeneratorState {
    /// Workflow surface for the named generation endpoints
    pub workflow: Arc<dyn WorkflowApi>,
    /// Workflow surface for the generic run endpoint; carries the
    /// generator credential, which may differ from the default one
    pub runner: Arc<dyn WorkflowApi>,
    pub v0: Arc<dyn V0Api>,
}
