//! Sessions domain state

use std::sync::Arc;

use chrono::Duration;

use crate::domain::entities::{AllySession, JourneyContext};
use crate::store::TtlStore;

/// Application state for the Sessions domain
#[derive(Clone)]
pub struct SessionsState {
    pub sessions: Arc<TtlStore<AllySession>>,
    pub journeys: Arc<TtlStore<JourneyContext>>,
}

impl SessionsState {
    /// Build both stores with one TTL
    pub fn with_ttl(ttl: Duration) -> Self {
        Self {
            sessions: Arc::new(TtlStore::new(ttl)),
            journeys: Arc::new(TtlStore::new(ttl)),
        }
    }
}
