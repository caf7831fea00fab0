//! Sessions domain: Mini-Ally session store, journey tracking, anonymous ids
//!
//! Session and journey state lives in an in-memory TTL store so a returning
//! visitor can be offered a resume within the session window. Nothing is
//! persisted; an expired entry is indistinguishable from an absent one.

pub mod api;
pub mod domain;
pub mod store;

// Re-export domain types at the crate root for convenience
pub use domain::entities::{AllySession, ExpertQa, JourneyContext, SessionStep};
pub use domain::state::{SessionStepMachine, StepEvent};

// Re-export the store
pub use store::TtlStore;

// Re-export API types
pub use api::routes;
pub use api::SessionsState;
