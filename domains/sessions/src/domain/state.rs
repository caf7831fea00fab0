//! Session step state machine
//!
//! The workflow step marker only moves forward one step at a time, or back
//! to the start when the user chooses "start over".

use ally_common::StateError;

use super::entities::SessionStep;

/// Events that move a session between workflow steps
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StepEvent {
    Advance,
    Restart,
}

impl std::fmt::Display for StepEvent {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            StepEvent::Advance => write!(f, "advance"),
            StepEvent::Restart => write!(f, "restart"),
        }
    }
}

/// State machine for the session workflow step
pub struct SessionStepMachine;

impl SessionStepMachine {
    /// Apply an event to the current step
    pub fn transition(current: SessionStep, event: StepEvent) -> Result<SessionStep, StateError> {
        match (current, event) {
            (_, StepEvent::Restart) => Ok(SessionStep::Ideation),
            (SessionStep::Ideation, StepEvent::Advance) => Ok(SessionStep::Questionnaire),
            (SessionStep::Questionnaire, StepEvent::Advance) => Ok(SessionStep::Design),
            (SessionStep::Design, StepEvent::Advance) => Err(StateError::InvalidTransition {
                from: current.to_string(),
                to: "beyond design".to_string(),
                event: event.to_string(),
            }),
        }
    }

    /// Check that a requested step change is reachable: staying put, one
    /// step forward, or a restart.
    pub fn validate_change(from: SessionStep, to: SessionStep) -> Result<(), StateError> {
        if from == to || to == SessionStep::Ideation {
            return Ok(());
        }
        match Self::transition(from, StepEvent::Advance) {
            Ok(next) if next == to => Ok(()),
            _ => Err(StateError::InvalidTransition {
                from: from.to_string(),
                to: to.to_string(),
                event: StepEvent::Advance.to_string(),
            }),
        }
    }
}
