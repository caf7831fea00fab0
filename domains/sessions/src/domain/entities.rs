//! Domain entities for the Sessions domain

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Workflow step marker of a Mini-Ally session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum SessionStep {
    #[default]
    Ideation,
    Questionnaire,
    Design,
}

impl std::fmt::Display for SessionStep {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SessionStep::Ideation => write!(f, "ideation"),
            SessionStep::Questionnaire => write!(f, "questionnaire"),
            SessionStep::Design => write!(f, "design"),
        }
    }
}

/// One expert question answered during ideation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExpertQa {
    pub question: String,
    #[serde(default)]
    pub answer: String,
}

/// A Mini-Ally ideation session.
///
/// Free-text fields accumulate as the conversation progresses; only the
/// user id is fixed at creation. The session expires `SESSION_TTL_HOURS`
/// after its last write.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AllySession {
    pub user_id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub project_name: Option<String>,
    #[serde(default)]
    pub persona: String,
    #[serde(default)]
    pub pain_point: String,
    #[serde(default)]
    pub solution_idea: String,
    #[serde(default)]
    pub expert_qa: Vec<ExpertQa>,
    #[serde(default)]
    pub step: SessionStep,
    pub updated_at: DateTime<Utc>,
}

/// Journey context for funnel analytics: where the visitor came from and
/// what they said they wanted
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JourneyContext {
    pub journey_id: String,
    pub origin: String,
    pub intent: String,
    pub started_at: DateTime<Utc>,
}
