//! Domain entities for the Generator domain

use serde::{Deserialize, Serialize};
use validator::Validate;

/// One answered questionnaire item
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
pub struct QuestionAnswer {
    #[validate(length(min = 1, message = "Question cannot be empty"))]
    pub question: String,

    /// An empty answer is allowed; users may skip questions
    #[serde(default)]
    pub answer: String,
}

/// Render answered questions into the context string the generation
/// workflows consume
pub fn render_context(items: &[QuestionAnswer]) -> String {
    items
        .iter()
        .map(|qa| format!("Q: {}\nA: {}", qa.question, qa.answer))
        .collect::<Vec<_>>()
        .join("\n\n")
}
