//! Interview context supplied by whoever starts the interview.

use serde::{Deserialize, Serialize};

/// Free-text description of who is being interviewed and why
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct InterviewContext {
    /// Context about the interviewee
    #[serde(default)]
    pub context: String,
    /// What the interview should achieve
    #[serde(default)]
    pub goals: String,
    /// Anything else worth knowing
    #[serde(default)]
    pub additional_context: String,
}

impl InterviewContext {
    pub fn new(
        context: impl Into<String>,
        goals: impl Into<String>,
        additional_context: impl Into<String>,
    ) -> Self {
        Self {
            context: context.into(),
            goals: goals.into(),
            additional_context: additional_context.into(),
        }
    }
}
