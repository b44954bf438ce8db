//! Interview error types

use thiserror::Error;

/// Result alias for interview operations
pub type InterviewResult<T> = Result<T, InterviewError>;

#[derive(Debug, Error)]
pub enum InterviewError {
    /// The completion service failed (network, auth, quota). Fatal for the turn.
    #[error("completion request failed: {0:#}")]
    Completion(#[source] anyhow::Error),

    /// The plan reply could not be parsed into an `InterviewPlan`
    #[error("could not parse interview plan: {0}")]
    PlanParse(String),

    /// A respondent message was empty after trimming
    #[error("message must not be empty")]
    EmptyMessage,
}

impl InterviewError {
    pub fn is_completion(&self) -> bool {
        matches!(self, Self::Completion(_))
    }
}
