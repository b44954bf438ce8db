//! Request and response types for the API

use serde::{Deserialize, Serialize};

use parley_core::interview::InterviewContext;
use parley_core::planning::InterviewPlan;
use parley_core::InterviewMode;

// ============================================================================
// Interview Types
// ============================================================================

#[derive(Debug, Default, Deserialize)]
pub struct CreateInterviewRequest {
    #[serde(default)]
    pub context: String,
    #[serde(default)]
    pub goals: String,
    #[serde(default)]
    pub additional_context: String,
    /// Falls back to the configured default mode
    pub mode: Option<InterviewMode>,
    /// Plan returned by `POST /api/plans`, kept with the session
    #[serde(default)]
    pub plan: Option<InterviewPlan>,
}

impl CreateInterviewRequest {
    pub fn interview_context(&self) -> InterviewContext {
        InterviewContext::new(&*self.context, &*self.goals, &*self.additional_context)
    }
}

#[derive(Debug, Serialize)]
pub struct CreateInterviewResponse {
    pub session_id: String,
    pub mode: InterviewMode,
    /// The opening question
    pub message: String,
}

#[derive(Debug, Deserialize)]
pub struct ChatRequest {
    pub message: String,
}

#[derive(Debug, Serialize)]
pub struct ChatResponse {
    pub message: String,
}

// ============================================================================
// Plan Types
// ============================================================================

#[derive(Debug, Default, Deserialize)]
pub struct CreatePlanRequest {
    #[serde(default)]
    pub context: String,
    #[serde(default)]
    pub background: String,
    #[serde(default)]
    pub goals: String,
}

#[derive(Debug, Serialize)]
pub struct CreatePlanResponse {
    pub plan: InterviewPlan,
    pub initialization_message: String,
}
