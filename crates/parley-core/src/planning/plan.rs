//! Interview plan data

use serde::{Deserialize, Serialize};

use crate::error::{InterviewError, InterviewResult};

/// Structured advice on how to run an interview.
///
/// Parsing is strict: every field is required and unknown fields are rejected.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct InterviewPlan {
    pub interview_type: String,
    pub key_topics: Vec<String>,
    pub suggested_questions: Vec<String>,
    pub personality_traits: Vec<String>,
    pub communication_style: String,
    pub special_considerations: Vec<String>,
}

impl InterviewPlan {
    /// Generic plan used whenever a generated one is unavailable
    pub fn fallback() -> Self {
        Self {
            interview_type: "general".to_string(),
            key_topics: vec![
                "background".to_string(),
                "experience".to_string(),
                "goals".to_string(),
            ],
            suggested_questions: vec!["Could you tell me about yourself?".to_string()],
            personality_traits: vec!["professional".to_string(), "friendly".to_string()],
            communication_style: "balanced and professional".to_string(),
            special_considerations: vec!["maintain professional atmosphere".to_string()],
        }
    }

    /// Parse a model reply, tolerating a surrounding markdown code fence
    pub fn parse(reply: &str) -> InterviewResult<Self> {
        let body = strip_code_fence(reply);
        serde_json::from_str(body).map_err(|e| InterviewError::PlanParse(e.to_string()))
    }
}

/// Unwrap a reply of the form ```` ```json\n{..}\n``` ````.
/// Text without a fence is returned trimmed.
fn strip_code_fence(reply: &str) -> &str {
    let trimmed = reply.trim();
    let Some(rest) = trimmed.strip_prefix("```") else {
        return trimmed;
    };
    // Drop the info string (e.g. `json`) on the opening line
    let rest = match rest.find('\n') {
        Some(idx) => &rest[idx + 1..],
        None => rest,
    };
    rest.strip_suffix("```").unwrap_or(rest).trim()
}
