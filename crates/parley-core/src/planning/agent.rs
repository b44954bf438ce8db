//! Plan generation against the completion service

use serde::Serialize;
use tracing::{debug, warn};

use super::plan::InterviewPlan;
use crate::ai::types::ChatMessage;
use crate::ai::SharedCompletionClient;
use crate::error::{InterviewError, InterviewResult};

const PLANNER_SYSTEM_PROMPT: &str =
    "You are an expert interview planner, skilled at creating strategic interview approaches.";

const INITIALIZER_SYSTEM_PROMPT: &str =
    "You are initializing an interview session based on a strategic plan.";

/// Message used when the initialization call fails
pub const DEFAULT_INITIALIZATION_MESSAGE: &str =
    "Interview session initialized with standard parameters.";

/// A plan plus the model's summary of how the session will run
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AgentInitialization {
    pub initialization_message: String,
    pub plan: InterviewPlan,
}

pub struct PlanningAgent {
    client: SharedCompletionClient,
}

impl PlanningAgent {
    pub fn new(client: SharedCompletionClient) -> Self {
        Self { client }
    }

    /// Generate a plan, falling back to [`InterviewPlan::fallback`] on any failure
    pub async fn create_plan(&self, context: &str, background: &str, goals: &str) -> InterviewPlan {
        match self.try_create_plan(context, background, goals).await {
            Ok(plan) => plan,
            Err(e) => {
                warn!("Using fallback interview plan: {}", e);
                InterviewPlan::fallback()
            }
        }
    }

    /// Generate a plan, surfacing completion and parse failures
    pub async fn try_create_plan(
        &self,
        context: &str,
        background: &str,
        goals: &str,
    ) -> InterviewResult<InterviewPlan> {
        let messages = [
            ChatMessage::system(PLANNER_SYSTEM_PROMPT),
            ChatMessage::user(plan_prompt(context, background, goals)),
        ];

        let reply = self
            .client
            .complete(&messages)
            .await
            .map_err(InterviewError::Completion)?;
        debug!("Plan reply: {} chars", reply.len());

        InterviewPlan::parse(&reply)
    }

    /// Ask the model to brief the interview session on `plan`
    pub async fn initialize_agents(&self, plan: InterviewPlan) -> AgentInitialization {
        let messages = [
            ChatMessage::system(INITIALIZER_SYSTEM_PROMPT),
            ChatMessage::user(initialization_prompt(&plan)),
        ];

        let initialization_message = match self.client.complete(&messages).await {
            Ok(message) => message,
            Err(e) => {
                warn!("Initialization call failed: {:#}", e);
                DEFAULT_INITIALIZATION_MESSAGE.to_string()
            }
        };

        AgentInitialization {
            initialization_message,
            plan,
        }
    }
}

fn plan_prompt(context: &str, background: &str, goals: &str) -> String {
    format!(
        r#"
As an expert interview planner, analyze the following information and create a detailed interview plan:

CONTEXT:
{context}

CANDIDATE BACKGROUND:
{background}

INTERVIEW GOALS:
{goals}

Based on this information, provide a structured analysis as a single JSON object in exactly this format, with no other text:
{{
    "interview_type": "type of interview and approach",
    "key_topics": ["list of main topics to cover"],
    "suggested_questions": ["list of strategic questions"],
    "personality_traits": ["traits the interviewer should exhibit"],
    "communication_style": "recommended communication approach",
    "special_considerations": ["important points to keep in mind"]
}}
"#
    )
}

fn initialization_prompt(plan: &InterviewPlan) -> String {
    format!(
        r#"
Initialize interview session with the following parameters:

Interview Type: {kind}
Key Topics: {topics}
Personality Traits: {traits}
Communication Style: {style}
Special Considerations: {considerations}

Initial questions to consider: {questions}
"#,
        kind = plan.interview_type,
        topics = plan.key_topics.join(", "),
        traits = plan.personality_traits.join(", "),
        style = plan.communication_style,
        considerations = plan.special_considerations.join(", "),
        questions = plan.suggested_questions.join(", "),
    )
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::testing::ScriptedClient;

    const PLAN_JSON: &str = r#"{"interview_type": "exploratory", "key_topics": ["tools"],
        "suggested_questions": ["Which tool do you use most?"], "personality_traits": ["patient"],
        "communication_style": "casual", "special_considerations": []}"#;

    #[tokio::test]
    async fn prose_reply_falls_back() {
        let client = Arc::new(ScriptedClient::new(["Sure! Here's what I'd do: start friendly."]));
        let agent = PlanningAgent::new(client);

        let plan = agent.create_plan("ctx", "bg", "goals").await;
        assert_eq!(plan, InterviewPlan::fallback());
    }

    #[tokio::test]
    async fn valid_reply_is_parsed() {
        let client = Arc::new(ScriptedClient::new([PLAN_JSON]));
        let agent = PlanningAgent::new(client.clone());

        let plan = agent.create_plan("Support engineers", "5 years", "Find tooling gaps").await;
        assert_eq!(plan.interview_type, "exploratory");
        assert!(plan.special_considerations.is_empty());

        let calls = client.calls();
        assert_eq!(calls[0][0].content, PLANNER_SYSTEM_PROMPT);
        assert!(calls[0][1].content.contains("CANDIDATE BACKGROUND:\n5 years"));
    }

    #[tokio::test]
    async fn try_create_plan_reports_parse_error() {
        let client = Arc::new(ScriptedClient::new(["not json"]));
        let agent = PlanningAgent::new(client);

        let err = agent.try_create_plan("", "", "").await.unwrap_err();
        assert!(matches!(err, InterviewError::PlanParse(_)));
    }

    #[tokio::test]
    async fn adapter_failure_falls_back() {
        let client = Arc::new(ScriptedClient::failing("connection refused"));
        let agent = PlanningAgent::new(client);

        assert_eq!(agent.create_plan("", "", "").await, InterviewPlan::fallback());
    }

    #[tokio::test]
    async fn initialization_summarises_plan() {
        let client = Arc::new(ScriptedClient::new(["Ready to begin."]));
        let agent = PlanningAgent::new(client.clone());

        let init = agent.initialize_agents(InterviewPlan::fallback()).await;
        assert_eq!(init.initialization_message, "Ready to begin.");
        assert_eq!(init.plan, InterviewPlan::fallback());
        assert!(client.calls()[0][1]
            .content
            .contains("Key Topics: background, experience, goals"));
    }

    #[tokio::test]
    async fn initialization_failure_uses_default_message() {
        let client = Arc::new(ScriptedClient::failing("quota"));
        let agent = PlanningAgent::new(client);

        let init = agent.initialize_agents(InterviewPlan::fallback()).await;
        assert_eq!(init.initialization_message, DEFAULT_INITIALIZATION_MESSAGE);
    }
}
