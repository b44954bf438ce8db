//! Multi-agent deliberation panel.
//!
//! Every respondent message is discussed by the whole roster in order.
//! Later members see the earlier members' outputs from the same turn as
//! assistant messages, and every member sees the last few turns of the
//! discussion log. Only the first member's cleaned output is returned.

use tracing::{debug, info};

use super::context::InterviewContext;
use super::roster::{AgentPersona, DEFAULT_ROSTER};
use crate::ai::types::ChatMessage;
use crate::ai::SharedCompletionClient;
use crate::constants::interview::DISCUSSION_WINDOW;
use crate::error::{InterviewError, InterviewResult};

/// Message the panel discusses when an interview begins
pub const OPENING_PROMPT: &str =
    "The interview is starting. What should be our opening question?";

const NO_HISTORY: &str = "No previous discussion";

/// One respondent message and what each panel member said about it
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DiscussionTurn {
    pub respondent_message: String,
    pub agent_outputs: Vec<String>,
}

pub struct DeliberationPanel {
    client: SharedCompletionClient,
    context: InterviewContext,
    roster: Vec<AgentPersona>,
    log: Vec<DiscussionTurn>,
}

impl DeliberationPanel {
    /// Panel with the default three-member roster; the first persona's
    /// output is what the respondent sees
    pub fn new(client: SharedCompletionClient, context: InterviewContext) -> Self {
        Self {
            client,
            context,
            roster: DEFAULT_ROSTER.to_vec(),
            log: Vec::new(),
        }
    }

    pub fn log(&self) -> &[DiscussionTurn] {
        &self.log
    }

    /// Run one deliberation round and return the lead's cleaned output.
    ///
    /// Any member failing aborts the round; nothing is logged for it.
    pub async fn discuss(&mut self, message: &str) -> InterviewResult<String> {
        let prompt = self.discussion_prompt(message);
        let mut outputs: Vec<String> = Vec::with_capacity(self.roster.len());

        for persona in &self.roster {
            let mut messages = Vec::with_capacity(outputs.len() + 2);
            messages.push(ChatMessage::system(persona.system_prompt()));
            messages.push(ChatMessage::user(prompt.clone()));
            messages.extend(outputs.iter().cloned().map(ChatMessage::assistant));

            debug!(
                "Consulting {} ({} messages, prompt {} chars)",
                persona.name,
                messages.len(),
                prompt.len()
            );

            let raw = self
                .client
                .complete(&messages)
                .await
                .map_err(InterviewError::Completion)?;

            outputs.push(clean_agent_label(&raw));
        }

        let lead = outputs.first().cloned().unwrap_or_default();

        self.log.push(DiscussionTurn {
            respondent_message: message.to_string(),
            agent_outputs: outputs,
        });
        info!("Panel round {} complete", self.log.len());

        Ok(lead)
    }

    fn discussion_prompt(&self, message: &str) -> String {
        format!(
            r#"
Interview Context:
{ctx}

Interview Goals:
{goals}

Additional Context:
{extra}

Current User Response:
{message}

Previous Discussion:
{history}

Analyze the current state:
1. Lead Interviewer:
   - Assess if we're still aligned with our goals
   - Generate a focused follow-up question (max 15 words)
   - If off-topic, redirect back to relevant goals
2. Completeness Analyst: Identify information gaps
3. Depth Explorer: Suggest areas for deeper exploration

Choose the most appropriate next question based on the combined analysis.
Prioritize staying on track with our interview goals.

IMPORTANT: Start your response directly with the question or statement.
Do not use any prefixes, labels, or colons.
"#,
            ctx = self.context.context,
            goals = self.context.goals,
            extra = self.context.additional_context,
            history = format_discussion_history(&self.log),
        )
    }
}

/// Strip a leading `[Name]:` style label from a panel member's reply.
///
/// Everything up to and including the first `]` is dropped, then one
/// leading `:` if present. The label is whatever the model wrote; nothing
/// is prepended before cleaning. So a `]` anywhere in an unlabelled reply
/// counts too: `see [1] above` comes back as `above`, where a cleaner that
/// first forced a `[Name]: ` prefix onto the text would have kept it whole.
pub fn clean_agent_label(raw: &str) -> String {
    let text = match raw.split_once(']') {
        Some((_, rest)) => rest.trim(),
        None => raw,
    };
    match text.strip_prefix(':') {
        Some(rest) => rest.trim().to_string(),
        None => text.to_string(),
    }
}

/// Render the last few discussion turns for the next prompt
pub fn format_discussion_history(log: &[DiscussionTurn]) -> String {
    if log.is_empty() {
        return NO_HISTORY.to_string();
    }

    let start = log.len().saturating_sub(DISCUSSION_WINDOW);
    let mut lines = Vec::new();
    for turn in &log[start..] {
        lines.push(format!("User: {}", turn.respondent_message));
        lines.extend(turn.agent_outputs.iter().cloned());
    }
    lines.join("\n")
}
