//! Single-agent interviewer.
//!
//! The simple mode: one completion call per turn, steered by the
//! conversation tracker's constraints.

use tracing::debug;

use super::context::InterviewContext;
use super::prompts::{interviewer_system_prompt, interviewer_user_prompt};
use super::questions::extract_question;
use super::state::ConversationState;
use crate::ai::types::ChatMessage;
use crate::ai::SharedCompletionClient;
use crate::error::{InterviewError, InterviewResult};

/// Interviewer that writes into a caller-owned conversation state
pub struct SingleAgentResponder {
    client: SharedCompletionClient,
}

impl SingleAgentResponder {
    pub fn new(client: SharedCompletionClient) -> Self {
        Self { client }
    }

    /// Produce the interviewer's next utterance for `message`.
    ///
    /// The raw reply is returned unmodified. Its first question (if any) is
    /// remembered so later prompts list it as already asked. Completion
    /// failures propagate; the state update from this message is kept.
    pub async fn respond(
        &self,
        state: &mut ConversationState,
        message: &str,
        context: &InterviewContext,
    ) -> InterviewResult<String> {
        state.update(message);
        self.ask(state, message, context).await
    }

    /// Produce an opening line for `prompt` without treating it as a
    /// respondent message
    pub async fn open(
        &self,
        state: &mut ConversationState,
        prompt: &str,
        context: &InterviewContext,
    ) -> InterviewResult<String> {
        self.ask(state, prompt, context).await
    }

    async fn ask(
        &self,
        state: &mut ConversationState,
        message: &str,
        context: &InterviewContext,
    ) -> InterviewResult<String> {
        let messages = [
            ChatMessage::system(interviewer_system_prompt(state)),
            ChatMessage::user(interviewer_user_prompt(message, context, state)),
        ];

        let reply = self
            .client
            .complete(&messages)
            .await
            .map_err(InterviewError::Completion)?;

        match extract_question(&reply) {
            Some(question) => {
                debug!("Recording asked question: {}", question);
                state.record_question(&question);
            }
            None => debug!("Reply contained no question; state unchanged"),
        }

        Ok(reply)
    }
}
