//! Interview sessions
//!
//! An `InterviewSession` bundles everything one respondent's interview
//! needs: the context, the conversation tracker, the engine (single
//! responder or panel) and the transcript. Sessions are plain `&mut self` state
//! machines; callers that share them across tasks wrap them in a lock.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::ai::SharedCompletionClient;
use crate::error::{InterviewError, InterviewResult};
use crate::interview::questions::extract_question;
use crate::interview::{
    ConversationState, DeliberationPanel, InterviewContext, SingleAgentResponder, OPENING_PROMPT,
};
use crate::planning::InterviewPlan;

/// Which engine produces the interviewer's turns
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InterviewMode {
    #[default]
    Panel,
    Single,
}

impl InterviewMode {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Panel => "panel",
            Self::Single => "single",
        }
    }
}

impl fmt::Display for InterviewMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for InterviewMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "panel" => Ok(Self::Panel),
            "single" => Ok(Self::Single),
            other => Err(format!("unknown interview mode '{other}' (expected panel or single)")),
        }
    }
}

/// One exchange. The opening turn has no respondent message.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TranscriptEntry {
    pub respondent: Option<String>,
    pub interviewer: String,
    pub at: DateTime<Utc>,
}

/// Listing view of a session
#[derive(Debug, Clone, Serialize)]
pub struct SessionSummary {
    pub id: String,
    pub mode: InterviewMode,
    pub turns: usize,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Full view of a session
#[derive(Debug, Clone, Serialize)]
pub struct SessionSnapshot {
    #[serde(flatten)]
    pub summary: SessionSummary,
    pub context: InterviewContext,
    pub transcript: Vec<TranscriptEntry>,
    pub conversation_state: ConversationState,
    pub plan: Option<InterviewPlan>,
}

enum Engine {
    Single(SingleAgentResponder),
    Panel(DeliberationPanel),
}

pub struct InterviewSession {
    id: String,
    context: InterviewContext,
    mode: InterviewMode,
    state: ConversationState,
    engine: Engine,
    transcript: Vec<TranscriptEntry>,
    plan: Option<InterviewPlan>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl InterviewSession {
    pub fn new(client: SharedCompletionClient, context: InterviewContext, mode: InterviewMode) -> Self {
        let engine = match mode {
            InterviewMode::Single => Engine::Single(SingleAgentResponder::new(client)),
            InterviewMode::Panel => Engine::Panel(DeliberationPanel::new(client, context.clone())),
        };
        let now = Utc::now();

        Self {
            id: uuid::Uuid::new_v4().to_string(),
            context,
            mode,
            state: ConversationState::new(),
            engine,
            transcript: Vec::new(),
            plan: None,
            created_at: now,
            updated_at: now,
        }
    }

    /// Attach a previously generated plan
    pub fn with_plan(mut self, plan: InterviewPlan) -> Self {
        self.plan = Some(plan);
        self
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn mode(&self) -> InterviewMode {
        self.mode
    }

    pub fn context(&self) -> &InterviewContext {
        &self.context
    }

    pub fn transcript(&self) -> &[TranscriptEntry] {
        &self.transcript
    }

    pub fn plan(&self) -> Option<&InterviewPlan> {
        self.plan.as_ref()
    }

    pub fn conversation_state(&self) -> &ConversationState {
        &self.state
    }

    /// Produce the opening question
    pub async fn start(&mut self) -> InterviewResult<String> {
        let reply = match &mut self.engine {
            Engine::Single(responder) => {
                responder
                    .open(&mut self.state, OPENING_PROMPT, &self.context)
                    .await?
            }
            Engine::Panel(panel) => {
                let reply = panel.discuss(OPENING_PROMPT).await?;
                record_panel_question(&mut self.state, &reply);
                reply
            }
        };
        info!("Interview {} started ({} mode)", self.id, self.mode);
        self.push(None, &reply);
        Ok(reply)
    }

    /// Handle one respondent message and return the interviewer's reply.
    ///
    /// The tracker sees every accepted message once, before either engine
    /// runs, and keeps that update even when the turn then fails.
    pub async fn chat(&mut self, message: &str) -> InterviewResult<String> {
        let message = message.trim();
        if message.is_empty() {
            return Err(InterviewError::EmptyMessage);
        }

        let reply = match &mut self.engine {
            Engine::Single(responder) => {
                responder
                    .respond(&mut self.state, message, &self.context)
                    .await?
            }
            Engine::Panel(panel) => {
                self.state.update(message);
                let reply = panel.discuss(message).await?;
                record_panel_question(&mut self.state, &reply);
                reply
            }
        };
        self.push(Some(message.to_string()), &reply);
        Ok(reply)
    }

    pub fn summary(&self) -> SessionSummary {
        SessionSummary {
            id: self.id.clone(),
            mode: self.mode,
            turns: self.transcript.len(),
            created_at: self.created_at,
            updated_at: self.updated_at,
        }
    }

    pub fn snapshot(&self) -> SessionSnapshot {
        SessionSnapshot {
            summary: self.summary(),
            context: self.context.clone(),
            transcript: self.transcript.clone(),
            conversation_state: self.state.clone(),
            plan: self.plan.clone(),
        }
    }

    fn push(&mut self, respondent: Option<String>, interviewer: &str) {
        let now = Utc::now();
        self.transcript.push(TranscriptEntry {
            respondent,
            interviewer: interviewer.to_string(),
            at: now,
        });
        self.updated_at = now;
    }
}

fn record_panel_question(state: &mut ConversationState, reply: &str) {
    if let Some(question) = extract_question(reply) {
        state.record_question(&question);
    }
}
