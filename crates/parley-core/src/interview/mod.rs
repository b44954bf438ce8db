//! Interview engines
//!
//! Two ways to produce the interviewer's next utterance:
//! - [`SingleAgentResponder`]: one completion per turn, steered by a
//!   [`ConversationState`] tracker
//! - [`DeliberationPanel`]: a fixed roster of personas discussing each turn

pub mod context;
pub mod panel;
pub mod prompts;
pub mod questions;
pub mod responder;
pub mod roster;
pub mod state;

pub use context::InterviewContext;
pub use panel::{DeliberationPanel, DiscussionTurn, OPENING_PROMPT};
pub use responder::SingleAgentResponder;
pub use roster::{AgentPersona, DEFAULT_ROSTER};
pub use state::{ConversationState, TurnSignals};
