//! Parley core
//!
//! Conversational interview engines on top of a chat-completion service:
//! a conversation state tracker with a single-agent responder, a
//! three-persona deliberation panel, and an interview plan generator.

pub mod ai;
pub mod config;
pub mod constants;
pub mod error;
pub mod interview;
pub mod paths;
pub mod planning;
pub mod session;
pub mod storage;

#[cfg(any(test, feature = "testing"))]
pub mod testing;

pub use error::{InterviewError, InterviewResult};
pub use session::{InterviewMode, InterviewSession};
