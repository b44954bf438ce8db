//! AI provider layer
//!
//! Handles communication with chat-completion providers (OpenAI-compatible
//! and Anthropic APIs) behind the `CompletionClient` seam.

pub mod client;
pub mod completion;
pub mod providers;
pub mod types;

pub use completion::{CompletionClient, SharedCompletionClient};
