//! Completion boundary
//!
//! Everything above this trait treats the LLM as an opaque function:
//! role-tagged messages in, generated text out. Failures are not
//! classified; a call either succeeds or fails.

use std::sync::Arc;

use anyhow::Result;
use async_trait::async_trait;

use crate::ai::types::ChatMessage;

/// Anything that can turn an ordered message list into a reply
#[async_trait]
pub trait CompletionClient: Send + Sync {
    /// Generate a reply for `messages`
    async fn complete(&self, messages: &[ChatMessage]) -> Result<String>;
}

/// Shared handle to a completion client
pub type SharedCompletionClient = Arc<dyn CompletionClient>;
