//! Test doubles for the completion boundary.

use std::collections::VecDeque;

use anyhow::{anyhow, Result};
use async_trait::async_trait;
use parking_lot::Mutex;

use crate::ai::types::ChatMessage;
use crate::ai::CompletionClient;

/// A `CompletionClient` that replays queued replies and records every
/// message list it was called with.
///
/// Once the queue is exhausted every further call fails, or never
/// completes when built with [`ScriptedClient::stall_when_exhausted`].
pub struct ScriptedClient {
    replies: Mutex<VecDeque<Result<String, String>>>,
    always_fail: Option<String>,
    stall_when_exhausted: bool,
    calls: Mutex<Vec<Vec<ChatMessage>>>,
}

impl ScriptedClient {
    /// Replies returned in order, one per call
    pub fn new<I, S>(replies: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::from_results(replies.into_iter().map(|r| Ok(r.into())))
    }

    /// Mix of successes and failures, one per call
    pub fn from_results<I>(results: I) -> Self
    where
        I: IntoIterator<Item = Result<String, String>>,
    {
        Self {
            replies: Mutex::new(results.into_iter().collect()),
            always_fail: None,
            stall_when_exhausted: false,
            calls: Mutex::new(Vec::new()),
        }
    }

    /// Every call fails with `message`
    pub fn failing(message: impl Into<String>) -> Self {
        Self {
            replies: Mutex::new(VecDeque::new()),
            always_fail: Some(message.into()),
            stall_when_exhausted: false,
            calls: Mutex::new(Vec::new()),
        }
    }

    /// Calls past the scripted replies hang forever, like a provider
    /// that accepted the request and never answered
    pub fn stall_when_exhausted(mut self) -> Self {
        self.stall_when_exhausted = true;
        self
    }

    /// Message lists received so far, in call order
    pub fn calls(&self) -> Vec<Vec<ChatMessage>> {
        self.calls.lock().clone()
    }

    pub fn call_count(&self) -> usize {
        self.calls.lock().len()
    }
}

#[async_trait]
impl CompletionClient for ScriptedClient {
    async fn complete(&self, messages: &[ChatMessage]) -> Result<String> {
        self.calls.lock().push(messages.to_vec());

        if let Some(message) = &self.always_fail {
            return Err(anyhow!("{message}"));
        }

        let next = self.replies.lock().pop_front();
        match next {
            Some(Ok(reply)) => Ok(reply),
            Some(Err(message)) => Err(anyhow!("{message}")),
            None if self.stall_when_exhausted => std::future::pending().await,
            None => Err(anyhow!("scripted client has no replies left")),
        }
    }
}
