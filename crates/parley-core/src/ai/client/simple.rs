//! Simple (non-streaming) API calls
//!
//! Every interview call is a single blocking round-trip: the full message
//! list goes out, one text reply comes back.

use anyhow::{Context, Result};
use async_trait::async_trait;
use serde_json::Value;
use tracing::debug;

use super::config::AiClientConfig;
use super::core::AiClient;
use crate::ai::completion::CompletionClient;
use crate::ai::types::{ChatMessage, Role};

fn trim_or_empty(text: Option<&str>) -> String {
    text.unwrap_or("").trim().to_string()
}

fn collect_anthropic_text(blocks: &[Value]) -> String {
    let mut text = String::new();
    for block in blocks {
        // Thinking blocks can precede text blocks
        if block.get("type").and_then(|t| t.as_str()) != Some("text") {
            continue;
        }
        if let Some(chunk) = block.get("text").and_then(|t| t.as_str()) {
            text.push_str(chunk);
        }
    }
    text
}

/// Build an OpenAI chat/completions request body
pub(crate) fn openai_body(config: &AiClientConfig, messages: &[ChatMessage]) -> Value {
    let messages: Vec<Value> = messages
        .iter()
        .map(|m| serde_json::json!({"role": m.role.as_str(), "content": m.content}))
        .collect();

    serde_json::json!({
        "model": config.model,
        "temperature": config.temperature,
        "max_tokens": config.max_tokens,
        "messages": messages,
    })
}

/// Build an Anthropic Messages request body
///
/// System messages are lifted into the top-level `system` field. Consecutive
/// same-role messages are merged and a filler user turn is appended when the
/// list would otherwise end on an assistant turn (which Anthropic treats as
/// a prefill).
pub(crate) fn anthropic_body(config: &AiClientConfig, messages: &[ChatMessage]) -> Value {
    let system = messages
        .iter()
        .filter(|m| m.role == Role::System)
        .map(|m| m.content.as_str())
        .collect::<Vec<_>>()
        .join("\n\n");

    let mut turns: Vec<(Role, String)> = Vec::new();
    for msg in messages.iter().filter(|m| m.role != Role::System) {
        match turns.last_mut() {
            Some((role, content)) if *role == msg.role => {
                content.push_str("\n\n");
                content.push_str(&msg.content);
            }
            _ => turns.push((msg.role, msg.content.clone())),
        }
    }

    if turns.first().map(|(r, _)| *r) != Some(Role::User) {
        debug!("Inserting filler user message to open the conversation");
        turns.insert(0, (Role::User, ".".to_string()));
    }
    if turns.last().map(|(r, _)| *r) == Some(Role::Assistant) {
        debug!("Inserting filler user message to maintain alternation");
        turns.push((Role::User, ".".to_string()));
    }

    let api_messages: Vec<Value> = turns
        .into_iter()
        .map(|(role, content)| serde_json::json!({"role": role.as_str(), "content": content}))
        .collect();

    let mut body = serde_json::json!({
        "model": config.model,
        "temperature": config.temperature,
        "max_tokens": config.max_tokens,
        "messages": api_messages,
    });
    if !system.is_empty() {
        body["system"] = Value::String(system);
    }
    body
}

impl AiClient {
    /// Make a simple non-streaming chat call
    ///
    /// Returns the text content directly. Routes to the appropriate
    /// format based on the configured API format.
    pub async fn call_chat(&self, messages: &[ChatMessage]) -> Result<String> {
        if self.config().uses_anthropic_format() {
            return self.call_chat_anthropic(messages).await;
        }
        self.call_chat_openai(messages).await
    }

    /// Simple non-streaming call using OpenAI format
    async fn call_chat_openai(&self, messages: &[ChatMessage]) -> Result<String> {
        let body = openai_body(self.config(), messages);

        debug!(
            "OpenAI-format call to model {} with {} messages",
            self.config().model,
            messages.len()
        );

        let request = self.build_request(&self.config().api_url());
        let response = request
            .json(&body)
            .send()
            .await
            .context("could not reach completion endpoint")?;
        let response = self.handle_error_response(response).await?;

        let json: Value = response
            .json()
            .await
            .context("completion response was not JSON")?;

        Ok(trim_or_empty(
            json.get("choices")
                .and_then(|c| c.as_array())
                .and_then(|arr| arr.first())
                .and_then(|choice| choice.get("message"))
                .and_then(|msg| msg.get("content"))
                .and_then(|t| t.as_str()),
        ))
    }

    /// Simple non-streaming call using Anthropic format
    async fn call_chat_anthropic(&self, messages: &[ChatMessage]) -> Result<String> {
        let body = anthropic_body(self.config(), messages);

        debug!(
            "Anthropic-format call to model {} with {} messages",
            self.config().model,
            messages.len()
        );

        let request = self.build_request(&self.config().api_url());
        let response = request
            .json(&body)
            .send()
            .await
            .context("could not reach completion endpoint")?;
        let response = self.handle_error_response(response).await?;

        let json: Value = response
            .json()
            .await
            .context("completion response was not JSON")?;

        let text = json
            .get("content")
            .and_then(|c| c.as_array())
            .map(|arr| collect_anthropic_text(arr))
            .unwrap_or_default();

        Ok(trim_or_empty(Some(&text)))
    }
}

#[async_trait]
impl CompletionClient for AiClient {
    async fn complete(&self, messages: &[ChatMessage]) -> Result<String> {
        self.call_chat(messages).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ai::providers::ProviderId;

    #[test]
    fn openai_body_keeps_roles_in_order() {
        let config = AiClientConfig::default();
        let body = openai_body(
            &config,
            &[
                ChatMessage::system("sys"),
                ChatMessage::user("hello"),
                ChatMessage::assistant("prior"),
            ],
        );

        assert_eq!(body["model"], "gpt-3.5-turbo");
        assert!((body["temperature"].as_f64().unwrap() - 0.7).abs() < 1e-6);
        let roles: Vec<&str> = body["messages"]
            .as_array()
            .unwrap()
            .iter()
            .map(|m| m["role"].as_str().unwrap())
            .collect();
        assert_eq!(roles, vec!["system", "user", "assistant"]);
    }

    #[test]
    fn anthropic_body_lifts_system_and_merges_assistants() {
        let config = AiClientConfig::for_provider(ProviderId::Anthropic, None);
        let body = anthropic_body(
            &config,
            &[
                ChatMessage::system("persona"),
                ChatMessage::user("prompt"),
                ChatMessage::assistant("first"),
                ChatMessage::assistant("second"),
            ],
        );

        assert_eq!(body["system"], "persona");
        let messages = body["messages"].as_array().unwrap();
        assert_eq!(messages.len(), 3);
        assert_eq!(messages[0]["role"], "user");
        assert_eq!(messages[1]["role"], "assistant");
        assert_eq!(messages[1]["content"], "first\n\nsecond");
        assert_eq!(messages[2]["role"], "user");
    }

    #[test]
    fn anthropic_text_skips_non_text_blocks() {
        let blocks = vec![
            serde_json::json!({"type": "thinking", "thinking": "hmm"}),
            serde_json::json!({"type": "text", "text": "Hello "}),
            serde_json::json!({"type": "text", "text": "there"}),
        ];
        assert_eq!(collect_anthropic_text(&blocks), "Hello there");
    }
}
