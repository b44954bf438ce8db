//! AI provider configuration
//!
//! Defines provider types, configurations, and the built-in provider
//! registry for the chat-completion endpoints Parley can talk to.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::LazyLock;

/// Standard OpenAI Chat Completions endpoint
pub const OPENAI_CHAT_API: &str = "https://api.openai.com/v1/chat/completions";

/// OpenRouter's OpenAI-compatible endpoint
pub const OPENROUTER_CHAT_API: &str = "https://openrouter.ai/api/v1/chat/completions";

/// Anthropic Messages endpoint
pub const ANTHROPIC_MESSAGES_API: &str = "https://api.anthropic.com/v1/messages";

/// Unique identifier for each supported provider
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum ProviderId {
    #[default]
    OpenAI,
    OpenRouter,
    Anthropic,
}

impl ProviderId {
    /// Get all available provider IDs
    pub fn all() -> &'static [ProviderId] {
        &[
            ProviderId::OpenAI,
            ProviderId::OpenRouter,
            ProviderId::Anthropic,
        ]
    }

    /// Get the storage key for this provider (used in credentials.json)
    pub fn storage_key(&self) -> &'static str {
        match self {
            ProviderId::OpenAI => "openai",
            ProviderId::OpenRouter => "openrouter",
            ProviderId::Anthropic => "anthropic",
        }
    }

    /// Environment variable consulted when no stored key exists
    pub fn api_key_env(&self) -> &'static str {
        match self {
            ProviderId::OpenAI => "OPENAI_API_KEY",
            ProviderId::OpenRouter => "OPENROUTER_API_KEY",
            ProviderId::Anthropic => "ANTHROPIC_API_KEY",
        }
    }
}

impl fmt::Display for ProviderId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ProviderId::OpenAI => write!(f, "OpenAI"),
            ProviderId::OpenRouter => write!(f, "OpenRouter"),
            ProviderId::Anthropic => write!(f, "Anthropic"),
        }
    }
}

/// Parse provider from a config or environment value.
pub fn parse_provider(s: &str) -> Option<ProviderId> {
    match s.trim().to_ascii_lowercase().as_str() {
        "openai" => Some(ProviderId::OpenAI),
        "openrouter" => Some(ProviderId::OpenRouter),
        "anthropic" | "claude" => Some(ProviderId::Anthropic),
        _ => None,
    }
}

/// How to send the API key in requests
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum AuthHeader {
    /// Use `Authorization: Bearer <key>` header (OpenAI style)
    #[default]
    Bearer,
    /// Use `x-api-key: <key>` header (Anthropic style)
    XApiKey,
}

/// Wire format of the completion endpoint
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum ApiFormat {
    /// `/v1/chat/completions` with `choices[0].message.content`
    #[default]
    OpenAI,
    /// `/v1/messages` with a top-level `system` field and content blocks
    Anthropic,
}

/// Configuration for an AI provider
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProviderConfig {
    /// Unique identifier
    pub id: ProviderId,
    /// Display name
    pub name: String,
    /// Full endpoint URL
    pub base_url: String,
    /// How to send authentication
    pub auth_header: AuthHeader,
    /// Request/response format
    pub api_format: ApiFormat,
    /// Model used when none is configured
    pub default_model: String,
}

impl ProviderConfig {
    /// Get the default model ID for this provider
    pub fn default_model(&self) -> &str {
        &self.default_model
    }
}

/// Lazily initialized built-in provider configurations
static BUILTIN_PROVIDERS: LazyLock<Vec<ProviderConfig>> = LazyLock::new(|| {
    vec![
        ProviderConfig {
            id: ProviderId::OpenAI,
            name: "OpenAI".to_string(),
            base_url: OPENAI_CHAT_API.to_string(),
            auth_header: AuthHeader::Bearer,
            api_format: ApiFormat::OpenAI,
            default_model: "gpt-3.5-turbo".to_string(),
        },
        ProviderConfig {
            id: ProviderId::OpenRouter,
            name: "OpenRouter".to_string(),
            base_url: OPENROUTER_CHAT_API.to_string(),
            auth_header: AuthHeader::Bearer,
            api_format: ApiFormat::OpenAI,
            default_model: "openai/gpt-4o-mini".to_string(),
        },
        ProviderConfig {
            id: ProviderId::Anthropic,
            name: "Anthropic".to_string(),
            base_url: ANTHROPIC_MESSAGES_API.to_string(),
            auth_header: AuthHeader::XApiKey,
            api_format: ApiFormat::Anthropic,
            default_model: "claude-3-5-haiku-latest".to_string(),
        },
    ]
});

/// Look up a built-in provider by ID
pub fn get_provider(id: ProviderId) -> Option<&'static ProviderConfig> {
    BUILTIN_PROVIDERS.iter().find(|p| p.id == id)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_storage_keys() {
        assert_eq!(ProviderId::OpenAI.storage_key(), "openai");
        assert_eq!(ProviderId::OpenRouter.storage_key(), "openrouter");
        assert_eq!(ProviderId::Anthropic.storage_key(), "anthropic");
    }

    #[test]
    fn test_every_provider_is_builtin() {
        assert_eq!(BUILTIN_PROVIDERS.len(), ProviderId::all().len());
        for id in ProviderId::all() {
            assert!(get_provider(*id).is_some(), "missing provider {id}");
        }
    }

    #[test]
    fn test_openai_is_default() {
        let provider = get_provider(ProviderId::default()).unwrap();
        assert_eq!(provider.base_url, OPENAI_CHAT_API);
        assert_eq!(provider.auth_header, AuthHeader::Bearer);
        assert_eq!(provider.default_model(), "gpt-3.5-turbo");
    }

    #[test]
    fn test_anthropic_config() {
        let provider = get_provider(ProviderId::Anthropic).unwrap();
        assert_eq!(provider.auth_header, AuthHeader::XApiKey);
        assert_eq!(provider.api_format, ApiFormat::Anthropic);
    }

    #[test]
    fn test_parse_provider() {
        assert_eq!(parse_provider("OpenAI"), Some(ProviderId::OpenAI));
        assert_eq!(parse_provider(" openrouter "), Some(ProviderId::OpenRouter));
        assert_eq!(parse_provider("claude"), Some(ProviderId::Anthropic));
        assert_eq!(parse_provider("minimax"), None);
    }
}
