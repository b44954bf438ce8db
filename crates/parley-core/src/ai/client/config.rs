//! AI Client configuration
//!
//! Provider-agnostic configuration for the completion client.

use std::collections::HashMap;

use crate::ai::providers::{get_provider, ApiFormat, AuthHeader, ProviderId};
use crate::constants;

/// Configuration for the AI client
#[derive(Debug, Clone)]
pub struct AiClientConfig {
    /// Model ID to use for API calls
    pub model: String,
    /// Sampling temperature sent with every request
    pub temperature: f32,
    /// Maximum output tokens
    pub max_tokens: usize,
    /// Optional base URL override (defaults to provider default)
    pub base_url: Option<String>,
    /// How to send authentication header
    pub auth_header: AuthHeader,
    /// Which provider this config is for
    pub provider_id: ProviderId,
    /// API format for this endpoint
    pub api_format: ApiFormat,
    /// Custom headers to send with requests
    pub custom_headers: HashMap<String, String>,
    /// Whole-request timeout; `None` waits indefinitely
    pub request_timeout_secs: Option<u64>,
}

impl Default for AiClientConfig {
    fn default() -> Self {
        Self {
            model: constants::ai::DEFAULT_MODEL.to_string(),
            temperature: constants::ai::DEFAULT_TEMPERATURE,
            max_tokens: constants::ai::MAX_OUTPUT_TOKENS,
            base_url: None,
            auth_header: AuthHeader::Bearer,
            provider_id: ProviderId::OpenAI,
            api_format: ApiFormat::OpenAI,
            custom_headers: HashMap::new(),
            request_timeout_secs: None,
        }
    }
}

impl AiClientConfig {
    /// Build a config from a built-in provider entry
    ///
    /// Falls back to the provider's default model when `model` is `None`.
    pub fn for_provider(provider_id: ProviderId, model: Option<&str>) -> Self {
        let Some(provider) = get_provider(provider_id) else {
            return Self::default();
        };

        let mut custom_headers = HashMap::new();
        if provider.api_format == ApiFormat::Anthropic {
            custom_headers.insert(
                "anthropic-version".to_string(),
                constants::ai::ANTHROPIC_VERSION.to_string(),
            );
        }

        Self {
            model: model.unwrap_or(provider.default_model()).to_string(),
            base_url: Some(provider.base_url.clone()),
            auth_header: provider.auth_header,
            provider_id,
            api_format: provider.api_format,
            custom_headers,
            ..Self::default()
        }
    }

    /// Get the API URL to use
    pub fn api_url(&self) -> String {
        if let Some(base) = &self.base_url {
            base.clone()
        } else {
            get_provider(self.provider_id)
                .map(|p| p.base_url.clone())
                .unwrap_or_else(|| crate::ai::providers::OPENAI_CHAT_API.to_string())
        }
    }

    /// Get the provider ID
    pub fn provider_id(&self) -> ProviderId {
        self.provider_id
    }

    /// Check if this config uses the Anthropic Messages format
    pub fn uses_anthropic_format(&self) -> bool {
        matches!(self.api_format, ApiFormat::Anthropic)
    }
}
