//! Runtime configuration
//!
//! Read from `~/.parley/config.toml` (missing file means defaults), then
//! overridden by `PARLEY_PROVIDER`, `PARLEY_MODEL`, `PARLEY_BASE_URL`
//! and `PORT`.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::ai::client::{AiClient, AiClientConfig};
use crate::ai::providers::{parse_provider, ProviderId};
use crate::constants;
use crate::paths;
use crate::session::InterviewMode;
use crate::storage::CredentialStore;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ParleyConfig {
    /// `openai`, `openrouter` or `anthropic`
    pub provider: Option<String>,
    /// Defaults to the provider's default model
    pub model: Option<String>,
    pub temperature: f32,
    pub max_tokens: usize,
    /// Full completion endpoint URL, e.g. a local OpenAI-compatible server
    pub base_url: Option<String>,
    pub request_timeout_secs: Option<u64>,
    pub port: u16,
    pub default_mode: InterviewMode,
}

impl Default for ParleyConfig {
    fn default() -> Self {
        Self {
            provider: None,
            model: None,
            temperature: constants::ai::DEFAULT_TEMPERATURE,
            max_tokens: constants::ai::MAX_OUTPUT_TOKENS,
            base_url: None,
            request_timeout_secs: None,
            port: constants::server::DEFAULT_PORT,
            default_mode: InterviewMode::default(),
        }
    }
}

impl ParleyConfig {
    /// Load `~/.parley/config.toml` and apply environment overrides
    pub fn load() -> Result<Self> {
        let mut config = Self::load_from_path(&paths::config_file())?;
        config.apply_env_overrides();
        Ok(config)
    }

    pub fn load_from_path(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let contents = fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display()))?;
        toml::from_str(&contents).with_context(|| format!("Failed to parse {}", path.display()))
    }

    pub fn apply_env_overrides(&mut self) {
        self.apply_overrides_with(|name| std::env::var(name).ok());
    }

    fn apply_overrides_with(&mut self, env: impl Fn(&str) -> Option<String>) {
        if let Some(provider) = env("PARLEY_PROVIDER") {
            self.provider = Some(provider);
        }
        if let Some(model) = env("PARLEY_MODEL") {
            self.model = Some(model);
        }
        if let Some(url) = env("PARLEY_BASE_URL") {
            self.base_url = Some(url);
        }
        if let Some(port) = env("PORT") {
            match port.parse() {
                Ok(port) => self.port = port,
                Err(_) => warn!("Ignoring invalid PORT value '{}'", port),
            }
        }
    }

    /// Configured provider; unknown names fall back to the default
    pub fn provider_id(&self) -> ProviderId {
        match self.provider.as_deref() {
            None => ProviderId::default(),
            Some(name) => parse_provider(name).unwrap_or_else(|| {
                warn!("Unknown provider '{}', using {}", name, ProviderId::default());
                ProviderId::default()
            }),
        }
    }

    pub fn client_config(&self) -> AiClientConfig {
        let mut config = AiClientConfig::for_provider(self.provider_id(), self.model.as_deref());
        config.temperature = self.temperature;
        config.max_tokens = self.max_tokens;
        config.request_timeout_secs = self.request_timeout_secs;
        if let Some(url) = &self.base_url {
            config.base_url = Some(url.clone());
        }
        config
    }

    /// Build a completion client, or `None` when no API key is available
    pub fn build_ai_client(&self, credentials: &CredentialStore) -> Result<Option<AiClient>> {
        let provider = self.provider_id();
        let Some(api_key) = credentials.resolve(&provider) else {
            warn!(
                "No API key for {} (set {} or store one with `parley login`); interviews unavailable",
                provider,
                provider.api_key_env()
            );
            return Ok(None);
        };
        AiClient::new(self.client_config(), api_key).map(Some)
    }
}
