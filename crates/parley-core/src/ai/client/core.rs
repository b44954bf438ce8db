//! Core AI client
//!
//! Owns the HTTP client, configuration and API key. Request helpers here
//! are shared by every call path.

use std::time::Duration;

use anyhow::{anyhow, Context, Result};
use reqwest::{Client, RequestBuilder, Response};

use super::config::AiClientConfig;
use crate::ai::providers::{AuthHeader, ProviderId};

/// Maximum number of error-body characters carried into an error message
const ERROR_BODY_LIMIT: usize = 500;

/// HTTP client for a single chat-completion provider
pub struct AiClient {
    http: Client,
    config: AiClientConfig,
    api_key: String,
}

impl AiClient {
    /// Create a new client; fails if the HTTP client can't be built with
    /// the configured settings
    pub fn new(config: AiClientConfig, api_key: String) -> Result<Self> {
        let mut builder = Client::builder();
        if let Some(secs) = config.request_timeout_secs {
            builder = builder.timeout(Duration::from_secs(secs));
        }
        let http = builder
            .build()
            .context("Failed to build HTTP client")?;

        Ok(Self {
            http,
            config,
            api_key,
        })
    }

    pub fn config(&self) -> &AiClientConfig {
        &self.config
    }

    pub fn provider_id(&self) -> ProviderId {
        self.config.provider_id()
    }

    /// Build a POST request with auth and custom headers applied
    pub(crate) fn build_request(&self, url: &str) -> RequestBuilder {
        let mut request = self
            .http
            .post(url)
            .header("content-type", "application/json");

        request = match self.config.auth_header {
            AuthHeader::Bearer => request.bearer_auth(&self.api_key),
            AuthHeader::XApiKey => request.header("x-api-key", &self.api_key),
        };

        for (key, value) in &self.config.custom_headers {
            request = request.header(key.as_str(), value.as_str());
        }

        request
    }

    /// Turn a non-success response into an error carrying status and body
    pub(crate) async fn handle_error_response(&self, response: Response) -> Result<Response> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let body = response.text().await.unwrap_or_default();
        let body: String = body.chars().take(ERROR_BODY_LIMIT).collect();
        Err(anyhow!(
            "{} API error ({}): {}",
            self.provider_id(),
            status,
            body
        ))
    }
}
