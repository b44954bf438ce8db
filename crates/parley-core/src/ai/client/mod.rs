//! AI client
//!
//! HTTP client for chat-completion providers, split into configuration,
//! request plumbing, and the simple call path.

mod config;
mod core;
mod simple;

pub use self::config::AiClientConfig;
pub use self::core::AiClient;
