//! Parley Server
//!
//! Standalone binary for the interview API.

use parley_core::config::ParleyConfig;
use parley_server::ServerConfig;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .init();

    let settings = ParleyConfig::load()?;
    parley_server::start_server(ServerConfig { settings }).await
}
