//! `parley serve`: the HTTP API server
//!
//! On first run (no key for the configured provider), prompts for one.

use anyhow::Result;

use parley_core::config::ParleyConfig;
use parley_core::storage::CredentialStore;

use crate::login;

/// Run the serve command.
pub async fn run(settings: ParleyConfig) -> Result<()> {
    let store = CredentialStore::load().unwrap_or_default();
    if store.resolve(&settings.provider_id()).is_none() {
        login::run_setup_wizard()?;
    }

    print_banner(settings.port);

    // Initialize tracing for server mode (stdout, not file)
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .init();

    let server = parley_server::start_server(parley_server::ServerConfig { settings });

    tokio::select! {
        result = server => result?,
        _ = tokio::signal::ctrl_c() => println!("\n  Shutting down..."),
    }

    Ok(())
}

fn print_banner(port: u16) {
    println!();
    println!("  \x1b[1;36mParley\x1b[0m server starting");
    println!("  ─────────────────────────────────────");
    println!("  Local:  http://localhost:{}", port);
    println!();
}
