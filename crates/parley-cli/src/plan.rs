//! `parley plan`: print a generated interview plan

use std::sync::Arc;

use anyhow::{Context, Result};
use serde_json::json;

use parley_core::ai::SharedCompletionClient;
use parley_core::config::ParleyConfig;
use parley_core::planning::PlanningAgent;
use parley_core::storage::CredentialStore;

pub async fn run(settings: &ParleyConfig, context: &str, background: &str, goals: &str) -> Result<()> {
    let credentials = CredentialStore::load()?;
    let client: SharedCompletionClient = Arc::new(
        settings
            .build_ai_client(&credentials)?
            .context("No API key configured; run `parley login` or set the provider's API key variable")?,
    );

    let agent = PlanningAgent::new(client);
    let plan = agent.create_plan(context, background, goals).await;
    let init = agent.initialize_agents(plan).await;

    let output = json!({
        "plan": init.plan,
        "initialization_message": init.initialization_message,
    });
    println!("{}", serde_json::to_string_pretty(&output)?);

    Ok(())
}
