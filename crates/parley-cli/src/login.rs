//! `parley login`: interactive API key setup

use anyhow::{Context, Result};
use std::io::{self, Write};

use parley_core::ai::providers::ProviderId;
use parley_core::storage::CredentialStore;

/// Prompt for a provider and API key, then save them to the credential store.
pub fn run_setup_wizard() -> Result<()> {
    println!();
    println!("  \x1b[1;36mParley\x1b[0m setup");
    println!("  ─────────────────────────────────────");
    println!();

    let mut store = CredentialStore::load().unwrap_or_default();
    let configured = store.configured_providers();

    let providers = ProviderId::all();
    println!("  Select a provider:");
    for (i, provider) in providers.iter().enumerate() {
        let marker = if i == 0 { " (default)" } else { "" };
        let saved = if configured.contains(provider) {
            " \x1b[2m[key saved]\x1b[0m"
        } else {
            ""
        };
        println!("    {}. {}{}{}", i + 1, provider, marker, saved);
    }
    println!();

    print!("  Choice [1]: ");
    io::stdout().flush()?;

    let mut input = String::new();
    io::stdin().read_line(&mut input)?;
    let provider = parse_choice(input.trim(), providers)?;

    println!();
    print!("  API key for {}: ", provider);
    io::stdout().flush()?;

    let mut api_key = String::new();
    io::stdin().read_line(&mut api_key)?;
    let api_key = api_key.trim().to_string();

    if api_key.is_empty() {
        anyhow::bail!("API key cannot be empty");
    }

    store.set(provider, api_key);
    store.save().context("Failed to save credentials")?;

    println!();
    println!("  \x1b[32m✓\x1b[0m Credentials saved for {}", provider);
    if provider != ProviderId::default() {
        println!("  Set provider = \"{}\" in ~/.parley/config.toml to use it", provider.storage_key());
    }
    println!();

    Ok(())
}

/// 1-based menu choice; empty input picks the first entry
fn parse_choice(input: &str, providers: &[ProviderId]) -> Result<ProviderId> {
    if input.is_empty() {
        return providers
            .first()
            .copied()
            .context("No providers available");
    }
    let idx: usize = input.parse().context("Invalid number")?;
    if idx == 0 || idx > providers.len() {
        anyhow::bail!("Invalid choice: {}", idx);
    }
    Ok(providers[idx - 1])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn menu_choices() {
        let providers = ProviderId::all();
        assert_eq!(parse_choice("", providers).unwrap(), providers[0]);
        assert_eq!(parse_choice("2", providers).unwrap(), providers[1]);
        assert!(parse_choice("0", providers).is_err());
        assert!(parse_choice("99", providers).is_err());
        assert!(parse_choice("abc", providers).is_err());
    }
}
