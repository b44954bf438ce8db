//! Per-provider API key storage
//!
//! Keys live in a JSON object at `~/.parley/tokens/credentials.json`,
//! keyed by provider storage key. Environment variables are consulted
//! only when the file has no key for a provider.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fs;
use std::path::Path;

use crate::ai::providers::ProviderId;
use crate::paths;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CredentialStore {
    #[serde(flatten)]
    keys: HashMap<String, String>,
}

impl CredentialStore {
    /// Load from the default location; a missing file is an empty store
    pub fn load() -> Result<Self> {
        Self::load_from_path(&paths::credentials_path())
    }

    pub fn load_from_path(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let contents = fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display()))?;
        let store: CredentialStore = serde_json::from_str(&contents)
            .with_context(|| format!("Invalid credentials file {}", path.display()))?;
        Ok(store)
    }

    pub fn save(&self) -> Result<()> {
        self.save_to_path(&paths::credentials_path())
    }

    pub fn save_to_path(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        let contents = serde_json::to_string_pretty(self)?;
        fs::write(path, contents)?;

        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            if let Ok(metadata) = fs::metadata(path) {
                let mut permissions = metadata.permissions();
                permissions.set_mode(0o600);
                let _ = fs::set_permissions(path, permissions);
            }
        }
        Ok(())
    }

    pub fn get(&self, provider: &ProviderId) -> Option<&String> {
        self.keys.get(provider.storage_key())
    }

    pub fn set(&mut self, provider: ProviderId, key: String) {
        self.keys.insert(provider.storage_key().to_string(), key);
    }

    pub fn has_key(&self, provider: &ProviderId) -> bool {
        self.keys.contains_key(provider.storage_key())
    }

    /// Providers with a stored key
    pub fn configured_providers(&self) -> Vec<ProviderId> {
        ProviderId::all()
            .iter()
            .filter(|p| self.has_key(p))
            .copied()
            .collect()
    }

    /// Stored key for `provider`, else its API key environment variable.
    /// Blank values count as missing.
    pub fn resolve(&self, provider: &ProviderId) -> Option<String> {
        self.resolve_with(provider, |name| std::env::var(name).ok())
    }

    fn resolve_with(
        &self,
        provider: &ProviderId,
        env: impl Fn(&str) -> Option<String>,
    ) -> Option<String> {
        self.get(provider)
            .cloned()
            .or_else(|| env(provider.api_key_env()))
            .filter(|key| !key.trim().is_empty())
    }
}
