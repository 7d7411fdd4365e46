// API key loading: a flat JSON object of credential names to values.
//
// The key file lives outside the repo (see POLARITY_KEYS_PATH). It looks like:
//
//   { "bearer_token": "...", "consumer_key": "...", "consumer_secret": "..." }
//
// Only the bearer token is needed for the read-only endpoints used here; the
// other keys are kept so one file serves every lab.

use std::collections::HashMap;
use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

/// Name of the key holding the app-only bearer token.
pub const BEARER_TOKEN: &str = "bearer_token";

/// Credentials loaded from a key file.
#[derive(Clone, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ApiKeys(HashMap<String, String>);

impl std::fmt::Debug for ApiKeys {
    // Never print secret values, only which keys are present.
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut names: Vec<&String> = self.0.keys().collect();
        names.sort();
        f.debug_tuple("ApiKeys").field(&names).finish()
    }
}

impl ApiKeys {
    /// Load keys from a JSON file on disk.
    pub fn load(path: &Path) -> Result<Self> {
        let raw = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read key file {}", path.display()))?;
        serde_json::from_str(&raw)
            .with_context(|| format!("Key file {} is not a flat JSON object", path.display()))
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.0.get(name).map(String::as_str)
    }

    /// Look up a key, failing with a message that names it.
    pub fn require(&self, name: &str) -> Result<&str> {
        match self.get(name) {
            Some(value) if !value.trim().is_empty() => Ok(value),
            _ => anyhow::bail!(
                "Key `{name}` is missing or empty in your key file.\n\
                 Add it alongside your other API credentials."
            ),
        }
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for ApiKeys {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self(iter.into_iter().map(|(k, v)| (k.into(), v.into())).collect())
    }
}
