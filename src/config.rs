use std::env;
use std::path::{Path, PathBuf};

use anyhow::Result;

use crate::ckan::client::DEFAULT_CKAN_API_URL;
use crate::twitter::client::DEFAULT_TWITTER_API_URL;

/// Account resolved by `validate` when no handle is given.
pub const DEFAULT_PROBE_HANDLE: &str = "TwitterDev";

/// Central configuration loaded from environment variables.
///
/// Nothing is read from a hardcoded working-directory path: every file the
/// tools touch is named here and passed explicitly into each operation.
/// The .env file is loaded at startup via dotenvy.
#[derive(Debug, Clone)]
pub struct Config {
    /// VADER-format lexicon (POLARITY_LEXICON_PATH)
    pub lexicon_path: PathBuf,
    /// JSON file of API credentials (POLARITY_KEYS_PATH)
    pub keys_path: PathBuf,
    /// Where downloaded tweets are cached (POLARITY_CACHE_DIR)
    pub cache_dir: PathBuf,
    /// Twitter API root (TWITTER_API_URL)
    pub twitter_api_url: String,
    /// CKAN portal root (CKAN_API_URL)
    pub ckan_api_url: String,
}

impl Config {
    /// Load configuration from environment variables, with defaults for all.
    pub fn load() -> Result<Self> {
        Ok(Self {
            lexicon_path: env::var("POLARITY_LEXICON_PATH")
                .map(PathBuf::from)
                .unwrap_or_else(|_| PathBuf::from("./vader_lexicon.txt")),
            keys_path: env::var("POLARITY_KEYS_PATH")
                .map(PathBuf::from)
                .unwrap_or_else(|_| PathBuf::from("./keys.json")),
            cache_dir: env::var("POLARITY_CACHE_DIR")
                .map(PathBuf::from)
                .unwrap_or_else(|_| default_cache_dir()),
            twitter_api_url: env::var("TWITTER_API_URL")
                .unwrap_or_else(|_| DEFAULT_TWITTER_API_URL.to_string()),
            ckan_api_url: env::var("CKAN_API_URL")
                .unwrap_or_else(|_| DEFAULT_CKAN_API_URL.to_string()),
        })
    }

    /// Check that the lexicon file exists.
    /// Call this before any operation that scores text.
    pub fn require_lexicon(&self) -> Result<()> {
        require_file(
            &self.lexicon_path,
            "Sentiment lexicon",
            "POLARITY_LEXICON_PATH",
        )
    }

    /// Check that the API key file exists.
    /// Call this before any operation that talks to the Twitter API.
    pub fn require_keys(&self) -> Result<()> {
        require_file(&self.keys_path, "API key file", "POLARITY_KEYS_PATH")
    }
}

/// Returns the default tweet cache directory.
/// Uses the platform data directory: ~/.local/share/polarity-lab/cache/ on Linux.
pub fn default_cache_dir() -> PathBuf {
    dirs::data_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("polarity-lab")
        .join("cache")
}

fn require_file(path: &Path, what: &str, var: &str) -> Result<()> {
    if !path.is_file() {
        anyhow::bail!(
            "{what} not found at {}\n\
             Set {var} in your .env file to point at it.",
            path.display()
        );
    }
    Ok(())
}
