// Flat-file persistence: JSON save/load plus a download-once tweet cache.
//
// The cache never expires. To re-download a user's tweets, delete the
// cache file or pass `--refresh` on the command line.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::{debug, info};

use crate::twitter::client::TwitterClient;
use crate::twitter::tweets::{download_recent_tweets_by_user, Tweet};

/// Write a batch of records to `path` as a JSON array.
///
/// Parent directories are created as needed. Existing files are replaced.
pub fn write_data<T: Serialize>(dataset: &[T], path: &Path) -> Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create directory {}", parent.display()))?;
    }

    let json = serde_json::to_string_pretty(dataset).context("Failed to serialize dataset")?;
    std::fs::write(path, json).with_context(|| format!("Failed to write {}", path.display()))?;

    debug!(records = dataset.len(), path = %path.display(), "Wrote dataset");
    Ok(())
}

/// Read a batch previously written by [`write_data`].
pub fn read_data<T: DeserializeOwned>(path: &Path) -> Result<Vec<T>> {
    let raw = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read {}", path.display()))?;
    serde_json::from_str(&raw)
        .with_context(|| format!("{} is not a JSON array of records", path.display()))
}

pub fn save_tweets(tweets: &[Tweet], path: &Path) -> Result<()> {
    write_data(tweets, path)
}

pub fn load_tweets(path: &Path) -> Result<Vec<Tweet>> {
    read_data(path)
}

/// Cache file for a user's recent tweets: `<dir>/<username>_recent_tweets.json`.
pub fn cache_path(cache_dir: &Path, username: &str) -> PathBuf {
    let username = username.trim_start_matches('@');
    cache_dir.join(format!("{username}_recent_tweets.json"))
}

/// Recent tweets for `username`, downloading only when no cache file exists.
///
/// The returned batch is always read back from disk, so a fresh download
/// and a cache hit produce identical values.
pub async fn get_user_tweets_with_cache(
    client: &TwitterClient,
    username: &str,
    max_tweets: usize,
    cache_dir: &Path,
) -> Result<Vec<Tweet>> {
    let path = cache_path(cache_dir, username);

    if path.is_file() {
        info!(path = %path.display(), "Loading tweets from cache");
    } else {
        let tweets = download_recent_tweets_by_user(client, username, max_tweets).await?;
        save_tweets(&tweets, &path)?;
        info!(count = tweets.len(), path = %path.display(), "Cached downloaded tweets");
    }

    load_tweets(&path)
}
