// Twitter API v2 client: app-only (bearer token) reads over HTTP.
//
// Every endpoint the labs touch is a GET that returns a JSON envelope with
// `data`, optional `meta`, and optional `errors`. A 200 response can still
// carry only `errors` (e.g. an unknown username), so callers check both.

use anyhow::{Context, Result};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use tracing::debug;

/// Default base URL for the Twitter API.
pub const DEFAULT_TWITTER_API_URL: &str = "https://api.twitter.com";

/// Thin reqwest wrapper authenticated with a bearer token.
pub struct TwitterClient {
    client: reqwest::Client,
    base_url: String,
    bearer_token: String,
}

/// A user as returned by the users lookup endpoints.
#[derive(Debug, Clone, Deserialize)]
pub struct TwitterUser {
    pub id: String,
    pub username: String,
    #[serde(default)]
    pub name: Option<String>,
}

/// The standard v2 response envelope.
#[derive(Debug, Deserialize)]
pub struct Envelope<T> {
    pub data: Option<T>,
    #[serde(default)]
    pub meta: Option<PageMeta>,
    #[serde(default)]
    pub errors: Vec<ApiError>,
}

/// Pagination metadata for list endpoints.
#[derive(Debug, Default, Deserialize)]
pub struct PageMeta {
    #[serde(default)]
    pub result_count: Option<u32>,
    #[serde(default)]
    pub next_token: Option<String>,
}

/// A partial error reported inside a 200 response.
#[derive(Debug, Deserialize)]
pub struct ApiError {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub detail: Option<String>,
}

impl<T> Envelope<T> {
    /// Take the payload, or turn the reported errors into a failure.
    pub fn into_data(self, what: &str) -> Result<T> {
        match self.data {
            Some(data) => Ok(data),
            None => {
                let reasons: Vec<String> = self
                    .errors
                    .iter()
                    .map(|e| {
                        e.detail
                            .clone()
                            .or_else(|| e.title.clone())
                            .unwrap_or_else(|| "unknown error".to_string())
                    })
                    .collect();
                if reasons.is_empty() {
                    anyhow::bail!("{what}: response had no data");
                }
                anyhow::bail!("{what}: {}", reasons.join("; "))
            }
        }
    }
}

impl TwitterClient {
    /// Create a client against `base_url` using an app-only bearer token.
    pub fn new(base_url: &str, bearer_token: &str) -> Result<Self> {
        let client = reqwest::Client::builder()
            .user_agent("polarity-lab/0.1 (teaching-lab)")
            .build()
            .context("Failed to build HTTP client")?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            bearer_token: bearer_token.to_string(),
        })
    }

    /// GET `path` (relative to the API root) and deserialize the JSON body.
    pub async fn get_json<T: DeserializeOwned>(
        &self,
        path: &str,
        params: &[(&str, &str)],
    ) -> Result<T> {
        let url = format!("{}/{}", self.base_url, path.trim_start_matches('/'));

        debug!(path = path, "Twitter API GET request");

        let response = self
            .client
            .get(&url)
            .bearer_auth(&self.bearer_token)
            .query(params)
            .send()
            .await
            .with_context(|| format!("Twitter API request failed: {path}"))?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            anyhow::bail!("Twitter API {path} returned {status}: {body}");
        }

        response
            .json::<T>()
            .await
            .with_context(|| format!("Failed to deserialize {path} response"))
    }

    /// Resolve a username (without the @) to its user record.
    pub async fn lookup_user(&self, username: &str) -> Result<TwitterUser> {
        let username = username.trim_start_matches('@');
        let envelope: Envelope<TwitterUser> = self
            .get_json(&format!("2/users/by/username/{username}"), &[])
            .await
            .with_context(|| format!("Failed to look up @{username}"))?;
        envelope.into_data(&format!("Lookup of @{username}"))
    }

    /// Check that the bearer token is accepted by resolving a known account.
    ///
    /// Returns the resolved user so callers can report who they reached.
    pub async fn validate_authentication(&self, probe_username: &str) -> Result<TwitterUser> {
        self.lookup_user(probe_username)
            .await
            .context("The API rejected the request. Double check your bearer token.")
    }
}
