// CKAN action API client: package metadata and resource downloads.
//
// CKAN wraps every action response as {"success": bool, "result": ...} or
// {"success": false, "error": {...}}. Only the read actions are used.

use anyhow::{Context, Result};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use tracing::{debug, info};

/// City of Toronto open data portal.
pub const DEFAULT_CKAN_API_URL: &str = "https://ckan0.cf.opendata.inter.prod-toronto.ca";

/// A CKAN dataset ("package") and its downloadable resources.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Package {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub resources: Vec<Resource>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// One file or datastore table attached to a package.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Resource {
    pub id: String,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub format: Option<String>,
    pub url: String,
    #[serde(default)]
    pub datastore_active: bool,
}

impl Package {
    /// First resource whose format is one of `formats` (case-insensitive),
    /// trying the formats in order of preference.
    pub fn find_resource(&self, formats: &[&str]) -> Option<&Resource> {
        formats.iter().find_map(|fmt| {
            self.resources
                .iter()
                .find(|r| r.format.as_deref().is_some_and(|f| f.eq_ignore_ascii_case(fmt)))
        })
    }
}

#[derive(Debug, Deserialize)]
struct ActionResponse<T> {
    success: bool,
    result: Option<T>,
    #[serde(default)]
    error: Option<Value>,
}

/// Unauthenticated client for a CKAN portal.
pub struct CkanClient {
    client: reqwest::Client,
    base_url: String,
}

impl CkanClient {
    pub fn new(base_url: &str) -> Result<Self> {
        let client = reqwest::Client::builder()
            .user_agent("polarity-lab/0.1 (teaching-lab)")
            .build()
            .context("Failed to build HTTP client")?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    /// Call a read action (e.g. "package_show") and unwrap its result.
    pub async fn action<T: DeserializeOwned>(
        &self,
        action: &str,
        params: &[(&str, &str)],
    ) -> Result<T> {
        let url = format!("{}/api/3/action/{}", self.base_url, action);

        debug!(action = action, "CKAN action request");

        let response = self
            .client
            .get(&url)
            .query(params)
            .send()
            .await
            .with_context(|| format!("CKAN request failed: {action}"))?;

        let status = response.status();
        let body = response
            .text()
            .await
            .with_context(|| format!("Failed to read CKAN {action} response"))?;

        // Not-found and validation errors come back as 4xx with a JSON body
        // explaining why, so try the envelope before giving up on status.
        let parsed: std::result::Result<ActionResponse<T>, _> = serde_json::from_str(&body);
        match parsed {
            Ok(resp) => unwrap_action(action, resp),
            Err(_) if !status.is_success() => {
                anyhow::bail!("CKAN {action} returned {status}: {body}")
            }
            Err(e) => Err(e).with_context(|| format!("Failed to deserialize CKAN {action} response")),
        }
    }

    /// Fetch a package's metadata by id or name.
    pub async fn retrieve_package(&self, package_id: &str) -> Result<Package> {
        let package: Package = self
            .action("package_show", &[("id", package_id)])
            .await
            .with_context(|| format!("Failed to retrieve package {package_id}"))?;

        info!(
            package = %package.name,
            resources = package.resources.len(),
            "Retrieved CKAN package"
        );
        Ok(package)
    }

    /// Download a resource's raw bytes.
    pub async fn download_resource(&self, resource: &Resource) -> Result<Vec<u8>> {
        let response = self
            .client
            .get(&resource.url)
            .send()
            .await
            .with_context(|| format!("Failed to download resource {}", resource.id))?;

        if !response.status().is_success() {
            anyhow::bail!(
                "Resource download failed with status {}: {}",
                response.status(),
                resource.url
            );
        }

        let bytes = response
            .bytes()
            .await
            .context("Failed to read resource body")?;
        debug!(resource = %resource.id, bytes = bytes.len(), "Downloaded resource");
        Ok(bytes.to_vec())
    }
}

fn unwrap_action<T>(action: &str, resp: ActionResponse<T>) -> Result<T> {
    if !resp.success {
        let message = resp
            .error
            .as_ref()
            .and_then(|e| e.get("message"))
            .and_then(Value::as_str)
            .map(str::to_string)
            .or_else(|| resp.error.as_ref().map(Value::to_string))
            .unwrap_or_else(|| "no error detail".to_string());
        anyhow::bail!("CKAN {action} failed: {message}");
    }
    resp.result
        .ok_or_else(|| anyhow::anyhow!("CKAN {action} succeeded but returned no result"))
}
