// Tabular resources: CSV or JSON downloads flattened into records.
//
// Every row becomes a flat JSON object so the same document adapter and
// persistence helpers work on catalog data and tweets alike.

use anyhow::{Context, Result};
use serde_json::Value;
use tracing::info;

use super::client::{CkanClient, Package, Resource};
use crate::sentiment::document::Record;

/// Rows of a downloaded dataset, each a flat key-value record.
pub type Table = Vec<Record>;

/// The Toronto Public Library branch programs and events feed.
pub const TPL_EVENTS_PACKAGE: &str = "library-branch-programs-and-events-feed";

/// Resource formats this module can parse, in order of preference.
pub const TABULAR_FORMATS: &[&str] = &["JSON", "CSV"];

/// Parse raw resource bytes in the given format ("CSV" or "JSON").
pub fn parse_table(format: &str, bytes: &[u8]) -> Result<Table> {
    match format.to_ascii_uppercase().as_str() {
        "CSV" => parse_csv(bytes),
        "JSON" => parse_json(bytes),
        other => anyhow::bail!("Unsupported resource format {other:?} (expected CSV or JSON)"),
    }
}

/// CSV with a header row. Every cell is kept as a string.
fn parse_csv(bytes: &[u8]) -> Result<Table> {
    let mut reader = csv::Reader::from_reader(bytes);
    let headers = reader
        .headers()
        .context("CSV resource has no header row")?
        .clone();

    let mut table = Table::new();
    for (i, row) in reader.records().enumerate() {
        let row = row.with_context(|| format!("Malformed CSV row {}", i + 1))?;
        let record: Record = headers
            .iter()
            .zip(row.iter())
            .map(|(h, v)| (h.to_string(), Value::String(v.to_string())))
            .collect();
        table.push(record);
    }
    Ok(table)
}

/// A JSON array of objects.
fn parse_json(bytes: &[u8]) -> Result<Table> {
    let value: Value = serde_json::from_slice(bytes).context("Resource is not valid JSON")?;
    let Value::Array(rows) = value else {
        anyhow::bail!("JSON resource must be an array of objects");
    };

    rows.into_iter()
        .enumerate()
        .map(|(i, row)| match row {
            Value::Object(map) => Ok(map),
            _ => anyhow::bail!("JSON resource row {i} is not an object"),
        })
        .collect()
}

/// Download and parse one resource of a package.
pub async fn load_resource_table(client: &CkanClient, resource: &Resource) -> Result<Table> {
    let format = resource.format.as_deref().unwrap_or_default();
    let bytes = client.download_resource(resource).await?;
    let table = parse_table(format, &bytes)
        .with_context(|| format!("Failed to parse resource {}", resource.id))?;

    info!(resource = %resource.id, rows = table.len(), "Loaded resource table");
    Ok(table)
}

/// Load the first parseable resource of `package`.
pub async fn load_package_table(client: &CkanClient, package: &Package) -> Result<Table> {
    let resource = package.find_resource(TABULAR_FORMATS).ok_or_else(|| {
        anyhow::anyhow!(
            "Package {} has no JSON or CSV resource to load",
            package.name
        )
    })?;
    load_resource_table(client, resource).await
}

/// Retrieve the Toronto Public Library events feed as a table.
pub async fn load_tpl_events(client: &CkanClient) -> Result<Table> {
    let package = client.retrieve_package(TPL_EVENTS_PACKAGE).await?;
    load_package_table(client, &package).await
}
