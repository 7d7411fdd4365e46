// Tweet fetching: user timelines and hashtag search, with pagination.
//
// Both fetchers return `Tweet` records that keep every field the API sent,
// so a saved batch can be reloaded without losing anything.

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use tracing::{debug, info};

use super::client::{Envelope, TwitterClient};
use crate::sentiment::document::Document;

/// Extra tweet fields requested on every call.
const TWEET_FIELDS: &str = "created_at,author_id,lang";

/// The API caps list pages at 100 and refuses fewer than 10 for search.
const MAX_PAGE: usize = 100;
const MIN_SEARCH_PAGE: usize = 10;

/// Default number of tweets for a hashtag search.
pub const DEFAULT_HASHTAG_COUNT: usize = 15;

/// One tweet. Fields not modelled here ride along in `extra`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Tweet {
    pub id: String,
    pub text: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub author_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Tweet {
    /// Adapt this tweet into a scoring document.
    pub fn to_document(&self) -> Document {
        let mut doc = Document::new(self.id.as_str(), self.text.as_str());
        doc.metadata = self.extra.clone();
        if let Some(author) = &self.author_id {
            doc.metadata
                .insert("author_id".to_string(), Value::String(author.clone()));
        }
        if let Some(created) = &self.created_at {
            doc.metadata
                .insert("created_at".to_string(), Value::String(created.to_rfc3339()));
        }
        doc
    }
}

/// Fetch up to `max_tweets` recent tweets posted by `username`, newest first.
pub async fn download_recent_tweets_by_user(
    client: &TwitterClient,
    username: &str,
    max_tweets: usize,
) -> Result<Vec<Tweet>> {
    let user = client.lookup_user(username).await?;
    let path = format!("2/users/{}/tweets", user.id);

    // The timeline endpoint accepts 5..=100 per page.
    let page_size = max_tweets.clamp(5, MAX_PAGE).to_string();
    let tweets = paginate(client, &path, &[("max_results", page_size.as_str())], max_tweets)
        .await
        .with_context(|| format!("Failed to fetch timeline for @{}", user.username))?;

    info!(
        count = tweets.len(),
        username = %user.username,
        "Collected user tweets"
    );
    Ok(tweets)
}

/// Fetch up to `count` recent English tweets tagged `#hashtag`.
///
/// `location` uses the "lat,long,radius" form (e.g. "43.6532,-79.3832,5km")
/// and narrows the search to that circle.
pub async fn download_recent_tweets_by_hashtag(
    client: &TwitterClient,
    hashtag: &str,
    location: Option<&str>,
    count: usize,
) -> Result<Vec<Tweet>> {
    let query = hashtag_query(hashtag, location)?;
    let page_size = count.clamp(MIN_SEARCH_PAGE, MAX_PAGE).to_string();

    let tweets = paginate(
        client,
        "2/tweets/search/recent",
        &[("query", query.as_str()), ("max_results", page_size.as_str())],
        count,
    )
    .await
    .with_context(|| format!("Failed to search for #{hashtag}"))?;

    info!(count = tweets.len(), query = %query, "Collected hashtag tweets");
    Ok(tweets)
}

/// Build the search query for a hashtag, optionally bounded by a location.
pub fn hashtag_query(hashtag: &str, location: Option<&str>) -> Result<String> {
    let tag = hashtag.trim().trim_start_matches('#');
    if tag.is_empty() {
        anyhow::bail!("Hashtag is empty");
    }
    let mut query = format!("#{tag} lang:en");
    if let Some(loc) = location {
        query.push(' ');
        query.push_str(&point_radius_operator(loc)?);
    }
    Ok(query)
}

/// Convert "lat,long,radius" into the `point_radius:[long lat radius]`
/// search operator (note the API wants longitude first).
pub fn point_radius_operator(location: &str) -> Result<String> {
    let parts: Vec<&str> = location.split(',').map(str::trim).collect();
    let [lat, long, radius] = parts.as_slice() else {
        anyhow::bail!("Location must look like \"lat,long,radius\", got {location:?}");
    };

    let lat_val: f64 = lat
        .parse()
        .with_context(|| format!("Invalid latitude {lat:?}"))?;
    let long_val: f64 = long
        .parse()
        .with_context(|| format!("Invalid longitude {long:?}"))?;
    if !(-90.0..=90.0).contains(&lat_val) || !(-180.0..=180.0).contains(&long_val) {
        anyhow::bail!("Location {location:?} is outside valid coordinates");
    }
    if !(radius.ends_with("km") || radius.ends_with("mi")) {
        anyhow::bail!("Radius {radius:?} must end in km or mi");
    }

    Ok(format!("point_radius:[{long} {lat} {radius}]"))
}

/// Follow `next_token` pages until `limit` tweets are collected or the
/// endpoint runs out.
async fn paginate(
    client: &TwitterClient,
    path: &str,
    base_params: &[(&str, &str)],
    limit: usize,
) -> Result<Vec<Tweet>> {
    let mut tweets: Vec<Tweet> = Vec::new();
    let mut next_token: Option<String> = None;

    while tweets.len() < limit {
        let mut params: Vec<(&str, &str)> = base_params.to_vec();
        params.push(("tweet.fields", TWEET_FIELDS));
        if let Some(ref token) = next_token {
            params.push(("pagination_token", token.as_str()));
        }

        let envelope: Envelope<Vec<Tweet>> = client.get_json(path, &params).await?;
        let meta = envelope.meta.unwrap_or_default();

        // An empty page comes back with no `data` at all.
        if envelope.data.is_none() && !envelope.errors.is_empty() {
            let reasons: Vec<&str> = envelope
                .errors
                .iter()
                .filter_map(|e| e.detail.as_deref().or(e.title.as_deref()))
                .collect();
            anyhow::bail!("{path}: {}", reasons.join("; "));
        }
        let page = envelope.data.unwrap_or_default();
        let page_len = page.len();

        let room = limit - tweets.len();
        tweets.extend(page.into_iter().take(room));

        debug!(
            page_tweets = page_len,
            total_collected = tweets.len(),
            "Fetched page of tweets"
        );

        next_token = meta.next_token;
        if next_token.is_none() || page_len == 0 {
            break;
        }
    }

    Ok(tweets)
}
