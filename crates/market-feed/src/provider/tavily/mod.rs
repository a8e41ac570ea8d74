//! Tavily search API adapter.
//!
//! Tavily is a search-style news API and covers every topical category.
//!
//! # API Endpoints
//!
//! - Search: `POST {base}/search` with the API key in the JSON body
//!
//! # Response Format
//!
//! `{"results": [{"title", "url", "content", "published_date", ...}]}`.
//! The publisher is not reported, so it is derived from the article host.

use std::time::Duration;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use reqwest::{Client, Url};
use serde::Serialize;
use serde_json::Value;
use tracing::debug;

use crate::config::FeedConfig;
use crate::errors::FeedError;
use crate::models::{Category, NewsItem, NewsSource, ProviderId};
use crate::provider::{extract, http, NewsProvider};

const PROVIDER_ID: ProviderId = ProviderId::Tavily;
const MAX_RESULTS: u32 = 20;

/// Body of the `/search` request.
#[derive(Debug, Serialize)]
struct SearchRequest<'a> {
    api_key: &'a str,
    query: String,
    search_depth: &'static str,
    max_results: u32,
    include_answer: bool,
}

/// Tavily news adapter. Skipped (reported as unconfigured) without an API key.
pub struct TavilyProvider {
    client: Client,
    base_url: String,
    api_key: Option<String>,
}

impl TavilyProvider {
    pub fn new(base_url: &str, api_key: Option<String>, timeout: Duration) -> Self {
        Self {
            client: http::build_client(timeout),
            base_url: http::base_url(base_url),
            api_key: api_key.filter(|k| !k.trim().is_empty()),
        }
    }

    pub fn from_config(config: &FeedConfig) -> Self {
        Self::new(
            &config.tavily_url,
            config.tavily_api_key.clone(),
            config.request_timeout,
        )
    }

    pub fn is_configured(&self) -> bool {
        self.api_key.is_some()
    }
}

#[async_trait]
impl NewsProvider for TavilyProvider {
    fn id(&self) -> NewsSource {
        NewsSource::Tavily
    }

    async fn fetch_news(
        &self,
        query: &str,
        category: Category,
    ) -> Result<Vec<NewsItem>, FeedError> {
        let api_key = self.api_key.as_deref().ok_or(FeedError::Unconfigured {
            provider: PROVIDER_ID,
        })?;

        let query = match query.trim() {
            "" => category.default_query(),
            q => q,
        };
        let body = SearchRequest {
            api_key,
            query: format!("{} finance news", query),
            search_depth: "advanced",
            max_results: MAX_RESULTS,
            include_answer: false,
        };

        debug!("Tavily search for {} ({})", body.query, category);
        let url = format!("{}/search", self.base_url);
        let raw = http::send_json(PROVIDER_ID, self.client.post(&url).json(&body)).await?;

        normalize_results(&raw, category, Utc::now())
    }
}

/// Map a `/search` response into news items.
///
/// Results without a title or an absolute http(s) URL are dropped.
pub fn normalize_results(
    raw: &Value,
    category: Category,
    fetched_at: DateTime<Utc>,
) -> Result<Vec<NewsItem>, FeedError> {
    let results = raw
        .get("results")
        .and_then(Value::as_array)
        .ok_or_else(|| FeedError::malformed(PROVIDER_ID, "results is not an array"))?;

    let millis = fetched_at.timestamp_millis();
    let items = results
        .iter()
        .enumerate()
        .filter_map(|(index, row)| {
            let title = extract::text_at(row, &["title"])?;
            let url = extract::text_at(row, &["url"])?;
            let publisher = publisher_from_url(&url)?;
            let content = row.get("content").and_then(Value::as_str);

            Some(NewsItem {
                id: format!("tavily-{}-{}-{}", category, index, millis),
                title,
                source: NewsSource::Tavily,
                category,
                url,
                publisher,
                timestamp: extract::timestamp(
                    row.get("published_date").and_then(Value::as_str),
                    fetched_at,
                ),
                summary: content.and_then(extract::summary),
                sentiment: None,
                read_time: Some(extract::read_time(content)),
            })
        })
        .collect::<Vec<_>>();

    if items.len() < results.len() {
        debug!(
            "Tavily: dropped {} of {} results missing title or url",
            results.len() - items.len(),
            results.len()
        );
    }
    Ok(items)
}

/// Article host without a leading `www.`; `None` for non-http(s) URLs.
fn publisher_from_url(url: &str) -> Option<String> {
    let parsed = Url::parse(url).ok()?;
    if !matches!(parsed.scheme(), "http" | "https") {
        return None;
    }
    let host = parsed.host_str()?;
    Some(host.strip_prefix("www.").unwrap_or(host).to_string())
}
