//! OpenBB backend adapter.
//!
//! OpenBB is a self-hosted US market backend that serves market news.
//!
//! # API Endpoints
//!
//! - Market news: `GET {base}/news/market`
//!
//! # Response Format
//!
//! `{"status": "success", "data": [{"title", "url", "source", "date", "text"}]}`

use std::time::Duration;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use reqwest::Client;
use serde_json::Value;
use tracing::debug;

use crate::config::FeedConfig;
use crate::errors::FeedError;
use crate::models::{Category, NewsItem, NewsSource, ProviderId};
use crate::provider::{extract, http, NewsProvider};

const PROVIDER_ID: ProviderId = ProviderId::OpenBb;
const DEFAULT_PUBLISHER: &str = "Bloomberg";

pub struct OpenBbProvider {
    client: Client,
    base_url: String,
}

impl OpenBbProvider {
    pub fn new(base_url: &str, timeout: Duration) -> Self {
        Self {
            client: http::build_client(timeout),
            base_url: http::base_url(base_url),
        }
    }

    pub fn from_config(config: &FeedConfig) -> Self {
        Self::new(&config.openbb_url, config.request_timeout)
    }
}

#[async_trait]
impl NewsProvider for OpenBbProvider {
    fn id(&self) -> NewsSource {
        NewsSource::OpenBb
    }

    async fn fetch_news(
        &self,
        _query: &str,
        _category: Category,
    ) -> Result<Vec<NewsItem>, FeedError> {
        let url = format!("{}/news/market", self.base_url);
        debug!("OpenBB request: /news/market");
        let raw = http::send_json(PROVIDER_ID, self.client.get(&url)).await?;
        normalize_market_news(&raw, Utc::now())
    }
}

/// Map `/news/market` rows into US-stock news items.
pub fn normalize_market_news(
    raw: &Value,
    fetched_at: DateTime<Utc>,
) -> Result<Vec<NewsItem>, FeedError> {
    let rows = extract::success_data(raw, PROVIDER_ID)?;
    let millis = fetched_at.timestamp_millis();

    Ok(rows
        .iter()
        .enumerate()
        .filter_map(|(index, row)| {
            let title = extract::text_at(row, &["title"])?;
            let url = extract::text_at(row, &["url"])
                .filter(|u| u.starts_with("http://") || u.starts_with("https://"))?;
            let text = row.get("text").and_then(Value::as_str);

            Some(NewsItem {
                id: format!("openbb-{}-{}", index, millis),
                title,
                source: NewsSource::OpenBb,
                category: Category::UsStocks,
                url,
                publisher: extract::text_at(row, &["source"])
                    .unwrap_or_else(|| DEFAULT_PUBLISHER.to_string()),
                timestamp: extract::timestamp(row.get("date").and_then(Value::as_str), fetched_at),
                summary: text.and_then(extract::summary),
                sentiment: None,
                read_time: Some(extract::read_time(text)),
            })
        })
        .collect())
}
