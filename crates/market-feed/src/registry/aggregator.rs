//! Parallel news fan-out.
//!
//! Every provider the router selects is called concurrently. Failed providers
//! contribute nothing; the request as a whole never fails. The merged list is
//! ordered by recency, with ties kept in router order.

use std::sync::Arc;

use futures::future::join_all;
use tracing::{debug, info, warn};

use super::router::select_providers;
use super::{FetchDiagnostics, SkipReason};
use crate::config::FeedConfig;
use crate::errors::{ErrorClass, FeedError};
use crate::models::{Category, NewsItem, NewsSource, ProviderId};
use crate::provider::akshare::AkShareProvider;
use crate::provider::openbb::OpenBbProvider;
use crate::provider::tavily::TavilyProvider;
use crate::provider::NewsProvider;

/// Fans a news request out to the routed providers and merges the answers.
pub struct NewsAggregator {
    providers: Vec<Arc<dyn NewsProvider>>,
}

impl NewsAggregator {
    pub fn new(providers: Vec<Arc<dyn NewsProvider>>) -> Self {
        let mut providers = providers;
        providers.sort_by_key(|p| p.id());
        Self { providers }
    }

    /// Tavily, AkShare and OpenBB adapters built from `config`.
    pub fn from_config(config: &FeedConfig) -> Self {
        Self::new(vec![
            Arc::new(TavilyProvider::from_config(config)) as Arc<dyn NewsProvider>,
            Arc::new(AkShareProvider::from_config(config)),
            Arc::new(OpenBbProvider::from_config(config)),
        ])
    }

    /// Merged, recency-sorted news for `category`.
    pub async fn aggregate(&self, category: Category, query: &str) -> Vec<NewsItem> {
        self.aggregate_with_diagnostics(category, query).await.0
    }

    /// Like [`aggregate`](Self::aggregate), also returning the per-provider
    /// attempt trail.
    pub async fn aggregate_with_diagnostics(
        &self,
        category: Category,
        query: &str,
    ) -> (Vec<NewsItem>, FetchDiagnostics) {
        let mut diagnostics = FetchDiagnostics::new();
        let selected = select_providers(category);

        let mut routed = Vec::with_capacity(self.providers.len());
        for provider in &self.providers {
            if selected.contains(&provider.id()) {
                routed.push(provider);
            } else {
                diagnostics.record_skip(provider.id().into(), SkipReason::CategoryOutOfDomain);
            }
        }

        debug!(
            "Fanning out {} news ({:?}) to {} providers",
            category,
            query,
            routed.len()
        );

        let results = join_all(
            routed
                .iter()
                .map(|provider| provider.fetch_news(query, category)),
        )
        .await;

        let mut merged = Vec::new();
        for (provider, result) in routed.iter().zip(results) {
            let provider_id: ProviderId = provider.id().into();
            match result {
                Ok(items) => {
                    diagnostics.record_success(provider_id, items.len());
                    merged.extend(items);
                }
                Err(e) => record_failure(&mut diagnostics, provider_id, e),
            }
        }

        sort_by_recency(&mut merged);
        info!(
            "Aggregated {} news items for {}: {}",
            merged.len(),
            category,
            diagnostics.summary()
        );
        (merged, diagnostics)
    }

    /// Search across every provider and keep items whose title or publisher
    /// contains `text`. Blank text returns the unfiltered wildcard feed.
    pub async fn search(&self, text: &str) -> Vec<NewsItem> {
        let text = text.trim();
        let merged = self.aggregate(Category::All, text).await;
        filter_by_query(merged, text)
    }

    pub fn sources(&self) -> Vec<NewsSource> {
        self.providers.iter().map(|p| p.id()).collect()
    }
}

fn record_failure(diagnostics: &mut FetchDiagnostics, provider_id: ProviderId, error: FeedError) {
    let class = error.class();
    if class == ErrorClass::Unconfigured {
        debug!("Skipping {}: {}", provider_id, error);
        diagnostics.record_skip(provider_id, SkipReason::Unconfigured);
        return;
    }
    warn!("News provider {} failed: {}", provider_id, error);
    diagnostics.record_error(provider_id, class, error.to_string());
}

/// Stable sort, newest first. Equal timestamps keep their merge order.
pub fn sort_by_recency(items: &mut [NewsItem]) {
    items.sort_by(|a, b| b.timestamp.cmp(&a.timestamp));
}

/// Case-insensitive title/publisher filter. Blank `text` keeps everything.
pub fn filter_by_query(items: Vec<NewsItem>, text: &str) -> Vec<NewsItem> {
    let needle = text.trim().to_lowercase();
    if needle.is_empty() {
        return items;
    }
    items
        .into_iter()
        .filter(|item| item.matches_query(&needle))
        .collect()
}
