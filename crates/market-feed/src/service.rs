//! The aggregator API consumed by the presentation layer.
//!
//! None of the four operations fail: provider outages degrade to fewer
//! items (news) or to a lower fallback tier (snapshots).

use std::sync::Arc;

use chrono::Utc;
use tracing::debug;

use crate::config::{ConfigSummary, DataMode, FeedConfig};
use crate::models::{Category, HotSector, HotStock, NewsItem, NewsSource, ProviderId};
use crate::provider::synthetic::SyntheticMarket;
use crate::provider::{NewsProvider, SnapshotProvider};
use crate::registry::{
    filter_by_query, sort_by_recency, FallbackChain, FetchDiagnostics, NewsAggregator, Resolved,
};

/// Items generated per synthetic feed request.
const SYNTHETIC_FEED_SIZE: usize = 50;

/// Items generated before the search filter runs in synthetic mode.
const SYNTHETIC_SEARCH_POOL: usize = 100;

/// Feed façade over the aggregator, the fallback chain and the synthetic
/// generator. Built once at startup and shared behind an `Arc`.
pub struct FeedService {
    config: Arc<FeedConfig>,
    aggregator: NewsAggregator,
    chain: FallbackChain,
    synthetic: SyntheticMarket,
}

impl FeedService {
    /// Wire the default adapters from `config`.
    pub fn from_config(config: FeedConfig) -> Self {
        let aggregator = NewsAggregator::from_config(&config);
        let chain = FallbackChain::from_config(&config);
        Self::assemble(config, aggregator, chain)
    }

    /// Use caller-supplied adapters; snapshot `tiers` are tried in order
    /// before the synthetic tier.
    pub fn with_providers(
        config: FeedConfig,
        news: Vec<Arc<dyn NewsProvider>>,
        tiers: Vec<Arc<dyn SnapshotProvider>>,
    ) -> Self {
        let aggregator = NewsAggregator::new(news);
        let chain = FallbackChain::new(tiers, SyntheticMarket::new(config.synthetic_seed));
        Self::assemble(config, aggregator, chain)
    }

    fn assemble(config: FeedConfig, aggregator: NewsAggregator, chain: FallbackChain) -> Self {
        let synthetic = SyntheticMarket::new(config.synthetic_seed);
        Self {
            config: Arc::new(config),
            aggregator,
            chain,
            synthetic,
        }
    }

    pub fn mode(&self) -> DataMode {
        self.config.mode
    }

    pub fn config(&self) -> &FeedConfig {
        &self.config
    }

    pub fn config_summary(&self) -> ConfigSummary {
        self.config.summary()
    }

    /// Wired news sources in merge order.
    pub fn sources(&self) -> Vec<NewsSource> {
        self.aggregator.sources()
    }

    /// News for `category`, newest first.
    pub async fn fetch_news(&self, category: Category) -> Vec<NewsItem> {
        match self.mode() {
            DataMode::Live => self.aggregator.aggregate(category, "").await,
            DataMode::Synthetic => {
                self.simulate_latency().await;
                let mut items = self.synthetic.news(category, SYNTHETIC_FEED_SIZE, Utc::now());
                sort_by_recency(&mut items);
                items
            }
        }
    }

    /// Items whose title or publisher contains `text`. Blank text is the
    /// same as `fetch_news(Category::All)`.
    pub async fn search_news(&self, text: &str) -> Vec<NewsItem> {
        let text = text.trim();
        if text.is_empty() {
            return self.fetch_news(Category::All).await;
        }

        match self.mode() {
            DataMode::Live => self.aggregator.search(text).await,
            DataMode::Synthetic => {
                self.simulate_latency().await;
                let mut pool = self
                    .synthetic
                    .news(Category::All, SYNTHETIC_SEARCH_POOL, Utc::now());
                sort_by_recency(&mut pool);
                filter_by_query(pool, text)
            }
        }
    }

    pub async fn fetch_hot_stocks(&self) -> Vec<HotStock> {
        self.resolve_hot_stocks().await.data
    }

    pub async fn fetch_hot_sectors(&self) -> Vec<HotSector> {
        self.resolve_hot_sectors().await.data
    }

    /// Hot stocks along with the tier that served them.
    pub async fn resolve_hot_stocks(&self) -> Resolved<HotStock> {
        match self.mode() {
            DataMode::Live => self.chain.hot_stocks().await,
            DataMode::Synthetic => {
                self.simulate_latency().await;
                self.synthetic_resolved(self.synthetic.hot_stocks(Utc::now()))
            }
        }
    }

    /// Hot sectors along with the tier that served them.
    pub async fn resolve_hot_sectors(&self) -> Resolved<HotSector> {
        match self.mode() {
            DataMode::Live => self.chain.hot_sectors().await,
            DataMode::Synthetic => {
                self.simulate_latency().await;
                self.synthetic_resolved(self.synthetic.hot_sectors(Utc::now()))
            }
        }
    }

    fn synthetic_resolved<T>(&self, data: Vec<T>) -> Resolved<T> {
        let mut diagnostics = FetchDiagnostics::new();
        diagnostics.record_success(ProviderId::Synthetic, data.len());
        Resolved {
            data,
            source: ProviderId::Synthetic,
            diagnostics,
        }
    }

    async fn simulate_latency(&self) {
        let latency = self.config.synthetic_latency;
        if !latency.is_zero() {
            debug!("Synthetic mode: delaying {:?}", latency);
            tokio::time::sleep(latency).await;
        }
    }
}
