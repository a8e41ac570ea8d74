//! Provider trait definitions.

use async_trait::async_trait;

use crate::errors::FeedError;
use crate::models::{Category, HotSector, HotStock, NewsItem, NewsSource, ProviderId};

/// A source of news items.
///
/// The aggregator only calls a provider for categories the router assigns to
/// it, so implementations may assume `category` is in their domain (or the
/// wildcard).
///
/// # Example
///
/// ```ignore
/// use async_trait::async_trait;
/// use finpulse_market_feed::{Category, FeedError, NewsItem, NewsProvider, NewsSource};
///
/// struct Wire;
///
/// #[async_trait]
/// impl NewsProvider for Wire {
///     fn id(&self) -> NewsSource {
///         NewsSource::OpenBb
///     }
///
///     async fn fetch_news(&self, query: &str, category: Category) -> Result<Vec<NewsItem>, FeedError> {
///         Ok(Vec::new())
///     }
/// }
/// ```
#[async_trait]
pub trait NewsProvider: Send + Sync {
    /// The source tag stamped on every item this provider returns.
    fn id(&self) -> NewsSource;

    /// Fetch news for `category`.
    ///
    /// `query` may be empty, in which case the provider substitutes
    /// [`Category::default_query`] where it needs search text. Exactly one
    /// HTTP request is made per call.
    async fn fetch_news(&self, query: &str, category: Category)
        -> Result<Vec<NewsItem>, FeedError>;
}

/// A source of market snapshots, usable as one tier of the fallback chain.
#[async_trait]
pub trait SnapshotProvider: Send + Sync {
    fn id(&self) -> ProviderId;

    /// Current hot stocks. An empty list is reported as
    /// [`FeedError::EmptyResult`].
    async fn hot_stocks(&self) -> Result<Vec<HotStock>, FeedError>;

    /// Current hot sectors. An empty list is reported as
    /// [`FeedError::EmptyResult`].
    async fn hot_sectors(&self) -> Result<Vec<HotSector>, FeedError>;
}
