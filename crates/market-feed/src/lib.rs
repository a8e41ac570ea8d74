//! FinPulse Market Feed Crate
//!
//! This crate aggregates financial news and market snapshots from several
//! independently-owned providers into one normalized schema.
//!
//! # Overview
//!
//! The market feed crate supports:
//! - A news feed merged from a search-style news API, a domestic market backend
//!   and a US market backend
//! - Hot stock and hot sector snapshots resolved through a fallback chain
//! - A deterministic synthetic data source, selectable at startup
//! - Graceful degradation: partial provider failure never fails a request
//!
//! # Architecture
//!
//! ```text
//! +------------------+
//! |   FeedService    |  (fetch_news, search_news, fetch_hot_stocks, fetch_hot_sectors)
//! +------------------+
//!          |                          |
//!          v                          v
//! +------------------+     +--------------------+
//! |  Category Router |     |   Fallback Chain   |  (primary -> secondary -> synthetic)
//! +------------------+     +--------------------+
//!          |                          |
//!          v                          |
//! +------------------+                |
//! | Fan-out Aggregator|               |
//! +------------------+                |
//!          |                          |
//!          v                          v
//! +-----------------------------------------------+
//! |  Provider adapters (Tavily, AkShare, OpenBB,   |
//! |  Eastmoney) and the synthetic generator        |
//! +-----------------------------------------------+
//!                         |
//!                         v
//! +-----------------------------------------------+
//! |  NewsItem / HotStock / HotSector               |
//! +-----------------------------------------------+
//! ```
//!
//! # Core Types
//!
//! - [`FeedService`] - The aggregator API consumed by the presentation layer
//! - [`FeedConfig`] / [`DataMode`] - Startup configuration and the live/synthetic switch
//! - [`NewsItem`], [`HotStock`], [`HotSector`] - The unified schema
//! - [`Category`], [`NewsSource`], [`ProviderId`] - Routing identifiers

pub mod config;
pub mod errors;
pub mod models;
pub mod provider;
pub mod registry;
pub mod service;

pub use config::{ConfigSummary, DataMode, FeedConfig};
pub use errors::{ErrorClass, FeedError};
pub use models::{Category, HotSector, HotStock, NewsItem, NewsSource, ProviderId, Sentiment};
pub use provider::akshare::AkShareProvider;
pub use provider::eastmoney::EastmoneyProvider;
pub use provider::openbb::OpenBbProvider;
pub use provider::synthetic::SyntheticMarket;
pub use provider::tavily::TavilyProvider;
pub use provider::{NewsProvider, SnapshotProvider};
pub use registry::{
    select_providers, FallbackChain, FetchDiagnostics, NewsAggregator, ProviderAttempt, Resolved,
    SkipReason, SnapshotValidator,
};
pub use service::FeedService;
