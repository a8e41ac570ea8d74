//! Market feed models
//!
//! This module contains the unified schema every provider normalizes into:
//! - `types` - Provider identifiers (ProviderId)
//! - `category` - Topical categories and their static presentation labels
//! - `news` - News items and their source / sentiment tags
//! - `snapshot` - Hot stock and hot sector snapshot rows

mod category;
mod news;
mod snapshot;
mod types;

pub use category::Category;
pub use news::{NewsItem, NewsSource, Sentiment};
pub use snapshot::{HotSector, HotStock};
pub use types::ProviderId;
