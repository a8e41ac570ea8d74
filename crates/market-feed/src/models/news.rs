use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::category::Category;
use super::types::ProviderId;

/// The news providers an item can originate from.
///
/// Declaration order is the merge order used by the aggregator.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NewsSource {
    Tavily,
    AkShare,
    OpenBb,
}

impl NewsSource {
    pub const ALL: [NewsSource; 3] = [NewsSource::Tavily, NewsSource::AkShare, NewsSource::OpenBb];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Tavily => "tavily",
            Self::AkShare => "akshare",
            Self::OpenBb => "openbb",
        }
    }

    /// Display label for the source badge.
    pub fn label(self) -> &'static str {
        match self {
            Self::Tavily => "Tavily",
            Self::AkShare => "AkShare",
            Self::OpenBb => "OpenBB",
        }
    }

    /// Badge color for the source.
    pub fn color(self) -> &'static str {
        match self {
            Self::Tavily => "purple",
            Self::AkShare => "red",
            Self::OpenBb => "blue",
        }
    }
}

impl From<NewsSource> for ProviderId {
    fn from(source: NewsSource) -> Self {
        match source {
            NewsSource::Tavily => ProviderId::Tavily,
            NewsSource::AkShare => ProviderId::AkShare,
            NewsSource::OpenBb => ProviderId::OpenBb,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Sentiment {
    Positive,
    Negative,
    Neutral,
}

/// A normalized news article.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewsItem {
    /// Opaque identifier, unique within one fetch only.
    pub id: String,

    /// Headline (never empty).
    pub title: String,

    pub source: NewsSource,

    pub category: Category,

    /// Absolute link to the article.
    pub url: String,

    pub publisher: String,

    /// Publication time; the fetch time when the provider omitted it.
    pub timestamp: DateTime<Utc>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub summary: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sentiment: Option<Sentiment>,

    /// Estimated read time in minutes.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub read_time: Option<u32>,
}

impl NewsItem {
    /// Case-insensitive substring match against title and publisher.
    ///
    /// `needle` must already be lowercased.
    pub fn matches_query(&self, needle: &str) -> bool {
        self.title.to_lowercase().contains(needle) || self.publisher.to_lowercase().contains(needle)
    }
}
