use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::errors::FeedError;

/// Topical news category.
///
/// `All` is the wildcard: no topical filter, every provider domain applies.
#[derive(
    Clone, Copy, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
#[serde(rename_all = "kebab-case")]
pub enum Category {
    #[default]
    All,
    UsStocks,
    CnStocks,
    Crypto,
    Macro,
}

impl Category {
    /// Every category, in navigation order.
    pub const ALL: [Category; 5] = [
        Category::All,
        Category::UsStocks,
        Category::CnStocks,
        Category::Crypto,
        Category::Macro,
    ];

    /// The four concrete topics (everything except the wildcard).
    pub const TOPICAL: [Category; 4] = [
        Category::UsStocks,
        Category::CnStocks,
        Category::Crypto,
        Category::Macro,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::All => "all",
            Self::UsStocks => "us-stocks",
            Self::CnStocks => "cn-stocks",
            Self::Crypto => "crypto",
            Self::Macro => "macro",
        }
    }

    pub fn is_wildcard(self) -> bool {
        self == Self::All
    }

    /// Static display label shown by the navigation bar.
    pub fn label(self) -> &'static str {
        match self {
            Self::All => "全部",
            Self::UsStocks => "美股",
            Self::CnStocks => "A股",
            Self::Crypto => "加密",
            Self::Macro => "宏观",
        }
    }

    pub fn icon(self) -> &'static str {
        match self {
            Self::All => "📰",
            Self::UsStocks => "🇺🇸",
            Self::CnStocks => "🇨🇳",
            Self::Crypto => "₿",
            Self::Macro => "🌐",
        }
    }

    /// Search text used when the caller asks for a category without a query.
    pub fn default_query(self) -> &'static str {
        match self {
            Self::All => "financial markets",
            Self::UsStocks => "US stock market",
            Self::CnStocks => "China A-share market",
            Self::Crypto => "cryptocurrency Bitcoin Ethereum",
            Self::Macro => "global economy GDP inflation",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Category {
    type Err = FeedError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_ascii_lowercase();
        Self::ALL
            .into_iter()
            .find(|category| category.as_str() == normalized)
            .ok_or_else(|| FeedError::InvalidCategory(s.to_string()))
    }
}
