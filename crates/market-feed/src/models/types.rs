use std::fmt;

use serde::{Deserialize, Serialize};

/// Identifier of every data source the feed can talk to.
///
/// News sources are a subset of these (see [`NewsSource`](super::NewsSource));
/// `Eastmoney` and `Synthetic` only serve market snapshots.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ProviderId {
    Tavily,
    AkShare,
    OpenBb,
    Eastmoney,
    Synthetic,
}

impl ProviderId {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Tavily => "TAVILY",
            Self::AkShare => "AKSHARE",
            Self::OpenBb => "OPENBB",
            Self::Eastmoney => "EASTMONEY",
            Self::Synthetic => "SYNTHETIC",
        }
    }
}

impl fmt::Display for ProviderId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
