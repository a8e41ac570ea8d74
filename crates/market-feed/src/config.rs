//! Startup configuration for the feed.
//!
//! [`FeedConfig`] is built once when the process starts and is read-only
//! afterwards. The live/synthetic switch lives here as a plain value so it
//! can be injected into [`FeedService`](crate::FeedService) instead of being
//! consulted as global state.

use std::fmt;
use std::time::Duration;

use serde::Serialize;

pub const DEFAULT_TAVILY_URL: &str = "https://api.tavily.com";
pub const DEFAULT_AKSHARE_URL: &str = "http://localhost:8000";
pub const DEFAULT_OPENBB_URL: &str = "http://localhost:8001";
pub const DEFAULT_EASTMONEY_URL: &str = "https://push2.eastmoney.com";

/// Transport timeout applied to every provider request.
pub const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

/// Artificial delay of every synthetic-mode operation.
pub const DEFAULT_SYNTHETIC_LATENCY: Duration = Duration::from_millis(300);

pub const DEFAULT_SYNTHETIC_SEED: u64 = 20_26;

/// Where the feed gets its data from.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum DataMode {
    /// Call the external providers.
    #[default]
    Live,
    /// Serve generated data and never touch the network.
    Synthetic,
}

impl DataMode {
    /// Map the `use_live_providers` switch onto a mode.
    pub fn from_flag(use_live_providers: bool) -> Self {
        if use_live_providers {
            Self::Live
        } else {
            Self::Synthetic
        }
    }

    pub fn is_live(self) -> bool {
        self == Self::Live
    }
}

/// Provider endpoints, credentials and mode, resolved once at startup.
#[derive(Clone)]
pub struct FeedConfig {
    pub mode: DataMode,
    /// Without a key the Tavily adapter is skipped.
    pub tavily_api_key: Option<String>,
    pub tavily_url: String,
    pub akshare_url: String,
    pub openbb_url: String,
    pub eastmoney_url: String,
    pub request_timeout: Duration,
    pub synthetic_latency: Duration,
    pub synthetic_seed: u64,
}

impl Default for FeedConfig {
    fn default() -> Self {
        Self {
            mode: DataMode::default(),
            tavily_api_key: None,
            tavily_url: DEFAULT_TAVILY_URL.to_string(),
            akshare_url: DEFAULT_AKSHARE_URL.to_string(),
            openbb_url: DEFAULT_OPENBB_URL.to_string(),
            eastmoney_url: DEFAULT_EASTMONEY_URL.to_string(),
            request_timeout: DEFAULT_REQUEST_TIMEOUT,
            synthetic_latency: DEFAULT_SYNTHETIC_LATENCY,
            synthetic_seed: DEFAULT_SYNTHETIC_SEED,
        }
    }
}

impl FeedConfig {
    /// A synthetic-mode configuration with no artificial latency.
    pub fn synthetic() -> Self {
        Self {
            mode: DataMode::Synthetic,
            synthetic_latency: Duration::ZERO,
            ..Self::default()
        }
    }

    pub fn with_mode(mut self, mode: DataMode) -> Self {
        self.mode = mode;
        self
    }

    /// Set the Tavily key. Blank keys are treated as absent.
    pub fn with_tavily_api_key(mut self, key: impl Into<String>) -> Self {
        let key = key.into();
        self.tavily_api_key = if key.trim().is_empty() {
            None
        } else {
            Some(key)
        };
        self
    }

    pub fn with_request_timeout(mut self, timeout: Duration) -> Self {
        self.request_timeout = timeout;
        self
    }

    pub fn with_synthetic_latency(mut self, latency: Duration) -> Self {
        self.synthetic_latency = latency;
        self
    }

    pub fn with_synthetic_seed(mut self, seed: u64) -> Self {
        self.synthetic_seed = seed;
        self
    }

    pub fn tavily_key_configured(&self) -> bool {
        self.tavily_api_key.is_some()
    }

    /// What the presentation layer may learn about the configuration.
    pub fn summary(&self) -> ConfigSummary {
        ConfigSummary {
            use_live_providers: self.mode.is_live(),
            tavily_key_configured: self.tavily_key_configured(),
            akshare_url: self.akshare_url.clone(),
            openbb_url: self.openbb_url.clone(),
        }
    }
}

impl fmt::Debug for FeedConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FeedConfig")
            .field("mode", &self.mode)
            .field(
                "tavily_api_key",
                &self.tavily_api_key.as_ref().map(|_| "<redacted>"),
            )
            .field("tavily_url", &self.tavily_url)
            .field("akshare_url", &self.akshare_url)
            .field("openbb_url", &self.openbb_url)
            .field("eastmoney_url", &self.eastmoney_url)
            .field("request_timeout", &self.request_timeout)
            .field("synthetic_latency", &self.synthetic_latency)
            .field("synthetic_seed", &self.synthetic_seed)
            .finish()
    }
}

/// Public view of [`FeedConfig`]. Never carries the API key itself.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ConfigSummary {
    pub use_live_providers: bool,
    pub tavily_key_configured: bool,
    pub akshare_url: String,
    pub openbb_url: String,
}
