use std::{net::SocketAddr, time::Duration};

use anyhow::Context;
use finpulse_market_feed::{DataMode, FeedConfig};

const DEFAULT_LISTEN_ADDR: &str = "0.0.0.0:8080";
const DEFAULT_REQUEST_TIMEOUT_MS: u64 = 30_000;

pub struct Config {
    pub listen_addr: SocketAddr,
    pub cors_allow: Vec<String>,
    pub request_timeout: Duration,
    pub feed: FeedConfig,
}

impl Config {
    /// Read `FINPULSE_*` variables, loading `.env` first if present.
    pub fn from_env() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from an arbitrary variable source.
    pub fn from_lookup<F>(lookup: F) -> anyhow::Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let var = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());
        let millis = |key: &str| var(key).and_then(|v| v.trim().parse::<u64>().ok());

        let listen_addr: SocketAddr = var("FINPULSE_LISTEN_ADDR")
            .unwrap_or_else(|| DEFAULT_LISTEN_ADDR.to_string())
            .parse()
            .context("Invalid FINPULSE_LISTEN_ADDR")?;
        let cors_allow = var("FINPULSE_CORS_ALLOW_ORIGINS")
            .unwrap_or_else(|| "*".into())
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect();
        let request_timeout = Duration::from_millis(
            millis("FINPULSE_REQUEST_TIMEOUT_MS").unwrap_or(DEFAULT_REQUEST_TIMEOUT_MS),
        );

        let use_live = var("FINPULSE_USE_LIVE_PROVIDERS")
            .map(|v| !matches!(v.trim().to_ascii_lowercase().as_str(), "false" | "0" | "no" | "off"))
            .unwrap_or(true);

        let mut feed = FeedConfig::default().with_mode(DataMode::from_flag(use_live));
        if let Some(key) = var("FINPULSE_TAVILY_API_KEY") {
            feed = feed.with_tavily_api_key(key);
        }
        if let Some(url) = var("FINPULSE_TAVILY_URL") {
            feed.tavily_url = url;
        }
        if let Some(url) = var("FINPULSE_AKSHARE_URL") {
            feed.akshare_url = url;
        }
        if let Some(url) = var("FINPULSE_OPENBB_URL") {
            feed.openbb_url = url;
        }
        if let Some(url) = var("FINPULSE_EASTMONEY_URL") {
            feed.eastmoney_url = url;
        }
        if let Some(ms) = millis("FINPULSE_PROVIDER_TIMEOUT_MS") {
            feed = feed.with_request_timeout(Duration::from_millis(ms));
        }
        if let Some(ms) = millis("FINPULSE_SYNTHETIC_LATENCY_MS") {
            feed = feed.with_synthetic_latency(Duration::from_millis(ms));
        }
        if let Some(seed) = millis("FINPULSE_SYNTHETIC_SEED") {
            feed = feed.with_synthetic_seed(seed);
        }

        Ok(Self {
            listen_addr,
            cors_allow,
            request_timeout,
            feed,
        })
    }
}
