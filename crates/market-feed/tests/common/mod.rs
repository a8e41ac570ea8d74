#![allow(dead_code)]

use std::time::Duration;

use finpulse_market_feed::FeedConfig;
use httpmock::MockServer;
use serde_json::{json, Value};

pub const TEST_KEY: &str = "tvly-test-key";

pub fn setup_server() -> MockServer {
    MockServer::start()
}

/// Live config with every provider pointed at `server`.
pub fn live_config(server: &MockServer) -> FeedConfig {
    FeedConfig {
        tavily_url: server.base_url(),
        akshare_url: server.base_url(),
        openbb_url: server.base_url(),
        eastmoney_url: server.base_url(),
        synthetic_latency: Duration::ZERO,
        ..FeedConfig::default()
    }
    .with_request_timeout(Duration::from_secs(2))
    .with_tavily_api_key(TEST_KEY)
}

pub fn tavily_results() -> Value {
    json!({
        "query": "US stock market finance news",
        "results": [
            {
                "title": "Fed holds rates steady",
                "url": "https://www.reuters.com/markets/fed-holds",
                "content": "The Federal Reserve left rates unchanged on Wednesday.",
                "published_date": "2026-05-01T12:00:00Z",
                "score": 0.91
            },
            {
                "title": "Untitled link",
                "url": "ftp://example.com/file",
                "content": "dropped"
            }
        ]
    })
}

pub fn openbb_news() -> Value {
    json!({
        "status": "success",
        "data": [{
            "title": "NVIDIA hits record high",
            "url": "https://www.cnbc.com/nvda",
            "source": "CNBC",
            "date": "2026-05-01T13:30:00Z",
            "text": "Shares rose 4% after earnings."
        }]
    })
}

pub fn akshare_hot_list() -> Value {
    json!({
        "status": "success",
        "data": [
            {"name": "贵州茅台", "code": "600519", "price": 1680.5, "change_percent": 2.35},
            {"名称": "宁德时代", "代码": "300750", "最新价": "210.10", "涨跌幅": "-1.2"}
        ]
    })
}

pub fn akshare_stocks() -> Value {
    json!({
        "stocks": [
            {
                "code": "000001", "name": "平安银行",
                "price": 12.5, "previousClose": 12.0, "change": 0.5, "changePercent": 4.17,
                "open": 12.1, "high": 12.6, "low": 12.0, "volume": 1200000
            },
            {
                "code": "601318", "name": "中国平安",
                "price": 48.0, "previousClose": 50.0
            }
        ]
    })
}

pub fn akshare_sectors() -> Value {
    json!({
        "sectors": [{
            "code": "BK0477", "name": "酿酒行业", "changePercent": 3.1,
            "upCount": 30, "downCount": 5, "stockCount": 99,
            "leadingStock": "贵州茅台", "netInflow": 150000000
        }]
    })
}

pub fn eastmoney_stocks() -> Value {
    json!({
        "rc": 0,
        "data": {"total": 2, "diff": [
            {
                "f12": "600519", "f14": "贵州茅台",
                "f2": 168050, "f3": 2.35, "f4": 3850, "f5": 25000, "f6": 4200000000.0,
                "f7": 3.1, "f8": 0.2, "f15": 169000, "f16": 164000, "f17": 164500, "f18": 164200
            },
            {
                "f12": "000858", "f14": "五粮液",
                "f2": "-", "f3": "-", "f4": "-", "f18": 15000
            }
        ]}
    })
}

/// Rows whose price disagrees with previous close plus change.
pub fn eastmoney_corrupt_stocks() -> Value {
    json!({
        "rc": 0,
        "data": {"total": 1, "diff": [
            {"f12": "600000", "f14": "浦发银行", "f2": 1000, "f3": 11.11, "f4": 500, "f18": 900}
        ]}
    })
}

pub fn eastmoney_sectors() -> Value {
    json!({
        "rc": 0,
        "data": {"total": 1, "diff": {
            "0": {
                "f12": "BK0493", "f14": "新能源", "f3": 4.2, "f6": 98000000000.0,
                "f104": 120, "f105": 8, "f62": 2300000000.0, "f128": "宁德时代"
            }
        }}
    })
}
