//! AkShare backend adapter.
//!
//! AkShare is a self-hosted domestic (China A-share) market backend. It
//! serves CN-stock "hot list" news and acts as the secondary snapshot tier.
//!
//! # API Endpoints
//!
//! - Hot list news: `GET {base}/stock/realtime/hot`
//! - Hot stocks: `GET {base}/stock/hot`
//! - Hot sectors: `GET {base}/sector/hot`
//!
//! # Response Format
//!
//! The hot list is wrapped in `{"status": "success", "data": [...]}` and uses
//! either English or Chinese column names. The snapshot endpoints return
//! `{"stocks": [...]}` / `{"sectors": [...]}` already in the unified camelCase
//! schema with prices in major units.

use std::time::Duration;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use reqwest::Client;
use rust_decimal::Decimal;
use serde_json::Value;
use tracing::debug;

use crate::config::FeedConfig;
use crate::errors::FeedError;
use crate::models::{
    Category, HotSector, HotStock, NewsItem, NewsSource, ProviderId, Sentiment,
};
use crate::provider::rows::StockRow;
use crate::provider::{extract, http, NewsProvider, SnapshotProvider};

const PROVIDER_ID: ProviderId = ProviderId::AkShare;
const MAX_ROWS: usize = 10;
const DEFAULT_REASON: &str = "热门股票";
const PUBLISHER: &str = "东方财富";

/// AkShare adapter for hot-list news and snapshots.
pub struct AkShareProvider {
    client: Client,
    base_url: String,
}

impl AkShareProvider {
    pub fn new(base_url: &str, timeout: Duration) -> Self {
        Self {
            client: http::build_client(timeout),
            base_url: http::base_url(base_url),
        }
    }

    pub fn from_config(config: &FeedConfig) -> Self {
        Self::new(&config.akshare_url, config.request_timeout)
    }

    async fn get(&self, path: &str) -> Result<Value, FeedError> {
        let url = format!("{}{}", self.base_url, path);
        debug!("AkShare request: {}", path);
        http::send_json(PROVIDER_ID, self.client.get(&url)).await
    }
}

#[async_trait]
impl NewsProvider for AkShareProvider {
    fn id(&self) -> NewsSource {
        NewsSource::AkShare
    }

    /// The hot list is not searchable, so `query` and `category` only
    /// matter to the router.
    async fn fetch_news(
        &self,
        _query: &str,
        _category: Category,
    ) -> Result<Vec<NewsItem>, FeedError> {
        let raw = self.get("/stock/realtime/hot").await?;
        normalize_hot_list(&raw, Utc::now())
    }
}

#[async_trait]
impl SnapshotProvider for AkShareProvider {
    fn id(&self) -> ProviderId {
        PROVIDER_ID
    }

    async fn hot_stocks(&self) -> Result<Vec<HotStock>, FeedError> {
        let raw = self.get("/stock/hot").await?;
        let stocks = normalize_stocks(&raw)?;
        if stocks.is_empty() {
            return Err(FeedError::EmptyResult {
                provider: PROVIDER_ID,
            });
        }
        Ok(stocks)
    }

    async fn hot_sectors(&self) -> Result<Vec<HotSector>, FeedError> {
        let raw = self.get("/sector/hot").await?;
        let sectors = normalize_sectors(&raw)?;
        if sectors.is_empty() {
            return Err(FeedError::EmptyResult {
                provider: PROVIDER_ID,
            });
        }
        Ok(sectors)
    }
}

// ============================================================================
// Normalization
// ============================================================================

/// Map the hot list into CN-stock news items, one per listed stock.
pub fn normalize_hot_list(
    raw: &Value,
    fetched_at: DateTime<Utc>,
) -> Result<Vec<NewsItem>, FeedError> {
    let rows = extract::success_data(raw, PROVIDER_ID)?;
    let millis = fetched_at.timestamp_millis();

    let items = rows
        .iter()
        .take(MAX_ROWS)
        .enumerate()
        .filter_map(|(index, row)| {
            let name = extract::text_at(row, &["name", "名称"])?;
            let code = extract::text_at(row, &["code", "代码"])?;
            let reason = extract::text_at(row, &["reason", "原因"])
                .unwrap_or_else(|| DEFAULT_REASON.to_string());
            let price = extract::decimal_at(row, &["price", "最新价"]);
            let change_percent =
                extract::decimal_at(row, &["change_percent", "涨跌幅"]).unwrap_or_default();

            let sentiment = if change_percent > Decimal::ZERO {
                Sentiment::Positive
            } else {
                Sentiment::Negative
            };
            let price_text = price.map_or_else(|| "-".to_string(), |p| p.to_string());

            Some(NewsItem {
                id: format!("akshare-{}-{}-{}", Category::CnStocks, index, millis),
                title: format!("{} ({}) - {}", name, code, reason),
                source: NewsSource::AkShare,
                category: Category::CnStocks,
                url: format!(
                    "https://finance.sina.com.cn/realstock/company/{}/nc.shtml",
                    code
                ),
                publisher: PUBLISHER.to_string(),
                timestamp: fetched_at,
                summary: Some(format!(
                    "最新价: {} | 涨跌幅: {}%",
                    price_text, change_percent
                )),
                sentiment: Some(sentiment),
                read_time: Some(1),
            })
        })
        .collect();

    Ok(items)
}

/// Map `{"stocks": [...]}` rows in the unified schema.
pub fn normalize_stocks(raw: &Value) -> Result<Vec<HotStock>, FeedError> {
    let rows = extract::array_field(raw, "stocks", PROVIDER_ID)?;

    Ok(rows
        .iter()
        .filter_map(|row| {
            StockRow {
                code: extract::text_at(row, &["code"]),
                name: extract::text_at(row, &["name"]),
                price: extract::decimal_at(row, &["price"]),
                previous_close: extract::decimal_at(row, &["previousClose"]),
                change: extract::decimal_at(row, &["change"]),
                change_percent: extract::decimal_at(row, &["changePercent"]),
                open: extract::decimal_at(row, &["open"]),
                high: extract::decimal_at(row, &["high"]),
                low: extract::decimal_at(row, &["low"]),
                volume: extract::unsigned_at(row, &["volume"]),
                amount: extract::decimal_at(row, &["amount"]),
                turnover_rate: extract::decimal_at(row, &["turnover", "turnoverRate"]),
                amplitude: extract::decimal_at(row, &["amplitude"]),
            }
            .into_stock()
        })
        .take(MAX_ROWS)
        .collect())
}

/// Map `{"sectors": [...]}` rows in the unified schema. A reported
/// `stockCount` is ignored; it is always recomputed from the split.
pub fn normalize_sectors(raw: &Value) -> Result<Vec<HotSector>, FeedError> {
    let rows = extract::array_field(raw, "sectors", PROVIDER_ID)?;

    Ok(rows
        .iter()
        .filter_map(|row| {
            let code = extract::text_at(row, &["code"])?;
            let name = extract::text_at(row, &["name"])?;
            let sector = HotSector::new(
                code,
                name,
                extract::decimal_at(row, &["changePercent"]).unwrap_or_default(),
                extract::count_at(row, &["upCount"]).unwrap_or_default(),
                extract::count_at(row, &["downCount"]).unwrap_or_default(),
            )?
            .with_leading_stock(extract::text_at(row, &["leadingStock"]))
            .with_amount(extract::decimal_at(row, &["amount"]))
            .with_net_inflow(extract::decimal_at(row, &["netInflow"]).unwrap_or_default());
            Some(sector)
        })
        .take(MAX_ROWS)
        .collect())
}

#[cfg(test)]
mod tests {
    use chrono::TimeZone;
    use rust_decimal_macros::dec;
    use serde_json::json;

    use super::*;

    fn fetched_at() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 5, 1, 2, 30, 0).unwrap()
    }

    #[test]
    fn test_hot_list_english_columns() {
        let raw = json!({
            "status": "success",
            "data": [{
                "name": "贵州茅台",
                "code": "600519",
                "reason": "业绩预增",
                "price": 1680.5,
                "change_percent": 2.35
            }]
        });

        let items = normalize_hot_list(&raw, fetched_at()).unwrap();
        let item = &items[0];
        assert_eq!(item.title, "贵州茅台 (600519) - 业绩预增");
        assert_eq!(
            item.url,
            "https://finance.sina.com.cn/realstock/company/600519/nc.shtml"
        );
        assert_eq!(item.publisher, "东方财富");
        assert_eq!(item.category, Category::CnStocks);
        assert_eq!(item.source, NewsSource::AkShare);
        assert_eq!(item.timestamp, fetched_at());
        assert_eq!(item.summary.as_deref(), Some("最新价: 1680.5 | 涨跌幅: 2.35%"));
        assert_eq!(item.sentiment, Some(Sentiment::Positive));
        assert_eq!(item.read_time, Some(1));
        assert_eq!(
            item.id,
            format!("akshare-cn-stocks-0-{}", fetched_at().timestamp_millis())
        );
    }

    #[test]
    fn test_hot_list_chinese_columns_and_default_reason() {
        let raw = json!({
            "status": "success",
            "data": [{"名称": "比亚迪", "代码": "002594", "最新价": "256.3", "涨跌幅": "-1.2"}]
        });

        let items = normalize_hot_list(&raw, fetched_at()).unwrap();
        assert_eq!(items[0].title, "比亚迪 (002594) - 热门股票");
        assert_eq!(items[0].sentiment, Some(Sentiment::Negative));
    }

    #[test]
    fn test_hot_list_keeps_first_ten_rows() {
        let rows: Vec<_> = (0..15)
            .map(|i| json!({"name": format!("S{}", i), "code": format!("{:06}", i)}))
            .collect();
        let raw = json!({"status": "success", "data": rows});

        let items = normalize_hot_list(&raw, fetched_at()).unwrap();
        assert_eq!(items.len(), 10);
        assert_eq!(items[9].title, "S9 (000009) - 热门股票");
        assert!(items[9].id.starts_with("akshare-cn-stocks-9-"));
    }

    #[test]
    fn test_hot_list_requires_success_status() {
        let raw = json!({"status": "error", "message": "backend down"});
        assert!(matches!(
            normalize_hot_list(&raw, fetched_at()),
            Err(FeedError::Malformed { provider: ProviderId::AkShare, .. })
        ));
    }

    #[test]
    fn test_stocks_in_unified_schema() {
        let raw = json!({
            "stocks": [
                {
                    "code": "600036", "name": "招商银行", "price": 34.56,
                    "previousClose": 34.0, "change": 0.56, "changePercent": 1.65,
                    "volume": 125000, "turnover": 0.3
                },
                {"code": "000000", "name": "No price"}
            ]
        });

        let stocks = normalize_stocks(&raw).unwrap();
        assert_eq!(stocks.len(), 1);
        assert_eq!(stocks[0].price, dec!(34.56));
        assert_eq!(stocks[0].volume, Some(125000));
        assert_eq!(stocks[0].turnover_rate, Some(dec!(0.3)));
        assert_eq!(stocks[0].open, None);
    }

    #[test]
    fn test_sectors_recompute_stock_count() {
        let raw = json!({
            "sectors": [{
                "code": "BK0001", "name": "光伏", "changePercent": 2.1,
                "leadingStock": "隆基绿能", "stockCount": 100,
                "upCount": 30, "downCount": 12, "netInflow": -1500000
            }]
        });

        let sectors = normalize_sectors(&raw).unwrap();
        assert_eq!(sectors[0].stock_count, 42);
        assert_eq!(sectors[0].leading_stock.as_deref(), Some("隆基绿能"));
        assert_eq!(sectors[0].net_inflow, dec!(-1500000));
        assert_eq!(sectors[0].amount, None);
    }

    #[test]
    fn test_sector_with_overflowing_breadth_is_dropped() {
        let raw = json!({
            "sectors": [
                {"code": "BK0001", "name": "溢出", "upCount": 4294967295u64, "downCount": 1},
                {"code": "BK0002", "name": "储能", "upCount": 8, "downCount": 2}
            ]
        });

        let sectors = normalize_sectors(&raw).unwrap();
        assert_eq!(sectors.len(), 1);
        assert_eq!(sectors[0].code, "BK0002");
        assert_eq!(sectors[0].stock_count, 10);
    }

    #[test]
    fn test_missing_snapshot_array_is_malformed() {
        assert!(normalize_stocks(&json!({"data": []})).is_err());
        assert!(normalize_sectors(&json!({"sectors": "none"})).is_err());
    }
}
