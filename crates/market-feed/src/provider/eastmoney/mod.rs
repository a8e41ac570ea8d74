//! Eastmoney quote-listing adapter.
//!
//! The public `push2` listing endpoint needs no credentials and is the
//! primary snapshot tier.
//!
//! # API Endpoints
//!
//! - Listing: `GET {base}/api/qt/clist/get?...&fs=<market filter>&fields=<f-codes>`
//!
//! # Response Format
//!
//! `{"data": {"total": n, "diff": [{"f12": "600519", "f14": "贵州茅台", "f2": 168050, ...}]}}`.
//! Prices are reported in minor units (fen). `diff` is sometimes an object
//! keyed by row index instead of an array. Suspended quotes carry `"-"`.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use rust_decimal::Decimal;
use serde_json::Value;
use tracing::debug;

use crate::config::FeedConfig;
use crate::errors::FeedError;
use crate::models::{HotSector, HotStock, ProviderId};
use crate::provider::rows::StockRow;
use crate::provider::{extract, http, SnapshotProvider};

const PROVIDER_ID: ProviderId = ProviderId::Eastmoney;
const MAX_ROWS: usize = 10;
const REFERER: &str = "http://quote.eastmoney.com/";

/// A-share boards (SZ main, SZ ChiNext, SH main, SH STAR), sorted by change%.
const STOCK_QUERY: &str = "pn=1&pz=20&po=1&np=1&fltt=2&invt=2&fid=f3\
&fs=m:0+t:6,m:0+t:80,m:1+t:2,m:1+t:23\
&fields=f12,f14,f2,f3,f4,f5,f6,f7,f8,f15,f16,f17,f18,f20,f21";

/// Industry boards, sorted by change%.
const SECTOR_QUERY: &str = "pn=1&pz=20&po=1&np=1&fltt=2&invt=2&fid=f3\
&fs=m:90+t:3\
&fields=f12,f14,f2,f3,f4,f5,f6,f104,f105,f106";

pub struct EastmoneyProvider {
    client: Client,
    base_url: String,
}

impl EastmoneyProvider {
    pub fn new(base_url: &str, timeout: Duration) -> Self {
        Self {
            client: http::build_client(timeout),
            base_url: http::base_url(base_url),
        }
    }

    pub fn from_config(config: &FeedConfig) -> Self {
        Self::new(&config.eastmoney_url, config.request_timeout)
    }

    /// The query is appended verbatim: the market filter relies on a
    /// literal `+`, which form encoding would turn into `%2B`.
    async fn list(&self, query: &str) -> Result<Value, FeedError> {
        let url = format!("{}/api/qt/clist/get?{}", self.base_url, query);
        debug!("Eastmoney request: {}", url);
        let request = self.client.get(&url).header(reqwest::header::REFERER, REFERER);
        http::send_json(PROVIDER_ID, request).await
    }
}

#[async_trait]
impl SnapshotProvider for EastmoneyProvider {
    fn id(&self) -> ProviderId {
        PROVIDER_ID
    }

    async fn hot_stocks(&self) -> Result<Vec<HotStock>, FeedError> {
        let raw = self.list(STOCK_QUERY).await?;
        let stocks = normalize_stocks(&raw)?;
        if stocks.is_empty() {
            return Err(FeedError::EmptyResult {
                provider: PROVIDER_ID,
            });
        }
        Ok(stocks)
    }

    async fn hot_sectors(&self) -> Result<Vec<HotSector>, FeedError> {
        let raw = self.list(SECTOR_QUERY).await?;
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

/// Rows of `data.diff`, accepting both the array and the keyed-object form.
fn diff_rows(raw: &Value) -> Result<Vec<&Value>, FeedError> {
    match raw.get("data").and_then(|data| data.get("diff")) {
        Some(Value::Array(rows)) => Ok(rows.iter().collect()),
        Some(Value::Object(map)) => {
            let mut keyed: Vec<(usize, &Value)> = map
                .iter()
                .filter_map(|(key, row)| key.parse::<usize>().ok().map(|index| (index, row)))
                .collect();
            keyed.sort_by_key(|(index, _)| *index);
            Ok(keyed.into_iter().map(|(_, row)| row).collect())
        }
        _ => Err(FeedError::malformed(PROVIDER_ID, "missing data.diff")),
    }
}

fn minor_units_at(row: &Value, key: &str) -> Option<Decimal> {
    extract::decimal_at(row, &[key]).map(extract::from_minor_units)
}

/// Map a stock listing into hot stocks (first ten usable rows).
pub fn normalize_stocks(raw: &Value) -> Result<Vec<HotStock>, FeedError> {
    let rows = diff_rows(raw)?;

    let stocks: Vec<HotStock> = rows
        .into_iter()
        .filter_map(|row| {
            StockRow {
                code: extract::text_at(row, &["f12"]),
                name: extract::text_at(row, &["f14"]),
                price: minor_units_at(row, "f2"),
                previous_close: minor_units_at(row, "f18"),
                change: minor_units_at(row, "f4"),
                change_percent: extract::decimal_at(row, &["f3"]),
                open: minor_units_at(row, "f17"),
                high: minor_units_at(row, "f15"),
                low: minor_units_at(row, "f16"),
                volume: extract::unsigned_at(row, &["f5"]),
                amount: extract::decimal_at(row, &["f6"]),
                turnover_rate: extract::decimal_at(row, &["f8"]),
                amplitude: extract::decimal_at(row, &["f7"]),
            }
            .into_stock()
        })
        .take(MAX_ROWS)
        .collect();

    Ok(stocks)
}

/// Map a board listing into hot sectors (first ten usable rows).
///
/// `f62` (net inflow) and `f128` (leading stock) are read when present.
pub fn normalize_sectors(raw: &Value) -> Result<Vec<HotSector>, FeedError> {
    let rows = diff_rows(raw)?;

    let sectors: Vec<HotSector> = rows
        .into_iter()
        .filter_map(|row| {
            let code = extract::text_at(row, &["f12"])?;
            let name = extract::text_at(row, &["f14"])?;
            let sector = HotSector::new(
                code,
                name,
                extract::decimal_at(row, &["f3"]).unwrap_or_default(),
                extract::count_at(row, &["f104"]).unwrap_or_default(),
                extract::count_at(row, &["f105"]).unwrap_or_default(),
            )?
            .with_leading_stock(extract::text_at(row, &["f128"]))
            .with_amount(extract::decimal_at(row, &["f6"]))
            .with_net_inflow(extract::decimal_at(row, &["f62"]).unwrap_or_default());
            Some(sector)
        })
        .take(MAX_ROWS)
        .collect();

    Ok(sectors)
}

#[cfg(test)]
mod tests {
    use rust_decimal_macros::dec;
    use serde_json::json;

    use super::*;

    #[test]
    fn test_stock_prices_are_minor_units() {
        let raw = json!({
            "data": {"total": 1, "diff": [{
                "f12": "600519", "f14": "贵州茅台",
                "f2": 168050, "f3": 2.35, "f4": 3850,
                "f5": 25000, "f6": 4200000000.0, "f7": 3.1, "f8": 0.2,
                "f15": 169000, "f16": 164000, "f17": 164500, "f18": 164200
            }]}
        });

        let stocks = normalize_stocks(&raw).unwrap();
        let stock = &stocks[0];
        assert_eq!(stock.code, "600519");
        assert_eq!(stock.price, dec!(1680.50));
        assert_eq!(stock.change, dec!(38.50));
        assert_eq!(stock.previous_close, dec!(1642.00));
        assert_eq!(stock.high, Some(dec!(1690.00)));
        assert_eq!(stock.low, Some(dec!(1640.00)));
        assert_eq!(stock.open, Some(dec!(1645.00)));
        assert_eq!(stock.change_percent, dec!(2.35));
        assert_eq!(stock.volume, Some(25000));
        assert_eq!(stock.turnover_rate, Some(dec!(0.2)));
        assert_eq!(stock.amplitude, Some(dec!(3.1)));
    }

    #[test]
    fn test_suspended_fields_are_absent() {
        let raw = json!({
            "data": {"diff": [{
                "f12": "000858", "f14": "五粮液",
                "f2": 12890, "f3": 0, "f4": "-", "f18": 12890,
                "f5": "-", "f15": "-", "f16": "-", "f17": "-"
            }]}
        });

        let stock = &normalize_stocks(&raw).unwrap()[0];
        assert_eq!(stock.change, Decimal::ZERO);
        assert_eq!(stock.volume, None);
        assert_eq!(stock.high, None);
        assert_eq!(stock.open, None);
    }

    #[test]
    fn test_rows_without_change_or_previous_close_are_dropped() {
        let raw = json!({
            "data": {"diff": [
                {"f12": "600000", "f14": "浦发银行", "f2": 1000},
                {"f12": "600036", "f14": "招商银行", "f2": 3456, "f18": 3400}
            ]}
        });

        let stocks = normalize_stocks(&raw).unwrap();
        assert_eq!(stocks.len(), 1);
        assert_eq!(stocks[0].change, dec!(0.56));
    }

    #[test]
    fn test_keyed_object_diff_keeps_row_order() {
        let raw = json!({
            "data": {"diff": {
                "1": {"f12": "B", "f14": "second", "f2": 200, "f4": 10},
                "0": {"f12": "A", "f14": "first", "f2": 100, "f4": 10}
            }}
        });

        let codes: Vec<_> = normalize_stocks(&raw)
            .unwrap()
            .into_iter()
            .map(|s| s.code)
            .collect();
        assert_eq!(codes, vec!["A", "B"]);
    }

    #[test]
    fn test_keeps_first_ten_rows() {
        let rows: Vec<_> = (0..20)
            .map(|i| json!({"f12": format!("{:06}", i), "f14": "x", "f2": 1000, "f4": 10}))
            .collect();
        let raw = json!({"data": {"diff": rows}});
        assert_eq!(normalize_stocks(&raw).unwrap().len(), 10);
    }

    #[test]
    fn test_sector_mapping() {
        let raw = json!({
            "data": {"diff": [{
                "f12": "BK1036", "f14": "半导体", "f3": 3.21,
                "f104": 45, "f105": 7, "f6": 98000000000.0,
                "f62": 1250000000, "f128": "中芯国际"
            }]}
        });

        let sector = &normalize_sectors(&raw).unwrap()[0];
        assert_eq!(sector.code, "BK1036");
        assert_eq!(sector.change_percent, dec!(3.21));
        assert_eq!(sector.up_count, 45);
        assert_eq!(sector.down_count, 7);
        assert_eq!(sector.stock_count, 52);
        assert_eq!(sector.net_inflow, dec!(1250000000));
        assert_eq!(sector.leading_stock.as_deref(), Some("中芯国际"));
    }

    #[test]
    fn test_sector_optional_fields_default() {
        let raw = json!({
            "data": {"diff": [{"f12": "BK0477", "f14": "酿酒行业", "f3": -0.5, "f104": 10, "f105": 20}]}
        });

        let sector = &normalize_sectors(&raw).unwrap()[0];
        assert_eq!(sector.net_inflow, Decimal::ZERO);
        assert_eq!(sector.leading_stock, None);
        assert_eq!(sector.amount, None);
    }

    #[test]
    fn test_sector_with_overflowing_breadth_is_dropped() {
        let raw = json!({
            "data": {"diff": [
                {"f12": "BK0001", "f14": "溢出", "f3": 1.0, "f104": 4294967295u64, "f105": 1},
                {"f12": "BK0002", "f14": "银行", "f3": 0.4, "f104": 30, "f105": 12}
            ]}
        });

        let sectors = normalize_sectors(&raw).unwrap();
        assert_eq!(sectors.len(), 1);
        assert_eq!(sectors[0].code, "BK0002");
        assert_eq!(sectors[0].stock_count, 42);
    }

    #[test]
    fn test_null_data_is_malformed() {
        let raw = json!({"rc": 0, "data": null});
        assert!(matches!(
            normalize_stocks(&raw),
            Err(FeedError::Malformed { provider: ProviderId::Eastmoney, .. })
        ));
    }
}
