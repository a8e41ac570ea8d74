//! Deterministic synthetic market data.
//!
//! Serves every operation in synthetic mode and is the terminal tier of the
//! snapshot fallback chain, so it never fails and never returns an empty
//! list. Output is a pure function of the seed and the request time.

mod catalog;

use chrono::{DateTime, Duration, Utc};
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use rust_decimal::Decimal;

use crate::config::DEFAULT_SYNTHETIC_SEED;
use crate::models::{Category, HotSector, HotStock, NewsItem, NewsSource, Sentiment};
use crate::registry::select_providers;

/// How far back synthetic news timestamps reach.
const NEWS_WINDOW_MINUTES: i64 = 180;

/// Share of synthetic news items that carry a summary.
const SUMMARY_PROBABILITY: f64 = 0.3;

const SENTIMENTS: [Sentiment; 3] = [Sentiment::Positive, Sentiment::Negative, Sentiment::Neutral];

/// Seeded generator for news, hot stocks and hot sectors.
#[derive(Clone, Debug)]
pub struct SyntheticMarket {
    seed: u64,
}

impl Default for SyntheticMarket {
    fn default() -> Self {
        Self::new(DEFAULT_SYNTHETIC_SEED)
    }
}

impl SyntheticMarket {
    pub fn new(seed: u64) -> Self {
        Self { seed }
    }

    fn rng(&self, now: DateTime<Utc>) -> StdRng {
        StdRng::seed_from_u64(self.seed ^ now.timestamp_millis() as u64)
    }

    /// Generate `count` news items for `category`.
    ///
    /// For the wildcard each item gets one of the topical categories. The
    /// source is always one the router would select for the item's category.
    pub fn news(&self, category: Category, count: usize, now: DateTime<Utc>) -> Vec<NewsItem> {
        let mut rng = self.rng(now);
        let millis = now.timestamp_millis();

        (0..count)
            .map(|index| {
                let actual = if category.is_wildcard() {
                    Category::TOPICAL
                        .choose(&mut rng)
                        .copied()
                        .unwrap_or(Category::UsStocks)
                } else {
                    category
                };

                let titles = catalog::titles(actual);
                let title = titles[index % titles.len()];

                let sources: Vec<NewsSource> = select_providers(actual).into_iter().collect();
                let source = sources.choose(&mut rng).copied().unwrap_or(NewsSource::Tavily);
                let publisher = catalog::publishers(actual)
                    .choose(&mut rng)
                    .copied()
                    .unwrap_or("Bloomberg");

                let minutes_ago = rng.gen_range(0..NEWS_WINDOW_MINUTES);
                let summary = rng.gen_bool(SUMMARY_PROBABILITY).then(|| {
                    format!(
                        "Full article available at {}. Click to read more details about this developing story.",
                        publisher
                    )
                });

                NewsItem {
                    id: format!("synthetic-{}-{}-{}", actual, index, millis),
                    title: title.to_string(),
                    source,
                    category: actual,
                    url: format!("https://example.com/news/{}", index),
                    publisher: publisher.to_string(),
                    timestamp: now - Duration::minutes(minutes_ago),
                    summary,
                    sentiment: SENTIMENTS.choose(&mut rng).copied(),
                    read_time: Some(rng.gen_range(1..=5)),
                }
            })
            .collect()
    }

    /// Ten fixed tickers with random moves, largest movers first.
    ///
    /// `price = previous_close + change` holds exactly.
    pub fn hot_stocks(&self, now: DateTime<Utc>) -> Vec<HotStock> {
        let mut rng = self.rng(now);

        let mut stocks: Vec<HotStock> = catalog::STOCKS
            .iter()
            .map(|&(code, name, base_fen)| {
                let previous_close = Decimal::new(base_fen, 2);
                let change_percent = Decimal::new(rng.gen_range(-1000..=1000), 2);
                let change = (previous_close * change_percent / Decimal::ONE_HUNDRED).round_dp(2);
                let price = previous_close + change;

                let amplitude = Decimal::new(rng.gen_range(0..=800), 2);
                let spread = (previous_close * amplitude / Decimal::from(200)).round_dp(2);
                let open =
                    (previous_close + change * Decimal::new(rng.gen_range(0..=100), 2)).round_dp(2);
                let high = price.max(open) + spread;
                let low = (price.min(open) - spread).max(Decimal::ZERO);

                HotStock {
                    code: code.to_string(),
                    name: name.to_string(),
                    price,
                    open: Some(open),
                    high: Some(high),
                    low: Some(low),
                    previous_close,
                    change,
                    change_percent,
                    volume: Some(rng.gen_range(0..1_000_000_000u64)),
                    amount: Some(Decimal::from(rng.gen_range(0..50_000_000_000i64))),
                    turnover_rate: Some(Decimal::new(rng.gen_range(0..=1500), 2)),
                    amplitude: Some(amplitude),
                }
            })
            .collect();

        stocks.sort_by(|a, b| b.change_percent.abs().cmp(&a.change_percent.abs()));
        stocks
    }

    /// Fifteen named sectors, largest movers first.
    pub fn hot_sectors(&self, now: DateTime<Utc>) -> Vec<HotSector> {
        let mut rng = self.rng(now);

        let mut sectors: Vec<HotSector> = catalog::SECTORS
            .iter()
            .enumerate()
            .filter_map(|(index, &(name, leader))| {
                let change_percent = Decimal::new(rng.gen_range(-800..=800), 2);
                let total: u32 = rng.gen_range(20..120);
                // Rising sectors lean towards advancers.
                let up_ratio: u32 = if change_percent > Decimal::ZERO {
                    rng.gen_range(60..=90)
                } else {
                    rng.gen_range(30..=60)
                };
                let up = total * up_ratio / 100;

                HotSector::new(
                    format!("BK{}", 1000 + index),
                    name,
                    change_percent,
                    up,
                    total - up,
                )
                .map(|sector| {
                    sector
                        .with_leading_stock(Some(leader.to_string()))
                        .with_amount(Some(Decimal::from(rng.gen_range(0..100_000_000_000i64))))
                        .with_net_inflow(Decimal::from(
                            rng.gen_range(-10_000_000_000i64..=10_000_000_000),
                        ))
                })
            })
            .collect();

        sectors.sort_by(|a, b| b.change_percent.abs().cmp(&a.change_percent.abs()));
        sectors
    }
}
