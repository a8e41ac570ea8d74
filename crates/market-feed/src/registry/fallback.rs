//! Snapshot fallback chain.
//!
//! Tiers are tried in order with exactly one attempt each and an early exit
//! on the first usable answer. The synthetic generator is the terminal tier
//! and cannot fail, so resolution always produces a non-empty list.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use futures::future::BoxFuture;
use tracing::{debug, info, warn};

use super::{FetchDiagnostics, ProviderAttempt, SnapshotValidator};
use crate::config::FeedConfig;
use crate::errors::{ErrorClass, FeedError};
use crate::models::{HotSector, HotStock, ProviderId};
use crate::provider::akshare::AkShareProvider;
use crate::provider::eastmoney::EastmoneyProvider;
use crate::provider::synthetic::SyntheticMarket;
use crate::provider::SnapshotProvider;

/// A resolved snapshot together with where it came from.
#[derive(Clone, Debug)]
pub struct Resolved<T> {
    pub data: Vec<T>,
    /// The tier whose rows were used.
    pub source: ProviderId,
    pub diagnostics: FetchDiagnostics,
}

impl<T> Resolved<T> {
    /// Every tier attempt, in chain order.
    pub fn attempts(&self) -> &[ProviderAttempt] {
        &self.diagnostics.attempts
    }

    pub fn is_synthetic(&self) -> bool {
        self.source == ProviderId::Synthetic
    }
}

/// A snapshot row kind the chain can resolve.
pub(crate) trait SnapshotEntity: Sized + Send {
    const KIND: &'static str;

    fn fetch(provider: &dyn SnapshotProvider) -> BoxFuture<'_, Result<Vec<Self>, FeedError>>;

    fn synthesize(market: &SyntheticMarket, now: DateTime<Utc>) -> Vec<Self>;

    fn validate(&self, validator: &SnapshotValidator) -> Result<(), FeedError>;
}

impl SnapshotEntity for HotStock {
    const KIND: &'static str = "hot stocks";

    fn fetch(provider: &dyn SnapshotProvider) -> BoxFuture<'_, Result<Vec<Self>, FeedError>> {
        provider.hot_stocks()
    }

    fn synthesize(market: &SyntheticMarket, now: DateTime<Utc>) -> Vec<Self> {
        market.hot_stocks(now)
    }

    fn validate(&self, validator: &SnapshotValidator) -> Result<(), FeedError> {
        validator.validate_stock(self)
    }
}

impl SnapshotEntity for HotSector {
    const KIND: &'static str = "hot sectors";

    fn fetch(provider: &dyn SnapshotProvider) -> BoxFuture<'_, Result<Vec<Self>, FeedError>> {
        provider.hot_sectors()
    }

    fn synthesize(market: &SyntheticMarket, now: DateTime<Utc>) -> Vec<Self> {
        market.hot_sectors(now)
    }

    fn validate(&self, validator: &SnapshotValidator) -> Result<(), FeedError> {
        validator.validate_sector(self)
    }
}

/// Ordered snapshot tiers ending in the synthetic generator.
pub struct FallbackChain {
    tiers: Vec<Arc<dyn SnapshotProvider>>,
    synthetic: SyntheticMarket,
    validator: SnapshotValidator,
}

impl FallbackChain {
    /// Build a chain from `tiers` in priority order. `synthetic` always runs
    /// last.
    pub fn new(tiers: Vec<Arc<dyn SnapshotProvider>>, synthetic: SyntheticMarket) -> Self {
        Self {
            tiers,
            synthetic,
            validator: SnapshotValidator::new(),
        }
    }

    /// Eastmoney, then AkShare, then synthetic.
    pub fn from_config(config: &FeedConfig) -> Self {
        Self::new(
            vec![
                Arc::new(EastmoneyProvider::from_config(config)) as Arc<dyn SnapshotProvider>,
                Arc::new(AkShareProvider::from_config(config)),
            ],
            SyntheticMarket::new(config.synthetic_seed),
        )
    }

    pub fn with_validator(mut self, validator: SnapshotValidator) -> Self {
        self.validator = validator;
        self
    }

    /// Tier identifiers in the order they are tried, synthetic included.
    pub fn tier_ids(&self) -> Vec<ProviderId> {
        self.tiers
            .iter()
            .map(|tier| tier.id())
            .chain(std::iter::once(ProviderId::Synthetic))
            .collect()
    }

    pub async fn hot_stocks(&self) -> Resolved<HotStock> {
        self.resolve().await
    }

    pub async fn hot_sectors(&self) -> Resolved<HotSector> {
        self.resolve().await
    }

    async fn resolve<T: SnapshotEntity>(&self) -> Resolved<T> {
        let mut diagnostics = FetchDiagnostics::new();

        for tier in &self.tiers {
            let provider_id = tier.id();
            debug!("Fetching {} from {}", T::KIND, provider_id);

            let error = match T::fetch(tier.as_ref()).await {
                Ok(rows) => match self.accept(provider_id, rows) {
                    Ok(data) => {
                        diagnostics.record_success(provider_id, data.len());
                        info!(
                            "Resolved {} from {}: {}",
                            T::KIND,
                            provider_id,
                            diagnostics.summary()
                        );
                        return Resolved {
                            data,
                            source: provider_id,
                            diagnostics,
                        };
                    }
                    Err(e) => e,
                },
                Err(e) => e,
            };

            if error.class() == ErrorClass::Unconfigured {
                debug!("Skipping {} tier {}: {}", T::KIND, provider_id, error);
            } else {
                warn!("{} tier {} failed: {}", T::KIND, provider_id, error);
            }
            diagnostics.record_error(provider_id, error.class(), error.to_string());
        }

        let data = T::synthesize(&self.synthetic, Utc::now());
        diagnostics.record_success(ProviderId::Synthetic, data.len());
        info!(
            "Resolved {} from synthetic data: {}",
            T::KIND,
            diagnostics.summary()
        );

        Resolved {
            data,
            source: ProviderId::Synthetic,
            diagnostics,
        }
    }

    /// Validate a tier's rows. An empty answer, or one where every row is
    /// rejected, counts as a tier failure.
    fn accept<T: SnapshotEntity>(
        &self,
        provider_id: ProviderId,
        rows: Vec<T>,
    ) -> Result<Vec<T>, FeedError> {
        if rows.is_empty() {
            return Err(FeedError::EmptyResult {
                provider: provider_id,
            });
        }

        let total = rows.len();
        let mut valid = Vec::with_capacity(total);
        for row in rows {
            match row.validate(&self.validator) {
                Ok(()) => valid.push(row),
                Err(e) => warn!("Dropping {} row from {}: {}", T::KIND, provider_id, e),
            }
        }

        if valid.is_empty() {
            return Err(FeedError::ValidationFailed {
                message: format!("all {} rows from {} rejected", total, provider_id),
            });
        }
        Ok(valid)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::registry::ValidatorConfig;
    use async_trait::async_trait;
    use rust_decimal::Decimal;
    use rust_decimal_macros::dec;
    use std::sync::atomic::{AtomicUsize, Ordering};

    #[derive(Clone, Copy)]
    enum Behavior {
        Healthy,
        Failing,
        Empty,
        Corrupt,
    }

    struct MockTier {
        id: ProviderId,
        behavior: Behavior,
        call_count: AtomicUsize,
    }

    impl MockTier {
        fn new(id: ProviderId, behavior: Behavior) -> Arc<Self> {
            Arc::new(Self {
                id,
                behavior,
                call_count: AtomicUsize::new(0),
            })
        }

        fn calls(&self) -> usize {
            self.call_count.load(Ordering::SeqCst)
        }
    }

    fn stock(code: &str, price: Decimal) -> HotStock {
        HotStock {
            code: code.to_string(),
            name: format!("Stock {}", code),
            price,
            open: None,
            high: None,
            low: None,
            previous_close: dec!(100.00),
            change: dec!(-2.50),
            change_percent: dec!(-2.5),
            volume: None,
            amount: None,
            turnover_rate: None,
            amplitude: None,
        }
    }

    #[async_trait]
    impl SnapshotProvider for MockTier {
        fn id(&self) -> ProviderId {
            self.id
        }

        async fn hot_stocks(&self) -> Result<Vec<HotStock>, FeedError> {
            self.call_count.fetch_add(1, Ordering::SeqCst);
            match self.behavior {
                Behavior::Healthy => Ok(vec![stock("A", dec!(97.50)), stock("B", dec!(97.50))]),
                Behavior::Failing => Err(FeedError::Status {
                    provider: self.id,
                    status: 503,
                }),
                Behavior::Empty => Ok(Vec::new()),
                Behavior::Corrupt => Ok(vec![stock("A", dec!(120.00))]),
            }
        }

        async fn hot_sectors(&self) -> Result<Vec<HotSector>, FeedError> {
            self.call_count.fetch_add(1, Ordering::SeqCst);
            match self.behavior {
                Behavior::Healthy => Ok(vec![HotSector::new("BK1", "光伏", dec!(1.2), 3, 1).unwrap()]),
                Behavior::Failing => Err(FeedError::Timeout { provider: self.id }),
                Behavior::Empty => Ok(Vec::new()),
                Behavior::Corrupt => {
                    let mut sector = HotSector::new("BK1", "光伏", dec!(1.2), 3, 1).unwrap();
                    sector.stock_count = 9;
                    Ok(vec![sector])
                }
            }
        }
    }

    fn chain(primary: &Arc<MockTier>, secondary: &Arc<MockTier>) -> FallbackChain {
        FallbackChain::new(
            vec![
                primary.clone() as Arc<dyn SnapshotProvider>,
                secondary.clone(),
            ],
            SyntheticMarket::new(1),
        )
    }

    #[tokio::test]
    async fn test_primary_success_stops_chain() {
        let primary = MockTier::new(ProviderId::Eastmoney, Behavior::Healthy);
        let secondary = MockTier::new(ProviderId::AkShare, Behavior::Healthy);

        let resolved = chain(&primary, &secondary).hot_stocks().await;

        assert_eq!(resolved.source, ProviderId::Eastmoney);
        assert_eq!(resolved.data.len(), 2);
        assert_eq!(primary.calls(), 1);
        assert_eq!(secondary.calls(), 0);
    }

    #[tokio::test]
    async fn test_falls_back_to_secondary() {
        let primary = MockTier::new(ProviderId::Eastmoney, Behavior::Failing);
        let secondary = MockTier::new(ProviderId::AkShare, Behavior::Healthy);

        let resolved = chain(&primary, &secondary).hot_sectors().await;

        assert_eq!(resolved.source, ProviderId::AkShare);
        assert_eq!(resolved.attempts().len(), 2);
        assert!(!resolved.attempts()[0].success);
        assert_eq!(
            resolved.attempts()[0].error_class,
            Some(ErrorClass::Transport)
        );
    }

    #[tokio::test]
    async fn test_both_tiers_failing_yields_synthetic() {
        let primary = MockTier::new(ProviderId::Eastmoney, Behavior::Failing);
        let secondary = MockTier::new(ProviderId::AkShare, Behavior::Failing);

        let resolved = chain(&primary, &secondary).hot_stocks().await;

        assert!(resolved.is_synthetic());
        assert_eq!(resolved.data.len(), 10);
        assert_eq!(primary.calls(), 1);
        assert_eq!(secondary.calls(), 1);
        assert_eq!(
            resolved
                .attempts()
                .iter()
                .map(|a| a.provider_id)
                .collect::<Vec<_>>(),
            vec![ProviderId::Eastmoney, ProviderId::AkShare, ProviderId::Synthetic]
        );
    }

    #[tokio::test]
    async fn test_empty_result_is_tier_failure() {
        let primary = MockTier::new(ProviderId::Eastmoney, Behavior::Empty);
        let secondary = MockTier::new(ProviderId::AkShare, Behavior::Healthy);

        let resolved = chain(&primary, &secondary).hot_sectors().await;

        assert_eq!(resolved.source, ProviderId::AkShare);
        assert_eq!(resolved.attempts()[0].error_class, Some(ErrorClass::Shape));
    }

    #[tokio::test]
    async fn test_all_rows_invalid_is_tier_failure() {
        let primary = MockTier::new(ProviderId::Eastmoney, Behavior::Corrupt);
        let secondary = MockTier::new(ProviderId::AkShare, Behavior::Corrupt);

        let stocks = chain(&primary, &secondary).hot_stocks().await;
        assert!(stocks.is_synthetic());

        let sectors = chain(&primary, &secondary).hot_sectors().await;
        assert!(sectors.is_synthetic());
        assert_eq!(sectors.data.len(), 15);
    }

    #[tokio::test]
    async fn test_each_tier_is_tried_once_per_request() {
        let primary = MockTier::new(ProviderId::Eastmoney, Behavior::Failing);
        let secondary = MockTier::new(ProviderId::AkShare, Behavior::Empty);
        let chain = chain(&primary, &secondary);

        chain.hot_stocks().await;
        chain.hot_sectors().await;

        assert_eq!(primary.calls(), 2);
        assert_eq!(secondary.calls(), 2);
    }

    #[tokio::test]
    async fn test_custom_validator_widens_price_tolerance() {
        let primary = MockTier::new(ProviderId::Eastmoney, Behavior::Corrupt);
        let secondary = MockTier::new(ProviderId::AkShare, Behavior::Healthy);
        let lenient = SnapshotValidator::with_config(ValidatorConfig {
            price_tolerance: dec!(25),
            ..ValidatorConfig::default()
        });

        let resolved = chain(&primary, &secondary)
            .with_validator(lenient)
            .hot_stocks()
            .await;

        assert_eq!(resolved.source, ProviderId::Eastmoney);
        assert_eq!(resolved.data[0].price, dec!(120.00));
        assert_eq!(secondary.calls(), 0);
    }

    #[test]
    fn test_tier_order() {
        let chain = FallbackChain::from_config(&FeedConfig::default());
        assert_eq!(
            chain.tier_ids(),
            vec![ProviderId::Eastmoney, ProviderId::AkShare, ProviderId::Synthetic]
        );
    }
}
