use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// One row of the hot stock snapshot.
///
/// Prices are in major currency units. OHLC, volume and the ratio fields are
/// optional: they are absent, not zero, when the provider omitted them.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HotStock {
    pub code: String,
    pub name: String,
    pub price: Decimal,
    #[serde(default)]
    pub open: Option<Decimal>,
    #[serde(default)]
    pub high: Option<Decimal>,
    #[serde(default)]
    pub low: Option<Decimal>,
    pub previous_close: Decimal,
    /// Absolute change since the previous close.
    pub change: Decimal,
    /// Signed percent change.
    pub change_percent: Decimal,
    /// Shares traded.
    #[serde(default)]
    pub volume: Option<u64>,
    /// Currency turnover.
    #[serde(default)]
    pub amount: Option<Decimal>,
    /// Turnover rate in percent.
    #[serde(default, rename = "turnover")]
    pub turnover_rate: Option<Decimal>,
    #[serde(default)]
    pub amplitude: Option<Decimal>,
}

/// One row of the hot sector snapshot.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HotSector {
    pub code: String,
    pub name: String,
    pub change_percent: Decimal,
    #[serde(default)]
    pub leading_stock: Option<String>,
    pub stock_count: u32,
    pub up_count: u32,
    pub down_count: u32,
    #[serde(default)]
    pub amount: Option<Decimal>,
    /// Signed net capital inflow; zero when the provider flagged none.
    #[serde(default)]
    pub net_inflow: Decimal,
}

impl HotSector {
    /// Build a sector row; `stock_count` is always derived from the split.
    ///
    /// Returns `None` when the split overflows a `u32` count.
    pub fn new(
        code: impl Into<String>,
        name: impl Into<String>,
        change_percent: Decimal,
        up_count: u32,
        down_count: u32,
    ) -> Option<Self> {
        let stock_count = up_count.checked_add(down_count)?;
        Some(Self {
            code: code.into(),
            name: name.into(),
            change_percent,
            leading_stock: None,
            stock_count,
            up_count,
            down_count,
            amount: None,
            net_inflow: Decimal::ZERO,
        })
    }

    pub fn with_leading_stock(mut self, leading_stock: Option<String>) -> Self {
        self.leading_stock = leading_stock;
        self
    }

    pub fn with_amount(mut self, amount: Option<Decimal>) -> Self {
        self.amount = amount;
        self
    }

    pub fn with_net_inflow(mut self, net_inflow: Decimal) -> Self {
        self.net_inflow = net_inflow;
        self
    }
}
