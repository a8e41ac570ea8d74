//! Assembly of snapshot rows from partially-populated provider fields.

use rust_decimal::Decimal;

use crate::models::HotStock;

/// Stock fields as extracted from a provider row, before derivation.
#[derive(Debug, Default)]
pub(crate) struct StockRow {
    pub code: Option<String>,
    pub name: Option<String>,
    pub price: Option<Decimal>,
    pub previous_close: Option<Decimal>,
    pub change: Option<Decimal>,
    pub change_percent: Option<Decimal>,
    pub open: Option<Decimal>,
    pub high: Option<Decimal>,
    pub low: Option<Decimal>,
    pub volume: Option<u64>,
    pub amount: Option<Decimal>,
    pub turnover_rate: Option<Decimal>,
    pub amplitude: Option<Decimal>,
}

impl StockRow {
    /// Build a [`HotStock`], deriving whichever of `change` and
    /// `previous_close` is missing from the other.
    ///
    /// Returns `None` when code, name or price is missing, or when neither
    /// `change` nor `previous_close` is known.
    pub(crate) fn into_stock(self) -> Option<HotStock> {
        let code = self.code?;
        let name = self.name?;
        let price = self.price?;

        let (previous_close, change) = match (self.previous_close, self.change) {
            (Some(prev), Some(change)) => (prev, change),
            (Some(prev), None) => (prev, price - prev),
            (None, Some(change)) => (price - change, change),
            (None, None) => return None,
        };

        let change_percent = self.change_percent.unwrap_or_else(|| {
            if previous_close.is_zero() {
                Decimal::ZERO
            } else {
                (change / previous_close * Decimal::ONE_HUNDRED).round_dp(2)
            }
        });

        Some(HotStock {
            code,
            name,
            price,
            open: self.open,
            high: self.high,
            low: self.low,
            previous_close,
            change,
            change_percent,
            volume: self.volume,
            amount: self.amount,
            turnover_rate: self.turnover_rate,
            amplitude: self.amplitude,
        })
    }
}

#[cfg(test)]
mod tests {
    use rust_decimal_macros::dec;

    use super::*;

    fn row() -> StockRow {
        StockRow {
            code: Some("600036".to_string()),
            name: Some("招商银行".to_string()),
            price: Some(dec!(97.50)),
            ..StockRow::default()
        }
    }

    #[test]
    fn test_derives_change_from_previous_close() {
        let stock = StockRow {
            previous_close: Some(dec!(100.00)),
            ..row()
        }
        .into_stock()
        .unwrap();
        assert_eq!(stock.change, dec!(-2.50));
        assert_eq!(stock.change_percent, dec!(-2.50));
    }

    #[test]
    fn test_derives_previous_close_from_change() {
        let stock = StockRow {
            change: Some(dec!(-2.50)),
            change_percent: Some(dec!(-2.5)),
            ..row()
        }
        .into_stock()
        .unwrap();
        assert_eq!(stock.previous_close, dec!(100.00));
        assert_eq!(stock.change_percent, dec!(-2.5));
    }

    #[test]
    fn test_drops_row_without_change_or_previous_close() {
        assert!(row().into_stock().is_none());
    }

    #[test]
    fn test_drops_row_without_price() {
        let partial = StockRow {
            price: None,
            change: Some(dec!(1)),
            ..row()
        };
        assert!(partial.into_stock().is_none());
    }
}
