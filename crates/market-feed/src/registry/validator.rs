//! Snapshot row validation.
//!
//! Validates snapshot rows before a fallback tier's answer is accepted:
//! - Non-negative prices and turnover
//! - `price = previous_close + change` within a tolerance
//! - OHLC invariants (high >= low; open/price within high/low is advisory)
//! - Sector breadth (`stock_count = up_count + down_count`)

use rust_decimal::Decimal;
use tracing::warn;

use crate::errors::FeedError;
use crate::models::{HotSector, HotStock};

/// Validation severity levels.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum ValidationSeverity {
    /// Hard failure - drop the row.
    Hard,
    /// Soft warning - keep the row but log a warning.
    Soft,
}

/// Validation result details.
#[derive(Clone, Debug)]
pub struct ValidationIssue {
    pub severity: ValidationSeverity,
    pub message: String,
}

/// Snapshot validator configuration.
#[derive(Clone, Debug)]
pub struct ValidatorConfig {
    /// Whether to reject rows with negative prices or turnover.
    pub reject_negative_prices: bool,
    /// Whether to reject rows where high < low.
    pub reject_invalid_ohlc: bool,
    /// Allowed gap between `price` and `previous_close + change`.
    pub price_tolerance: Decimal,
}

impl Default for ValidatorConfig {
    fn default() -> Self {
        Self {
            reject_negative_prices: true,
            reject_invalid_ohlc: true,
            price_tolerance: Decimal::new(1, 2),
        }
    }
}

/// Validator for hot stock and hot sector rows.
#[derive(Clone, Debug, Default)]
pub struct SnapshotValidator {
    config: ValidatorConfig,
}

impl SnapshotValidator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config(config: ValidatorConfig) -> Self {
        Self { config }
    }

    /// Validate a stock row.
    ///
    /// Hard issues are returned as [`FeedError::ValidationFailed`]; soft ones
    /// are logged.
    pub fn validate_stock(&self, stock: &HotStock) -> Result<(), FeedError> {
        let mut issues = Vec::new();

        self.check_stock_prices(stock, &mut issues);
        self.check_price_identity(stock, &mut issues);
        self.check_ohlc(stock, &mut issues);

        finish(&stock.code, issues)
    }

    /// Validate a sector row.
    pub fn validate_sector(&self, sector: &HotSector) -> Result<(), FeedError> {
        let mut issues = Vec::new();

        if sector.up_count.checked_add(sector.down_count) != Some(sector.stock_count) {
            issues.push(ValidationIssue {
                severity: ValidationSeverity::Hard,
                message: format!(
                    "Stock count ({}) differs from up ({}) + down ({})",
                    sector.stock_count, sector.up_count, sector.down_count
                ),
            });
        }

        if self.config.reject_negative_prices {
            if let Some(amount) = sector.amount.filter(|a| *a < Decimal::ZERO) {
                issues.push(ValidationIssue {
                    severity: ValidationSeverity::Hard,
                    message: format!("Negative amount: {}", amount),
                });
            }
        }

        finish(&sector.code, issues)
    }

    fn check_stock_prices(&self, stock: &HotStock, issues: &mut Vec<ValidationIssue>) {
        if !self.config.reject_negative_prices {
            return;
        }
        let fields = [
            ("price", Some(stock.price)),
            ("previous close", Some(stock.previous_close)),
            ("open", stock.open),
            ("high", stock.high),
            ("low", stock.low),
            ("amount", stock.amount),
        ];
        for (label, value) in fields {
            if let Some(value) = value.filter(|v| *v < Decimal::ZERO) {
                issues.push(ValidationIssue {
                    severity: ValidationSeverity::Hard,
                    message: format!("Negative {}: {}", label, value),
                });
            }
        }
    }

    fn check_price_identity(&self, stock: &HotStock, issues: &mut Vec<ValidationIssue>) {
        let gap = (stock.previous_close + stock.change - stock.price).abs();
        if gap > self.config.price_tolerance {
            issues.push(ValidationIssue {
                severity: ValidationSeverity::Hard,
                message: format!(
                    "Price ({}) differs from previous close ({}) + change ({})",
                    stock.price, stock.previous_close, stock.change
                ),
            });
        }
    }

    fn check_ohlc(&self, stock: &HotStock, issues: &mut Vec<ValidationIssue>) {
        let (Some(high), Some(low)) = (stock.high, stock.low) else {
            return;
        };

        if self.config.reject_invalid_ohlc && high < low {
            issues.push(ValidationIssue {
                severity: ValidationSeverity::Hard,
                message: format!("High ({}) is less than Low ({})", high, low),
            });
            return;
        }

        if let Some(open) = stock.open.filter(|o| *o < low || *o > high) {
            issues.push(ValidationIssue {
                severity: ValidationSeverity::Soft,
                message: format!("Open ({}) is outside High/Low range ({}-{})", open, low, high),
            });
        }
        if stock.price < low || stock.price > high {
            issues.push(ValidationIssue {
                severity: ValidationSeverity::Soft,
                message: format!(
                    "Price ({}) is outside High/Low range ({}-{})",
                    stock.price, low, high
                ),
            });
        }
    }
}

/// Log soft issues and turn hard ones into an error.
fn finish(code: &str, issues: Vec<ValidationIssue>) -> Result<(), FeedError> {
    let (hard, soft): (Vec<_>, Vec<_>) = issues
        .into_iter()
        .partition(|i| i.severity == ValidationSeverity::Hard);

    for issue in &soft {
        warn!("Snapshot validation warning for {}: {}", code, issue.message);
    }

    if hard.is_empty() {
        return Ok(());
    }

    let messages: Vec<_> = hard.iter().map(|i| i.message.as_str()).collect();
    Err(FeedError::ValidationFailed {
        message: format!("{}: {}", code, messages.join("; ")),
    })
}
