//! Interest rate table keyed by loan product.

use std::collections::HashMap;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Annual simple-interest rate, in percent, of the standard product.
pub const STANDARD_ANNUAL_RATE_PERCENT: Decimal = Decimal::TEN;

/// Loan products offered by the ledger.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum LoanProduct {
    /// Fixed-rate simple-interest term loan.
    Standard,
}

/// Annual rates per product.
///
/// Built once by the process entry point and handed to the API state; each
/// issued loan copies its rate, so later table changes never touch
/// existing loans.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RateTable {
    rates: HashMap<LoanProduct, Decimal>,
}

impl RateTable {
    /// Creates a table with the standard product at the given rate.
    #[must_use]
    pub fn with_standard_rate(annual_rate_percent: Decimal) -> Self {
        let mut rates = HashMap::new();
        rates.insert(LoanProduct::Standard, annual_rate_percent);
        Self { rates }
    }

    /// Returns the annual rate for a product.
    #[must_use]
    pub fn annual_rate_percent(&self, product: LoanProduct) -> Decimal {
        self.rates
            .get(&product)
            .copied()
            .unwrap_or(STANDARD_ANNUAL_RATE_PERCENT)
    }
}

impl Default for RateTable {
    fn default() -> Self {
        Self::with_standard_rate(STANDARD_ANNUAL_RATE_PERCENT)
    }
}
