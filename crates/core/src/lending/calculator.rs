//! Simple-interest loan calculator.
//!
//! Pure arithmetic on `Decimal`, used only at issuance time. Inputs are
//! assumed to be validated (see [`LoanTerms`](super::loan::LoanTerms)).

use rust_decimal::{Decimal, RoundingStrategy};
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

const ONE_HUNDRED: Decimal = Decimal::ONE_HUNDRED;
const MONTHS_PER_YEAR: Decimal = dec!(12);

/// Decimal places of the monthly installment.
pub const INSTALLMENT_DECIMAL_PLACES: u32 = 2;

/// Amounts payable on a loan, computed once at issuance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoanQuote {
    /// Principal plus simple interest over the full period.
    pub total_amount: Decimal,
    /// Equated monthly installment, rounded half-to-even to cents.
    pub monthly_installment: Decimal,
}

/// Stateless simple-interest calculator.
pub struct LoanCalculator;

impl LoanCalculator {
    /// Computes the total payable and the monthly installment.
    ///
    /// `total = principal + principal * rate * years / 100`
    /// `emi = round_half_even(total / (years * 12), 2)`
    #[must_use]
    pub fn quote(principal: Decimal, period_years: u32, annual_rate_percent: Decimal) -> LoanQuote {
        let total_amount = Self::total_amount(principal, period_years, annual_rate_percent);
        let monthly_installment = Self::monthly_installment(total_amount, period_years);

        LoanQuote {
            total_amount,
            monthly_installment,
        }
    }

    /// Principal plus simple interest.
    #[must_use]
    pub fn total_amount(
        principal: Decimal,
        period_years: u32,
        annual_rate_percent: Decimal,
    ) -> Decimal {
        let interest = principal * annual_rate_percent * Decimal::from(period_years) / ONE_HUNDRED;
        (principal + interest).normalize()
    }

    /// Total divided evenly over every month of the period.
    #[must_use]
    pub fn monthly_installment(total_amount: Decimal, period_years: u32) -> Decimal {
        let months = Decimal::from(period_years) * MONTHS_PER_YEAR;
        (total_amount / months).round_dp_with_strategy(
            INSTALLMENT_DECIMAL_PLACES,
            RoundingStrategy::MidpointNearestEven,
        )
    }
}
