//! Loan terms, balance and the payment state machine.
//!
//! A loan moves `Issued -> PartiallyPaid -> FullyPaid` and never back.
//! The only transition is [`LoanBalance::apply_payment`], which keeps
//! `0 <= amount_paid <= total_amount`.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use super::calculator::{LoanCalculator, LoanQuote};
use super::error::LendingError;

/// Largest principal the ledger accepts.
pub const MAX_PRINCIPAL: Decimal = dec!(1000000000000000);

/// Longest loan period, in years.
pub const MAX_PERIOD_YEARS: u32 = 100;

/// Validated, immutable terms of a loan.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoanTerms {
    /// Original loan amount before interest.
    pub principal: Decimal,
    /// Length of the loan in whole years.
    pub period_years: u32,
    /// Annual simple-interest rate in percent.
    pub annual_rate_percent: Decimal,
}

impl LoanTerms {
    /// Validates raw issuance input.
    ///
    /// # Errors
    ///
    /// Returns a validation error for a non-positive or oversized principal
    /// or period.
    pub fn new(
        principal: Decimal,
        period_years: i64,
        annual_rate_percent: Decimal,
    ) -> Result<Self, LendingError> {
        if principal <= Decimal::ZERO {
            return Err(LendingError::NonPositivePrincipal);
        }
        if principal > MAX_PRINCIPAL {
            return Err(LendingError::PrincipalTooLarge { max: MAX_PRINCIPAL });
        }
        if period_years <= 0 {
            return Err(LendingError::NonPositivePeriod);
        }
        let period_years = u32::try_from(period_years)
            .ok()
            .filter(|years| *years <= MAX_PERIOD_YEARS)
            .ok_or(LendingError::PeriodTooLong {
                max: MAX_PERIOD_YEARS,
            })?;

        Ok(Self {
            principal,
            period_years,
            annual_rate_percent,
        })
    }

    /// Computes the amounts payable under these terms.
    #[must_use]
    pub fn quote(&self) -> LoanQuote {
        LoanCalculator::quote(self.principal, self.period_years, self.annual_rate_percent)
    }
}

/// Repayment progress of a loan.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum LoanStatus {
    /// Nothing paid yet.
    Issued,
    /// Some, but not all, of the total has been paid.
    PartiallyPaid,
    /// The total has been paid in full.
    FullyPaid,
}

/// Running totals of a loan.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoanBalance {
    /// Total payable, fixed at issuance.
    pub total_amount: Decimal,
    /// Sum of all accepted payments.
    pub amount_paid: Decimal,
}

impl LoanBalance {
    /// Balance of a freshly issued loan.
    #[must_use]
    pub const fn issued(total_amount: Decimal) -> Self {
        Self {
            total_amount,
            amount_paid: Decimal::ZERO,
        }
    }

    /// Outstanding amount.
    #[must_use]
    pub fn balance_amount(&self) -> Decimal {
        self.total_amount - self.amount_paid
    }

    /// Current position in the repayment state machine.
    #[must_use]
    pub fn status(&self) -> LoanStatus {
        if self.amount_paid.is_zero() {
            LoanStatus::Issued
        } else if self.amount_paid < self.total_amount {
            LoanStatus::PartiallyPaid
        } else {
            LoanStatus::FullyPaid
        }
    }

    /// Checks a payment against the balance and returns the new `amount_paid`.
    ///
    /// The balance itself is not mutated; the store applies the returned
    /// value only if the loan has not changed since it was read.
    ///
    /// # Errors
    ///
    /// Rejects non-positive amounts and any amount that would overpay the
    /// loan. A rejected payment is never partially applied.
    pub fn apply_payment(&self, amount: Decimal) -> Result<Decimal, LendingError> {
        if amount <= Decimal::ZERO {
            return Err(LendingError::NonPositivePayment);
        }

        let new_paid = self
            .amount_paid
            .checked_add(amount)
            .filter(|paid| *paid <= self.total_amount)
            .ok_or(LendingError::PaymentExceedsTotal {
                amount_paid: self.amount_paid,
                amount,
                total_amount: self.total_amount,
            })?;

        Ok(new_paid)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_terms_validation() {
        assert!(LoanTerms::new(dec!(15000), 3, dec!(10)).is_ok());
        assert!(matches!(
            LoanTerms::new(dec!(0), 3, dec!(10)),
            Err(LendingError::NonPositivePrincipal)
        ));
        assert!(matches!(
            LoanTerms::new(dec!(-1), 3, dec!(10)),
            Err(LendingError::NonPositivePrincipal)
        ));
        assert!(matches!(
            LoanTerms::new(dec!(15000), 0, dec!(10)),
            Err(LendingError::NonPositivePeriod)
        ));
        assert!(matches!(
            LoanTerms::new(dec!(15000), -2, dec!(10)),
            Err(LendingError::NonPositivePeriod)
        ));
        assert!(matches!(
            LoanTerms::new(dec!(15000), 101, dec!(10)),
            Err(LendingError::PeriodTooLong { max: 100 })
        ));
        assert!(matches!(
            LoanTerms::new(dec!(15000), i64::MAX, dec!(10)),
            Err(LendingError::PeriodTooLong { .. })
        ));
        assert!(matches!(
            LoanTerms::new(MAX_PRINCIPAL + dec!(1), 1, dec!(10)),
            Err(LendingError::PrincipalTooLarge { .. })
        ));
    }

    #[test]
    fn test_terms_quote() {
        let terms = LoanTerms::new(dec!(15000), 3, dec!(10)).unwrap();
        let quote = terms.quote();
        assert_eq!(quote.total_amount, dec!(19500));
        assert_eq!(quote.monthly_installment, dec!(541.67));
    }

    #[test]
    fn test_reference_payment_sequence() {
        let mut balance = LoanBalance::issued(dec!(19500));
        assert_eq!(balance.status(), LoanStatus::Issued);

        balance.amount_paid = balance.apply_payment(dec!(5000)).unwrap();
        assert_eq!(balance.amount_paid, dec!(5000));
        assert_eq!(balance.balance_amount(), dec!(14500));
        assert_eq!(balance.status(), LoanStatus::PartiallyPaid);

        let err = balance.apply_payment(dec!(15000)).unwrap_err();
        assert!(matches!(err, LendingError::PaymentExceedsTotal { .. }));
        assert_eq!(balance.amount_paid, dec!(5000));
    }

    #[test]
    fn test_exact_payoff_then_everything_rejected() {
        let mut balance = LoanBalance::issued(dec!(19500));
        balance.amount_paid = balance.apply_payment(dec!(19500)).unwrap();
        assert_eq!(balance.status(), LoanStatus::FullyPaid);
        assert_eq!(balance.balance_amount(), Decimal::ZERO);

        assert!(matches!(
            balance.apply_payment(dec!(0.01)),
            Err(LendingError::PaymentExceedsTotal { .. })
        ));
    }

    #[test]
    fn test_non_positive_payments_rejected() {
        let balance = LoanBalance::issued(dec!(100));
        assert!(matches!(
            balance.apply_payment(Decimal::ZERO),
            Err(LendingError::NonPositivePayment)
        ));
        assert!(matches!(
            balance.apply_payment(dec!(-5)),
            Err(LendingError::NonPositivePayment)
        ));
    }

    #[test]
    fn test_overflowing_payment_is_an_overpayment() {
        let balance = LoanBalance {
            total_amount: dec!(100),
            amount_paid: Decimal::MAX,
        };
        assert!(matches!(
            balance.apply_payment(Decimal::MAX),
            Err(LendingError::PaymentExceedsTotal { .. })
        ));
    }
}
