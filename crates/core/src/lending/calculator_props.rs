//! Property-based tests for the loan calculator.

use proptest::prelude::*;
use rust_decimal::{Decimal, RoundingStrategy};

use super::calculator::LoanCalculator;

/// Principal from 0.01 to 10,000,000.00.
fn principal() -> impl Strategy<Value = Decimal> {
    (1i64..1_000_000_000i64).prop_map(|cents| Decimal::new(cents, 2))
}

/// Rate from 0.00% to 50.00%.
fn rate() -> impl Strategy<Value = Decimal> {
    (0i64..5_000i64).prop_map(|basis| Decimal::new(basis, 2))
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(200))]

    /// total = principal * (1 + rate * years / 100), exactly.
    #[test]
    fn prop_total_is_exact_simple_interest(
        principal in principal(),
        years in 1u32..=100,
        rate in rate(),
    ) {
        let total = LoanCalculator::total_amount(principal, years, rate);
        let growth = rate * Decimal::from(years) / Decimal::ONE_HUNDRED;
        let expected = principal * (Decimal::ONE + growth);
        prop_assert_eq!(total, expected);
    }

    /// Installment is the half-even rounding of total / months, to cents.
    #[test]
    fn prop_installment_is_rounded_share(
        principal in principal(),
        years in 1u32..=100,
        rate in rate(),
    ) {
        let quote = LoanCalculator::quote(principal, years, rate);
        let months = Decimal::from(years * 12);
        let expected = (quote.total_amount / months)
            .round_dp_with_strategy(2, RoundingStrategy::MidpointNearestEven);

        prop_assert_eq!(quote.monthly_installment, expected);
        prop_assert!(quote.monthly_installment.scale() <= 2);
    }

    /// Interest never reduces what is owed.
    #[test]
    fn prop_total_not_below_principal(
        principal in principal(),
        years in 1u32..=100,
        rate in rate(),
    ) {
        prop_assert!(LoanCalculator::total_amount(principal, years, rate) >= principal);
    }
}
