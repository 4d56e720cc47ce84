//! Property-based tests for the loan balance invariant.

use proptest::prelude::*;
use rust_decimal::Decimal;

use super::error::LendingError;
use super::loan::{LoanBalance, LoanStatus};

/// Amount from 0.01 to 100,000.00.
fn amount() -> impl Strategy<Value = Decimal> {
    (1i64..10_000_000i64).prop_map(|cents| Decimal::new(cents, 2))
}

proptest! {
    #![proptest_config(ProptestConfig { max_global_rejects: 8192, ..ProptestConfig::with_cases(200) })]

    /// Any sequence of attempted payments keeps 0 <= paid <= total, and
    /// paid equals the sum of the accepted ones.
    #[test]
    fn prop_paid_never_exceeds_total(
        total in amount(),
        attempts in prop::collection::vec(amount(), 0..50),
    ) {
        let mut balance = LoanBalance::issued(total);
        let mut accepted = Decimal::ZERO;

        for amount in attempts {
            match balance.apply_payment(amount) {
                Ok(new_paid) => {
                    prop_assert_eq!(new_paid, balance.amount_paid + amount);
                    balance.amount_paid = new_paid;
                    accepted += amount;
                }
                Err(LendingError::PaymentExceedsTotal { .. }) => {
                    prop_assert!(balance.amount_paid + amount > total);
                }
                Err(other) => prop_assert!(false, "unexpected error: {other:?}"),
            }

            prop_assert!(balance.amount_paid >= Decimal::ZERO);
            prop_assert!(balance.amount_paid <= total);
            prop_assert_eq!(balance.balance_amount(), total - balance.amount_paid);
        }

        prop_assert_eq!(balance.amount_paid, accepted);
    }

    /// Status only ever moves forward.
    #[test]
    fn prop_status_is_monotonic(
        total in amount(),
        attempts in prop::collection::vec(amount(), 0..50),
    ) {
        let rank = |status: LoanStatus| match status {
            LoanStatus::Issued => 0,
            LoanStatus::PartiallyPaid => 1,
            LoanStatus::FullyPaid => 2,
        };

        let mut balance = LoanBalance::issued(total);
        let mut last = rank(balance.status());

        for amount in attempts {
            if let Ok(new_paid) = balance.apply_payment(amount) {
                balance.amount_paid = new_paid;
            }
            let now = rank(balance.status());
            prop_assert!(now >= last);
            last = now;
        }
    }

    /// Two payments that jointly overpay cannot both be applied in sequence.
    #[test]
    fn prop_jointly_overpaying_pair_has_one_loser(
        total in amount(),
        first in amount(),
        second in amount(),
    ) {
        prop_assume!(first <= total && second <= total && first + second > total);

        let balance = LoanBalance::issued(total);
        let after_first = LoanBalance {
            total_amount: total,
            amount_paid: balance.apply_payment(first).unwrap(),
        };
        let is_overpayment = matches!(
            after_first.apply_payment(second),
            Err(LendingError::PaymentExceedsTotal { .. })
        );
        prop_assert!(is_overpayment);
    }
}
