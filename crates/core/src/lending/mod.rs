//! Simple-interest lending rules.
//!
//! This module implements the pure side of the loan ledger:
//! - The issuance calculator (total payable, monthly installment)
//! - The per-product rate table
//! - Loan terms validation and the repayment state machine
//! - Payment labels and records
//! - Error types for lending operations

pub mod calculator;
pub mod error;
pub mod loan;
pub mod payment;
pub mod rates;

#[cfg(test)]
mod balance_props;
#[cfg(test)]
mod calculator_props;

pub use calculator::{LoanCalculator, LoanQuote};
pub use error::LendingError;
pub use loan::{LoanBalance, LoanStatus, LoanTerms, MAX_PERIOD_YEARS, MAX_PRINCIPAL};
pub use payment::{PaymentRecord, PaymentType, sort_ledger};
pub use rates::{LoanProduct, RateTable, STANDARD_ANNUAL_RATE_PERCENT};
