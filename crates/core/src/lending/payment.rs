//! Payment records and the open payment-type label.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Label describing how a payment was made.
///
/// The set is open: well-known tags get their own variant and anything
/// else is kept verbatim. Labels are informational, never a domain rule.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum PaymentType {
    /// Equated monthly installment.
    Emi,
    /// One-off payment outside the installment schedule.
    LumpSum,
    /// Any other caller-supplied tag.
    Other(String),
}

impl PaymentType {
    /// Returns the wire representation of the label.
    #[must_use]
    pub fn as_str(&self) -> &str {
        match self {
            Self::Emi => "EMI",
            Self::LumpSum => "LUMP_SUM",
            Self::Other(tag) => tag,
        }
    }
}

impl From<String> for PaymentType {
    fn from(tag: String) -> Self {
        match tag.as_str() {
            "EMI" => Self::Emi,
            "LUMP_SUM" => Self::LumpSum,
            _ => Self::Other(tag),
        }
    }
}

impl From<&str> for PaymentType {
    fn from(tag: &str) -> Self {
        Self::from(tag.to_string())
    }
}

impl From<PaymentType> for String {
    fn from(payment_type: PaymentType) -> Self {
        match payment_type {
            PaymentType::Other(tag) => tag,
            known => known.as_str().to_string(),
        }
    }
}

impl std::fmt::Display for PaymentType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// An accepted payment. Immutable once recorded.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaymentRecord {
    /// How the payment was made.
    pub payment_type: PaymentType,
    /// Amount applied to the loan.
    pub amount: Decimal,
    /// Acceptance time assigned by the ledger.
    pub payment_date: DateTime<Utc>,
}

/// Sorts payments into ledger order: oldest first, ties kept in
/// insertion order.
pub fn sort_ledger(payments: &mut [PaymentRecord]) {
    payments.sort_by_key(|payment| payment.payment_date);
}
