//! Lending error types for validation, lookup and store failures.

use lendbook_shared::AppError;
use rust_decimal::Decimal;
use thiserror::Error;

/// Errors that can occur during lending operations.
///
/// The `Display` text of client-facing variants is the exact message
/// returned over HTTP.
#[derive(Debug, Error)]
pub enum LendingError {
    // ========== Request Shape Errors ==========
    /// A required field was not supplied.
    #[error("Missing field '{0}'")]
    MissingField(&'static str),

    // ========== Validation Errors ==========
    /// Principal must be strictly positive.
    #[error("Loan amount must be positive")]
    NonPositivePrincipal,

    /// Principal exceeds the largest amount the ledger accepts.
    #[error("Loan amount exceeds the maximum of {max}")]
    PrincipalTooLarge {
        /// Largest accepted principal.
        max: Decimal,
    },

    /// Period must be a positive number of years.
    #[error("Loan period must be a positive number of years")]
    NonPositivePeriod,

    /// Period exceeds the longest term the ledger accepts.
    #[error("Loan period exceeds the maximum of {max} years")]
    PeriodTooLong {
        /// Longest accepted period, in years.
        max: u32,
    },

    /// Payment amount must be strictly positive.
    #[error("Payment amount must be positive")]
    NonPositivePayment,

    /// Payment would push `amount_paid` above `total_amount`.
    #[error("Payment exceeds total amount")]
    PaymentExceedsTotal {
        /// Amount paid before this payment.
        amount_paid: Decimal,
        /// Rejected payment amount.
        amount: Decimal,
        /// Total payable on the loan.
        total_amount: Decimal,
    },

    // ========== Lookup Errors ==========
    /// No loan with the given identifier exists.
    #[error("Loan not found")]
    LoanNotFound(String),

    // ========== Storage Errors ==========
    /// The backing store failed.
    #[error("Storage error: {0}")]
    Storage(String),
}

impl LendingError {
    /// Returns the error code for API responses.
    #[must_use]
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::MissingField(_) => "MISSING_FIELD",
            Self::NonPositivePrincipal => "NON_POSITIVE_PRINCIPAL",
            Self::PrincipalTooLarge { .. } => "PRINCIPAL_TOO_LARGE",
            Self::NonPositivePeriod => "NON_POSITIVE_PERIOD",
            Self::PeriodTooLong { .. } => "PERIOD_TOO_LONG",
            Self::NonPositivePayment => "NON_POSITIVE_PAYMENT",
            Self::PaymentExceedsTotal { .. } => "PAYMENT_EXCEEDS_TOTAL",
            Self::LoanNotFound(_) => "LOAN_NOT_FOUND",
            Self::Storage(_) => "STORAGE_ERROR",
        }
    }

    /// Returns the HTTP status code for this error.
    #[must_use]
    pub fn http_status_code(&self) -> u16 {
        match self {
            // 400 Bad Request - missing fields and validation errors
            Self::MissingField(_)
            | Self::NonPositivePrincipal
            | Self::PrincipalTooLarge { .. }
            | Self::NonPositivePeriod
            | Self::PeriodTooLong { .. }
            | Self::NonPositivePayment
            | Self::PaymentExceedsTotal { .. } => 400,

            // 404 Not Found
            Self::LoanNotFound(_) => 404,

            // 500 Internal Server Error
            Self::Storage(_) => 500,
        }
    }
}

impl From<LendingError> for AppError {
    fn from(err: LendingError) -> Self {
        match err {
            LendingError::MissingField(field) => Self::MissingField(field.to_string()),
            LendingError::LoanNotFound(_) => Self::NotFound(err.to_string()),
            LendingError::Storage(msg) => Self::Database(msg),
            LendingError::NonPositivePrincipal
            | LendingError::PrincipalTooLarge { .. }
            | LendingError::NonPositivePeriod
            | LendingError::PeriodTooLong { .. }
            | LendingError::NonPositivePayment
            | LendingError::PaymentExceedsTotal { .. } => Self::Validation(err.to_string()),
        }
    }
}
