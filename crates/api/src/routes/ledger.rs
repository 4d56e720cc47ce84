//! Payment ledger route.

use axum::{
    Json, Router,
    extract::{Path, State},
    routing::get,
};
use chrono::{DateTime, Utc};
use lendbook_core::lending::PaymentRecord;
use rust_decimal::Decimal;
use serde::Serialize;

use super::parse_loan_id;
use crate::{AppState, error::ApiError};

/// Creates the ledger routes.
pub fn routes() -> Router<AppState> {
    Router::new().route("/ledger/{loan_id}", get(get_ledger))
}

/// One ledger line.
#[derive(Debug, Serialize)]
pub struct LedgerPayment {
    /// Payment label as supplied by the payer.
    pub payment_type: String,
    /// Amount applied.
    #[serde(with = "rust_decimal::serde::float")]
    pub amount: Decimal,
    /// Acceptance time.
    pub payment_date: DateTime<Utc>,
}

impl From<PaymentRecord> for LedgerPayment {
    fn from(record: PaymentRecord) -> Self {
        Self {
            payment_type: record.payment_type.into(),
            amount: record.amount,
            payment_date: record.payment_date,
        }
    }
}

/// Response for a loan's ledger.
#[derive(Debug, Serialize)]
pub struct LedgerResponse {
    /// Loan id exactly as requested.
    pub loan_id: String,
    /// Payments, oldest first.
    pub payments: Vec<LedgerPayment>,
}

/// GET `/ledger/{loan_id}` - Payments of a loan, oldest first.
///
/// Unknown or unparseable loan ids answer 200 with an empty list, unlike
/// `/overview` which answers 404. This asymmetry is kept on purpose and is
/// the one place to change if unknown ledgers should become 404s.
async fn get_ledger(
    State(state): State<AppState>,
    Path(loan_id): Path<String>,
) -> Result<Json<LedgerResponse>, ApiError> {
    let payments: Vec<LedgerPayment> = match parse_loan_id(&loan_id) {
        Ok(id) => state
            .loans
            .get_ledger(id)
            .await?
            .into_iter()
            .map(LedgerPayment::from)
            .collect(),
        Err(_) => Vec::new(),
    };

    Ok(Json(LedgerResponse { loan_id, payments }))
}
