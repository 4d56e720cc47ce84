//! Payment routes.

use axum::{Json, Router, extract::State, routing::post};
use lendbook_core::lending::PaymentType;
use lendbook_shared::LoanId;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::parse_loan_id;
use crate::{
    AppState,
    error::ApiError,
    extractors::{ApiJson, required},
};

/// Creates the payment routes.
pub fn routes() -> Router<AppState> {
    Router::new().route("/payment", post(record_payment))
}

/// Request body for recording a payment.
#[derive(Debug, Deserialize)]
pub struct PaymentRequest {
    /// Loan to pay.
    pub loan_id: Option<String>,
    /// Free-form label, e.g. `EMI` or `LUMP_SUM`.
    pub payment_type: Option<String>,
    /// Amount to apply.
    pub amount: Option<Decimal>,
}

/// Response for an accepted payment.
#[derive(Debug, Serialize)]
pub struct PaymentResponse {
    /// Confirmation message.
    pub message: &'static str,
    /// Loan the payment was applied to.
    pub loan_id: LoanId,
    /// Running total after this payment.
    #[serde(with = "rust_decimal::serde::float")]
    pub amount_paid: Decimal,
}

/// POST `/payment` - Record a payment against a loan.
async fn record_payment(
    State(state): State<AppState>,
    ApiJson(payload): ApiJson<PaymentRequest>,
) -> Result<Json<PaymentResponse>, ApiError> {
    let loan_id = required(payload.loan_id, "loan_id")?;
    let payment_type = required(payload.payment_type, "payment_type")?;
    let amount = required(payload.amount, "amount")?;

    let loan_id = parse_loan_id(&loan_id)?;

    let receipt = state
        .loans
        .record_payment(loan_id, PaymentType::from(payment_type), amount)
        .await?;

    Ok(Json(PaymentResponse {
        message: "Payment successful",
        loan_id: receipt.loan_id,
        amount_paid: receipt.amount_paid,
    }))
}
