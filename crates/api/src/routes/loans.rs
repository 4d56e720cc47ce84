//! Loan issuance and overview routes.

use axum::{
    Json, Router,
    extract::{Path, State},
    http::StatusCode,
    routing::{get, post},
};
use lendbook_core::lending::{LoanProduct, LoanTerms};
use lendbook_db::repositories::LoanOverview;
use lendbook_shared::LoanId;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::info;

use super::parse_loan_id;
use crate::{
    AppState,
    error::ApiError,
    extractors::{ApiJson, required},
};

/// Creates the loan routes.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/lend", post(lend))
        .route("/overview/{loan_id}", get(get_overview))
}

/// Request body for issuing a loan.
#[derive(Debug, Deserialize)]
pub struct LendRequest {
    /// Principal.
    pub loan_amount: Option<Decimal>,
    /// Period in whole years.
    pub loan_period: Option<i64>,
}

/// Response for an issued loan.
#[derive(Debug, Serialize)]
pub struct LendResponse {
    /// Confirmation message.
    pub message: &'static str,
    /// Identifier of the new loan.
    pub loan_id: LoanId,
    /// Monthly installment.
    #[serde(with = "rust_decimal::serde::float")]
    pub monthly_emi: Decimal,
    /// Total payable.
    #[serde(with = "rust_decimal::serde::float")]
    pub total_amount: Decimal,
}

/// Response for a loan overview.
#[derive(Debug, Serialize)]
pub struct OverviewResponse {
    /// Loan identifier.
    pub loan_id: LoanId,
    /// Principal.
    #[serde(with = "rust_decimal::serde::float")]
    pub loan_amount: Decimal,
    /// Period in years.
    pub loan_period: i32,
    /// Annual rate in percent.
    #[serde(with = "rust_decimal::serde::float")]
    pub interest_rate: Decimal,
    /// Total payable.
    #[serde(with = "rust_decimal::serde::float")]
    pub total_amount: Decimal,
    /// Sum of accepted payments.
    #[serde(with = "rust_decimal::serde::float")]
    pub amount_paid: Decimal,
    /// Outstanding amount.
    #[serde(with = "rust_decimal::serde::float")]
    pub balance_amount: Decimal,
}

impl From<LoanOverview> for OverviewResponse {
    fn from(overview: LoanOverview) -> Self {
        Self {
            loan_id: overview.loan_id,
            loan_amount: overview.loan_amount,
            loan_period: overview.loan_period,
            interest_rate: overview.interest_rate,
            total_amount: overview.total_amount,
            amount_paid: overview.amount_paid,
            balance_amount: overview.balance_amount,
        }
    }
}

/// POST `/lend` - Issue a loan.
async fn lend(
    State(state): State<AppState>,
    ApiJson(payload): ApiJson<LendRequest>,
) -> Result<(StatusCode, Json<LendResponse>), ApiError> {
    let principal = required(payload.loan_amount, "loan_amount")?;
    let period_years = required(payload.loan_period, "loan_period")?;

    let rate = state.rates.annual_rate_percent(LoanProduct::Standard);
    let terms = LoanTerms::new(principal, period_years, rate)?;

    let issued = state.loans.issue_loan(terms).await?;

    info!(loan_id = %issued.loan_id, "Loan issued via API");

    Ok((
        StatusCode::CREATED,
        Json(LendResponse {
            message: "Loan issued successfully",
            loan_id: issued.loan_id,
            monthly_emi: issued.monthly_installment,
            total_amount: issued.total_amount,
        }),
    ))
}

/// GET `/overview/{loan_id}` - Loan snapshot with outstanding balance.
async fn get_overview(
    State(state): State<AppState>,
    Path(loan_id): Path<String>,
) -> Result<Json<OverviewResponse>, ApiError> {
    let loan_id = parse_loan_id(&loan_id)?;

    let overview = state.loans.get_overview(loan_id).await?;

    Ok(Json(overview.into()))
}
