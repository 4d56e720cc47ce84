//! API route definitions.

use std::str::FromStr;

use axum::Router;
use lendbook_core::lending::LendingError;
use lendbook_shared::LoanId;

use crate::AppState;

pub mod health;
pub mod ledger;
pub mod loans;
pub mod payments;

/// Creates the API router with all routes.
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .merge(health::routes())
        .merge(loans::routes())
        .merge(payments::routes())
        .merge(ledger::routes())
}

/// Parses a client-supplied loan id.
///
/// Anything that is not a UUID cannot name a loan, so it is reported as an
/// unknown loan rather than a malformed request.
fn parse_loan_id(raw: &str) -> Result<LoanId, LendingError> {
    LoanId::from_str(raw).map_err(|_| LendingError::LoanNotFound(raw.to_string()))
}
