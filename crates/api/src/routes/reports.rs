//! Report routes.

use axum::{
    Json, Router,
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::get,
};
use serde::Serialize;
use sitebook_core::ledger::BalanceAggregator;
use sitebook_db::SeaOrmLedger;
use sitebook_shared::types::format_amount;

use super::balances::AccountBalanceResponse;
use crate::{AppState, error::ledger_error_response};

/// Creates the report routes.
pub fn routes() -> Router<AppState> {
    Router::new().route("/reports/trial-balance", get(trial_balance))
}

/// Trial balance report.
#[derive(Debug, Serialize)]
pub struct TrialBalanceResponse {
    /// One row per account with activity, by code.
    pub accounts: Vec<AccountBalanceResponse>,
    /// Sum of all debits.
    pub total_debit: String,
    /// Sum of all credits.
    pub total_credit: String,
    /// Whether debits equal credits.
    pub is_balanced: bool,
}

/// GET `/reports/trial-balance` - Trial balance over the whole journal.
async fn trial_balance(State(state): State<AppState>) -> Response {
    let aggregator = BalanceAggregator::new(SeaOrmLedger::new((*state.db).clone()));

    match aggregator.trial_balance().await {
        Ok(report) => (
            StatusCode::OK,
            Json(TrialBalanceResponse {
                accounts: report
                    .accounts
                    .into_iter()
                    .map(AccountBalanceResponse::from)
                    .collect(),
                total_debit: format_amount(report.total_debit),
                total_credit: format_amount(report.total_credit),
                is_balanced: report.is_balanced,
            }),
        )
            .into_response(),
        Err(e) => ledger_error_response(&e),
    }
}
