//! Balance routes.
//!
//! Every balance is recomputed from the journal on each request.

use axum::{
    Json, Router,
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::get,
};
use rust_decimal::Decimal;
use serde::Serialize;
use sitebook_core::ledger::{AccountBalance, BalanceAggregator, LedgerError};
use sitebook_db::SeaOrmLedger;
use sitebook_shared::types::format_amount;

use crate::{AppState, error::ledger_error_response};

/// Creates the balance routes.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/clients/{id}/balance", get(client_balance))
        .route("/suppliers/{id}/balance", get(supplier_balance))
        .route("/cashboxes/{id}/balance", get(cashbox_balance))
        .route("/partners/{id}/balance", get(partner_balance))
        .route("/projects/{id}/balance", get(project_balance))
        .route("/accounts/{id}/balance", get(account_balance))
}

// ============================================================================
// Response Types
// ============================================================================

/// Single-figure balance.
#[derive(Debug, Serialize)]
pub struct BalanceResponse {
    /// Kind of record.
    pub entity: &'static str,
    /// Record ID.
    pub id: String,
    /// Balance, 2 decimal places.
    pub balance: String,
}

/// Project profitability.
#[derive(Debug, Serialize)]
pub struct ProjectBalanceResponse {
    /// Project ID.
    pub id: String,
    /// Project revenue.
    pub revenue: String,
    /// Project expense.
    pub expense: String,
    /// Revenue minus expense.
    pub profit: String,
}

/// Account totals and balance.
#[derive(Debug, Serialize)]
pub struct AccountBalanceResponse {
    /// Account ID.
    pub account_id: String,
    /// Chart code.
    pub code: String,
    /// Display name.
    pub name: String,
    /// Account type.
    pub account_type: String,
    /// Sum of debits.
    pub total_debit: String,
    /// Sum of credits.
    pub total_credit: String,
    /// Balance on the account's normal side.
    pub balance: String,
}

impl From<AccountBalance> for AccountBalanceResponse {
    fn from(account: AccountBalance) -> Self {
        Self {
            account_id: account.account_id,
            code: account.code,
            name: account.name,
            account_type: account.account_type.to_string(),
            total_debit: format_amount(account.total_debit),
            total_credit: format_amount(account.total_credit),
            balance: format_amount(account.balance),
        }
    }
}

// ============================================================================
// Route Handlers
// ============================================================================

fn aggregator(state: &AppState) -> BalanceAggregator<SeaOrmLedger> {
    BalanceAggregator::new(SeaOrmLedger::new((*state.db).clone()))
}

fn balance_response(
    entity: &'static str,
    id: String,
    result: Result<Decimal, LedgerError>,
) -> Response {
    match result {
        Ok(balance) => (
            StatusCode::OK,
            Json(BalanceResponse {
                entity,
                id,
                balance: format_amount(balance),
            }),
        )
            .into_response(),
        Err(e) => ledger_error_response(&e),
    }
}

/// GET `/clients/{id}/balance` - What the client owes.
async fn client_balance(State(state): State<AppState>, Path(id): Path<String>) -> Response {
    let result = aggregator(&state).client_balance(&id).await;
    balance_response("client", id, result)
}

/// GET `/suppliers/{id}/balance` - What is owed to the supplier.
async fn supplier_balance(State(state): State<AppState>, Path(id): Path<String>) -> Response {
    let result = aggregator(&state).supplier_balance(&id).await;
    balance_response("supplier", id, result)
}

/// GET `/cashboxes/{id}/balance` - Money in the cashbox.
async fn cashbox_balance(State(state): State<AppState>, Path(id): Path<String>) -> Response {
    let result = aggregator(&state).cashbox_balance(&id).await;
    balance_response("cashbox", id, result)
}

/// GET `/partners/{id}/balance` - Partner wallet balance.
async fn partner_balance(State(state): State<AppState>, Path(id): Path<String>) -> Response {
    let result = aggregator(&state).partner_balance(&id).await;
    balance_response("partner", id, result)
}

/// GET `/projects/{id}/balance` - Project revenue, expense and profit.
async fn project_balance(State(state): State<AppState>, Path(id): Path<String>) -> Response {
    match aggregator(&state).project_balance(&id).await {
        Ok(balance) => (
            StatusCode::OK,
            Json(ProjectBalanceResponse {
                id,
                revenue: format_amount(balance.revenue),
                expense: format_amount(balance.expense),
                profit: format_amount(balance.profit),
            }),
        )
            .into_response(),
        Err(e) => ledger_error_response(&e),
    }
}

/// GET `/accounts/{id}/balance` - Account totals and balance.
async fn account_balance(State(state): State<AppState>, Path(id): Path<String>) -> Response {
    match aggregator(&state).account_balance(&id).await {
        Ok(balance) => {
            (StatusCode::OK, Json(AccountBalanceResponse::from(balance))).into_response()
        }
        Err(e) => ledger_error_response(&e),
    }
}
