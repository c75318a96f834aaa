//! API route definitions.

use axum::Router;

use crate::AppState;

pub mod balances;
pub mod health;
pub mod journal;
pub mod postings;
pub mod reports;

/// Creates the API router with all routes.
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .merge(health::routes())
        .merge(postings::routes())
        .merge(journal::routes())
        .merge(balances::routes())
        .merge(reports::routes())
}
