//! Posting route: one business event in, one journal entry out.

use axum::{
    Json, Router,
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::post,
};
use sitebook_core::ledger::PostingRequest;
use sitebook_db::PostingRepository;

use super::journal::EntryResponse;
use crate::{AppState, error::ledger_error_response, middleware::ActorHeader};

/// Creates the posting routes.
pub fn routes() -> Router<AppState> {
    Router::new().route("/postings", post(create_posting))
}

/// POST `/postings` - Post a business event.
///
/// Body: `{date, description, document_number, event: {type, ...}}`.
async fn create_posting(
    State(state): State<AppState>,
    ActorHeader(actor): ActorHeader,
    Json(request): Json<PostingRequest>,
) -> Response {
    let repo = PostingRepository::new((*state.db).clone());

    match repo.post(&actor, request).await {
        Ok(posted) => (StatusCode::CREATED, Json(EntryResponse::from(posted))).into_response(),
        Err(e) => ledger_error_response(&e),
    }
}
