//! Journal entry routes.

use axum::{
    Json, Router,
    extract::{Path, Query, State},
    http::{HeaderName, HeaderValue, StatusCode},
    response::{IntoResponse, Response},
    routing::get,
};
use serde::Serialize;
use sitebook_db::{JournalEntryWithLines, JournalRepository, entities::journal_entries};
use sitebook_shared::types::{PageMeta, PageRequest, format_amount};

use crate::{AppState, error::ledger_error_response};

/// Header carrying the total number of entries across all pages.
const TOTAL_COUNT_HEADER: HeaderName = HeaderName::from_static("x-total-count");

/// Creates the journal routes.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/journal-entries", get(list_entries))
        .route("/journal-entries/{entry_id}", get(get_entry))
}

// ============================================================================
// Response Types
// ============================================================================

/// Journal entry header.
#[derive(Debug, Serialize)]
pub struct EntrySummary {
    /// Entry ID.
    pub id: String,
    /// Accounting date.
    pub entry_date: String,
    /// Description.
    pub description: String,
    /// Source document ID.
    pub document_id: Option<String>,
    /// Entry this one reverses, if any.
    pub reversed_id: Option<String>,
    /// Acting identity.
    pub created_by: String,
    /// Created at timestamp.
    pub created_at: String,
}

impl From<journal_entries::Model> for EntrySummary {
    fn from(entry: journal_entries::Model) -> Self {
        Self {
            id: entry.id,
            entry_date: entry.entry_date.to_string(),
            description: entry.description,
            document_id: entry.document_id,
            reversed_id: entry.reversed_id,
            created_by: entry.created_by,
            created_at: entry.created_at.to_rfc3339(),
        }
    }
}

/// One journal line.
#[derive(Debug, Serialize)]
pub struct LineResponse {
    /// Line ID.
    pub id: String,
    /// Position within the entry, from 1.
    pub line_order: i32,
    /// Account posted to.
    pub account_id: String,
    /// Debit amount.
    pub debit: String,
    /// Credit amount.
    pub credit: String,
    /// Project tag.
    pub project_id: Option<String>,
    /// Client tag.
    pub client_id: Option<String>,
    /// Supplier tag.
    pub supplier_id: Option<String>,
}

/// Journal entry with lines and totals.
#[derive(Debug, Serialize)]
pub struct EntryResponse {
    /// Entry header.
    #[serde(flatten)]
    pub entry: EntrySummary,
    /// Lines in posting order.
    pub lines: Vec<LineResponse>,
    /// Sum of debits.
    pub total_debit: String,
    /// Sum of credits.
    pub total_credit: String,
}

impl From<JournalEntryWithLines> for EntryResponse {
    fn from(posted: JournalEntryWithLines) -> Self {
        let total_debit = posted.lines.iter().map(|l| l.debit).sum();
        let total_credit = posted.lines.iter().map(|l| l.credit).sum();

        Self {
            entry: posted.entry.into(),
            lines: posted
                .lines
                .into_iter()
                .map(|line| LineResponse {
                    id: line.id,
                    line_order: line.line_order,
                    account_id: line.account_id,
                    debit: format_amount(line.debit),
                    credit: format_amount(line.credit),
                    project_id: line.project_id,
                    client_id: line.client_id,
                    supplier_id: line.supplier_id,
                })
                .collect(),
            total_debit: format_amount(total_debit),
            total_credit: format_amount(total_credit),
        }
    }
}

/// Page of entry headers.
#[derive(Debug, Serialize)]
pub struct EntryListResponse {
    /// Entries, newest first.
    pub data: Vec<EntrySummary>,
    /// Pagination metadata.
    pub meta: PageMeta,
}

// ============================================================================
// Route Handlers
// ============================================================================

/// GET `/journal-entries` - List entry headers.
async fn list_entries(State(state): State<AppState>, Query(page): Query<PageRequest>) -> Response {
    let repo = JournalRepository::new((*state.db).clone());

    match repo.list_entries(&page).await {
        Ok(page) => {
            let total = HeaderValue::from(page.meta.total);
            let body = EntryListResponse {
                data: page.data.into_iter().map(EntrySummary::from).collect(),
                meta: page.meta,
            };
            (StatusCode::OK, [(TOTAL_COUNT_HEADER, total)], Json(body)).into_response()
        }
        Err(e) => ledger_error_response(&e),
    }
}

/// GET `/journal-entries/{entry_id}` - Get an entry with its lines.
async fn get_entry(State(state): State<AppState>, Path(entry_id): Path<String>) -> Response {
    let repo = JournalRepository::new((*state.db).clone());

    match repo.get_entry(&entry_id).await {
        Ok(entry) => (StatusCode::OK, Json(EntryResponse::from(entry))).into_response(),
        Err(e) => ledger_error_response(&e),
    }
}
