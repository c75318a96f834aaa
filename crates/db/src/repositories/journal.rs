//! Journal entry reads.

use sea_orm::{
    ColumnTrait, DatabaseConnection, EntityTrait, PaginatorTrait, QueryFilter, QueryOrder,
    QuerySelect,
};
use serde::Serialize;
use sitebook_core::ledger::LedgerError;
use sitebook_shared::types::{PageRequest, PageResponse};

use super::store_err;
use crate::entities::{journal_entries, journal_lines};

/// A journal entry with its lines in posting order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct JournalEntryWithLines {
    /// The entry header.
    pub entry: journal_entries::Model,
    /// The lines, ordered by `line_order`.
    pub lines: Vec<journal_lines::Model>,
}

/// Repository for journal entry reads.
#[derive(Debug, Clone)]
pub struct JournalRepository {
    db: DatabaseConnection,
}

impl JournalRepository {
    /// Creates a new journal repository.
    #[must_use]
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Gets an entry with its lines.
    ///
    /// # Errors
    ///
    /// `NotFound` for an unknown entry id.
    pub async fn get_entry(&self, entry_id: &str) -> Result<JournalEntryWithLines, LedgerError> {
        let entry = journal_entries::Entity::find_by_id(entry_id.to_string())
            .one(&self.db)
            .await
            .map_err(store_err)?
            .ok_or_else(|| LedgerError::not_found("journal entry", entry_id))?;

        let lines = journal_lines::Entity::find()
            .filter(journal_lines::Column::JournalEntryId.eq(entry.id.as_str()))
            .order_by_asc(journal_lines::Column::LineOrder)
            .all(&self.db)
            .await
            .map_err(store_err)?;

        Ok(JournalEntryWithLines { entry, lines })
    }

    /// Lists entry headers, newest first.
    pub async fn list_entries(
        &self,
        page: &PageRequest,
    ) -> Result<PageResponse<journal_entries::Model>, LedgerError> {
        let page = page.clamped();

        let total = journal_entries::Entity::find()
            .count(&self.db)
            .await
            .map_err(store_err)?;

        let entries = journal_entries::Entity::find()
            .order_by_desc(journal_entries::Column::EntryDate)
            .order_by_desc(journal_entries::Column::CreatedAt)
            .order_by_desc(journal_entries::Column::Id)
            .offset(page.offset())
            .limit(page.limit())
            .all(&self.db)
            .await
            .map_err(store_err)?;

        Ok(PageResponse::new(entries, &page, total))
    }
}
