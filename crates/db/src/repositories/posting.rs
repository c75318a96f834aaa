//! Posting orchestrator: one business event, one journal entry, one
//! database transaction.
//!
//! Steps, all inside a single `DatabaseTransaction`:
//! 1. check the referenced project, client, supplier, cashboxes and partners
//! 2. insert the source document
//! 3. build the entry and run it through the balance gate
//! 4. insert the entry and its lines, then write the entry id back onto the
//!    source document
//! 5. write the audit log inside a savepoint
//!
//! Any error before commit drops the transaction, which rolls it back. The
//! audit write is the one step allowed to fail: it is rolled back to its
//! savepoint and logged.

use std::collections::BTreeSet;

use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, DatabaseTransaction, EntityTrait,
    QueryFilter, Set, TransactionTrait,
};
use serde_json::json;
use sitebook_core::ledger::{
    BusinessEvent, Dimensions, EntryBuilder, JournalLineSpec, LedgerError, LedgerService,
    LinkedAccounts, PostingRequest,
};
use sitebook_shared::{Actor, new_record_id};
use tracing::{info, warn};

use super::account::load_account_map;
use super::journal::JournalEntryWithLines;
use super::store_err;
use crate::entities::{
    accounts, audit_logs, business_documents, cashboxes, clients, journal_entries, journal_lines,
    partners, projects, sea_orm_active_enums::DocumentKind, suppliers,
};

/// Repository that posts business events to the journal.
#[derive(Debug, Clone)]
pub struct PostingRepository {
    db: DatabaseConnection,
}

impl PostingRepository {
    /// Creates a new posting repository.
    #[must_use]
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Posts a business event as one journal entry.
    ///
    /// # Errors
    ///
    /// - `InvalidAmount` / `InvalidEvent` for a malformed request
    /// - `NotFound` for an unknown project, client, supplier, cashbox, partner
    ///   or account
    /// - `Validation` if the built entry fails the balance gate
    /// - `ConstraintViolation` for a duplicate document number
    /// - `Infrastructure` if the store fails or the commit does not go through
    pub async fn post(
        &self,
        actor: &Actor,
        request: PostingRequest,
    ) -> Result<JournalEntryWithLines, LedgerError> {
        request.validate()?;

        let txn = self.db.begin().await.map_err(store_err)?;

        ensure_dimensions(&txn, request.event.dimensions()).await?;
        let linked = load_linked_accounts(&txn, &request.event).await?;
        let accounts = load_account_map(&txn).await?;

        let document = insert_document(&txn, actor, &request).await?;

        let prepared =
            match LedgerService::prepare(&EntryBuilder::new(accounts), &request.event, &linked) {
                Ok(prepared) => prepared,
                Err(err) => {
                    warn!(
                        document_number = %request.document_number,
                        kind = %request.event.kind(),
                        error = %err,
                        "Posting rejected"
                    );
                    return Err(err);
                }
            };
        ensure_accounts_exist(&txn, &prepared.lines).await?;

        let entry = insert_entry(&txn, actor, &request, &document.id).await?;
        let lines = insert_lines(&txn, &entry.id, &prepared.lines).await?;
        link_document(&txn, document, &entry.id).await?;

        write_audit(&txn, actor, &entry, &request).await;

        txn.commit().await.map_err(store_err)?;

        info!(
            entry_id = %entry.id,
            document_number = %request.document_number,
            kind = %request.event.kind(),
            amount = %prepared.totals.total_debit,
            actor = %actor,
            "Journal entry posted"
        );

        Ok(JournalEntryWithLines { entry, lines })
    }
}

/// Checks that every tagged project, client and supplier exists.
async fn ensure_dimensions(
    txn: &DatabaseTransaction,
    dimensions: Dimensions<'_>,
) -> Result<(), LedgerError> {
    if let Some(id) = dimensions.project_id {
        projects::Entity::find_by_id(id.to_string())
            .one(txn)
            .await
            .map_err(store_err)?
            .ok_or_else(|| LedgerError::not_found("project", id))?;
    }
    if let Some(id) = dimensions.client_id {
        clients::Entity::find_by_id(id.to_string())
            .one(txn)
            .await
            .map_err(store_err)?
            .ok_or_else(|| LedgerError::not_found("client", id))?;
    }
    if let Some(id) = dimensions.supplier_id {
        suppliers::Entity::find_by_id(id.to_string())
            .one(txn)
            .await
            .map_err(store_err)?
            .ok_or_else(|| LedgerError::not_found("supplier", id))?;
    }
    Ok(())
}

/// Loads the accounts behind the event's cashboxes and partners.
async fn load_linked_accounts(
    txn: &DatabaseTransaction,
    event: &BusinessEvent,
) -> Result<LinkedAccounts, LedgerError> {
    let mut linked = LinkedAccounts::new();

    for id in event.cashbox_ids() {
        let cashbox = cashboxes::Entity::find_by_id(id.to_string())
            .one(txn)
            .await
            .map_err(store_err)?
            .ok_or_else(|| LedgerError::not_found("cashbox", id))?;
        linked = linked.with_cashbox(cashbox.id, cashbox.account_id);
    }

    for id in event.partner_ids() {
        let partner = partners::Entity::find_by_id(id.to_string())
            .one(txn)
            .await
            .map_err(store_err)?
            .ok_or_else(|| LedgerError::not_found("partner", id))?;
        linked = linked.with_partner(partner.id, partner.account_id);
    }

    Ok(linked)
}

/// Caller-chosen revenue and expense accounts are not checked by the builder.
async fn ensure_accounts_exist(
    txn: &DatabaseTransaction,
    lines: &[JournalLineSpec],
) -> Result<(), LedgerError> {
    let wanted: BTreeSet<&str> = lines.iter().map(|l| l.account_id.as_str()).collect();

    let found: BTreeSet<String> = accounts::Entity::find()
        .filter(accounts::Column::Id.is_in(wanted.iter().copied()))
        .all(txn)
        .await
        .map_err(store_err)?
        .into_iter()
        .map(|a| a.id)
        .collect();

    match wanted.into_iter().find(|id| !found.contains(*id)) {
        Some(missing) => Err(LedgerError::not_found("account", missing)),
        None => Ok(()),
    }
}

async fn insert_document(
    txn: &DatabaseTransaction,
    actor: &Actor,
    request: &PostingRequest,
) -> Result<business_documents::Model, LedgerError> {
    let dimensions = request.event.dimensions();
    let payload = serde_json::to_value(&request.event)
        .map_err(|e| LedgerError::Infrastructure(e.to_string()))?;

    let document = business_documents::ActiveModel {
        id: Set(new_record_id()),
        kind: Set(DocumentKind::from(request.event.kind())),
        number: Set(request.document_number.trim().to_string()),
        document_date: Set(request.date),
        description: Set(request.description.clone()),
        amount: Set(request.event.amount()),
        project_id: Set(dimensions.project_id.map(str::to_string)),
        client_id: Set(dimensions.client_id.map(str::to_string)),
        supplier_id: Set(dimensions.supplier_id.map(str::to_string)),
        payload: Set(payload),
        journal_entry_id: Set(None),
        created_by: Set(actor.to_string()),
        created_at: Set(Utc::now().into()),
    };

    document.insert(txn).await.map_err(|err| match store_err(err) {
        LedgerError::ConstraintViolation(_) => LedgerError::ConstraintViolation(format!(
            "document number {}",
            request.document_number.trim()
        )),
        other => other,
    })
}

async fn insert_entry(
    txn: &DatabaseTransaction,
    actor: &Actor,
    request: &PostingRequest,
    document_id: &str,
) -> Result<journal_entries::Model, LedgerError> {
    let entry = journal_entries::ActiveModel {
        id: Set(new_record_id()),
        entry_date: Set(request.date),
        description: Set(request.description.clone()),
        document_id: Set(Some(document_id.to_string())),
        reversed_id: Set(None),
        created_by: Set(actor.to_string()),
        created_at: Set(Utc::now().into()),
    };

    entry.insert(txn).await.map_err(store_err)
}

async fn insert_lines(
    txn: &DatabaseTransaction,
    entry_id: &str,
    lines: &[JournalLineSpec],
) -> Result<Vec<journal_lines::Model>, LedgerError> {
    let mut inserted = Vec::with_capacity(lines.len());

    for (line_order, line) in (1_i32..).zip(lines) {
        let model = journal_lines::ActiveModel {
            id: Set(new_record_id()),
            journal_entry_id: Set(entry_id.to_string()),
            line_order: Set(line_order),
            account_id: Set(line.account_id.clone()),
            debit: Set(line.debit),
            credit: Set(line.credit),
            project_id: Set(line.project_id.clone()),
            client_id: Set(line.client_id.clone()),
            supplier_id: Set(line.supplier_id.clone()),
        };
        inserted.push(model.insert(txn).await.map_err(store_err)?);
    }

    Ok(inserted)
}

async fn link_document(
    txn: &DatabaseTransaction,
    document: business_documents::Model,
    entry_id: &str,
) -> Result<(), LedgerError> {
    let mut active: business_documents::ActiveModel = document.into();
    active.journal_entry_id = Set(Some(entry_id.to_string()));
    active.update(txn).await.map_err(store_err)?;
    Ok(())
}

/// Writes the audit row inside a savepoint. Never fails the posting.
async fn write_audit(
    txn: &DatabaseTransaction,
    actor: &Actor,
    entry: &journal_entries::Model,
    request: &PostingRequest,
) {
    let savepoint = match txn.begin().await {
        Ok(savepoint) => savepoint,
        Err(err) => {
            warn!(entry_id = %entry.id, error = %err, "Failed to open audit savepoint");
            return;
        }
    };

    let log = audit_logs::ActiveModel {
        id: Set(new_record_id()),
        actor: Set(actor.to_string()),
        action: Set("post".to_string()),
        entity_type: Set("journal_entry".to_string()),
        entity_id: Set(entry.id.clone()),
        details: Set(json!({
            "kind": request.event.kind().as_str(),
            "document_number": request.document_number.trim(),
            "amount": request.event.amount().to_string(),
        })),
        created_at: Set(Utc::now().into()),
    };

    match log.insert(&savepoint).await {
        Ok(_) => {
            if let Err(err) = savepoint.commit().await {
                warn!(entry_id = %entry.id, error = %err, "Failed to release audit savepoint");
            }
        }
        Err(err) => {
            warn!(entry_id = %entry.id, error = %err, "Audit log write failed");
            if let Err(err) = savepoint.rollback().await {
                warn!(entry_id = %entry.id, error = %err, "Failed to roll back audit savepoint");
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use rust_decimal_macros::dec;

    fn request() -> PostingRequest {
        PostingRequest {
            date: NaiveDate::from_ymd_opt(2026, 3, 2).unwrap(),
            description: "Steel delivery".to_string(),
            document_number: "SI-0001".to_string(),
            event: BusinessEvent::SupplierInvoice {
                amount: dec!(28750),
                supplier_id: "S1".to_string(),
                project_id: Some("P1".to_string()),
            },
        }
    }

    #[tokio::test]
    async fn test_invalid_request_fails_before_store() {
        let repo = PostingRepository::new(DatabaseConnection::Disconnected);
        let mut bad = request();
        bad.event = BusinessEvent::SupplierInvoice {
            amount: dec!(0),
            supplier_id: "S1".to_string(),
            project_id: None,
        };

        let err = repo.post(&Actor::system(), bad).await.unwrap_err();
        assert!(matches!(err, LedgerError::InvalidAmount(_)));
    }

    #[tokio::test]
    async fn test_unreachable_store_is_infrastructure() {
        let repo = PostingRepository::new(DatabaseConnection::Disconnected);

        let err = repo.post(&Actor::system(), request()).await.unwrap_err();
        assert!(matches!(err, LedgerError::Infrastructure(_)));
    }
}
