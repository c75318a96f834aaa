//! Ledger schema.
//!
//! Creates the chart of accounts, master data, source documents, the journal
//! and the audit log.

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        let db = manager.get_connection();

        // ============================================================
        // PART 1: ENUMS
        // ============================================================
        db.execute_unprepared(ENUMS_SQL).await?;

        // ============================================================
        // PART 2: CHART OF ACCOUNTS & MASTER DATA
        // ============================================================
        db.execute_unprepared(ACCOUNTS_SQL).await?;
        db.execute_unprepared(MASTER_DATA_SQL).await?;

        // ============================================================
        // PART 3: JOURNAL
        // ============================================================
        db.execute_unprepared(JOURNAL_ENTRIES_SQL).await?;
        db.execute_unprepared(JOURNAL_LINES_SQL).await?;

        // ============================================================
        // PART 4: SOURCE DOCUMENTS & AUDIT
        // ============================================================
        db.execute_unprepared(BUSINESS_DOCUMENTS_SQL).await?;
        db.execute_unprepared(AUDIT_LOGS_SQL).await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        let db = manager.get_connection();
        db.execute_unprepared(DROP_ALL_SQL).await?;
        Ok(())
    }
}

// ============================================================
// SQL CONSTANTS
// ============================================================

const ENUMS_SQL: &str = r"
CREATE TYPE account_type AS ENUM (
    'asset',
    'liability',
    'equity',
    'revenue',
    'expense'
);

CREATE TYPE document_kind AS ENUM (
    'revenue',
    'expense',
    'client_invoice',
    'supplier_invoice',
    'client_payment',
    'supplier_payment',
    'cashbox_transfer',
    'material_consumption',
    'payroll_accrual',
    'payroll_payment',
    'partner_settlement'
);
";

const ACCOUNTS_SQL: &str = r"
CREATE TABLE accounts (
    id VARCHAR(64) PRIMARY KEY,
    code VARCHAR(20) NOT NULL UNIQUE,
    name VARCHAR(255) NOT NULL,
    account_type account_type NOT NULL,
    created_at TIMESTAMPTZ NOT NULL DEFAULT now()
);
";

const MASTER_DATA_SQL: &str = r"
CREATE TABLE clients (
    id VARCHAR(64) PRIMARY KEY,
    name VARCHAR(255) NOT NULL,
    created_at TIMESTAMPTZ NOT NULL DEFAULT now()
);

CREATE TABLE suppliers (
    id VARCHAR(64) PRIMARY KEY,
    name VARCHAR(255) NOT NULL,
    created_at TIMESTAMPTZ NOT NULL DEFAULT now()
);

CREATE TABLE projects (
    id VARCHAR(64) PRIMARY KEY,
    name VARCHAR(255) NOT NULL,
    created_at TIMESTAMPTZ NOT NULL DEFAULT now()
);

CREATE TABLE cashboxes (
    id VARCHAR(64) PRIMARY KEY,
    name VARCHAR(255) NOT NULL,
    account_id VARCHAR(64) NOT NULL REFERENCES accounts(id),
    created_at TIMESTAMPTZ NOT NULL DEFAULT now()
);

CREATE TABLE partners (
    id VARCHAR(64) PRIMARY KEY,
    name VARCHAR(255) NOT NULL,
    account_id VARCHAR(64) NOT NULL REFERENCES accounts(id),
    created_at TIMESTAMPTZ NOT NULL DEFAULT now()
);
";

const JOURNAL_ENTRIES_SQL: &str = r"
CREATE TABLE journal_entries (
    id VARCHAR(64) PRIMARY KEY,
    entry_date DATE NOT NULL,
    description VARCHAR(500) NOT NULL,
    document_id VARCHAR(64),
    reversed_id VARCHAR(64) REFERENCES journal_entries(id),
    created_by VARCHAR(255) NOT NULL,
    created_at TIMESTAMPTZ NOT NULL DEFAULT now()
);

CREATE INDEX idx_je_date ON journal_entries(entry_date, created_at);
";

// Tags are weak references: no foreign keys on project/client/supplier.
const JOURNAL_LINES_SQL: &str = r"
CREATE TABLE journal_lines (
    id VARCHAR(64) PRIMARY KEY,
    journal_entry_id VARCHAR(64) NOT NULL REFERENCES journal_entries(id) ON DELETE CASCADE,
    line_order INTEGER NOT NULL,
    account_id VARCHAR(64) NOT NULL REFERENCES accounts(id),
    debit NUMERIC(20, 4) NOT NULL DEFAULT 0,
    credit NUMERIC(20, 4) NOT NULL DEFAULT 0,
    project_id VARCHAR(64),
    client_id VARCHAR(64),
    supplier_id VARCHAR(64),
    CONSTRAINT chk_jl_non_negative CHECK (debit >= 0 AND credit >= 0),
    CONSTRAINT chk_jl_single_side CHECK (debit = 0 OR credit = 0),
    CONSTRAINT uq_jl_order UNIQUE (journal_entry_id, line_order)
);

CREATE INDEX idx_jl_account ON journal_lines(account_id);
CREATE INDEX idx_jl_client ON journal_lines(client_id, account_id) WHERE client_id IS NOT NULL;
CREATE INDEX idx_jl_supplier ON journal_lines(supplier_id, account_id) WHERE supplier_id IS NOT NULL;
CREATE INDEX idx_jl_project ON journal_lines(project_id) WHERE project_id IS NOT NULL;
";

const BUSINESS_DOCUMENTS_SQL: &str = r"
CREATE TABLE business_documents (
    id VARCHAR(64) PRIMARY KEY,
    kind document_kind NOT NULL,
    number VARCHAR(50) NOT NULL,
    document_date DATE NOT NULL,
    description VARCHAR(500) NOT NULL,
    amount NUMERIC(20, 4) NOT NULL CHECK (amount > 0),
    project_id VARCHAR(64),
    client_id VARCHAR(64),
    supplier_id VARCHAR(64),
    payload JSONB NOT NULL DEFAULT '{}',
    journal_entry_id VARCHAR(64) REFERENCES journal_entries(id),
    created_by VARCHAR(255) NOT NULL,
    created_at TIMESTAMPTZ NOT NULL DEFAULT now(),
    CONSTRAINT uq_bd_number UNIQUE (number)
);

CREATE INDEX idx_bd_kind ON business_documents(kind, document_date);
";

const AUDIT_LOGS_SQL: &str = r"
CREATE TABLE audit_logs (
    id VARCHAR(64) PRIMARY KEY,
    actor VARCHAR(255) NOT NULL,
    action VARCHAR(50) NOT NULL,
    entity_type VARCHAR(50) NOT NULL,
    entity_id VARCHAR(64) NOT NULL,
    details JSONB NOT NULL DEFAULT '{}',
    created_at TIMESTAMPTZ NOT NULL DEFAULT now()
);

CREATE INDEX idx_al_entity ON audit_logs(entity_type, entity_id);
";

const DROP_ALL_SQL: &str = r"
DROP TABLE IF EXISTS audit_logs;
DROP TABLE IF EXISTS business_documents;
DROP TABLE IF EXISTS journal_lines;
DROP TABLE IF EXISTS journal_entries;
DROP TABLE IF EXISTS partners;
DROP TABLE IF EXISTS cashboxes;
DROP TABLE IF EXISTS projects;
DROP TABLE IF EXISTS suppliers;
DROP TABLE IF EXISTS clients;
DROP TABLE IF EXISTS accounts;
DROP TYPE IF EXISTS document_kind;
DROP TYPE IF EXISTS account_type;
";
