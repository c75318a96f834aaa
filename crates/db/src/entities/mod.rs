//! `SeaORM` entity definitions for the ledger store.

pub mod prelude;

pub mod accounts;
pub mod audit_logs;
pub mod business_documents;
pub mod cashboxes;
pub mod clients;
pub mod journal_entries;
pub mod journal_lines;
pub mod partners;
pub mod projects;
pub mod sea_orm_active_enums;
pub mod suppliers;
