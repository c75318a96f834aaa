//! Repository implementations for ledger store access.
//!
//! Repositories return `LedgerError`: a unique-key violation becomes
//! `ConstraintViolation`, every other database failure `Infrastructure`.

pub mod account;
pub mod journal;
pub mod ledger;
pub mod posting;

pub use account::AccountRepository;
pub use journal::{JournalEntryWithLines, JournalRepository};
pub use ledger::SeaOrmLedger;
pub use posting::PostingRepository;

use sea_orm::{DbErr, SqlErr};
use sitebook_core::ledger::LedgerError;

/// Maps a database error onto the ledger taxonomy.
pub(crate) fn store_err(err: DbErr) -> LedgerError {
    match err.sql_err() {
        Some(SqlErr::UniqueConstraintViolation(detail)) => LedgerError::ConstraintViolation(detail),
        _ => LedgerError::Infrastructure(err.to_string()),
    }
}
