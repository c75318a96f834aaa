//! Ledger service: build then validate.
//!
//! The service is the pure half of a posting. It produces the lines the store
//! will persist and refuses anything the balance gate rejects, before any
//! write happens.

use serde::Serialize;

use super::builder::EntryBuilder;
use super::entry::JournalLineSpec;
use super::error::LedgerError;
use super::types::{BusinessEvent, LinkedAccounts};
use super::validation::{check_balance, validate_entry, BalanceCheck};

/// Lines of a journal entry that passed validation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PreparedEntry {
    /// Lines in builder order.
    pub lines: Vec<JournalLineSpec>,
    /// Debit and credit totals.
    pub totals: BalanceCheck,
}

/// Ledger service for entry preparation.
pub struct LedgerService;

impl LedgerService {
    /// Builds the entry for `event` and runs it through the balance gate.
    ///
    /// # Errors
    ///
    /// Returns the builder's error, or `LedgerError::Validation` if the lines
    /// fail `validate_entry`.
    pub fn prepare(
        builder: &EntryBuilder,
        event: &BusinessEvent,
        linked: &LinkedAccounts,
    ) -> Result<PreparedEntry, LedgerError> {
        let lines = builder.build(event, linked)?;
        Self::validate(lines)
    }

    /// Runs externally built lines through the balance gate.
    ///
    /// # Errors
    ///
    /// Returns `LedgerError::Validation` if the lines fail `validate_entry`.
    pub fn validate(lines: Vec<JournalLineSpec>) -> Result<PreparedEntry, LedgerError> {
        validate_entry(&lines)?;
        let totals = check_balance(&lines);
        Ok(PreparedEntry { lines, totals })
    }
}
