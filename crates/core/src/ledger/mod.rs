//! Double-entry bookkeeping logic.
//!
//! This module implements the core ledger functionality:
//! - Chart-of-accounts conventions and system accounts
//! - Entry builders, one per business event
//! - The balance validator every entry passes before persistence
//! - Balance aggregation over a ledger store
//! - Error types for ledger operations

pub mod accounts;
pub mod balance;
pub mod builder;
pub mod entry;
pub mod error;
pub mod service;
pub mod types;
pub mod validation;

#[cfg(test)]
mod builder_props;
#[cfg(test)]
mod memory;
#[cfg(test)]
mod validation_props;

pub use accounts::{AccountMap, AccountType, NormalBalance, SystemAccount};
pub use balance::{
    AccountBalance, AccountInfo, BalanceAggregator, LedgerQuery, LineFilter, LineTotals,
    TrialBalance,
};
pub use builder::EntryBuilder;
pub use entry::{EntrySide, JournalLineSpec};
pub use error::LedgerError;
pub use service::{LedgerService, PreparedEntry};
pub use types::{
    BusinessEvent, Dimensions, EventKind, LinkedAccounts, PostingRequest, ProjectBalance,
};
pub use validation::{check_balance, validate_entry, BalanceCheck, ValidationError, BALANCE_TOLERANCE};
