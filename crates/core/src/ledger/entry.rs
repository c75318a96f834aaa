//! Journal line specifications.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Side of a journal line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EntrySide {
    /// Debit line (increases assets/expenses, decreases liabilities/equity/revenue).
    Debit,
    /// Credit line (decreases assets/expenses, increases liabilities/equity/revenue).
    Credit,
}

/// One debit-or-credit leg of a journal entry, not yet persisted.
///
/// The entry id and line id are assigned by the store. The project, client and
/// supplier tags are weak references used only to filter aggregates.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct JournalLineSpec {
    /// The account posted to.
    pub account_id: String,
    /// Debit amount (zero on credit lines).
    pub debit: Decimal,
    /// Credit amount (zero on debit lines).
    pub credit: Decimal,
    /// Project tag.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub project_id: Option<String>,
    /// Client tag.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub client_id: Option<String>,
    /// Supplier tag.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub supplier_id: Option<String>,
}

impl JournalLineSpec {
    /// Creates an untagged debit line.
    #[must_use]
    pub fn debit(account_id: impl Into<String>, amount: Decimal) -> Self {
        Self {
            account_id: account_id.into(),
            debit: amount,
            credit: Decimal::ZERO,
            project_id: None,
            client_id: None,
            supplier_id: None,
        }
    }

    /// Creates an untagged credit line.
    #[must_use]
    pub fn credit(account_id: impl Into<String>, amount: Decimal) -> Self {
        Self {
            account_id: account_id.into(),
            debit: Decimal::ZERO,
            credit: amount,
            project_id: None,
            client_id: None,
            supplier_id: None,
        }
    }

    /// Tags the line with a project.
    #[must_use]
    pub fn with_project(mut self, project_id: Option<&str>) -> Self {
        self.project_id = project_id.map(str::to_string);
        self
    }

    /// Tags the line with a client.
    #[must_use]
    pub fn with_client(mut self, client_id: Option<&str>) -> Self {
        self.client_id = client_id.map(str::to_string);
        self
    }

    /// Tags the line with a supplier.
    #[must_use]
    pub fn with_supplier(mut self, supplier_id: Option<&str>) -> Self {
        self.supplier_id = supplier_id.map(str::to_string);
        self
    }

    /// Returns the line's side, or `None` while neither side is populated or
    /// when both are.
    #[must_use]
    pub fn side(&self) -> Option<EntrySide> {
        match (self.debit.is_zero(), self.credit.is_zero()) {
            (false, true) => Some(EntrySide::Debit),
            (true, false) => Some(EntrySide::Credit),
            _ => None,
        }
    }

    /// Returns true if the line carries both a debit and a credit.
    #[must_use]
    pub fn is_mixed(&self) -> bool {
        self.debit > Decimal::ZERO && self.credit > Decimal::ZERO
    }
}
