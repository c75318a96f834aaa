//! Business events and posting requests.
//!
//! A [`BusinessEvent`] is what happened (a client paid, material left the
//! yard); a [`PostingRequest`] wraps it with the source-document details the
//! store records alongside the journal entry.

use std::collections::HashMap;

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::error::LedgerError;

/// Longest accepted source-document number.
pub const MAX_DOCUMENT_NUMBER_LEN: usize = 50;

/// Decimal places an amount may carry; the store keeps `NUMERIC(20, 4)`.
pub const AMOUNT_SCALE: u32 = 4;

/// Integer digits an amount may carry.
pub const AMOUNT_INTEGER_DIGITS: u32 = 16;

/// A business event that produces exactly one journal entry.
///
/// Cashboxes and partners are referenced by record id; their ledger accounts
/// are looked up through [`LinkedAccounts`] when the entry is built.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum BusinessEvent {
    /// Revenue recognised on a caller-chosen revenue account. Without a
    /// client it is a cash sale.
    Revenue {
        /// Amount (positive).
        amount: Decimal,
        /// Revenue account credited.
        account_id: String,
        /// Client billed, if any.
        client_id: Option<String>,
        /// Project tag.
        project_id: Option<String>,
    },
    /// Expense recorded on a caller-chosen expense account. Without a
    /// supplier it is paid in cash.
    Expense {
        /// Amount (positive).
        amount: Decimal,
        /// Expense account debited.
        account_id: String,
        /// Supplier billing the expense, if any.
        supplier_id: Option<String>,
        /// Project tag.
        project_id: Option<String>,
    },
    /// Invoice issued to a client.
    ClientInvoice {
        /// Amount (positive).
        amount: Decimal,
        /// Client invoiced.
        client_id: String,
        /// Project tag.
        project_id: Option<String>,
    },
    /// Invoice received from a supplier.
    SupplierInvoice {
        /// Amount (positive).
        amount: Decimal,
        /// Supplier invoicing.
        supplier_id: String,
        /// Project tag.
        project_id: Option<String>,
    },
    /// Payment received from a client into a cashbox.
    ClientPayment {
        /// Amount (positive).
        amount: Decimal,
        /// Receiving cashbox.
        cashbox_id: String,
        /// Paying client.
        client_id: String,
        /// Project tag.
        project_id: Option<String>,
    },
    /// Payment made to a supplier from a cashbox.
    SupplierPayment {
        /// Amount (positive).
        amount: Decimal,
        /// Paying cashbox.
        cashbox_id: String,
        /// Supplier paid.
        supplier_id: String,
        /// Project tag.
        project_id: Option<String>,
    },
    /// Money moved between two cashboxes.
    CashboxTransfer {
        /// Amount (positive).
        amount: Decimal,
        /// Cashbox the money leaves.
        from_cashbox_id: String,
        /// Cashbox the money enters.
        to_cashbox_id: String,
    },
    /// Material issued from inventory to a project.
    MaterialConsumption {
        /// Amount (positive).
        amount: Decimal,
        /// Consuming project.
        project_id: String,
    },
    /// Wages earned but not yet paid.
    PayrollAccrual {
        /// Amount (positive).
        amount: Decimal,
        /// Project tag.
        project_id: Option<String>,
    },
    /// Accrued wages paid out of a cashbox.
    PayrollPayment {
        /// Amount (positive).
        amount: Decimal,
        /// Paying cashbox.
        cashbox_id: String,
        /// Project tag.
        project_id: Option<String>,
    },
    /// Settlement between two partners' wallet accounts.
    PartnerSettlement {
        /// Amount (positive).
        amount: Decimal,
        /// Partner paying.
        from_partner_id: String,
        /// Partner receiving.
        to_partner_id: String,
    },
}

/// Kind of a business event, stored on the source document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EventKind {
    /// See [`BusinessEvent::Revenue`].
    Revenue,
    /// See [`BusinessEvent::Expense`].
    Expense,
    /// See [`BusinessEvent::ClientInvoice`].
    ClientInvoice,
    /// See [`BusinessEvent::SupplierInvoice`].
    SupplierInvoice,
    /// See [`BusinessEvent::ClientPayment`].
    ClientPayment,
    /// See [`BusinessEvent::SupplierPayment`].
    SupplierPayment,
    /// See [`BusinessEvent::CashboxTransfer`].
    CashboxTransfer,
    /// See [`BusinessEvent::MaterialConsumption`].
    MaterialConsumption,
    /// See [`BusinessEvent::PayrollAccrual`].
    PayrollAccrual,
    /// See [`BusinessEvent::PayrollPayment`].
    PayrollPayment,
    /// See [`BusinessEvent::PartnerSettlement`].
    PartnerSettlement,
}

impl EventKind {
    /// Returns the snake_case name used in storage and audit logs.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Revenue => "revenue",
            Self::Expense => "expense",
            Self::ClientInvoice => "client_invoice",
            Self::SupplierInvoice => "supplier_invoice",
            Self::ClientPayment => "client_payment",
            Self::SupplierPayment => "supplier_payment",
            Self::CashboxTransfer => "cashbox_transfer",
            Self::MaterialConsumption => "material_consumption",
            Self::PayrollAccrual => "payroll_accrual",
            Self::PayrollPayment => "payroll_payment",
            Self::PartnerSettlement => "partner_settlement",
        }
    }
}

impl std::fmt::Display for EventKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Dimension tags carried by an event.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Dimensions<'a> {
    /// Project tag.
    pub project_id: Option<&'a str>,
    /// Client tag.
    pub client_id: Option<&'a str>,
    /// Supplier tag.
    pub supplier_id: Option<&'a str>,
}

impl BusinessEvent {
    /// Returns the event kind.
    #[must_use]
    pub const fn kind(&self) -> EventKind {
        match self {
            Self::Revenue { .. } => EventKind::Revenue,
            Self::Expense { .. } => EventKind::Expense,
            Self::ClientInvoice { .. } => EventKind::ClientInvoice,
            Self::SupplierInvoice { .. } => EventKind::SupplierInvoice,
            Self::ClientPayment { .. } => EventKind::ClientPayment,
            Self::SupplierPayment { .. } => EventKind::SupplierPayment,
            Self::CashboxTransfer { .. } => EventKind::CashboxTransfer,
            Self::MaterialConsumption { .. } => EventKind::MaterialConsumption,
            Self::PayrollAccrual { .. } => EventKind::PayrollAccrual,
            Self::PayrollPayment { .. } => EventKind::PayrollPayment,
            Self::PartnerSettlement { .. } => EventKind::PartnerSettlement,
        }
    }

    /// Returns the event amount.
    #[must_use]
    pub const fn amount(&self) -> Decimal {
        match self {
            Self::Revenue { amount, .. }
            | Self::Expense { amount, .. }
            | Self::ClientInvoice { amount, .. }
            | Self::SupplierInvoice { amount, .. }
            | Self::ClientPayment { amount, .. }
            | Self::SupplierPayment { amount, .. }
            | Self::CashboxTransfer { amount, .. }
            | Self::MaterialConsumption { amount, .. }
            | Self::PayrollAccrual { amount, .. }
            | Self::PayrollPayment { amount, .. }
            | Self::PartnerSettlement { amount, .. } => *amount,
        }
    }

    /// Returns the project, client and supplier tags of the event.
    #[must_use]
    pub fn dimensions(&self) -> Dimensions<'_> {
        match self {
            Self::Revenue {
                client_id,
                project_id,
                ..
            } => Dimensions {
                project_id: project_id.as_deref(),
                client_id: client_id.as_deref(),
                supplier_id: None,
            },
            Self::Expense {
                supplier_id,
                project_id,
                ..
            } => Dimensions {
                project_id: project_id.as_deref(),
                client_id: None,
                supplier_id: supplier_id.as_deref(),
            },
            Self::ClientInvoice {
                client_id,
                project_id,
                ..
            }
            | Self::ClientPayment {
                client_id,
                project_id,
                ..
            } => Dimensions {
                project_id: project_id.as_deref(),
                client_id: Some(client_id),
                supplier_id: None,
            },
            Self::SupplierInvoice {
                supplier_id,
                project_id,
                ..
            }
            | Self::SupplierPayment {
                supplier_id,
                project_id,
                ..
            } => Dimensions {
                project_id: project_id.as_deref(),
                client_id: None,
                supplier_id: Some(supplier_id),
            },
            Self::MaterialConsumption { project_id, .. } => Dimensions {
                project_id: Some(project_id),
                ..Dimensions::default()
            },
            Self::PayrollAccrual { project_id, .. } | Self::PayrollPayment { project_id, .. } => {
                Dimensions {
                    project_id: project_id.as_deref(),
                    ..Dimensions::default()
                }
            }
            Self::CashboxTransfer { .. } | Self::PartnerSettlement { .. } => Dimensions::default(),
        }
    }

    /// Returns the cashbox ids whose accounts the entry posts to.
    #[must_use]
    pub fn cashbox_ids(&self) -> Vec<&str> {
        match self {
            Self::ClientPayment { cashbox_id, .. }
            | Self::SupplierPayment { cashbox_id, .. }
            | Self::PayrollPayment { cashbox_id, .. } => vec![cashbox_id.as_str()],
            Self::CashboxTransfer {
                from_cashbox_id,
                to_cashbox_id,
                ..
            } => vec![from_cashbox_id.as_str(), to_cashbox_id.as_str()],
            _ => Vec::new(),
        }
    }

    /// Returns the partner ids whose wallet accounts the entry posts to.
    #[must_use]
    pub fn partner_ids(&self) -> Vec<&str> {
        match self {
            Self::PartnerSettlement {
                from_partner_id,
                to_partner_id,
                ..
            } => vec![from_partner_id.as_str(), to_partner_id.as_str()],
            _ => Vec::new(),
        }
    }
}

/// Ledger accounts linked to cashboxes and partners, loaded by the caller
/// before an entry is built.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LinkedAccounts {
    cashboxes: HashMap<String, String>,
    partners: HashMap<String, String>,
}

impl LinkedAccounts {
    /// Creates an empty table.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Records the account a cashbox is linked to.
    #[must_use]
    pub fn with_cashbox(mut self, cashbox_id: impl Into<String>, account_id: impl Into<String>) -> Self {
        self.cashboxes.insert(cashbox_id.into(), account_id.into());
        self
    }

    /// Records a partner's wallet account.
    #[must_use]
    pub fn with_partner(mut self, partner_id: impl Into<String>, account_id: impl Into<String>) -> Self {
        self.partners.insert(partner_id.into(), account_id.into());
        self
    }

    /// Returns the account linked to a cashbox.
    ///
    /// # Errors
    ///
    /// Returns `LedgerError::NotFound` if the cashbox was not loaded.
    pub fn cashbox_account(&self, cashbox_id: &str) -> Result<&str, LedgerError> {
        self.cashboxes
            .get(cashbox_id)
            .map(String::as_str)
            .ok_or_else(|| LedgerError::not_found("cashbox", cashbox_id))
    }

    /// Returns a partner's wallet account.
    ///
    /// # Errors
    ///
    /// Returns `LedgerError::NotFound` if the partner was not loaded.
    pub fn partner_account(&self, partner_id: &str) -> Result<&str, LedgerError> {
        self.partners
            .get(partner_id)
            .map(String::as_str)
            .ok_or_else(|| LedgerError::not_found("partner", partner_id))
    }
}

/// A business event with its source-document details.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PostingRequest {
    /// Accounting date of the entry.
    pub date: NaiveDate,
    /// Human-readable description.
    pub description: String,
    /// Unique source-document number (invoice no., receipt no., ...).
    pub document_number: String,
    /// The event to post.
    pub event: BusinessEvent,
}

impl PostingRequest {
    /// Checks the request shape before any lookup or write.
    ///
    /// # Errors
    ///
    /// Returns `LedgerError::InvalidAmount` for a non-positive amount and
    /// `LedgerError::InvalidEvent` for an amount the store cannot hold
    /// exactly, a blank or overlong document number, or a blank description.
    pub fn validate(&self) -> Result<(), LedgerError> {
        let amount = self.event.amount();
        if amount <= Decimal::ZERO {
            return Err(LedgerError::InvalidAmount(amount));
        }
        if amount.normalize().scale() > AMOUNT_SCALE {
            return Err(LedgerError::InvalidEvent(format!(
                "amount {amount} has more than {AMOUNT_SCALE} decimal places"
            )));
        }
        if amount >= Decimal::new(10_i64.pow(AMOUNT_INTEGER_DIGITS), 0) {
            return Err(LedgerError::InvalidEvent(format!(
                "amount {amount} has more than {AMOUNT_INTEGER_DIGITS} integer digits"
            )));
        }
        let number = self.document_number.trim();
        if number.is_empty() {
            return Err(LedgerError::InvalidEvent(
                "document number is required".to_string(),
            ));
        }
        if number.len() > MAX_DOCUMENT_NUMBER_LEN {
            return Err(LedgerError::InvalidEvent(format!(
                "document number is longer than {MAX_DOCUMENT_NUMBER_LEN} characters"
            )));
        }
        if self.description.trim().is_empty() {
            return Err(LedgerError::InvalidEvent(
                "description is required".to_string(),
            ));
        }
        Ok(())
    }
}

/// Revenue, expense and profit of one project.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ProjectBalance {
    /// Sum of credits on project-tagged revenue lines.
    pub revenue: Decimal,
    /// Sum of debits on project-tagged expense lines.
    pub expense: Decimal,
    /// `revenue - expense`.
    pub profit: Decimal,
}

impl ProjectBalance {
    /// Creates a balance and derives the profit.
    #[must_use]
    pub fn new(revenue: Decimal, expense: Decimal) -> Self {
        Self {
            revenue,
            expense,
            profit: revenue - expense,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use rust_decimal_macros::dec;

    fn request(event: BusinessEvent) -> PostingRequest {
        PostingRequest {
            date: NaiveDate::from_ymd_opt(2026, 3, 2).unwrap(),
            description: "Progress billing #4".to_string(),
            document_number: "INV-0004".to_string(),
            event,
        }
    }

    #[test]
    fn test_event_deserializes_from_tagged_json() {
        let event: BusinessEvent = serde_json::from_str(
            r#"{"type":"supplier_payment","amount":"28750","cashbox_id":"BANK","supplier_id":"S1","project_id":"P1"}"#,
        )
        .unwrap();
        assert_eq!(event.kind(), EventKind::SupplierPayment);
        assert_eq!(event.amount(), dec!(28750));
        assert_eq!(event.cashbox_ids(), vec!["BANK"]);

        let event: BusinessEvent =
            serde_json::from_str(r#"{"type":"revenue","amount":"10","account_id":"4000"}"#)
                .unwrap();
        assert_eq!(event.dimensions(), Dimensions::default());
    }

    #[test]
    fn test_dimensions() {
        let event = BusinessEvent::ClientPayment {
            amount: dec!(5),
            cashbox_id: "CASH".into(),
            client_id: "C1".into(),
            project_id: Some("P1".into()),
        };
        let dims = event.dimensions();
        assert_eq!(dims.client_id, Some("C1"));
        assert_eq!(dims.project_id, Some("P1"));
        assert_eq!(dims.supplier_id, None);
    }

    #[test]
    fn test_linked_ids() {
        let transfer = BusinessEvent::CashboxTransfer {
            amount: dec!(5),
            from_cashbox_id: "CASH".into(),
            to_cashbox_id: "BANK".into(),
        };
        assert_eq!(transfer.cashbox_ids(), vec!["CASH", "BANK"]);
        assert!(transfer.partner_ids().is_empty());

        let settlement = BusinessEvent::PartnerSettlement {
            amount: dec!(5),
            from_partner_id: "A".into(),
            to_partner_id: "B".into(),
        };
        assert_eq!(settlement.partner_ids(), vec!["A", "B"]);
    }

    #[test]
    fn test_linked_accounts_lookup() {
        let linked = LinkedAccounts::new()
            .with_cashbox("CASH", "1000")
            .with_partner("A", "3100");
        assert_eq!(linked.cashbox_account("CASH").unwrap(), "1000");
        assert_eq!(linked.partner_account("A").unwrap(), "3100");
        assert!(matches!(
            linked.cashbox_account("NOPE"),
            Err(LedgerError::NotFound { entity: "cashbox", .. })
        ));
    }

    #[test]
    fn test_request_validation() {
        let ok = request(BusinessEvent::PayrollAccrual {
            amount: dec!(1200),
            project_id: None,
        });
        assert!(ok.validate().is_ok());

        let zero = request(BusinessEvent::PayrollAccrual {
            amount: Decimal::ZERO,
            project_id: None,
        });
        assert!(matches!(zero.validate(), Err(LedgerError::InvalidAmount(_))));

        let mut blank = ok.clone();
        blank.document_number = "  ".into();
        assert!(matches!(blank.validate(), Err(LedgerError::InvalidEvent(_))));

        let mut long = ok.clone();
        long.document_number = "X".repeat(MAX_DOCUMENT_NUMBER_LEN + 1);
        assert!(matches!(long.validate(), Err(LedgerError::InvalidEvent(_))));

        let mut no_description = ok;
        no_description.description = String::new();
        assert!(matches!(
            no_description.validate(),
            Err(LedgerError::InvalidEvent(_))
        ));
    }

    #[rstest]
    #[case(dec!(0.00004))]
    #[case(dec!(100.00005))]
    #[case(dec!(10000000000000000))]
    fn test_amount_outside_store_precision_is_rejected(#[case] amount: Decimal) {
        let req = request(BusinessEvent::PayrollAccrual {
            amount,
            project_id: None,
        });
        assert!(matches!(req.validate(), Err(LedgerError::InvalidEvent(_))));
    }

    #[rstest]
    #[case(dec!(0.0001))]
    #[case(dec!(100.50000))]
    #[case(dec!(9999999999999999.9999))]
    fn test_amount_within_store_precision_is_accepted(#[case] amount: Decimal) {
        let req = request(BusinessEvent::PayrollAccrual {
            amount,
            project_id: None,
        });
        assert!(req.validate().is_ok());
    }
}
