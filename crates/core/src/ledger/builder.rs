//! Entry builders.
//!
//! Each builder turns one business event into the ordered lines of a single
//! journal entry. Builders are pure: they never touch the store, and the
//! amount they receive is carried onto the lines unmodified, so every output
//! balances exactly.
//!
//! Tagging rules:
//! - the project tag rides on every line of an event that has one
//! - the client tag rides only on the receivables leg
//! - the supplier tag rides only on the payables leg

use rust_decimal::Decimal;

use super::accounts::{AccountMap, SystemAccount};
use super::entry::JournalLineSpec;
use super::error::LedgerError;
use super::types::{BusinessEvent, LinkedAccounts};

/// Builds journal lines for business events.
#[derive(Debug, Clone, Default)]
pub struct EntryBuilder {
    accounts: AccountMap,
}

impl EntryBuilder {
    /// Creates a builder posting to the given system accounts.
    #[must_use]
    pub fn new(accounts: AccountMap) -> Self {
        Self { accounts }
    }

    fn account(&self, account: SystemAccount) -> &str {
        self.accounts.get(account)
    }

    /// Builds the lines for any business event.
    ///
    /// Cashbox and partner references are resolved through `linked`.
    ///
    /// # Errors
    ///
    /// Returns `LedgerError::NotFound` for a cashbox or partner missing from
    /// `linked`, plus any error of the specific builder.
    pub fn build(
        &self,
        event: &BusinessEvent,
        linked: &LinkedAccounts,
    ) -> Result<Vec<JournalLineSpec>, LedgerError> {
        match event {
            BusinessEvent::Revenue {
                amount,
                account_id,
                client_id,
                project_id,
            } => self.build_revenue_entry(
                *amount,
                account_id,
                client_id.as_deref(),
                project_id.as_deref(),
            ),
            BusinessEvent::Expense {
                amount,
                account_id,
                supplier_id,
                project_id,
            } => self.build_expense_entry(
                *amount,
                account_id,
                supplier_id.as_deref(),
                project_id.as_deref(),
            ),
            BusinessEvent::ClientInvoice {
                amount,
                client_id,
                project_id,
            } => self.build_client_invoice_entry(*amount, client_id, project_id.as_deref()),
            BusinessEvent::SupplierInvoice {
                amount,
                supplier_id,
                project_id,
            } => self.build_supplier_invoice_entry(*amount, supplier_id, project_id.as_deref()),
            BusinessEvent::ClientPayment {
                amount,
                cashbox_id,
                client_id,
                project_id,
            } => self.build_client_payment_entry(
                *amount,
                linked.cashbox_account(cashbox_id)?,
                client_id,
                project_id.as_deref(),
            ),
            BusinessEvent::SupplierPayment {
                amount,
                cashbox_id,
                supplier_id,
                project_id,
            } => self.build_supplier_payment_entry(
                *amount,
                linked.cashbox_account(cashbox_id)?,
                supplier_id,
                project_id.as_deref(),
            ),
            BusinessEvent::CashboxTransfer {
                amount,
                from_cashbox_id,
                to_cashbox_id,
            } => self.build_cashbox_transfer_entry(
                *amount,
                linked.cashbox_account(from_cashbox_id)?,
                linked.cashbox_account(to_cashbox_id)?,
            ),
            BusinessEvent::MaterialConsumption { amount, project_id } => {
                self.build_material_consumption_entry(*amount, project_id)
            }
            BusinessEvent::PayrollAccrual { amount, project_id } => {
                self.build_payroll_accrual_entry(*amount, project_id.as_deref())
            }
            BusinessEvent::PayrollPayment {
                amount,
                cashbox_id,
                project_id,
            } => self.build_payroll_payment_entry(
                *amount,
                linked.cashbox_account(cashbox_id)?,
                project_id.as_deref(),
            ),
            BusinessEvent::PartnerSettlement {
                amount,
                from_partner_id,
                to_partner_id,
            } => self.build_partner_settlement_entry(
                *amount,
                linked.partner_account(from_partner_id)?,
                linked.partner_account(to_partner_id)?,
            ),
        }
    }

    /// Revenue on `account_id`. Debits receivables for a billed client,
    /// otherwise cash.
    ///
    /// # Errors
    ///
    /// Returns `LedgerError::InvalidAmount` if `amount <= 0`.
    pub fn build_revenue_entry(
        &self,
        amount: Decimal,
        account_id: &str,
        client_id: Option<&str>,
        project_id: Option<&str>,
    ) -> Result<Vec<JournalLineSpec>, LedgerError> {
        ensure_positive(amount)?;

        let debit = match client_id {
            Some(client) => JournalLineSpec::debit(self.account(SystemAccount::Receivables), amount)
                .with_client(Some(client)),
            None => JournalLineSpec::debit(self.account(SystemAccount::Cash), amount),
        };

        Ok(vec![
            debit.with_project(project_id),
            JournalLineSpec::credit(account_id, amount).with_project(project_id),
        ])
    }

    /// Expense on `account_id`. Credits payables for a billing supplier,
    /// otherwise cash.
    ///
    /// # Errors
    ///
    /// Returns `LedgerError::InvalidAmount` if `amount <= 0`.
    pub fn build_expense_entry(
        &self,
        amount: Decimal,
        account_id: &str,
        supplier_id: Option<&str>,
        project_id: Option<&str>,
    ) -> Result<Vec<JournalLineSpec>, LedgerError> {
        ensure_positive(amount)?;

        let credit = match supplier_id {
            Some(supplier) => JournalLineSpec::credit(self.account(SystemAccount::Payables), amount)
                .with_supplier(Some(supplier)),
            None => JournalLineSpec::credit(self.account(SystemAccount::Cash), amount),
        };

        Ok(vec![
            JournalLineSpec::debit(account_id, amount).with_project(project_id),
            credit.with_project(project_id),
        ])
    }

    /// Invoice issued to a client: receivables against sales revenue.
    ///
    /// # Errors
    ///
    /// Returns `LedgerError::InvalidAmount` if `amount <= 0`.
    pub fn build_client_invoice_entry(
        &self,
        amount: Decimal,
        client_id: &str,
        project_id: Option<&str>,
    ) -> Result<Vec<JournalLineSpec>, LedgerError> {
        ensure_positive(amount)?;

        Ok(vec![
            JournalLineSpec::debit(self.account(SystemAccount::Receivables), amount)
                .with_client(Some(client_id))
                .with_project(project_id),
            JournalLineSpec::credit(self.account(SystemAccount::SalesRevenue), amount)
                .with_project(project_id),
        ])
    }

    /// Invoice received from a supplier: project cost against payables.
    ///
    /// # Errors
    ///
    /// Returns `LedgerError::InvalidAmount` if `amount <= 0`.
    pub fn build_supplier_invoice_entry(
        &self,
        amount: Decimal,
        supplier_id: &str,
        project_id: Option<&str>,
    ) -> Result<Vec<JournalLineSpec>, LedgerError> {
        ensure_positive(amount)?;

        Ok(vec![
            JournalLineSpec::debit(self.account(SystemAccount::ProjectCost), amount)
                .with_project(project_id),
            JournalLineSpec::credit(self.account(SystemAccount::Payables), amount)
                .with_supplier(Some(supplier_id))
                .with_project(project_id),
        ])
    }

    /// Client payment into the cashbox account `cashbox_account_id`.
    ///
    /// # Errors
    ///
    /// Returns `LedgerError::InvalidAmount` if `amount <= 0`.
    pub fn build_client_payment_entry(
        &self,
        amount: Decimal,
        cashbox_account_id: &str,
        client_id: &str,
        project_id: Option<&str>,
    ) -> Result<Vec<JournalLineSpec>, LedgerError> {
        ensure_positive(amount)?;

        Ok(vec![
            JournalLineSpec::debit(cashbox_account_id, amount).with_project(project_id),
            JournalLineSpec::credit(self.account(SystemAccount::Receivables), amount)
                .with_client(Some(client_id))
                .with_project(project_id),
        ])
    }

    /// Supplier payment out of the cashbox account `cashbox_account_id`.
    ///
    /// # Errors
    ///
    /// Returns `LedgerError::InvalidAmount` if `amount <= 0`.
    pub fn build_supplier_payment_entry(
        &self,
        amount: Decimal,
        cashbox_account_id: &str,
        supplier_id: &str,
        project_id: Option<&str>,
    ) -> Result<Vec<JournalLineSpec>, LedgerError> {
        ensure_positive(amount)?;

        Ok(vec![
            JournalLineSpec::debit(self.account(SystemAccount::Payables), amount)
                .with_supplier(Some(supplier_id))
                .with_project(project_id),
            JournalLineSpec::credit(cashbox_account_id, amount).with_project(project_id),
        ])
    }

    /// Transfer between two cashbox accounts.
    ///
    /// # Errors
    ///
    /// Returns `LedgerError::InvalidAmount` if `amount <= 0` and
    /// `LedgerError::InvalidEvent` if both accounts are the same.
    pub fn build_cashbox_transfer_entry(
        &self,
        amount: Decimal,
        from_account_id: &str,
        to_account_id: &str,
    ) -> Result<Vec<JournalLineSpec>, LedgerError> {
        ensure_positive(amount)?;
        if from_account_id == to_account_id {
            return Err(LedgerError::InvalidEvent(format!(
                "cashbox transfer from and to the same account {from_account_id}"
            )));
        }

        Ok(vec![
            JournalLineSpec::debit(to_account_id, amount),
            JournalLineSpec::credit(from_account_id, amount),
        ])
    }

    /// Material issued from inventory to a project.
    ///
    /// # Errors
    ///
    /// Returns `LedgerError::InvalidAmount` if `amount <= 0`.
    pub fn build_material_consumption_entry(
        &self,
        amount: Decimal,
        project_id: &str,
    ) -> Result<Vec<JournalLineSpec>, LedgerError> {
        ensure_positive(amount)?;

        Ok(vec![
            JournalLineSpec::debit(self.account(SystemAccount::ProjectCost), amount)
                .with_project(Some(project_id)),
            JournalLineSpec::credit(self.account(SystemAccount::MaterialInventory), amount)
                .with_project(Some(project_id)),
        ])
    }

    /// Wages earned and not yet paid.
    ///
    /// # Errors
    ///
    /// Returns `LedgerError::InvalidAmount` if `amount <= 0`.
    pub fn build_payroll_accrual_entry(
        &self,
        amount: Decimal,
        project_id: Option<&str>,
    ) -> Result<Vec<JournalLineSpec>, LedgerError> {
        ensure_positive(amount)?;

        Ok(vec![
            JournalLineSpec::debit(self.account(SystemAccount::ProjectCost), amount)
                .with_project(project_id),
            JournalLineSpec::credit(self.account(SystemAccount::AccruedWages), amount)
                .with_project(project_id),
        ])
    }

    /// Accrued wages paid out of `cashbox_account_id`.
    ///
    /// # Errors
    ///
    /// Returns `LedgerError::InvalidAmount` if `amount <= 0`.
    pub fn build_payroll_payment_entry(
        &self,
        amount: Decimal,
        cashbox_account_id: &str,
        project_id: Option<&str>,
    ) -> Result<Vec<JournalLineSpec>, LedgerError> {
        ensure_positive(amount)?;

        Ok(vec![
            JournalLineSpec::debit(self.account(SystemAccount::AccruedWages), amount)
                .with_project(project_id),
            JournalLineSpec::credit(cashbox_account_id, amount).with_project(project_id),
        ])
    }

    /// Settlement from the payer's wallet to the receiver's wallet.
    ///
    /// # Errors
    ///
    /// Returns `LedgerError::InvalidAmount` if `amount <= 0` and
    /// `LedgerError::InvalidEvent` if both wallets are the same account.
    pub fn build_partner_settlement_entry(
        &self,
        amount: Decimal,
        payer_account_id: &str,
        receiver_account_id: &str,
    ) -> Result<Vec<JournalLineSpec>, LedgerError> {
        ensure_positive(amount)?;
        if payer_account_id == receiver_account_id {
            return Err(LedgerError::InvalidEvent(format!(
                "partner settlement from and to the same wallet {payer_account_id}"
            )));
        }

        Ok(vec![
            JournalLineSpec::debit(receiver_account_id, amount),
            JournalLineSpec::credit(payer_account_id, amount),
        ])
    }
}

fn ensure_positive(amount: Decimal) -> Result<(), LedgerError> {
    if amount <= Decimal::ZERO {
        return Err(LedgerError::InvalidAmount(amount));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ledger::validation::validate_entry;
    use rstest::rstest;
    use rust_decimal_macros::dec;

    fn builder() -> EntryBuilder {
        EntryBuilder::default()
    }

    fn tagged(
        line: JournalLineSpec,
        project: Option<&str>,
        client: Option<&str>,
        supplier: Option<&str>,
    ) -> JournalLineSpec {
        line.with_project(project)
            .with_client(client)
            .with_supplier(supplier)
    }

    #[test]
    fn test_revenue_with_client() {
        let lines = builder()
            .build_revenue_entry(dec!(500000), "4000", Some("C1"), Some("P1"))
            .unwrap();

        assert_eq!(
            lines,
            vec![
                tagged(
                    JournalLineSpec::debit("1100", dec!(500000)),
                    Some("P1"),
                    Some("C1"),
                    None
                ),
                tagged(
                    JournalLineSpec::credit("4000", dec!(500000)),
                    Some("P1"),
                    None,
                    None
                ),
            ]
        );
    }

    #[test]
    fn test_cash_revenue_routes_to_cash() {
        let lines = builder()
            .build_revenue_entry(dec!(500000), "4000", None, Some("P1"))
            .unwrap();

        assert_eq!(lines[0].account_id, "1000");
        assert_eq!(lines[0].client_id, None);
        assert_eq!(lines[0].debit, dec!(500000));
        assert_eq!(lines[1].account_id, "4000");
        assert_eq!(lines[1].credit, dec!(500000));
    }

    #[test]
    fn test_supplier_payment() {
        let lines = builder()
            .build_supplier_payment_entry(dec!(28750), "BANK01", "S1", Some("P1"))
            .unwrap();

        assert_eq!(
            lines,
            vec![
                tagged(
                    JournalLineSpec::debit("2000", dec!(28750)),
                    Some("P1"),
                    None,
                    Some("S1")
                ),
                tagged(
                    JournalLineSpec::credit("BANK01", dec!(28750)),
                    Some("P1"),
                    None,
                    None
                ),
            ]
        );
    }

    #[test]
    fn test_expense_with_and_without_supplier() {
        let billed = builder()
            .build_expense_entry(dec!(900), "5200", Some("S1"), None)
            .unwrap();
        assert_eq!(billed[0].account_id, "5200");
        assert_eq!(billed[0].supplier_id, None);
        assert_eq!(billed[1].account_id, "2000");
        assert_eq!(billed[1].supplier_id.as_deref(), Some("S1"));

        let cash = builder()
            .build_expense_entry(dec!(900), "5200", None, None)
            .unwrap();
        assert_eq!(cash[1].account_id, "1000");
        assert_eq!(cash[1].supplier_id, None);
    }

    #[test]
    fn test_fixed_account_events() {
        let b = builder();

        let invoice = b.build_client_invoice_entry(dec!(10), "C1", None).unwrap();
        assert_eq!(invoice[0].account_id, "1100");
        assert_eq!(invoice[0].client_id.as_deref(), Some("C1"));
        assert_eq!(invoice[1].account_id, "4000");
        assert_eq!(invoice[1].client_id, None);

        let bill = b.build_supplier_invoice_entry(dec!(10), "S1", Some("P1")).unwrap();
        assert_eq!((bill[0].account_id.as_str(), bill[1].account_id.as_str()), ("5100", "2000"));
        assert_eq!(bill[1].supplier_id.as_deref(), Some("S1"));

        let receipt = b.build_client_payment_entry(dec!(10), "BANK01", "C1", None).unwrap();
        assert_eq!(receipt[0].account_id, "BANK01");
        assert_eq!(receipt[1].account_id, "1100");
        assert_eq!(receipt[1].client_id.as_deref(), Some("C1"));

        let material = b.build_material_consumption_entry(dec!(10), "P1").unwrap();
        assert_eq!((material[0].account_id.as_str(), material[1].account_id.as_str()), ("5100", "1200"));
        assert!(material.iter().all(|l| l.project_id.as_deref() == Some("P1")));

        let accrual = b.build_payroll_accrual_entry(dec!(10), None).unwrap();
        assert_eq!((accrual[0].account_id.as_str(), accrual[1].account_id.as_str()), ("5100", "2100"));

        let payout = b.build_payroll_payment_entry(dec!(10), "1000", None).unwrap();
        assert_eq!((payout[0].account_id.as_str(), payout[1].account_id.as_str()), ("2100", "1000"));
    }

    #[test]
    fn test_transfer_and_settlement_direction() {
        let b = builder();

        let transfer = b.build_cashbox_transfer_entry(dec!(75), "1000", "1010").unwrap();
        assert_eq!(transfer[0], JournalLineSpec::debit("1010", dec!(75)));
        assert_eq!(transfer[1], JournalLineSpec::credit("1000", dec!(75)));

        let settlement = b.build_partner_settlement_entry(dec!(75), "3100", "3110").unwrap();
        assert_eq!(settlement[0], JournalLineSpec::debit("3110", dec!(75)));
        assert_eq!(settlement[1], JournalLineSpec::credit("3100", dec!(75)));
    }

    #[test]
    fn test_same_account_rejected() {
        let b = builder();
        assert!(matches!(
            b.build_cashbox_transfer_entry(dec!(1), "1000", "1000"),
            Err(LedgerError::InvalidEvent(_))
        ));
        assert!(matches!(
            b.build_partner_settlement_entry(dec!(1), "3100", "3100"),
            Err(LedgerError::InvalidEvent(_))
        ));
    }

    #[rstest]
    #[case(dec!(0))]
    #[case(dec!(-0.01))]
    #[case(dec!(-500))]
    fn test_non_positive_amount_rejected(#[case] amount: Decimal) {
        let result = builder().build_revenue_entry(amount, "4000", None, None);
        assert!(matches!(result, Err(LedgerError::InvalidAmount(a)) if a == amount));

        let result = builder().build_payroll_accrual_entry(amount, None);
        assert!(matches!(result, Err(LedgerError::InvalidAmount(_))));
    }

    #[test]
    fn test_build_dispatch_resolves_linked_accounts() {
        let linked = LinkedAccounts::new()
            .with_cashbox("BOX-BANK", "1010")
            .with_partner("ALI", "3100")
            .with_partner("BEN", "3110");
        let b = builder();

        let payment = BusinessEvent::SupplierPayment {
            amount: dec!(28750),
            cashbox_id: "BOX-BANK".into(),
            supplier_id: "S1".into(),
            project_id: Some("P1".into()),
        };
        let lines = b.build(&payment, &linked).unwrap();
        assert_eq!(lines[1].account_id, "1010");

        let settlement = BusinessEvent::PartnerSettlement {
            amount: dec!(40),
            from_partner_id: "ALI".into(),
            to_partner_id: "BEN".into(),
        };
        let lines = b.build(&settlement, &linked).unwrap();
        assert_eq!(lines[0].account_id, "3110");
        assert_eq!(lines[1].account_id, "3100");

        let unknown = BusinessEvent::PayrollPayment {
            amount: dec!(1),
            cashbox_id: "BOX-9".into(),
            project_id: None,
        };
        assert!(matches!(
            b.build(&unknown, &linked),
            Err(LedgerError::NotFound { entity: "cashbox", ref id }) if id == "BOX-9"
        ));
    }

    #[test]
    fn test_builder_uses_resolved_ids() {
        let accounts = AccountMap::resolve(|a| Some(format!("acc-{}", a.code()))).unwrap();
        let lines = EntryBuilder::new(accounts)
            .build_client_invoice_entry(dec!(5), "C1", None)
            .unwrap();
        assert_eq!(lines[0].account_id, "acc-1100");
        assert_eq!(lines[1].account_id, "acc-4000");
        assert!(validate_entry(&lines).is_ok());
    }
}
