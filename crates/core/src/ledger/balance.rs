//! Balance aggregation.
//!
//! Balances are always recomputed from journal lines; nothing here caches.
//! Every read first checks that the referenced record exists, so an unknown
//! id is `NotFound` rather than a zero balance, and a store failure is
//! returned as-is rather than being read as zero.

use async_trait::async_trait;
use rust_decimal::Decimal;
use serde::Serialize;

use super::accounts::{AccountType, NormalBalance, SystemAccount};
use super::error::LedgerError;
use super::types::ProjectBalance;
use super::validation::BALANCE_TOLERANCE;

/// Selects the journal lines a total is computed over. Unset fields match
/// everything.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LineFilter {
    /// Lines on this account id.
    pub account_id: Option<String>,
    /// Lines on the account with this code.
    pub account_code: Option<String>,
    /// Lines on accounts of this type.
    pub account_type: Option<AccountType>,
    /// Lines tagged with this client.
    pub client_id: Option<String>,
    /// Lines tagged with this supplier.
    pub supplier_id: Option<String>,
    /// Lines tagged with this project.
    pub project_id: Option<String>,
}

impl LineFilter {
    /// Lines on one account.
    #[must_use]
    pub fn account(account_id: &str) -> Self {
        Self {
            account_id: Some(account_id.to_string()),
            ..Self::default()
        }
    }

    /// Lines on one system account, by code.
    #[must_use]
    pub fn system(account: SystemAccount) -> Self {
        Self {
            account_code: Some(account.code().to_string()),
            ..Self::default()
        }
    }

    /// Restricts to lines tagged with a client.
    #[must_use]
    pub fn client(mut self, client_id: &str) -> Self {
        self.client_id = Some(client_id.to_string());
        self
    }

    /// Restricts to lines tagged with a supplier.
    #[must_use]
    pub fn supplier(mut self, supplier_id: &str) -> Self {
        self.supplier_id = Some(supplier_id.to_string());
        self
    }

    /// Restricts to lines tagged with a project on accounts of one type.
    #[must_use]
    pub fn project(project_id: &str, account_type: AccountType) -> Self {
        Self {
            project_id: Some(project_id.to_string()),
            account_type: Some(account_type),
            ..Self::default()
        }
    }
}

/// Debit and credit sums over a set of lines.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct LineTotals {
    /// Sum of debits.
    pub debit: Decimal,
    /// Sum of credits.
    pub credit: Decimal,
}

impl LineTotals {
    /// Creates totals from two sums.
    #[must_use]
    pub const fn new(debit: Decimal, credit: Decimal) -> Self {
        Self { debit, credit }
    }
}

/// Chart-of-accounts row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AccountInfo {
    /// Account id.
    pub id: String,
    /// Chart code.
    pub code: String,
    /// Display name.
    pub name: String,
    /// Classification.
    pub account_type: AccountType,
}

/// Balance of one account.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AccountBalance {
    /// Account id.
    pub account_id: String,
    /// Chart code.
    pub code: String,
    /// Display name.
    pub name: String,
    /// Classification.
    pub account_type: AccountType,
    /// Sum of debits.
    pub total_debit: Decimal,
    /// Sum of credits.
    pub total_credit: Decimal,
    /// Balance on the account's normal side.
    pub balance: Decimal,
}

impl AccountBalance {
    /// Computes the balance of `account` from its totals.
    #[must_use]
    pub fn from_totals(account: AccountInfo, totals: LineTotals) -> Self {
        let balance = account
            .account_type
            .normal_balance()
            .balance(totals.debit, totals.credit);
        Self {
            account_id: account.id,
            code: account.code,
            name: account.name,
            account_type: account.account_type,
            total_debit: totals.debit,
            total_credit: totals.credit,
            balance,
        }
    }
}

/// Per-account totals for every account with activity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TrialBalance {
    /// Rows ordered by account code.
    pub accounts: Vec<AccountBalance>,
    /// Sum of all debits.
    pub total_debit: Decimal,
    /// Sum of all credits.
    pub total_credit: Decimal,
    /// Whether debits equal credits within the balance tolerance.
    pub is_balanced: bool,
}

/// Read access to the ledger store.
///
/// Implementations map every store failure to `LedgerError::Infrastructure`.
#[async_trait]
pub trait LedgerQuery: Send + Sync {
    /// Whether a client exists.
    async fn client_exists(&self, client_id: &str) -> Result<bool, LedgerError>;

    /// Whether a supplier exists.
    async fn supplier_exists(&self, supplier_id: &str) -> Result<bool, LedgerError>;

    /// Whether a project exists.
    async fn project_exists(&self, project_id: &str) -> Result<bool, LedgerError>;

    /// The account linked to a cashbox, `None` if the cashbox is unknown.
    async fn cashbox_account(&self, cashbox_id: &str) -> Result<Option<String>, LedgerError>;

    /// A partner's wallet account, `None` if the partner is unknown.
    async fn partner_account(&self, partner_id: &str) -> Result<Option<String>, LedgerError>;

    /// An account by id.
    async fn account(&self, account_id: &str) -> Result<Option<AccountInfo>, LedgerError>;

    /// Sums the lines matching `filter`.
    async fn sum_lines(&self, filter: &LineFilter) -> Result<LineTotals, LedgerError>;

    /// Totals of every account that has at least one line.
    async fn account_totals(&self) -> Result<Vec<(AccountInfo, LineTotals)>, LedgerError>;
}

/// Computes balances from a [`LedgerQuery`].
#[derive(Debug, Clone)]
pub struct BalanceAggregator<S> {
    store: S,
}

impl<S: LedgerQuery> BalanceAggregator<S> {
    /// Creates an aggregator over `store`.
    pub fn new(store: S) -> Self {
        Self { store }
    }

    /// What the client owes the company: Σdebit − Σcredit of client-tagged
    /// lines on receivables.
    ///
    /// # Errors
    ///
    /// `NotFound` for an unknown client, `Infrastructure` on store failure.
    pub async fn client_balance(&self, client_id: &str) -> Result<Decimal, LedgerError> {
        if !self.store.client_exists(client_id).await? {
            return Err(LedgerError::not_found("client", client_id));
        }
        let totals = self
            .store
            .sum_lines(&LineFilter::system(SystemAccount::Receivables).client(client_id))
            .await?;
        Ok(NormalBalance::Debit.balance(totals.debit, totals.credit))
    }

    /// What the company owes the supplier: Σcredit − Σdebit of
    /// supplier-tagged lines on payables.
    ///
    /// # Errors
    ///
    /// `NotFound` for an unknown supplier, `Infrastructure` on store failure.
    pub async fn supplier_balance(&self, supplier_id: &str) -> Result<Decimal, LedgerError> {
        if !self.store.supplier_exists(supplier_id).await? {
            return Err(LedgerError::not_found("supplier", supplier_id));
        }
        let totals = self
            .store
            .sum_lines(&LineFilter::system(SystemAccount::Payables).supplier(supplier_id))
            .await?;
        Ok(NormalBalance::Credit.balance(totals.debit, totals.credit))
    }

    /// Money in a cashbox: Σdebit − Σcredit over every line on its account.
    ///
    /// # Errors
    ///
    /// `NotFound` for an unknown cashbox, `Infrastructure` on store failure.
    pub async fn cashbox_balance(&self, cashbox_id: &str) -> Result<Decimal, LedgerError> {
        let account_id = self
            .store
            .cashbox_account(cashbox_id)
            .await?
            .ok_or_else(|| LedgerError::not_found("cashbox", cashbox_id))?;
        let totals = self.store.sum_lines(&LineFilter::account(&account_id)).await?;
        Ok(NormalBalance::Debit.balance(totals.debit, totals.credit))
    }

    /// A partner's stake: Σcredit − Σdebit on the wallet account.
    ///
    /// # Errors
    ///
    /// `NotFound` for an unknown partner, `Infrastructure` on store failure.
    pub async fn partner_balance(&self, partner_id: &str) -> Result<Decimal, LedgerError> {
        let account_id = self
            .store
            .partner_account(partner_id)
            .await?
            .ok_or_else(|| LedgerError::not_found("partner", partner_id))?;
        let totals = self.store.sum_lines(&LineFilter::account(&account_id)).await?;
        Ok(NormalBalance::Credit.balance(totals.debit, totals.credit))
    }

    /// Revenue, expense and profit of a project.
    ///
    /// # Errors
    ///
    /// `NotFound` for an unknown project, `Infrastructure` on store failure.
    pub async fn project_balance(&self, project_id: &str) -> Result<ProjectBalance, LedgerError> {
        if !self.store.project_exists(project_id).await? {
            return Err(LedgerError::not_found("project", project_id));
        }
        let revenue = self
            .store
            .sum_lines(&LineFilter::project(project_id, AccountType::Revenue))
            .await?;
        let expense = self
            .store
            .sum_lines(&LineFilter::project(project_id, AccountType::Expense))
            .await?;

        // Gross figures: credits to revenue, debits to expense
        Ok(ProjectBalance::new(revenue.credit, expense.debit))
    }

    /// Totals and normal-side balance of one account.
    ///
    /// # Errors
    ///
    /// `NotFound` for an unknown account, `Infrastructure` on store failure.
    pub async fn account_balance(&self, account_id: &str) -> Result<AccountBalance, LedgerError> {
        let account = self
            .store
            .account(account_id)
            .await?
            .ok_or_else(|| LedgerError::not_found("account", account_id))?;
        let totals = self.store.sum_lines(&LineFilter::account(account_id)).await?;
        Ok(AccountBalance::from_totals(account, totals))
    }

    /// Trial balance over every account with activity.
    ///
    /// # Errors
    ///
    /// `Infrastructure` on store failure.
    pub async fn trial_balance(&self) -> Result<TrialBalance, LedgerError> {
        let mut accounts: Vec<AccountBalance> = self
            .store
            .account_totals()
            .await?
            .into_iter()
            .map(|(account, totals)| AccountBalance::from_totals(account, totals))
            .collect();
        accounts.sort_by(|a, b| a.code.cmp(&b.code));

        let total_debit: Decimal = accounts.iter().map(|a| a.total_debit).sum();
        let total_credit: Decimal = accounts.iter().map(|a| a.total_credit).sum();

        Ok(TrialBalance {
            accounts,
            total_debit,
            total_credit,
            is_balanced: (total_debit - total_credit).abs() < BALANCE_TOLERANCE,
        })
    }
}
