//! In-memory [`LedgerQuery`] for tests.

use std::collections::{BTreeMap, HashMap, HashSet};

use async_trait::async_trait;

use super::accounts::{AccountType, SystemAccount};
use super::balance::{AccountInfo, LedgerQuery, LineFilter, LineTotals};
use super::entry::JournalLineSpec;
use super::error::LedgerError;

#[derive(Debug, Clone, Default)]
pub struct MemoryLedger {
    accounts: HashMap<String, AccountInfo>,
    lines: Vec<JournalLineSpec>,
    clients: HashSet<String>,
    suppliers: HashSet<String>,
    projects: HashSet<String>,
    cashboxes: HashMap<String, String>,
    partners: HashMap<String, String>,
    offline: bool,
}

impl MemoryLedger {
    /// A store holding the system accounts, keyed by code.
    pub fn with_system_accounts() -> Self {
        SystemAccount::ALL
            .into_iter()
            .fold(Self::default(), |store, account| {
                store.with_account(account.code(), account.default_name(), account.account_type())
            })
    }

    pub fn with_account(mut self, code: &str, name: &str, account_type: AccountType) -> Self {
        self.accounts.insert(
            code.to_string(),
            AccountInfo {
                id: code.to_string(),
                code: code.to_string(),
                name: name.to_string(),
                account_type,
            },
        );
        self
    }

    pub fn with_client(mut self, id: &str) -> Self {
        self.clients.insert(id.to_string());
        self
    }

    pub fn with_supplier(mut self, id: &str) -> Self {
        self.suppliers.insert(id.to_string());
        self
    }

    pub fn with_project(mut self, id: &str) -> Self {
        self.projects.insert(id.to_string());
        self
    }

    pub fn with_cashbox(mut self, id: &str, account_id: &str) -> Self {
        self.cashboxes.insert(id.to_string(), account_id.to_string());
        self
    }

    pub fn with_partner(mut self, id: &str, account_id: &str) -> Self {
        self.partners.insert(id.to_string(), account_id.to_string());
        self
    }

    pub fn with_lines(mut self, lines: Vec<JournalLineSpec>) -> Self {
        self.lines.extend(lines);
        self
    }

    /// Every call fails as if the store were unreachable.
    pub fn offline(mut self) -> Self {
        self.offline = true;
        self
    }

    fn online(&self) -> Result<(), LedgerError> {
        if self.offline {
            return Err(LedgerError::Infrastructure(
                "connection refused".to_string(),
            ));
        }
        Ok(())
    }

    fn matches(&self, line: &JournalLineSpec, filter: &LineFilter) -> bool {
        let account = self.accounts.get(&line.account_id);
        let tag_matches = |wanted: &Option<String>, actual: &Option<String>| {
            wanted.is_none() || wanted == actual
        };

        filter
            .account_id
            .as_ref()
            .is_none_or(|id| *id == line.account_id)
            && filter
                .account_code
                .as_ref()
                .is_none_or(|code| account.is_some_and(|a| a.code == *code))
            && filter
                .account_type
                .is_none_or(|t| account.is_some_and(|a| a.account_type == t))
            && tag_matches(&filter.client_id, &line.client_id)
            && tag_matches(&filter.supplier_id, &line.supplier_id)
            && tag_matches(&filter.project_id, &line.project_id)
    }
}

#[async_trait]
impl LedgerQuery for MemoryLedger {
    async fn client_exists(&self, client_id: &str) -> Result<bool, LedgerError> {
        self.online()?;
        Ok(self.clients.contains(client_id))
    }

    async fn supplier_exists(&self, supplier_id: &str) -> Result<bool, LedgerError> {
        self.online()?;
        Ok(self.suppliers.contains(supplier_id))
    }

    async fn project_exists(&self, project_id: &str) -> Result<bool, LedgerError> {
        self.online()?;
        Ok(self.projects.contains(project_id))
    }

    async fn cashbox_account(&self, cashbox_id: &str) -> Result<Option<String>, LedgerError> {
        self.online()?;
        Ok(self.cashboxes.get(cashbox_id).cloned())
    }

    async fn partner_account(&self, partner_id: &str) -> Result<Option<String>, LedgerError> {
        self.online()?;
        Ok(self.partners.get(partner_id).cloned())
    }

    async fn account(&self, account_id: &str) -> Result<Option<AccountInfo>, LedgerError> {
        self.online()?;
        Ok(self.accounts.get(account_id).cloned())
    }

    async fn sum_lines(&self, filter: &LineFilter) -> Result<LineTotals, LedgerError> {
        self.online()?;
        Ok(self
            .lines
            .iter()
            .filter(|line| self.matches(line, filter))
            .fold(LineTotals::default(), |acc, line| {
                LineTotals::new(acc.debit + line.debit, acc.credit + line.credit)
            }))
    }

    async fn account_totals(&self) -> Result<Vec<(AccountInfo, LineTotals)>, LedgerError> {
        self.online()?;
        let mut totals: BTreeMap<&str, LineTotals> = BTreeMap::new();
        for line in &self.lines {
            let entry = totals.entry(line.account_id.as_str()).or_default();
            entry.debit += line.debit;
            entry.credit += line.credit;
        }
        Ok(totals
            .into_iter()
            .filter_map(|(id, t)| self.accounts.get(id).map(|a| (a.clone(), t)))
            .collect())
    }
}
