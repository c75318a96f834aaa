//! Chart-of-accounts conventions.
//!
//! Account codes are hierarchical by prefix: `1` asset, `2` liability,
//! `3` equity, `4` revenue, `5` expense. The accounts the bookkeeping rules
//! post to on their own (cash, receivables, payables, ...) are fixed codes
//! listed in [`SystemAccount`]; builders never see those codes, only the
//! account ids an [`AccountMap`] resolves them to.

use std::str::FromStr;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::error::LedgerError;

/// Account classification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AccountType {
    /// Things the company owns (cash, receivables, inventory).
    Asset,
    /// Things the company owes (payables, accrued wages).
    Liability,
    /// Owners' and partners' stake.
    Equity,
    /// Income earned.
    Revenue,
    /// Costs incurred.
    Expense,
}

impl AccountType {
    /// Derives the account type from the leading digit of an account code.
    ///
    /// Returns `None` for codes outside the `1`-`5` convention.
    #[must_use]
    pub fn from_code(code: &str) -> Option<Self> {
        match code.trim().chars().next()? {
            '1' => Some(Self::Asset),
            '2' => Some(Self::Liability),
            '3' => Some(Self::Equity),
            '4' => Some(Self::Revenue),
            '5' => Some(Self::Expense),
            _ => None,
        }
    }

    /// Returns the side on which this account type grows.
    #[must_use]
    pub const fn normal_balance(self) -> NormalBalance {
        match self {
            Self::Asset | Self::Expense => NormalBalance::Debit,
            Self::Liability | Self::Equity | Self::Revenue => NormalBalance::Credit,
        }
    }

    /// Returns the lowercase name used in storage and JSON.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Asset => "asset",
            Self::Liability => "liability",
            Self::Equity => "equity",
            Self::Revenue => "revenue",
            Self::Expense => "expense",
        }
    }
}

impl std::fmt::Display for AccountType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for AccountType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "asset" => Ok(Self::Asset),
            "liability" => Ok(Self::Liability),
            "equity" => Ok(Self::Equity),
            "revenue" => Ok(Self::Revenue),
            "expense" => Ok(Self::Expense),
            _ => Err(format!("Unknown account type: {s}")),
        }
    }
}

/// The side on which an account's balance grows.
///
/// - Asset/Expense: balance = debit - credit (debit-normal)
/// - Liability/Equity/Revenue: balance = credit - debit (credit-normal)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NormalBalance {
    /// Debit-normal accounts.
    Debit,
    /// Credit-normal accounts.
    Credit,
}

impl NormalBalance {
    /// Computes the balance of debit and credit totals on this side.
    #[must_use]
    pub fn balance(self, debit: Decimal, credit: Decimal) -> Decimal {
        match self {
            Self::Debit => debit - credit,
            Self::Credit => credit - debit,
        }
    }
}

/// Accounts the bookkeeping rules post to by fixed code.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SystemAccount {
    /// `1000` Cash on hand.
    Cash,
    /// `1100` Accounts receivable.
    Receivables,
    /// `1200` Material inventory.
    MaterialInventory,
    /// `2000` Accounts payable.
    Payables,
    /// `2100` Accrued wages.
    AccruedWages,
    /// `4000` Sales revenue.
    SalesRevenue,
    /// `5100` Project cost.
    ProjectCost,
}

impl SystemAccount {
    /// Every system account, in code order.
    pub const ALL: [Self; 7] = [
        Self::Cash,
        Self::Receivables,
        Self::MaterialInventory,
        Self::Payables,
        Self::AccruedWages,
        Self::SalesRevenue,
        Self::ProjectCost,
    ];

    /// Returns the fixed chart-of-accounts code.
    #[must_use]
    pub const fn code(self) -> &'static str {
        match self {
            Self::Cash => "1000",
            Self::Receivables => "1100",
            Self::MaterialInventory => "1200",
            Self::Payables => "2000",
            Self::AccruedWages => "2100",
            Self::SalesRevenue => "4000",
            Self::ProjectCost => "5100",
        }
    }

    /// Returns the default display name used when seeding the chart.
    #[must_use]
    pub const fn default_name(self) -> &'static str {
        match self {
            Self::Cash => "Cash",
            Self::Receivables => "Accounts Receivable",
            Self::MaterialInventory => "Material Inventory",
            Self::Payables => "Accounts Payable",
            Self::AccruedWages => "Accrued Wages",
            Self::SalesRevenue => "Sales Revenue",
            Self::ProjectCost => "Project Cost",
        }
    }

    /// Returns the account type implied by the code prefix.
    #[must_use]
    pub const fn account_type(self) -> AccountType {
        match self {
            Self::Cash | Self::Receivables | Self::MaterialInventory => AccountType::Asset,
            Self::Payables | Self::AccruedWages => AccountType::Liability,
            Self::SalesRevenue => AccountType::Revenue,
            Self::ProjectCost => AccountType::Expense,
        }
    }
}

/// Resolved account ids for every [`SystemAccount`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccountMap {
    cash: String,
    receivables: String,
    material_inventory: String,
    payables: String,
    accrued_wages: String,
    sales_revenue: String,
    project_cost: String,
}

impl AccountMap {
    /// A map whose account ids are the account codes themselves.
    ///
    /// Matches stores that key accounts by code.
    #[must_use]
    pub fn by_code() -> Self {
        Self {
            cash: SystemAccount::Cash.code().to_string(),
            receivables: SystemAccount::Receivables.code().to_string(),
            material_inventory: SystemAccount::MaterialInventory.code().to_string(),
            payables: SystemAccount::Payables.code().to_string(),
            accrued_wages: SystemAccount::AccruedWages.code().to_string(),
            sales_revenue: SystemAccount::SalesRevenue.code().to_string(),
            project_cost: SystemAccount::ProjectCost.code().to_string(),
        }
    }

    /// Builds a map by looking up each system account.
    ///
    /// # Errors
    ///
    /// Returns `LedgerError::NotFound` naming the first code the lookup cannot
    /// resolve.
    pub fn resolve<F>(mut lookup: F) -> Result<Self, LedgerError>
    where
        F: FnMut(SystemAccount) -> Option<String>,
    {
        let mut get = |account: SystemAccount| {
            lookup(account).ok_or_else(|| LedgerError::NotFound {
                entity: "account",
                id: account.code().to_string(),
            })
        };

        Ok(Self {
            cash: get(SystemAccount::Cash)?,
            receivables: get(SystemAccount::Receivables)?,
            material_inventory: get(SystemAccount::MaterialInventory)?,
            payables: get(SystemAccount::Payables)?,
            accrued_wages: get(SystemAccount::AccruedWages)?,
            sales_revenue: get(SystemAccount::SalesRevenue)?,
            project_cost: get(SystemAccount::ProjectCost)?,
        })
    }

    /// Returns the account id for a system account.
    #[must_use]
    pub fn get(&self, account: SystemAccount) -> &str {
        match account {
            SystemAccount::Cash => &self.cash,
            SystemAccount::Receivables => &self.receivables,
            SystemAccount::MaterialInventory => &self.material_inventory,
            SystemAccount::Payables => &self.payables,
            SystemAccount::AccruedWages => &self.accrued_wages,
            SystemAccount::SalesRevenue => &self.sales_revenue,
            SystemAccount::ProjectCost => &self.project_cost,
        }
    }
}

impl Default for AccountMap {
    fn default() -> Self {
        Self::by_code()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use rust_decimal_macros::dec;

    #[rstest]
    #[case("1000", Some(AccountType::Asset))]
    #[case("1100", Some(AccountType::Asset))]
    #[case("2100", Some(AccountType::Liability))]
    #[case("3100", Some(AccountType::Equity))]
    #[case("4000", Some(AccountType::Revenue))]
    #[case("5100", Some(AccountType::Expense))]
    #[case("9000", None)]
    #[case("", None)]
    fn test_account_type_from_code(#[case] code: &str, #[case] expected: Option<AccountType>) {
        assert_eq!(AccountType::from_code(code), expected);
    }

    #[test]
    fn test_system_account_types_follow_code_prefix() {
        for account in SystemAccount::ALL {
            assert_eq!(
                AccountType::from_code(account.code()),
                Some(account.account_type()),
                "{account:?}"
            );
        }
    }

    #[test]
    fn test_normal_balance() {
        assert_eq!(AccountType::Asset.normal_balance(), NormalBalance::Debit);
        assert_eq!(AccountType::Expense.normal_balance(), NormalBalance::Debit);
        assert_eq!(AccountType::Liability.normal_balance(), NormalBalance::Credit);
        assert_eq!(AccountType::Equity.normal_balance(), NormalBalance::Credit);
        assert_eq!(AccountType::Revenue.normal_balance(), NormalBalance::Credit);

        assert_eq!(NormalBalance::Debit.balance(dec!(100), dec!(30)), dec!(70));
        assert_eq!(NormalBalance::Credit.balance(dec!(30), dec!(100)), dec!(70));
    }

    #[test]
    fn test_account_type_from_str() {
        assert_eq!("ASSET".parse::<AccountType>(), Ok(AccountType::Asset));
        assert_eq!("Revenue".parse::<AccountType>(), Ok(AccountType::Revenue));
        assert!("income".parse::<AccountType>().is_err());
    }

    #[test]
    fn test_account_map_by_code() {
        let map = AccountMap::default();
        assert_eq!(map.get(SystemAccount::Receivables), "1100");
        assert_eq!(map.get(SystemAccount::Payables), "2000");
        assert_eq!(map.get(SystemAccount::ProjectCost), "5100");
    }

    #[test]
    fn test_account_map_resolve() {
        let map = AccountMap::resolve(|a| Some(format!("acc-{}", a.code()))).unwrap();
        assert_eq!(map.get(SystemAccount::Cash), "acc-1000");

        let err = AccountMap::resolve(|a| {
            (a != SystemAccount::AccruedWages).then(|| a.code().to_string())
        })
        .unwrap_err();
        assert!(matches!(
            err,
            LedgerError::NotFound { entity: "account", ref id } if id == "2100"
        ));
    }
}
