//! `SeaORM` active enums mapped to PostgreSQL enum types.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};
use sitebook_core::ledger::{AccountType as CoreAccountType, EventKind};

/// `account_type` enum.
#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "Enum", enum_name = "account_type")]
#[serde(rename_all = "lowercase")]
pub enum AccountType {
    /// Asset.
    #[sea_orm(string_value = "asset")]
    Asset,
    /// Liability.
    #[sea_orm(string_value = "liability")]
    Liability,
    /// Equity.
    #[sea_orm(string_value = "equity")]
    Equity,
    /// Revenue.
    #[sea_orm(string_value = "revenue")]
    Revenue,
    /// Expense.
    #[sea_orm(string_value = "expense")]
    Expense,
}

impl From<AccountType> for CoreAccountType {
    fn from(value: AccountType) -> Self {
        match value {
            AccountType::Asset => Self::Asset,
            AccountType::Liability => Self::Liability,
            AccountType::Equity => Self::Equity,
            AccountType::Revenue => Self::Revenue,
            AccountType::Expense => Self::Expense,
        }
    }
}

impl From<CoreAccountType> for AccountType {
    fn from(value: CoreAccountType) -> Self {
        match value {
            CoreAccountType::Asset => Self::Asset,
            CoreAccountType::Liability => Self::Liability,
            CoreAccountType::Equity => Self::Equity,
            CoreAccountType::Revenue => Self::Revenue,
            CoreAccountType::Expense => Self::Expense,
        }
    }
}

/// `document_kind` enum: the business event a source document records.
#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "Enum", enum_name = "document_kind")]
#[serde(rename_all = "snake_case")]
pub enum DocumentKind {
    /// Revenue.
    #[sea_orm(string_value = "revenue")]
    Revenue,
    /// Expense.
    #[sea_orm(string_value = "expense")]
    Expense,
    /// Client invoice.
    #[sea_orm(string_value = "client_invoice")]
    ClientInvoice,
    /// Supplier invoice.
    #[sea_orm(string_value = "supplier_invoice")]
    SupplierInvoice,
    /// Client payment.
    #[sea_orm(string_value = "client_payment")]
    ClientPayment,
    /// Supplier payment.
    #[sea_orm(string_value = "supplier_payment")]
    SupplierPayment,
    /// Cashbox transfer.
    #[sea_orm(string_value = "cashbox_transfer")]
    CashboxTransfer,
    /// Material consumption.
    #[sea_orm(string_value = "material_consumption")]
    MaterialConsumption,
    /// Payroll accrual.
    #[sea_orm(string_value = "payroll_accrual")]
    PayrollAccrual,
    /// Payroll payment.
    #[sea_orm(string_value = "payroll_payment")]
    PayrollPayment,
    /// Partner settlement.
    #[sea_orm(string_value = "partner_settlement")]
    PartnerSettlement,
}

impl From<EventKind> for DocumentKind {
    fn from(value: EventKind) -> Self {
        match value {
            EventKind::Revenue => Self::Revenue,
            EventKind::Expense => Self::Expense,
            EventKind::ClientInvoice => Self::ClientInvoice,
            EventKind::SupplierInvoice => Self::SupplierInvoice,
            EventKind::ClientPayment => Self::ClientPayment,
            EventKind::SupplierPayment => Self::SupplierPayment,
            EventKind::CashboxTransfer => Self::CashboxTransfer,
            EventKind::MaterialConsumption => Self::MaterialConsumption,
            EventKind::PayrollAccrual => Self::PayrollAccrual,
            EventKind::PayrollPayment => Self::PayrollPayment,
            EventKind::PartnerSettlement => Self::PartnerSettlement,
        }
    }
}
