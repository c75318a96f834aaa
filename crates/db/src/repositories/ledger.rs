//! `LedgerQuery` over PostgreSQL.
//!
//! Totals are summed in the database; only one row per query comes back.

use std::collections::HashMap;

use async_trait::async_trait;
use rust_decimal::Decimal;
use sea_orm::{
    ColumnTrait, DatabaseConnection, EntityTrait, JoinType, QueryFilter, QuerySelect,
    RelationTrait, sea_query::Expr,
};
use sitebook_core::ledger::{AccountInfo, LedgerError, LedgerQuery, LineFilter, LineTotals};

use super::store_err;
use crate::entities::{
    accounts, cashboxes, clients, journal_lines, partners, projects,
    sea_orm_active_enums::AccountType, suppliers,
};

/// Ledger reads backed by `SeaORM`.
#[derive(Debug, Clone)]
pub struct SeaOrmLedger {
    db: DatabaseConnection,
}

impl SeaOrmLedger {
    /// Creates a ledger reader.
    #[must_use]
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

fn account_info(model: accounts::Model) -> AccountInfo {
    AccountInfo {
        id: model.id,
        code: model.code,
        name: model.name,
        account_type: model.account_type.into(),
    }
}

fn sum_debit() -> sea_orm::sea_query::SimpleExpr {
    Expr::col((journal_lines::Entity, journal_lines::Column::Debit)).sum()
}

fn sum_credit() -> sea_orm::sea_query::SimpleExpr {
    Expr::col((journal_lines::Entity, journal_lines::Column::Credit)).sum()
}

#[async_trait]
impl LedgerQuery for SeaOrmLedger {
    async fn client_exists(&self, client_id: &str) -> Result<bool, LedgerError> {
        let found = clients::Entity::find_by_id(client_id.to_string())
            .one(&self.db)
            .await
            .map_err(store_err)?;
        Ok(found.is_some())
    }

    async fn supplier_exists(&self, supplier_id: &str) -> Result<bool, LedgerError> {
        let found = suppliers::Entity::find_by_id(supplier_id.to_string())
            .one(&self.db)
            .await
            .map_err(store_err)?;
        Ok(found.is_some())
    }

    async fn project_exists(&self, project_id: &str) -> Result<bool, LedgerError> {
        let found = projects::Entity::find_by_id(project_id.to_string())
            .one(&self.db)
            .await
            .map_err(store_err)?;
        Ok(found.is_some())
    }

    async fn cashbox_account(&self, cashbox_id: &str) -> Result<Option<String>, LedgerError> {
        let cashbox = cashboxes::Entity::find_by_id(cashbox_id.to_string())
            .one(&self.db)
            .await
            .map_err(store_err)?;
        Ok(cashbox.map(|c| c.account_id))
    }

    async fn partner_account(&self, partner_id: &str) -> Result<Option<String>, LedgerError> {
        let partner = partners::Entity::find_by_id(partner_id.to_string())
            .one(&self.db)
            .await
            .map_err(store_err)?;
        Ok(partner.map(|p| p.account_id))
    }

    async fn account(&self, account_id: &str) -> Result<Option<AccountInfo>, LedgerError> {
        let account = accounts::Entity::find_by_id(account_id.to_string())
            .one(&self.db)
            .await
            .map_err(store_err)?;
        Ok(account.map(account_info))
    }

    async fn sum_lines(&self, filter: &LineFilter) -> Result<LineTotals, LedgerError> {
        let mut query = journal_lines::Entity::find()
            .select_only()
            .column_as(sum_debit(), "debit")
            .column_as(sum_credit(), "credit");

        if filter.account_code.is_some() || filter.account_type.is_some() {
            query = query.join(JoinType::InnerJoin, journal_lines::Relation::Accounts.def());
        }
        if let Some(account_id) = &filter.account_id {
            query = query.filter(journal_lines::Column::AccountId.eq(account_id.as_str()));
        }
        if let Some(code) = &filter.account_code {
            query = query.filter(accounts::Column::Code.eq(code.as_str()));
        }
        if let Some(account_type) = filter.account_type {
            query = query.filter(accounts::Column::AccountType.eq(AccountType::from(account_type)));
        }
        if let Some(client_id) = &filter.client_id {
            query = query.filter(journal_lines::Column::ClientId.eq(client_id.as_str()));
        }
        if let Some(supplier_id) = &filter.supplier_id {
            query = query.filter(journal_lines::Column::SupplierId.eq(supplier_id.as_str()));
        }
        if let Some(project_id) = &filter.project_id {
            query = query.filter(journal_lines::Column::ProjectId.eq(project_id.as_str()));
        }

        // SUM over no rows is NULL
        let (debit, credit): (Option<Decimal>, Option<Decimal>) = query
            .into_tuple()
            .one(&self.db)
            .await
            .map_err(store_err)?
            .unwrap_or((None, None));

        Ok(LineTotals::new(
            debit.unwrap_or(Decimal::ZERO),
            credit.unwrap_or(Decimal::ZERO),
        ))
    }

    async fn account_totals(&self) -> Result<Vec<(AccountInfo, LineTotals)>, LedgerError> {
        let rows: Vec<(String, Option<Decimal>, Option<Decimal>)> = journal_lines::Entity::find()
            .select_only()
            .column(journal_lines::Column::AccountId)
            .column_as(sum_debit(), "debit")
            .column_as(sum_credit(), "credit")
            .group_by(journal_lines::Column::AccountId)
            .into_tuple()
            .all(&self.db)
            .await
            .map_err(store_err)?;

        let ids: Vec<String> = rows.iter().map(|(id, _, _)| id.clone()).collect();
        let mut by_id: HashMap<String, accounts::Model> = accounts::Entity::find()
            .filter(accounts::Column::Id.is_in(ids))
            .all(&self.db)
            .await
            .map_err(store_err)?
            .into_iter()
            .map(|account| (account.id.clone(), account))
            .collect();

        Ok(rows
            .into_iter()
            .filter_map(|(id, debit, credit)| {
                by_id.remove(&id).map(|account| {
                    (
                        account_info(account),
                        LineTotals::new(
                            debit.unwrap_or(Decimal::ZERO),
                            credit.unwrap_or(Decimal::ZERO),
                        ),
                    )
                })
            })
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sitebook_core::ledger::BalanceAggregator;

    #[tokio::test]
    async fn test_disconnected_store_is_infrastructure() {
        let aggregator = BalanceAggregator::new(SeaOrmLedger::new(DatabaseConnection::Disconnected));

        assert!(matches!(
            aggregator.client_balance("C1").await,
            Err(LedgerError::Infrastructure(_))
        ));
        assert!(matches!(
            aggregator.cashbox_balance("BOX").await,
            Err(LedgerError::Infrastructure(_))
        ));
        assert!(matches!(
            aggregator.trial_balance().await,
            Err(LedgerError::Infrastructure(_))
        ));
    }
}
