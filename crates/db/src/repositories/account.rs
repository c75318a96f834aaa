//! Account repository for chart of accounts database operations.

use std::collections::HashMap;

use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, DatabaseConnection, EntityTrait, QueryFilter,
    Set,
};
use sitebook_core::ledger::{AccountMap, AccountType as CoreAccountType, LedgerError, SystemAccount};
use sitebook_shared::new_record_id;
use tracing::info;

use super::store_err;
use crate::entities::{accounts, sea_orm_active_enums::AccountType};

/// Repository for chart of accounts operations.
#[derive(Debug, Clone)]
pub struct AccountRepository {
    db: DatabaseConnection,
}

impl AccountRepository {
    /// Creates a new account repository.
    #[must_use]
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Finds an account by its chart code.
    pub async fn find_by_code(&self, code: &str) -> Result<Option<accounts::Model>, LedgerError> {
        accounts::Entity::find()
            .filter(accounts::Column::Code.eq(code))
            .one(&self.db)
            .await
            .map_err(store_err)
    }

    /// Creates an account. The type follows the code prefix.
    ///
    /// # Errors
    ///
    /// `InvalidEvent` for a code outside the `1`-`5` convention,
    /// `ConstraintViolation` for a duplicate code.
    pub async fn create(&self, code: &str, name: &str) -> Result<accounts::Model, LedgerError> {
        let account_type = CoreAccountType::from_code(code).ok_or_else(|| {
            LedgerError::InvalidEvent(format!("account code {code} has no known type prefix"))
        })?;

        let account = accounts::ActiveModel {
            id: Set(new_record_id()),
            code: Set(code.to_string()),
            name: Set(name.to_string()),
            account_type: Set(AccountType::from(account_type)),
            created_at: Set(Utc::now().into()),
        };
        let account = account.insert(&self.db).await.map_err(store_err)?;

        info!(account_id = %account.id, code = %account.code, "Account created");
        Ok(account)
    }

    /// Creates every missing system account with its default name.
    ///
    /// Returns the accounts that were created.
    pub async fn seed_system_accounts(&self) -> Result<Vec<accounts::Model>, LedgerError> {
        let mut created = Vec::new();
        for account in SystemAccount::ALL {
            if self.find_by_code(account.code()).await?.is_none() {
                created.push(self.create(account.code(), account.default_name()).await?);
            }
        }
        Ok(created)
    }
}

/// Loads the system account ids on any connection, including an open
/// transaction.
///
/// # Errors
///
/// `NotFound` naming the first system account code missing from the chart.
pub(crate) async fn load_account_map<C: ConnectionTrait>(conn: &C) -> Result<AccountMap, LedgerError> {
    let codes: Vec<&str> = SystemAccount::ALL.iter().map(|a| a.code()).collect();
    let mut by_code: HashMap<String, String> = accounts::Entity::find()
        .filter(accounts::Column::Code.is_in(codes))
        .all(conn)
        .await
        .map_err(store_err)?
        .into_iter()
        .map(|account| (account.code, account.id))
        .collect();

    AccountMap::resolve(|account| by_code.remove(account.code()))
}
