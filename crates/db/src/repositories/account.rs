//! Account repository for account database operations.

use sea_orm::{
    ActiveModelTrait, DatabaseConnection, DbErr, EntityTrait, QueryOrder, Set, TransactionTrait,
};
use tracing::warn;

use crate::entities::accounts;

/// Error types for account operations.
#[derive(Debug, thiserror::Error)]
pub enum AccountError {
    /// Account not found.
    #[error("Account doesn't exist")]
    NotFound,

    /// Database error.
    #[error("Database error: {0}")]
    Database(#[from] DbErr),
}

/// Account repository for CRUD operations.
#[derive(Debug, Clone)]
pub struct AccountRepository {
    db: DatabaseConnection,
}

impl AccountRepository {
    /// Creates a new account repository.
    #[must_use]
    pub const fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Inserts a new account with the given name and opening balance.
    pub async fn create(&self, name: &str, amount: i64) -> Result<accounts::Model, AccountError> {
        let account = accounts::ActiveModel {
            name: Set(name.to_string()),
            amount: Set(amount),
            ..Default::default()
        };
        Ok(account.insert(&self.db).await?)
    }

    /// Creates the account if `id` is absent, otherwise updates its name and
    /// amount. An omitted `amount` preserves the stored balance on the update
    /// branch and opens the account at zero on the create branch.
    ///
    /// Runs in a single transaction so the read of the stored balance and the
    /// overwrite cannot interleave with a concurrent entry posting.
    pub async fn upsert(
        &self,
        id: i32,
        name: &str,
        amount: Option<i64>,
    ) -> Result<accounts::Model, AccountError> {
        let txn = self.db.begin().await?;
        let model = match accounts::Entity::find_by_id(id).one(&txn).await? {
            Some(account) => {
                let kept = amount.unwrap_or(account.amount);
                let mut active: accounts::ActiveModel = account.into();
                active.name = Set(name.to_string());
                active.amount = Set(kept);
                active.update(&txn).await?
            }
            None => {
                accounts::ActiveModel {
                    name: Set(name.to_string()),
                    amount: Set(amount.unwrap_or(0)),
                    ..Default::default()
                }
                .insert(&txn)
                .await?
            }
        };
        txn.commit().await?;
        Ok(model)
    }

    /// Deletes the account by id. Ledger entries referencing it are retained
    /// as historical records; there is no cascade.
    pub async fn delete(&self, id: i32) -> Result<(), AccountError> {
        let result = accounts::Entity::delete_by_id(id).exec(&self.db).await?;
        if result.rows_affected == 0 {
            return Err(AccountError::NotFound);
        }
        Ok(())
    }

    /// Fetches a single account by id.
    pub async fn find(&self, id: i32) -> Result<Option<accounts::Model>, AccountError> {
        Ok(accounts::Entity::find_by_id(id).one(&self.db).await?)
    }

    /// Lists all accounts in id order.
    pub async fn list(&self) -> Result<Vec<accounts::Model>, AccountError> {
        Ok(accounts::Entity::find()
            .order_by_asc(accounts::Column::Id)
            .all(&self.db)
            .await?)
    }

    /// Read-only lookup: true iff exactly one account row matches `id`.
    ///
    /// Fail-closed: any store fault is logged and reported as absent, so an
    /// unreachable store can never validate a foreign key.
    pub async fn exists(&self, id: i32) -> bool {
        match accounts::Entity::find_by_id(id).one(&self.db).await {
            Ok(row) => row.is_some(),
            Err(err) => {
                warn!(account_id = id, error = %err, "Account existence check failed, treating as absent");
                false
            }
        }
    }
}
