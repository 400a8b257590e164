//! Entry repository implementing the balance-consistency protocol.
//!
//! Every entry insert or delete and its paired account-balance adjustment
//! execute inside one database transaction: either both persist or neither
//! does. A failed statement drops the transaction, which rolls back on drop,
//! so no partial state is ever visible outside a committed transaction.

use chrono::{NaiveDate, NaiveTime};
use sea_orm::{
    ActiveModelTrait, DatabaseConnection, DatabaseTransaction, DbErr, EntityTrait, QueryOrder, Set,
    TransactionTrait,
};
use serde::Serialize;
use tracing::warn;

use centavo_shared::types::{EntryKind, balance_delta};

use crate::entities::{accounts, expenses, income};

/// Error types for entry operations.
#[derive(Debug, thiserror::Error)]
pub enum EntryError {
    /// Referenced account vanished between the existence check and the
    /// balance adjustment.
    #[error("Account doesn't exist")]
    AccountNotFound,

    /// Expense entry not found.
    #[error("Expense doesn't exist")]
    ExpenseNotFound,

    /// Income entry not found.
    #[error("Income doesn't exist")]
    IncomeNotFound,

    /// Balance adjustment would overflow the account balance.
    #[error("Account balance overflow")]
    BalanceOverflow,

    /// Database error.
    #[error("Database error: {0}")]
    Database(#[from] DbErr),
}

impl EntryError {
    /// The kind-specific not-found error.
    #[must_use]
    pub const fn not_found(kind: EntryKind) -> Self {
        match kind {
            EntryKind::Expense => Self::ExpenseNotFound,
            EntryKind::Income => Self::IncomeNotFound,
        }
    }
}

/// Input for recording a ledger entry.
#[derive(Debug, Clone)]
pub struct NewEntry {
    /// Referenced category of the matching kind.
    pub category_id: i32,
    /// Referenced account.
    pub account_id: i32,
    /// Entry amount in minor currency units, non-negative.
    pub amount: i64,
    /// Entry date.
    pub date: NaiveDate,
    /// Entry time.
    pub time: NaiveTime,
    /// Free-form comment.
    pub comment: String,
}

/// A ledger entry row, independent of which kind table it came from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EntryRecord {
    /// Store-assigned identifier.
    pub id: i32,
    /// Referenced category.
    pub category_id: i32,
    /// Referenced account.
    pub account_id: i32,
    /// Entry amount in minor currency units.
    pub amount: i64,
    /// Entry date.
    pub date: NaiveDate,
    /// Entry time.
    pub time: NaiveTime,
    /// Free-form comment.
    pub comment: String,
}

impl From<expenses::Model> for EntryRecord {
    fn from(model: expenses::Model) -> Self {
        Self {
            id: model.id,
            category_id: model.category_id,
            account_id: model.account_id,
            amount: model.amount,
            date: model.date,
            time: model.time,
            comment: model.comment,
        }
    }
}

impl From<income::Model> for EntryRecord {
    fn from(model: income::Model) -> Self {
        Self {
            id: model.id,
            category_id: model.category_id,
            account_id: model.account_id,
            amount: model.amount,
            date: model.date,
            time: model.time,
            comment: model.comment,
        }
    }
}

/// Entry repository for the two ledger-entry tables.
#[derive(Debug, Clone)]
pub struct EntryRepository {
    db: DatabaseConnection,
}

impl EntryRepository {
    /// Creates a new entry repository.
    #[must_use]
    pub const fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Records a ledger entry and applies its balance effect to the
    /// referenced account, atomically. An expense decreases the account
    /// balance by the entry amount, an income increases it.
    pub async fn record(&self, kind: EntryKind, entry: NewEntry) -> Result<EntryRecord, EntryError> {
        let delta = balance_delta(kind, entry.amount);
        let txn = self.db.begin().await?;

        let record: EntryRecord = match kind {
            EntryKind::Expense => expenses::ActiveModel {
                category_id: Set(entry.category_id),
                account_id: Set(entry.account_id),
                amount: Set(entry.amount),
                date: Set(entry.date),
                time: Set(entry.time),
                comment: Set(entry.comment),
                ..Default::default()
            }
            .insert(&txn)
            .await?
            .into(),
            EntryKind::Income => income::ActiveModel {
                category_id: Set(entry.category_id),
                account_id: Set(entry.account_id),
                amount: Set(entry.amount),
                date: Set(entry.date),
                time: Set(entry.time),
                comment: Set(entry.comment),
                ..Default::default()
            }
            .insert(&txn)
            .await?
            .into(),
        };

        apply_balance_change(&txn, record.account_id, delta).await?;
        txn.commit().await?;
        Ok(record)
    }

    /// Deletes a ledger entry and reverses its balance effect on the
    /// referenced account, atomically.
    pub async fn delete(&self, kind: EntryKind, id: i32) -> Result<(), EntryError> {
        let txn = self.db.begin().await?;

        let (account_id, amount) = match kind {
            EntryKind::Expense => {
                let entry = expenses::Entity::find_by_id(id)
                    .one(&txn)
                    .await?
                    .ok_or(EntryError::ExpenseNotFound)?;
                let info = (entry.account_id, entry.amount);
                expenses::Entity::delete_by_id(id).exec(&txn).await?;
                info
            }
            EntryKind::Income => {
                let entry = income::Entity::find_by_id(id)
                    .one(&txn)
                    .await?
                    .ok_or(EntryError::IncomeNotFound)?;
                let info = (entry.account_id, entry.amount);
                income::Entity::delete_by_id(id).exec(&txn).await?;
                info
            }
        };

        // Removal reverses the entry's original effect.
        apply_balance_change(&txn, account_id, -balance_delta(kind, amount)).await?;
        txn.commit().await?;
        Ok(())
    }

    /// Fetches a single entry of the given kind by id.
    pub async fn find(&self, kind: EntryKind, id: i32) -> Result<Option<EntryRecord>, EntryError> {
        let record = match kind {
            EntryKind::Expense => expenses::Entity::find_by_id(id)
                .one(&self.db)
                .await?
                .map(EntryRecord::from),
            EntryKind::Income => income::Entity::find_by_id(id)
                .one(&self.db)
                .await?
                .map(EntryRecord::from),
        };
        Ok(record)
    }

    /// Lists all entries of the given kind in id order.
    pub async fn list(&self, kind: EntryKind) -> Result<Vec<EntryRecord>, EntryError> {
        let records = match kind {
            EntryKind::Expense => expenses::Entity::find()
                .order_by_asc(expenses::Column::Id)
                .all(&self.db)
                .await?
                .into_iter()
                .map(EntryRecord::from)
                .collect(),
            EntryKind::Income => income::Entity::find()
                .order_by_asc(income::Column::Id)
                .all(&self.db)
                .await?
                .into_iter()
                .map(EntryRecord::from)
                .collect(),
        };
        Ok(records)
    }

    /// Read-only lookup: true iff exactly one entry row of the given kind
    /// matches `id`.
    ///
    /// Fail-closed: any store fault is logged and reported as absent.
    pub async fn exists(&self, kind: EntryKind, id: i32) -> bool {
        let looked_up = match kind {
            EntryKind::Expense => expenses::Entity::find_by_id(id)
                .one(&self.db)
                .await
                .map(|row| row.is_some()),
            EntryKind::Income => income::Entity::find_by_id(id)
                .one(&self.db)
                .await
                .map(|row| row.is_some()),
        };
        match looked_up {
            Ok(found) => found,
            Err(err) => {
                warn!(entry_id = id, kind = %kind, error = %err, "Entry existence check failed, treating as absent");
                false
            }
        }
    }
}

/// Applies a signed balance change to an account inside the caller's
/// transaction. The read and the write stay inside that transaction, so the
/// adjustment commits or rolls back together with the entry statement.
async fn apply_balance_change(
    txn: &DatabaseTransaction,
    account_id: i32,
    delta: i64,
) -> Result<(), EntryError> {
    let account = accounts::Entity::find_by_id(account_id)
        .one(txn)
        .await?
        .ok_or(EntryError::AccountNotFound)?;
    let updated = account
        .amount
        .checked_add(delta)
        .ok_or(EntryError::BalanceOverflow)?;
    let mut active: accounts::ActiveModel = account.into();
    active.amount = Set(updated);
    active.update(txn).await?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{NaiveDate, NaiveTime};

    #[test]
    fn test_record_from_either_kind_table() {
        let date = NaiveDate::from_ymd_opt(2026, 2, 10).expect("valid date");
        let time = NaiveTime::from_hms_opt(12, 30, 0).expect("valid time");
        let expense = expenses::Model {
            id: 1,
            category_id: 2,
            account_id: 3,
            amount: 450,
            date,
            time,
            comment: "lunch".to_string(),
        };
        let record = EntryRecord::from(expense);
        assert_eq!(record.id, 1);
        assert_eq!(record.category_id, 2);
        assert_eq!(record.account_id, 3);
        assert_eq!(record.amount, 450);
        assert_eq!(record.comment, "lunch");

        let salary = income::Model {
            id: 7,
            category_id: 1,
            account_id: 3,
            amount: 250_000,
            date,
            time,
            comment: String::new(),
        };
        let record = EntryRecord::from(salary);
        assert_eq!(record.id, 7);
        assert_eq!(record.amount, 250_000);
    }

    #[test]
    fn test_not_found_is_kind_specific() {
        assert!(matches!(
            EntryError::not_found(EntryKind::Expense),
            EntryError::ExpenseNotFound
        ));
        assert!(matches!(
            EntryError::not_found(EntryKind::Income),
            EntryError::IncomeNotFound
        ));
    }
}
