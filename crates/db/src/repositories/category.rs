//! Category repository covering both category families.
//!
//! Expense and income categories share a shape but live in separate tables
//! with separate identifier spaces; every operation takes the
//! [`CategoryKind`] selecting the table.

use sea_orm::{
    ActiveModelTrait, DatabaseConnection, DbErr, EntityTrait, QueryOrder, Set, TransactionTrait,
};
use serde::Serialize;
use tracing::warn;

use centavo_shared::types::CategoryKind;

use crate::entities::{expense_categories, income_categories};

/// Error types for category operations.
#[derive(Debug, thiserror::Error)]
pub enum CategoryError {
    /// Category not found.
    #[error("Category doesn't exist")]
    NotFound,

    /// Database error.
    #[error("Database error: {0}")]
    Database(#[from] DbErr),
}

/// A category row, independent of which kind table it came from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CategoryRecord {
    /// Store-assigned identifier, scoped to the kind.
    pub id: i32,
    /// Display name.
    pub name: String,
}

impl From<expense_categories::Model> for CategoryRecord {
    fn from(model: expense_categories::Model) -> Self {
        Self {
            id: model.id,
            name: model.name,
        }
    }
}

impl From<income_categories::Model> for CategoryRecord {
    fn from(model: income_categories::Model) -> Self {
        Self {
            id: model.id,
            name: model.name,
        }
    }
}

/// Category repository for CRUD operations on both kind tables.
#[derive(Debug, Clone)]
pub struct CategoryRepository {
    db: DatabaseConnection,
}

impl CategoryRepository {
    /// Creates a new category repository.
    #[must_use]
    pub const fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Inserts a new category of the given kind.
    pub async fn create(
        &self,
        kind: CategoryKind,
        name: &str,
    ) -> Result<CategoryRecord, CategoryError> {
        let record = match kind {
            CategoryKind::Expense => expense_categories::ActiveModel {
                name: Set(name.to_string()),
                ..Default::default()
            }
            .insert(&self.db)
            .await?
            .into(),
            CategoryKind::Income => income_categories::ActiveModel {
                name: Set(name.to_string()),
                ..Default::default()
            }
            .insert(&self.db)
            .await?
            .into(),
        };
        Ok(record)
    }

    /// Renames the category if `id` exists, otherwise creates a fresh one
    /// with the given name. The create branch assigns a new identifier, so
    /// only the rename branch is idempotent across retries.
    pub async fn rename_or_create(
        &self,
        kind: CategoryKind,
        id: i32,
        name: &str,
    ) -> Result<CategoryRecord, CategoryError> {
        let txn = self.db.begin().await?;
        let record = match kind {
            CategoryKind::Expense => {
                match expense_categories::Entity::find_by_id(id).one(&txn).await? {
                    Some(category) => {
                        let mut active: expense_categories::ActiveModel = category.into();
                        active.name = Set(name.to_string());
                        active.update(&txn).await?.into()
                    }
                    None => expense_categories::ActiveModel {
                        name: Set(name.to_string()),
                        ..Default::default()
                    }
                    .insert(&txn)
                    .await?
                    .into(),
                }
            }
            CategoryKind::Income => {
                match income_categories::Entity::find_by_id(id).one(&txn).await? {
                    Some(category) => {
                        let mut active: income_categories::ActiveModel = category.into();
                        active.name = Set(name.to_string());
                        active.update(&txn).await?.into()
                    }
                    None => income_categories::ActiveModel {
                        name: Set(name.to_string()),
                        ..Default::default()
                    }
                    .insert(&txn)
                    .await?
                    .into(),
                }
            }
        };
        txn.commit().await?;
        Ok(record)
    }

    /// Deletes the category of the given kind by id.
    pub async fn delete(&self, kind: CategoryKind, id: i32) -> Result<(), CategoryError> {
        let result = match kind {
            CategoryKind::Expense => {
                expense_categories::Entity::delete_by_id(id)
                    .exec(&self.db)
                    .await?
            }
            CategoryKind::Income => {
                income_categories::Entity::delete_by_id(id)
                    .exec(&self.db)
                    .await?
            }
        };
        if result.rows_affected == 0 {
            return Err(CategoryError::NotFound);
        }
        Ok(())
    }

    /// Fetches a single category of the given kind by id.
    pub async fn find(
        &self,
        kind: CategoryKind,
        id: i32,
    ) -> Result<Option<CategoryRecord>, CategoryError> {
        let record = match kind {
            CategoryKind::Expense => expense_categories::Entity::find_by_id(id)
                .one(&self.db)
                .await?
                .map(CategoryRecord::from),
            CategoryKind::Income => income_categories::Entity::find_by_id(id)
                .one(&self.db)
                .await?
                .map(CategoryRecord::from),
        };
        Ok(record)
    }

    /// Lists all categories of the given kind in id order.
    pub async fn list(&self, kind: CategoryKind) -> Result<Vec<CategoryRecord>, CategoryError> {
        let records = match kind {
            CategoryKind::Expense => expense_categories::Entity::find()
                .order_by_asc(expense_categories::Column::Id)
                .all(&self.db)
                .await?
                .into_iter()
                .map(CategoryRecord::from)
                .collect(),
            CategoryKind::Income => income_categories::Entity::find()
                .order_by_asc(income_categories::Column::Id)
                .all(&self.db)
                .await?
                .into_iter()
                .map(CategoryRecord::from)
                .collect(),
        };
        Ok(records)
    }

    /// Read-only lookup: true iff exactly one category row of the given kind
    /// matches `id`.
    ///
    /// Fail-closed: any store fault is logged and reported as absent, so an
    /// unreachable store can never validate a foreign key.
    pub async fn exists(&self, kind: CategoryKind, id: i32) -> bool {
        let looked_up = match kind {
            CategoryKind::Expense => {
                expense_categories::Entity::find_by_id(id)
                    .one(&self.db)
                    .await
                    .map(|row| row.is_some())
            }
            CategoryKind::Income => {
                income_categories::Entity::find_by_id(id)
                    .one(&self.db)
                    .await
                    .map(|row| row.is_some())
            }
        };
        match looked_up {
            Ok(found) => found,
            Err(err) => {
                warn!(category_id = id, kind = %kind, error = %err, "Category existence check failed, treating as absent");
                false
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_record_from_either_kind_table() {
        let expense = expense_categories::Model {
            id: 3,
            name: "Groceries".to_string(),
        };
        let income = income_categories::Model {
            id: 3,
            name: "Salary".to_string(),
        };
        assert_eq!(
            CategoryRecord::from(expense),
            CategoryRecord {
                id: 3,
                name: "Groceries".to_string()
            }
        );
        assert_eq!(
            CategoryRecord::from(income),
            CategoryRecord {
                id: 3,
                name: "Salary".to_string()
            }
        );
    }
}
