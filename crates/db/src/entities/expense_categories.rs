//! `SeaORM` Entity for the expense_categories table.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// A category for expense entries.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq, Serialize, Deserialize)]
#[sea_orm(table_name = "expense_categories")]
pub struct Model {
    /// Store-assigned identifier, scoped to expense categories.
    #[sea_orm(primary_key)]
    pub id: i32,
    /// Display name.
    pub name: String,
}

/// No store-level relations; references are validated by existence checks.
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
