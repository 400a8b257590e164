//! `SeaORM` Entity for the income_categories table.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// A category for income entries.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq, Serialize, Deserialize)]
#[sea_orm(table_name = "income_categories")]
pub struct Model {
    /// Store-assigned identifier, scoped to income categories.
    #[sea_orm(primary_key)]
    pub id: i32,
    /// Display name.
    pub name: String,
}

/// No store-level relations; references are validated by existence checks.
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
