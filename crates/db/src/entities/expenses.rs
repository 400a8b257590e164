//! `SeaORM` Entity for the expenses table.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// An expense ledger entry.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq, Serialize, Deserialize)]
#[sea_orm(table_name = "expenses")]
pub struct Model {
    /// Store-assigned identifier.
    #[sea_orm(primary_key)]
    pub id: i32,
    /// Referenced expense category.
    pub category_id: i32,
    /// Referenced account.
    pub account_id: i32,
    /// Entry amount in minor currency units, non-negative.
    pub amount: i64,
    /// Entry date (server-local when omitted from input).
    pub date: Date,
    /// Entry time (server-local when omitted from input).
    pub time: Time,
    /// Free-form comment, empty string by default.
    pub comment: String,
}

/// No store-level relations; references are validated by existence checks.
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
