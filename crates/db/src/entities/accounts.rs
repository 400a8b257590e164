//! `SeaORM` Entity for the accounts table.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// A bank account with its cached balance in minor currency units.
///
/// `amount` is maintained incrementally by the entry repository; it is only
/// ever changed inside the same transaction as the entry write that caused
/// the change, or by an explicit account upsert.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq, Serialize, Deserialize)]
#[sea_orm(table_name = "accounts")]
pub struct Model {
    /// Store-assigned identifier.
    #[sea_orm(primary_key)]
    pub id: i32,
    /// Display name.
    pub name: String,
    /// Balance in minor currency units, signed.
    pub amount: i64,
}

/// No store-level relations; references are validated by existence checks.
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
