//! Database layer with `SeaORM` entities and repositories.
//!
//! This crate provides:
//! - `SeaORM` entity definitions for the five ledger tables
//! - Repository abstractions for data access
//! - Database migrations
//!
//! Foreign-key discipline between entries and the accounts/categories they
//! reference is enforced by explicit existence checks in the repositories,
//! not by store constraints; the schema deliberately carries no FK from the
//! entry tables.

pub mod entities;
pub mod migration;
pub mod repositories;

pub use repositories::{AccountRepository, CategoryRepository, EntryRepository};

use centavo_shared::config::DatabaseConfig;
use sea_orm::{ConnectOptions, Database, DatabaseConnection, DbErr};

/// Establishes a pooled connection to the database.
///
/// # Errors
///
/// Returns an error if the connection cannot be established.
pub async fn connect(config: &DatabaseConfig) -> Result<DatabaseConnection, DbErr> {
    let mut options = ConnectOptions::new(config.url.clone());
    options
        .max_connections(config.max_connections)
        .min_connections(config.min_connections);
    Database::connect(options).await
}
