//! Initial database migration.
//!
//! Creates the five ledger tables. The entry tables intentionally carry no
//! foreign keys: references to accounts and categories are validated by the
//! repositories' existence checks, and deleting an account retains its
//! entries as historical records.

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        let db = manager.get_connection();

        // ============================================================
        // PART 1: ACCOUNTS
        // ============================================================
        db.execute_unprepared(ACCOUNTS_SQL).await?;

        // ============================================================
        // PART 2: CATEGORIES
        // ============================================================
        db.execute_unprepared(EXPENSE_CATEGORIES_SQL).await?;
        db.execute_unprepared(INCOME_CATEGORIES_SQL).await?;

        // ============================================================
        // PART 3: LEDGER ENTRIES
        // ============================================================
        db.execute_unprepared(EXPENSES_SQL).await?;
        db.execute_unprepared(INCOME_SQL).await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        let db = manager.get_connection();
        db.execute_unprepared(DROP_ALL_SQL).await?;
        Ok(())
    }
}

// ============================================================
// SQL CONSTANTS
// ============================================================

const ACCOUNTS_SQL: &str = r"
CREATE TABLE accounts (
    id SERIAL PRIMARY KEY,
    name TEXT NOT NULL,
    amount BIGINT NOT NULL DEFAULT 0
);
";

const EXPENSE_CATEGORIES_SQL: &str = r"
CREATE TABLE expense_categories (
    id SERIAL PRIMARY KEY,
    name TEXT NOT NULL
);
";

const INCOME_CATEGORIES_SQL: &str = r"
CREATE TABLE income_categories (
    id SERIAL PRIMARY KEY,
    name TEXT NOT NULL
);
";

const EXPENSES_SQL: &str = r"
CREATE TABLE expenses (
    id SERIAL PRIMARY KEY,
    category_id INTEGER NOT NULL,
    account_id INTEGER NOT NULL,
    amount BIGINT NOT NULL,
    date DATE NOT NULL,
    time TIME NOT NULL,
    comment TEXT NOT NULL DEFAULT ''
);

CREATE INDEX idx_expenses_account ON expenses(account_id);
CREATE INDEX idx_expenses_category ON expenses(category_id);
";

const INCOME_SQL: &str = r"
CREATE TABLE income (
    id SERIAL PRIMARY KEY,
    category_id INTEGER NOT NULL,
    account_id INTEGER NOT NULL,
    amount BIGINT NOT NULL,
    date DATE NOT NULL,
    time TIME NOT NULL,
    comment TEXT NOT NULL DEFAULT ''
);

CREATE INDEX idx_income_account ON income(account_id);
CREATE INDEX idx_income_category ON income(category_id);
";

const DROP_ALL_SQL: &str = r"
DROP TABLE IF EXISTS income;
DROP TABLE IF EXISTS expenses;
DROP TABLE IF EXISTS income_categories;
DROP TABLE IF EXISTS expense_categories;
DROP TABLE IF EXISTS accounts;
";
