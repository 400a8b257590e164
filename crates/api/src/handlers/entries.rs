//! Expense and income entry handlers.
//!
//! Entry creation couples the insert with the account-balance adjustment in
//! one store transaction (the balance-consistency protocol); deletion
//! reverses the adjustment the same way. Referenced records are validated
//! before any mutating statement is issued.

use chrono::{Local, NaiveDate, NaiveTime};
use serde::Deserialize;
use tracing::{error, info};

use centavo_db::repositories::account::AccountRepository;
use centavo_db::repositories::category::CategoryRepository;
use centavo_db::repositories::entry::{EntryError, EntryRepository, NewEntry};
use centavo_shared::types::EntryKind;

use super::{parse_body, to_json};
use crate::AppState;
use crate::query;
use crate::response::Outcome;

/// Request body for creating an expense entry.
#[derive(Debug, Deserialize)]
struct CreateExpenseRequest {
    /// Referenced expense category.
    id_cat: i32,
    /// Referenced account.
    id_account: i32,
    /// Entry amount in minor currency units, non-negative.
    amount: i64,
    /// Entry date; server-local today when omitted.
    date: Option<NaiveDate>,
    /// Entry time; server-local now when omitted.
    time: Option<NaiveTime>,
    /// Free-form comment.
    #[serde(default)]
    comment: String,
}

/// Request body for creating an income entry.
#[derive(Debug, Deserialize)]
struct CreateIncomeRequest {
    /// Referenced income category.
    id_income_cat: i32,
    /// Referenced account.
    id_account: i32,
    /// Entry amount in minor currency units, non-negative.
    amount: i64,
    /// Entry date; server-local today when omitted.
    date: Option<NaiveDate>,
    /// Entry time; server-local now when omitted.
    time: Option<NaiveTime>,
    /// Free-form comment.
    #[serde(default)]
    comment: String,
}

/// Decoded entry fields, before defaults are applied.
struct EntryInput {
    category_id: i32,
    account_id: i32,
    amount: i64,
    date: Option<NaiveDate>,
    time: Option<NaiveTime>,
    comment: String,
}

impl From<CreateExpenseRequest> for EntryInput {
    fn from(payload: CreateExpenseRequest) -> Self {
        Self {
            category_id: payload.id_cat,
            account_id: payload.id_account,
            amount: payload.amount,
            date: payload.date,
            time: payload.time,
            comment: payload.comment,
        }
    }
}

impl From<CreateIncomeRequest> for EntryInput {
    fn from(payload: CreateIncomeRequest) -> Self {
        Self {
            category_id: payload.id_income_cat,
            account_id: payload.id_account,
            amount: payload.amount,
            date: payload.date,
            time: payload.time,
            comment: payload.comment,
        }
    }
}

/// POST `/expenses` - Record an expense and debit its account.
pub async fn create_expense(state: &AppState, body: &[u8]) -> Outcome {
    let payload: CreateExpenseRequest = match parse_body(body) {
        Ok(payload) => payload,
        Err(outcome) => return outcome,
    };
    create(state, EntryKind::Expense, payload.into()).await
}

/// POST `/income` - Record an income and credit its account.
pub async fn create_income(state: &AppState, body: &[u8]) -> Outcome {
    let payload: CreateIncomeRequest = match parse_body(body) {
        Ok(payload) => payload,
        Err(outcome) => return outcome,
    };
    create(state, EntryKind::Income, payload.into()).await
}

async fn create(state: &AppState, kind: EntryKind, input: EntryInput) -> Outcome {
    if input.amount < 0 {
        return Outcome::BadRequest("Amount must be non-negative".to_string());
    }

    let accounts = AccountRepository::new((*state.db).clone());
    if !accounts.exists(input.account_id).await {
        return Outcome::BadRequest("Account doesn't exist".to_string());
    }
    let categories = CategoryRepository::new((*state.db).clone());
    if !categories
        .exists(kind.category_kind(), input.category_id)
        .await
    {
        return Outcome::BadRequest("Category doesn't exist".to_string());
    }

    let now = Local::now();
    let entry = NewEntry {
        category_id: input.category_id,
        account_id: input.account_id,
        amount: input.amount,
        date: input.date.unwrap_or_else(|| now.date_naive()),
        time: input.time.unwrap_or_else(|| now.time()),
        comment: input.comment,
    };
    match EntryRepository::new((*state.db).clone()).record(kind, entry).await {
        Ok(record) => {
            info!(
                kind = %kind,
                entry_id = record.id,
                account_id = record.account_id,
                amount = record.amount,
                "Entry recorded"
            );
            Outcome::Created
        }
        Err(err) => {
            error!(kind = %kind, error = %err, "Failed to record entry");
            Outcome::BadRequest(err.to_string())
        }
    }
}

/// GET `/expenses[?id=N]` / `/income[?id=N]` - Fetch one entry or list all.
pub async fn get(state: &AppState, kind: EntryKind, target: &str) -> Outcome {
    let repo = EntryRepository::new((*state.db).clone());
    match query::extract_optional_id(target) {
        Ok(Some(id)) => match repo.find(kind, id).await {
            Ok(Some(record)) => to_json(&record),
            Ok(None) => Outcome::BadRequest(EntryError::not_found(kind).to_string()),
            Err(err) => {
                error!(kind = %kind, entry_id = id, error = %err, "Failed to fetch entry");
                Outcome::BadRequest(err.to_string())
            }
        },
        Ok(None) => match repo.list(kind).await {
            Ok(records) => to_json(&records),
            Err(err) => {
                error!(kind = %kind, error = %err, "Failed to list entries");
                Outcome::BadRequest(err.to_string())
            }
        },
        Err(err) => Outcome::BadRequest(err.to_string()),
    }
}

/// DELETE `/expenses?id=N` / `/income?id=N` - Delete an entry and restore
/// its account balance.
pub async fn delete(state: &AppState, kind: EntryKind, target: &str) -> Outcome {
    let id = match query::extract_id(target) {
        Ok(id) => id,
        Err(err) => return Outcome::BadRequest(err.to_string()),
    };

    let repo = EntryRepository::new((*state.db).clone());
    if !repo.exists(kind, id).await {
        return Outcome::BadRequest(EntryError::not_found(kind).to_string());
    }
    match repo.delete(kind, id).await {
        Ok(()) => {
            info!(kind = %kind, entry_id = id, "Entry deleted, balance restored");
            Outcome::Ok
        }
        Err(err) => {
            error!(kind = %kind, entry_id = id, error = %err, "Failed to delete entry");
            Outcome::BadRequest(err.to_string())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    use sea_orm::DatabaseConnection;

    use crate::AppState;

    fn disconnected_state() -> AppState {
        AppState {
            db: Arc::new(DatabaseConnection::default()),
        }
    }

    #[test]
    fn test_expense_payload_defaults() {
        let payload: CreateExpenseRequest =
            serde_json::from_str(r#"{"id_cat":1,"id_account":2,"amount":350}"#)
                .expect("payload should parse");
        assert_eq!(payload.id_cat, 1);
        assert_eq!(payload.id_account, 2);
        assert_eq!(payload.amount, 350);
        assert_eq!(payload.date, None);
        assert_eq!(payload.time, None);
        assert_eq!(payload.comment, "");
    }

    #[test]
    fn test_income_payload_uses_its_own_category_field() {
        let payload: CreateIncomeRequest = serde_json::from_str(
            r#"{"id_income_cat":4,"id_account":2,"amount":100000,"comment":"salary"}"#,
        )
        .expect("payload should parse");
        assert_eq!(payload.id_income_cat, 4);
        assert_eq!(payload.comment, "salary");

        let err = serde_json::from_str::<CreateIncomeRequest>(
            r#"{"id_cat":4,"id_account":2,"amount":100000}"#,
        )
        .expect_err("expense field name should not satisfy income payload");
        assert!(err.to_string().contains("id_income_cat"));
    }

    #[test]
    fn test_explicit_date_and_time_are_kept() {
        let payload: CreateExpenseRequest = serde_json::from_str(
            r#"{"id_cat":1,"id_account":2,"amount":350,"date":"2026-02-10","time":"12:30:00"}"#,
        )
        .expect("payload should parse");
        assert_eq!(payload.date, NaiveDate::from_ymd_opt(2026, 2, 10));
        assert_eq!(payload.time, NaiveTime::from_hms_opt(12, 30, 0));
    }

    /// Negative amounts are rejected before any store access.
    #[tokio::test]
    async fn test_negative_amount_is_rejected() {
        let state = disconnected_state();
        let outcome = create(
            &state,
            EntryKind::Expense,
            EntryInput {
                category_id: 1,
                account_id: 2,
                amount: -1,
                date: None,
                time: None,
                comment: String::new(),
            },
        )
        .await;
        assert_eq!(
            outcome,
            Outcome::BadRequest("Amount must be non-negative".to_string())
        );
    }

    /// With an unreachable store the existence check fails closed: the
    /// foreign key is treated as absent and nothing is mutated.
    #[tokio::test]
    async fn test_unreachable_store_fails_closed() {
        let state = disconnected_state();
        let outcome = create(
            &state,
            EntryKind::Income,
            EntryInput {
                category_id: 1,
                account_id: 2,
                amount: 500,
                date: None,
                time: None,
                comment: String::new(),
            },
        )
        .await;
        assert_eq!(
            outcome,
            Outcome::BadRequest("Account doesn't exist".to_string())
        );
    }
}
