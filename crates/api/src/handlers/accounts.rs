//! Account handlers.

use serde::Deserialize;
use tracing::{error, info};

use centavo_db::repositories::account::AccountRepository;

use super::{parse_body, to_json};
use crate::AppState;
use crate::query;
use crate::response::Outcome;

/// Request body for creating an account.
#[derive(Debug, Deserialize)]
struct CreateAccountRequest {
    /// Account name.
    name: String,
    /// Opening balance in minor currency units.
    #[serde(default)]
    amount: i64,
}

/// Request body for the account upsert.
#[derive(Debug, Deserialize)]
struct ModifyAccountRequest {
    /// Target account; absent from the store means "create".
    id_account: i32,
    /// New account name.
    name: String,
    /// New balance; omitted keeps the stored balance on the update branch
    /// and opens at zero on the create branch.
    amount: Option<i64>,
}

/// POST `/accounts` - Create an account.
pub async fn create(state: &AppState, body: &[u8]) -> Outcome {
    let payload: CreateAccountRequest = match parse_body(body) {
        Ok(payload) => payload,
        Err(outcome) => return outcome,
    };

    let repo = AccountRepository::new((*state.db).clone());
    match repo.create(&payload.name, payload.amount).await {
        Ok(account) => {
            info!(account_id = account.id, name = %account.name, "Account created");
            Outcome::Created
        }
        Err(err) => {
            error!(error = %err, "Failed to create account");
            Outcome::BadRequest(err.to_string())
        }
    }
}

/// PUT `/accounts` - Create the account if its id is absent, else update it.
pub async fn modify(state: &AppState, body: &[u8]) -> Outcome {
    let payload: ModifyAccountRequest = match parse_body(body) {
        Ok(payload) => payload,
        Err(outcome) => return outcome,
    };

    let repo = AccountRepository::new((*state.db).clone());
    match repo
        .upsert(payload.id_account, &payload.name, payload.amount)
        .await
    {
        Ok(account) => {
            info!(account_id = account.id, name = %account.name, "Account upserted");
            Outcome::Ok
        }
        Err(err) => {
            error!(account_id = payload.id_account, error = %err, "Failed to upsert account");
            Outcome::BadRequest(err.to_string())
        }
    }
}

/// GET `/accounts[?id=N]` - Fetch one account or list all of them.
pub async fn get(state: &AppState, target: &str) -> Outcome {
    let repo = AccountRepository::new((*state.db).clone());
    match query::extract_optional_id(target) {
        Ok(Some(id)) => match repo.find(id).await {
            Ok(Some(account)) => to_json(&account),
            Ok(None) => Outcome::BadRequest("Account doesn't exist".to_string()),
            Err(err) => {
                error!(account_id = id, error = %err, "Failed to fetch account");
                Outcome::BadRequest(err.to_string())
            }
        },
        Ok(None) => match repo.list().await {
            Ok(accounts) => to_json(&accounts),
            Err(err) => {
                error!(error = %err, "Failed to list accounts");
                Outcome::BadRequest(err.to_string())
            }
        },
        Err(err) => Outcome::BadRequest(err.to_string()),
    }
}

/// DELETE `/accounts?id=N` - Delete an account; its entries are retained.
pub async fn delete(state: &AppState, target: &str) -> Outcome {
    let id = match query::extract_id(target) {
        Ok(id) => id,
        Err(err) => return Outcome::BadRequest(err.to_string()),
    };

    let repo = AccountRepository::new((*state.db).clone());
    if !repo.exists(id).await {
        return Outcome::BadRequest("Account doesn't exist".to_string());
    }
    match repo.delete(id).await {
        Ok(()) => {
            info!(account_id = id, "Account deleted");
            Outcome::Ok
        }
        Err(err) => {
            error!(account_id = id, error = %err, "Failed to delete account");
            Outcome::BadRequest(err.to_string())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_defaults_amount_to_zero() {
        let payload: CreateAccountRequest =
            serde_json::from_str(r#"{"name":"Wallet"}"#).expect("payload should parse");
        assert_eq!(payload.name, "Wallet");
        assert_eq!(payload.amount, 0);
    }

    #[test]
    fn test_create_requires_name() {
        let err = serde_json::from_str::<CreateAccountRequest>(r#"{"amount":100}"#)
            .expect_err("missing name should fail");
        assert!(err.to_string().contains("name"));
    }

    #[test]
    fn test_modify_amount_is_optional() {
        let payload: ModifyAccountRequest =
            serde_json::from_str(r#"{"id_account":7,"name":"Card"}"#)
                .expect("payload should parse");
        assert_eq!(payload.id_account, 7);
        assert_eq!(payload.amount, None);

        let payload: ModifyAccountRequest =
            serde_json::from_str(r#"{"id_account":7,"name":"Card","amount":2500}"#)
                .expect("payload should parse");
        assert_eq!(payload.amount, Some(2500));
    }
}
