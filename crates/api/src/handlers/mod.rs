//! Operation handlers, one per (resource, verb) pair.
//!
//! Every handler with a body applies the same validation sequence before
//! touching the store: reject an empty body, decode it, check referenced
//! records exist, and only then issue mutating statements. Store rejections
//! during a mutation surface verbatim as the bad-request reason.

pub mod accounts;
pub mod categories;
pub mod entries;

use bytes::Bytes;
use serde::Serialize;
use serde::de::DeserializeOwned;

use centavo_shared::types::EntryKind;

use crate::AppState;
use crate::response::Outcome;
use crate::router::Operation;

/// Runs the routed operation against the shared state.
pub async fn dispatch(
    state: &AppState,
    operation: Operation,
    target: &str,
    body: &[u8],
) -> Outcome {
    match operation {
        Operation::CreateAccount => accounts::create(state, body).await,
        Operation::ModifyAccount => accounts::modify(state, body).await,
        Operation::GetAccount => accounts::get(state, target).await,
        Operation::DeleteAccount => accounts::delete(state, target).await,
        Operation::CreateExpense => entries::create_expense(state, body).await,
        Operation::CreateIncome => entries::create_income(state, body).await,
        // Entry modification is declared surface without semantics; fail
        // loudly instead of pretending an effect occurred.
        Operation::ModifyExpense | Operation::ModifyIncome => Outcome::NotImplemented,
        Operation::GetExpense => entries::get(state, EntryKind::Expense, target).await,
        Operation::GetIncome => entries::get(state, EntryKind::Income, target).await,
        Operation::DeleteExpense => entries::delete(state, EntryKind::Expense, target).await,
        Operation::DeleteIncome => entries::delete(state, EntryKind::Income, target).await,
        Operation::CreateCategory => categories::create(state, target, body).await,
        Operation::ModifyCategory => categories::modify(state, target, body).await,
        Operation::GetCategory => categories::get(state, target).await,
        Operation::DeleteCategory => categories::delete(state, target).await,
    }
}

/// Decodes a JSON request body; the returned outcome is what the handler
/// reports for an empty or malformed body.
fn parse_body<T: DeserializeOwned>(body: &[u8]) -> Result<T, Outcome> {
    if body.is_empty() {
        return Err(Outcome::BadRequest("Request's body is empty".to_string()));
    }
    serde_json::from_slice(body).map_err(|err| Outcome::BadRequest(err.to_string()))
}

/// Serializes a GET body; serialization failure is the one server-error
/// source in handlers.
fn to_json<T: Serialize>(value: &T) -> Outcome {
    match serde_json::to_vec(value) {
        Ok(body) => Outcome::OkJson(Bytes::from(body)),
        Err(err) => Outcome::ServerError(err.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;

    #[derive(Debug, Deserialize)]
    struct Probe {
        name: String,
    }

    #[test]
    fn test_empty_body_is_rejected_before_parsing() {
        let result: Result<Probe, Outcome> = parse_body(b"");
        assert_eq!(
            result.unwrap_err(),
            Outcome::BadRequest("Request's body is empty".to_string())
        );
    }

    #[test]
    fn test_parser_message_is_surfaced() {
        let result: Result<Probe, Outcome> = parse_body(b"{\"nam\":\"x\"}");
        match result.unwrap_err() {
            Outcome::BadRequest(reason) => assert!(reason.contains("name")),
            other => panic!("expected bad request, got {other:?}"),
        }
    }

    #[test]
    fn test_valid_body_parses() {
        let probe: Probe = parse_body(b"{\"name\":\"Wallet\"}").expect("body should parse");
        assert_eq!(probe.name, "Wallet");
    }
}
