//! Category handlers for both kind families.
//!
//! The kind is carried by the `/categories/{expenses|income}` path segment;
//! an unrecognized segment is rejected with "Unknown type of categories".

use serde::Deserialize;
use tracing::{error, info};

use centavo_db::repositories::category::CategoryRepository;

use super::{parse_body, to_json};
use crate::AppState;
use crate::query;
use crate::response::Outcome;

/// Request body for creating a category.
#[derive(Debug, Deserialize)]
struct CreateCategoryRequest {
    /// Category name.
    name: String,
}

/// Request body for the category upsert.
#[derive(Debug, Deserialize)]
struct ModifyCategoryRequest {
    /// Target category; absent from the store means "create".
    id_cat: i32,
    /// New category name.
    name: String,
}

/// POST `/categories/{kind}` - Create a category of the addressed kind.
pub async fn create(state: &AppState, target: &str, body: &[u8]) -> Outcome {
    let payload: CreateCategoryRequest = match parse_body(body) {
        Ok(payload) => payload,
        Err(outcome) => return outcome,
    };
    let kind = match query::category_kind(target) {
        Ok(kind) => kind,
        Err(err) => return Outcome::BadRequest(err.to_string()),
    };

    let repo = CategoryRepository::new((*state.db).clone());
    match repo.create(kind, &payload.name).await {
        Ok(category) => {
            info!(kind = %kind, category_id = category.id, name = %category.name, "Category created");
            Outcome::Created
        }
        Err(err) => {
            error!(kind = %kind, error = %err, "Failed to create category");
            Outcome::BadRequest(err.to_string())
        }
    }
}

/// PUT `/categories/{kind}` - Rename the category if its id exists, else
/// create it.
pub async fn modify(state: &AppState, target: &str, body: &[u8]) -> Outcome {
    let payload: ModifyCategoryRequest = match parse_body(body) {
        Ok(payload) => payload,
        Err(outcome) => return outcome,
    };
    let kind = match query::category_kind(target) {
        Ok(kind) => kind,
        Err(err) => return Outcome::BadRequest(err.to_string()),
    };

    let repo = CategoryRepository::new((*state.db).clone());
    match repo.rename_or_create(kind, payload.id_cat, &payload.name).await {
        Ok(category) => {
            info!(kind = %kind, category_id = category.id, name = %category.name, "Category upserted");
            Outcome::Ok
        }
        Err(err) => {
            error!(kind = %kind, category_id = payload.id_cat, error = %err, "Failed to upsert category");
            Outcome::BadRequest(err.to_string())
        }
    }
}

/// GET `/categories/{kind}[?id=N]` - Fetch one category or list the kind.
pub async fn get(state: &AppState, target: &str) -> Outcome {
    let kind = match query::category_kind(target) {
        Ok(kind) => kind,
        Err(err) => return Outcome::BadRequest(err.to_string()),
    };

    let repo = CategoryRepository::new((*state.db).clone());
    match query::extract_optional_id(target) {
        Ok(Some(id)) => match repo.find(kind, id).await {
            Ok(Some(category)) => to_json(&category),
            Ok(None) => Outcome::BadRequest("Category doesn't exist".to_string()),
            Err(err) => {
                error!(kind = %kind, category_id = id, error = %err, "Failed to fetch category");
                Outcome::BadRequest(err.to_string())
            }
        },
        Ok(None) => match repo.list(kind).await {
            Ok(categories) => to_json(&categories),
            Err(err) => {
                error!(kind = %kind, error = %err, "Failed to list categories");
                Outcome::BadRequest(err.to_string())
            }
        },
        Err(err) => Outcome::BadRequest(err.to_string()),
    }
}

/// DELETE `/categories/{kind}?id=N` - Delete a category of the addressed
/// kind.
pub async fn delete(state: &AppState, target: &str) -> Outcome {
    let kind = match query::category_kind(target) {
        Ok(kind) => kind,
        Err(err) => return Outcome::BadRequest(err.to_string()),
    };
    let id = match query::extract_id(target) {
        Ok(id) => id,
        Err(err) => return Outcome::BadRequest(err.to_string()),
    };

    let repo = CategoryRepository::new((*state.db).clone());
    if !repo.exists(kind, id).await {
        return Outcome::BadRequest("Category doesn't exist".to_string());
    }
    match repo.delete(kind, id).await {
        Ok(()) => {
            info!(kind = %kind, category_id = id, "Category deleted");
            Outcome::Ok
        }
        Err(err) => {
            error!(kind = %kind, category_id = id, error = %err, "Failed to delete category");
            Outcome::BadRequest(err.to_string())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_requires_name() {
        let err = serde_json::from_str::<CreateCategoryRequest>("{}")
            .expect_err("missing name should fail");
        assert!(err.to_string().contains("name"));
    }

    #[test]
    fn test_modify_requires_id() {
        let err = serde_json::from_str::<ModifyCategoryRequest>(r#"{"name":"Food"}"#)
            .expect_err("missing id should fail");
        assert!(err.to_string().contains("id_cat"));

        let payload: ModifyCategoryRequest =
            serde_json::from_str(r#"{"id_cat":2,"name":"Food"}"#).expect("payload should parse");
        assert_eq!(payload.id_cat, 2);
        assert_eq!(payload.name, "Food");
    }
}
