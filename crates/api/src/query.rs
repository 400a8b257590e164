//! Request-target parsing helpers.
//!
//! Identifier passing uses the literal query form `?id=<integer>`, and the
//! categories family carries its kind as a path segment. Both parsers are
//! pure and report failures with the client-visible reason.

use centavo_shared::types::CategoryKind;

/// Marker introducing an identifier in a request target.
const ID_MARKER: &str = "?id=";

/// Target parsing failure, reported to the caller as a bad request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum QueryError {
    /// The `?id=` marker is missing or carries no value.
    #[error("Incorrect query")]
    IncorrectQuery,

    /// The identifier is not an integer.
    #[error("ID must be an integer")]
    NotAnInteger,

    /// The categories path names neither kind.
    #[error("Unknown type of categories")]
    UnknownCategoryKind,
}

/// Extracts the mandatory identifier after `?id=`.
///
/// # Errors
///
/// Returns [`QueryError::IncorrectQuery`] when the marker is absent or its
/// value empty, [`QueryError::NotAnInteger`] when the value does not parse.
pub fn extract_id(target: &str) -> Result<i32, QueryError> {
    match target.split_once(ID_MARKER) {
        None => Err(QueryError::IncorrectQuery),
        Some((_, raw)) if raw.is_empty() => Err(QueryError::IncorrectQuery),
        Some((_, raw)) => raw.parse().map_err(|_| QueryError::NotAnInteger),
    }
}

/// Extracts an optional identifier: a missing marker means "all records",
/// while a present-but-invalid identifier is still an error.
///
/// # Errors
///
/// Same as [`extract_id`], except a missing marker is `Ok(None)`.
pub fn extract_optional_id(target: &str) -> Result<Option<i32>, QueryError> {
    match target.split_once(ID_MARKER) {
        None => Ok(None),
        Some((_, raw)) if raw.is_empty() => Err(QueryError::IncorrectQuery),
        Some((_, raw)) => raw.parse().map(Some).map_err(|_| QueryError::NotAnInteger),
    }
}

/// Reads the category kind out of a `/categories/{kind}` target, ignoring
/// anything after the segment (such as an `?id=` query).
///
/// # Errors
///
/// Returns [`QueryError::UnknownCategoryKind`] when the segment names
/// neither family.
pub fn category_kind(target: &str) -> Result<CategoryKind, QueryError> {
    let rest = target
        .strip_prefix("/categories/")
        .ok_or(QueryError::UnknownCategoryKind)?;
    let segment = rest.split(['?', '/']).next().unwrap_or("");
    match segment {
        "expenses" => Ok(CategoryKind::Expense),
        "income" => Ok(CategoryKind::Income),
        _ => Err(QueryError::UnknownCategoryKind),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[test]
    fn test_extract_id() {
        assert_eq!(extract_id("/accounts?id=5"), Ok(5));
        assert_eq!(extract_id("/accounts?id="), Err(QueryError::IncorrectQuery));
        assert_eq!(extract_id("/accounts?id=abc"), Err(QueryError::NotAnInteger));
        assert_eq!(extract_id("/accounts"), Err(QueryError::IncorrectQuery));
    }

    #[test]
    fn test_extract_optional_id() {
        assert_eq!(extract_optional_id("/accounts?id=5"), Ok(Some(5)));
        assert_eq!(extract_optional_id("/accounts"), Ok(None));
        assert_eq!(
            extract_optional_id("/accounts?id="),
            Err(QueryError::IncorrectQuery)
        );
        assert_eq!(
            extract_optional_id("/accounts?id=abc"),
            Err(QueryError::NotAnInteger)
        );
    }

    #[test]
    fn test_extract_id_rejects_fractions() {
        assert_eq!(extract_id("/accounts?id=1.5"), Err(QueryError::NotAnInteger));
        assert_eq!(extract_id("/accounts?id=-3"), Ok(-3));
    }

    #[rstest]
    #[case("/categories/expenses", CategoryKind::Expense)]
    #[case("/categories/income", CategoryKind::Income)]
    #[case("/categories/expenses?id=2", CategoryKind::Expense)]
    #[case("/categories/income?id=2", CategoryKind::Income)]
    fn test_category_kind(#[case] target: &str, #[case] expected: CategoryKind) {
        assert_eq!(category_kind(target), Ok(expected));
    }

    #[rstest]
    #[case("/categories")]
    #[case("/categories/")]
    #[case("/categories/savings")]
    #[case("/categories?id=2")]
    fn test_unknown_category_kind(#[case] target: &str) {
        assert_eq!(category_kind(target), Err(QueryError::UnknownCategoryKind));
    }

    #[test]
    fn test_error_reasons() {
        assert_eq!(QueryError::IncorrectQuery.to_string(), "Incorrect query");
        assert_eq!(QueryError::NotAnInteger.to_string(), "ID must be an integer");
        assert_eq!(
            QueryError::UnknownCategoryKind.to_string(),
            "Unknown type of categories"
        );
    }
}
