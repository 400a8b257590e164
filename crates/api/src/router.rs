//! Request routing.
//!
//! A static table maps (HTTP verb, path matcher) to one of sixteen tagged
//! operations, matched once per request. Routing is a pure function of its
//! two inputs: no I/O, no side effects.

use hyper::Method;

/// The sixteen ledger operations reachable over the wire.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    /// POST /accounts
    CreateAccount,
    /// POST /expenses
    CreateExpense,
    /// POST /income
    CreateIncome,
    /// POST /categories/{kind}
    CreateCategory,
    /// PUT /accounts
    ModifyAccount,
    /// PUT /expenses
    ModifyExpense,
    /// PUT /income
    ModifyIncome,
    /// PUT /categories/{kind}
    ModifyCategory,
    /// GET /accounts
    GetAccount,
    /// GET /expenses
    GetExpense,
    /// GET /income
    GetIncome,
    /// GET /categories/{kind}
    GetCategory,
    /// DELETE /accounts?id=N
    DeleteAccount,
    /// DELETE /expenses?id=N
    DeleteExpense,
    /// DELETE /income?id=N
    DeleteIncome,
    /// DELETE /categories/{kind}?id=N
    DeleteCategory,
}

/// Routing failure, reported to the caller as a bad request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum RouteError {
    /// No table row matches the request target.
    #[error("Unknown path")]
    UnknownPath,

    /// Verb outside GET/POST/PUT/DELETE.
    #[error("Unknown HTTP-method")]
    UnknownMethod,
}

/// How a table row matches the request target.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum PathMatch {
    /// The target must equal the pattern exactly.
    Exact(&'static str),
    /// The target must start with the pattern (anchored at the start).
    Prefix(&'static str),
}

impl PathMatch {
    fn matches(self, target: &str) -> bool {
        match self {
            Self::Exact(pattern) => target == pattern,
            Self::Prefix(pattern) => target.starts_with(pattern),
        }
    }
}

/// The routing table. POST/PUT match exactly, except the categories family
/// which carries its kind (and, for deletes, its query) in the target;
/// GET/DELETE match on prefix for all four resource families.
static ROUTES: &[(Method, PathMatch, Operation)] = &[
    (Method::POST, PathMatch::Exact("/accounts"), Operation::CreateAccount),
    (Method::POST, PathMatch::Exact("/expenses"), Operation::CreateExpense),
    (Method::POST, PathMatch::Exact("/income"), Operation::CreateIncome),
    (Method::POST, PathMatch::Prefix("/categories"), Operation::CreateCategory),
    (Method::PUT, PathMatch::Exact("/accounts"), Operation::ModifyAccount),
    (Method::PUT, PathMatch::Exact("/expenses"), Operation::ModifyExpense),
    (Method::PUT, PathMatch::Exact("/income"), Operation::ModifyIncome),
    (Method::PUT, PathMatch::Prefix("/categories"), Operation::ModifyCategory),
    (Method::GET, PathMatch::Prefix("/accounts"), Operation::GetAccount),
    (Method::GET, PathMatch::Prefix("/expenses"), Operation::GetExpense),
    (Method::GET, PathMatch::Prefix("/income"), Operation::GetIncome),
    (Method::GET, PathMatch::Prefix("/categories"), Operation::GetCategory),
    (Method::DELETE, PathMatch::Prefix("/accounts"), Operation::DeleteAccount),
    (Method::DELETE, PathMatch::Prefix("/expenses"), Operation::DeleteExpense),
    (Method::DELETE, PathMatch::Prefix("/income"), Operation::DeleteIncome),
    (Method::DELETE, PathMatch::Prefix("/categories"), Operation::DeleteCategory),
];

/// Resolves a request (verb, target) to an operation.
///
/// # Errors
///
/// Returns [`RouteError::UnknownMethod`] for verbs outside the table and
/// [`RouteError::UnknownPath`] when no row matches the target.
pub fn route(method: &Method, target: &str) -> Result<Operation, RouteError> {
    if ![Method::GET, Method::POST, Method::PUT, Method::DELETE].contains(method) {
        return Err(RouteError::UnknownMethod);
    }
    ROUTES
        .iter()
        .find(|(verb, matcher, _)| verb == method && matcher.matches(target))
        .map(|&(_, _, operation)| operation)
        .ok_or(RouteError::UnknownPath)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(Method::POST, "/accounts", Operation::CreateAccount)]
    #[case(Method::POST, "/expenses", Operation::CreateExpense)]
    #[case(Method::POST, "/income", Operation::CreateIncome)]
    #[case(Method::POST, "/categories/expenses", Operation::CreateCategory)]
    #[case(Method::POST, "/categories/income", Operation::CreateCategory)]
    #[case(Method::PUT, "/accounts", Operation::ModifyAccount)]
    #[case(Method::PUT, "/expenses", Operation::ModifyExpense)]
    #[case(Method::PUT, "/income", Operation::ModifyIncome)]
    #[case(Method::PUT, "/categories/income", Operation::ModifyCategory)]
    #[case(Method::GET, "/accounts", Operation::GetAccount)]
    #[case(Method::GET, "/accounts?id=1", Operation::GetAccount)]
    #[case(Method::GET, "/expenses", Operation::GetExpense)]
    #[case(Method::GET, "/income", Operation::GetIncome)]
    #[case(Method::GET, "/categories/expenses", Operation::GetCategory)]
    #[case(Method::DELETE, "/accounts?id=5", Operation::DeleteAccount)]
    #[case(Method::DELETE, "/expenses?id=5", Operation::DeleteExpense)]
    #[case(Method::DELETE, "/income?id=5", Operation::DeleteIncome)]
    #[case(Method::DELETE, "/categories/income?id=5", Operation::DeleteCategory)]
    fn test_route_table(
        #[case] method: Method,
        #[case] target: &str,
        #[case] expected: Operation,
    ) {
        assert_eq!(route(&method, target), Ok(expected));
    }

    #[rstest]
    #[case(Method::POST, "/wallets")]
    #[case(Method::GET, "/")]
    #[case(Method::GET, "/v1/accounts")]
    #[case(Method::GET, "/xaccounts")]
    #[case(Method::DELETE, "/budget?id=1")]
    // POST and PUT require exact targets outside the categories family.
    #[case(Method::POST, "/accounts?id=1")]
    #[case(Method::PUT, "/accounts/7")]
    fn test_unknown_path(#[case] method: Method, #[case] target: &str) {
        assert_eq!(route(&method, target), Err(RouteError::UnknownPath));
    }

    #[test]
    fn test_unknown_method() {
        assert_eq!(
            route(&Method::PATCH, "/accounts"),
            Err(RouteError::UnknownMethod)
        );
        assert_eq!(
            route(&Method::HEAD, "/accounts"),
            Err(RouteError::UnknownMethod)
        );
    }

    #[test]
    fn test_error_reasons() {
        assert_eq!(RouteError::UnknownPath.to_string(), "Unknown path");
        assert_eq!(RouteError::UnknownMethod.to_string(), "Unknown HTTP-method");
    }

    /// Prefix matching is anchored: a pattern occurring later in the target
    /// must not match.
    #[test]
    fn test_prefix_is_anchored() {
        assert_eq!(
            route(&Method::GET, "/old/accounts"),
            Err(RouteError::UnknownPath)
        );
    }
}
