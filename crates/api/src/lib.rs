//! HTTP layer: session loop, request router, and operation handlers.
//!
//! This crate provides:
//! - The per-connection session loop over hyper's http1 driver
//! - The static routing table from (method, path matcher) to operations
//! - One operation handler per (resource, verb) pair
//! - Request-target parsing and response mapping

pub mod handlers;
pub mod query;
pub mod response;
pub mod router;
pub mod session;

use sea_orm::DatabaseConnection;
use std::sync::Arc;

pub use session::serve;

/// Application state shared across connection tasks.
///
/// Connection tasks share no other in-process mutable state; concurrent
/// operations on the same account are serialized only by the store's
/// transaction isolation.
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool.
    pub db: Arc<DatabaseConnection>,
}
