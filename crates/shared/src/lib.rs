//! Shared types and configuration for Centavo.
//!
//! This crate provides common vocabulary used across all other crates:
//! - Category and entry kinds for the two ledger-entry families
//! - Balance arithmetic for the entry/balance consistency protocol
//! - Configuration management

pub mod config;
pub mod types;

pub use config::AppConfig;
pub use types::{CategoryKind, EntryKind, balance_delta};
