//! IdentX Store - SQLite persistence for identity entities
//!
//! Provides:
//! - Connection helpers
//! - Embedded, checksummed schema migrations
//! - `SqliteTenantStore`, a `TenantStore` backed by SQLite

pub mod db;
pub mod errors;
pub mod migrations;
pub mod repo;

// Re-export key types
pub use errors::Result;
pub use repo::SqliteTenantStore;
