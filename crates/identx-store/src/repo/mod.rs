//! Repository layer: SQLite-backed implementations of core store traits

pub mod sqlite_tenant_store;

pub use sqlite_tenant_store::SqliteTenantStore;
