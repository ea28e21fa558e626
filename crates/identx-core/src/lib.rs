//! IdentX Core - tenant model and query engine
//!
//! This crate provides:
//! - The `Tenant` identity entity
//! - The `TenantStore` storage contract and an in-memory implementation
//! - A fluent tenant query builder with exact, membership and `%`-pattern
//!   filters, multi-key ordering, pagination, and cardinality-checked
//!   single results
//! - The `IdentityService` facade that saves, deletes and queries tenants
//! - The error and structured logging facilities shared by all IdentX crates

pub mod errors;
pub mod identity_service;
pub mod logging_facility;
pub mod model;
pub mod ops;
pub mod queries;

pub use identx_core_types as core_types;

#[doc(hidden)]
pub use tracing as __tracing;

// Re-export commonly used types
pub use errors::{ExError, ExErrorKind, IdentityError, Result};
pub use identity_service::IdentityService;
pub use model::Tenant;
pub use ops::{InMemoryTenantStore, TenantStore};
pub use queries::TenantQuery;
