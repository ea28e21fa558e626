pub mod store;

pub use store::{InMemoryTenantStore, TenantStore};
