use identx_core::errors::{ExError, ExErrorKind, Result};
use identx_core::{IdentityService, InMemoryTenantStore, Tenant, TenantStore};

/// Create and save a tenant the way a caller of the service would
#[allow(dead_code)]
pub fn create_tenant(
    service: &IdentityService<InMemoryTenantStore>,
    id: &str,
    name: &str,
) -> Tenant {
    let mut tenant = service.new_tenant(id).unwrap();
    tenant.set_name(name);
    service.save_tenant(&tenant).unwrap();
    tenant
}

/// Service over a fresh in-memory store holding `tenant1`/`Tenant 1` and
/// `tenant2`/`Tenant 2`
#[allow(dead_code)]
pub fn setup_two_tenants() -> IdentityService<InMemoryTenantStore> {
    let service = IdentityService::new(InMemoryTenantStore::new());
    create_tenant(&service, "tenant1", "Tenant 1");
    create_tenant(&service, "tenant2", "Tenant 2");
    service
}

#[allow(dead_code)]
pub fn ids(tenants: &[Tenant]) -> Vec<&str> {
    tenants.iter().map(|t| t.id()).collect()
}

#[allow(dead_code)]
pub fn names(tenants: &[Tenant]) -> Vec<Option<&str>> {
    tenants.iter().map(|t| t.name()).collect()
}

/// Store whose every call fails with a persistence error
#[allow(dead_code)]
pub struct FailingStore;

#[allow(dead_code)]
pub fn store_failure() -> ExError {
    ExError::new(ExErrorKind::Persistence)
        .with_op("enumerate_all")
        .with_message("connection reset")
}

impl TenantStore for FailingStore {
    fn enumerate_all(&self) -> Result<Vec<Tenant>> {
        Err(store_failure().into())
    }

    fn get(&self, _id: &str) -> Result<Option<Tenant>> {
        Err(store_failure().into())
    }

    fn put(&self, _tenant: Tenant) -> Result<()> {
        Err(store_failure().into())
    }

    fn delete(&self, _id: &str) -> Result<bool> {
        Err(store_failure().into())
    }
}
