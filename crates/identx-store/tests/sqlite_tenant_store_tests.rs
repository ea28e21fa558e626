//! Tenant queries run against the SQLite store

use identx_core::{IdentityError, IdentityService, Tenant, TenantStore};
use identx_store::SqliteTenantStore;
use tempfile::TempDir;

fn setup_two_tenants() -> IdentityService<SqliteTenantStore> {
    let service = IdentityService::new(SqliteTenantStore::open_in_memory().unwrap());
    service
        .save_tenant(&Tenant::with_name("tenant1", "Tenant 1"))
        .unwrap();
    service
        .save_tenant(&Tenant::with_name("tenant2", "Tenant 2"))
        .unwrap();
    service
}

fn ids(tenants: &[Tenant]) -> Vec<&str> {
    tenants.iter().map(Tenant::id).collect()
}

#[test]
fn test_query_by_id() {
    let service = setup_two_tenants();
    let mut query = service.create_tenant_query();
    query.tenant_id("tenant1").unwrap();

    assert_eq!(query.count().unwrap(), 1);
    let tenant = query.single_result().unwrap().unwrap();
    assert_eq!(tenant.name(), Some("Tenant 1"));
}

#[test]
fn test_query_by_name_like() {
    let service = setup_two_tenants();
    let mut query = service.create_tenant_query();

    assert_eq!(query.tenant_name_like("%Tenant%").unwrap().count().unwrap(), 2);
    assert_eq!(query.tenant_name_like("%1").unwrap().count().unwrap(), 1);
    assert_eq!(query.tenant_name_like("tenant%").unwrap().count().unwrap(), 0);
}

#[test]
fn test_ordering_and_pagination() {
    let service = setup_two_tenants();
    service
        .save_tenant(&Tenant::with_name("tenant0", "Tenant 0"))
        .unwrap();

    let mut query = service.create_tenant_query();
    query.order_by_tenant_name().desc().unwrap();

    assert_eq!(
        ids(&query.list().unwrap()),
        vec!["tenant2", "tenant1", "tenant0"]
    );
    assert_eq!(ids(&query.list_page(1, 5).unwrap()), vec!["tenant1", "tenant0"]);
}

#[test]
fn test_unordered_list_follows_insertion_order() {
    let service = IdentityService::new(SqliteTenantStore::open_in_memory().unwrap());
    for id in ["c", "a", "b"] {
        service.save_tenant(&Tenant::new(id)).unwrap();
    }

    let tenants = service.create_tenant_query().list().unwrap();
    assert_eq!(ids(&tenants), vec!["c", "a", "b"]);
}

#[test]
fn test_single_result_too_many() {
    let service = setup_two_tenants();
    let query = service.create_tenant_query();

    assert_eq!(
        query.single_result(),
        Err(IdentityError::TooManyResults { count: 2 })
    );
}

#[test]
fn test_tenants_survive_reopen() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("nested").join("identity.db");

    {
        let store = SqliteTenantStore::open(&path).unwrap();
        store.put(Tenant::with_name("tenant1", "Tenant 1")).unwrap();
        store.put(Tenant::new("tenant2")).unwrap();
    }

    let service = IdentityService::new(SqliteTenantStore::open(&path).unwrap());
    let mut query = service.create_tenant_query();
    query.tenant_id_in(["tenant1", "tenant2"]).order_by_tenant_id();

    let tenants = query.list().unwrap();
    assert_eq!(ids(&tenants), vec!["tenant1", "tenant2"]);
    assert_eq!(tenants[1].name(), None);
}

#[test]
fn test_delete_through_service() {
    let service = setup_two_tenants();
    service.delete_tenant("tenant1").unwrap();
    service.delete_tenant("tenant1").unwrap();

    assert_eq!(service.store().enumerate_all().unwrap().len(), 1);
}
