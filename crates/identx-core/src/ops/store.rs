use std::collections::BTreeMap;
use std::sync::{Arc, RwLock};

use crate::errors::{ExError, ExErrorKind, Result};
use crate::model::Tenant;

/// Storage contract consumed by the query engine and the identity service
///
/// Implementations own their locking: every method takes `&self` and each
/// call must observe a consistent snapshot. `enumerate_all` returns tenants in
/// the store's natural order, which must be deterministic. Writes made by
/// `put`/`delete` are visible to every later `enumerate_all`.
pub trait TenantStore: Send + Sync {
    /// Every persisted tenant, in store order
    fn enumerate_all(&self) -> Result<Vec<Tenant>>;

    fn get(&self, id: &str) -> Result<Option<Tenant>>;

    /// Insert or replace the tenant with the same id
    fn put(&self, tenant: Tenant) -> Result<()>;

    /// Remove a tenant, returning whether it existed
    fn delete(&self, id: &str) -> Result<bool>;
}

impl<S: TenantStore + ?Sized> TenantStore for Arc<S> {
    fn enumerate_all(&self) -> Result<Vec<Tenant>> {
        (**self).enumerate_all()
    }

    fn get(&self, id: &str) -> Result<Option<Tenant>> {
        (**self).get(id)
    }

    fn put(&self, tenant: Tenant) -> Result<()> {
        (**self).put(tenant)
    }

    fn delete(&self, id: &str) -> Result<bool> {
        (**self).delete(id)
    }
}

/// In-memory tenant store
///
/// Backed by a `BTreeMap`, so enumeration order is id order. Safe to share
/// across threads.
#[derive(Debug, Default)]
pub struct InMemoryTenantStore {
    tenants: RwLock<BTreeMap<String, Tenant>>,
}

impl InMemoryTenantStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> Result<usize> {
        Ok(self.read("len")?.len())
    }

    pub fn is_empty(&self) -> Result<bool> {
        Ok(self.len()? == 0)
    }

    fn read(
        &self,
        op: &str,
    ) -> Result<std::sync::RwLockReadGuard<'_, BTreeMap<String, Tenant>>> {
        self.tenants.read().map_err(|_| poisoned(op))
    }

    fn write(
        &self,
        op: &str,
    ) -> Result<std::sync::RwLockWriteGuard<'_, BTreeMap<String, Tenant>>> {
        self.tenants.write().map_err(|_| poisoned(op))
    }
}

fn poisoned(op: &str) -> crate::errors::IdentityError {
    ExError::new(ExErrorKind::Concurrency)
        .with_op(op.to_string())
        .with_message("tenant store lock poisoned")
        .into()
}

impl TenantStore for InMemoryTenantStore {
    fn enumerate_all(&self) -> Result<Vec<Tenant>> {
        Ok(self.read("enumerate_all")?.values().cloned().collect())
    }

    fn get(&self, id: &str) -> Result<Option<Tenant>> {
        Ok(self.read("get")?.get(id).cloned())
    }

    fn put(&self, tenant: Tenant) -> Result<()> {
        self.write("put")?.insert(tenant.id().to_string(), tenant);
        Ok(())
    }

    fn delete(&self, id: &str) -> Result<bool> {
        Ok(self.write("delete")?.remove(id).is_some())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_store_is_empty() {
        let store = InMemoryTenantStore::new();
        assert!(store.is_empty().unwrap());
        assert!(store.enumerate_all().unwrap().is_empty());
    }

    #[test]
    fn test_put_replaces_by_id() {
        let store = InMemoryTenantStore::new();
        store.put(Tenant::with_name("tenant1", "Tenant 1")).unwrap();
        store.put(Tenant::with_name("tenant1", "Renamed")).unwrap();

        assert_eq!(store.len().unwrap(), 1);
        let tenant = store.get("tenant1").unwrap().unwrap();
        assert_eq!(tenant.name(), Some("Renamed"));
    }

    #[test]
    fn test_enumeration_is_id_ordered() {
        let store = InMemoryTenantStore::new();
        store.put(Tenant::new("b")).unwrap();
        store.put(Tenant::new("a")).unwrap();
        store.put(Tenant::new("c")).unwrap();

        let ids: Vec<String> = store
            .enumerate_all()
            .unwrap()
            .iter()
            .map(|t| t.id().to_string())
            .collect();
        assert_eq!(ids, vec!["a", "b", "c"]);
    }

    #[test]
    fn test_delete_reports_existence() {
        let store = InMemoryTenantStore::new();
        store.put(Tenant::new("tenant1")).unwrap();

        assert!(store.delete("tenant1").unwrap());
        assert!(!store.delete("tenant1").unwrap());
        assert_eq!(store.get("tenant1").unwrap(), None);
    }

    #[test]
    fn test_shared_through_arc() {
        let store = Arc::new(InMemoryTenantStore::new());
        let writer = Arc::clone(&store);

        std::thread::spawn(move || writer.put(Tenant::new("tenant1")).unwrap())
            .join()
            .unwrap();

        assert!(store.get("tenant1").unwrap().is_some());
    }
}
