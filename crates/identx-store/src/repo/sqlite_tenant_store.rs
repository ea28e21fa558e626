//! SQLite-backed tenant store

#![allow(clippy::result_large_err)]

use std::path::Path;
use std::sync::{Mutex, MutexGuard};

use identx_core::errors::Result as CoreResult;
use identx_core::{Tenant, TenantStore};
use rusqlite::{Connection, OptionalExtension};

use crate::db;
use crate::errors::{from_rusqlite, lock_poisoned, Result};
use crate::migrations::apply_migrations;

/// Tenant store persisted in a single SQLite database
///
/// The connection is guarded by a mutex, so the store can be shared across
/// threads. Enumeration follows insertion order (`rowid`); an upsert of an
/// existing id keeps its original position.
pub struct SqliteTenantStore {
    conn: Mutex<Connection>,
}

impl SqliteTenantStore {
    /// Open (or create) a database file and bring its schema up to date
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        Self::from_connection(db::open(path)?)
    }

    /// Fresh in-memory database, mostly useful in tests
    pub fn open_in_memory() -> Result<Self> {
        Self::from_connection(db::open_in_memory()?)
    }

    /// Wrap an existing connection, applying configuration and migrations
    pub fn from_connection(mut conn: Connection) -> Result<Self> {
        db::configure(&conn)?;
        apply_migrations(&mut conn)?;
        Ok(Self {
            conn: Mutex::new(conn),
        })
    }

    fn lock(&self, op: &str) -> Result<MutexGuard<'_, Connection>> {
        self.conn.lock().map_err(|_| lock_poisoned(op))
    }
}

impl std::fmt::Debug for SqliteTenantStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SqliteTenantStore").finish_non_exhaustive()
    }
}

impl TenantStore for SqliteTenantStore {
    fn enumerate_all(&self) -> CoreResult<Vec<Tenant>> {
        let conn = self.lock("enumerate_all")?;
        let mut stmt = conn
            .prepare("SELECT id, name FROM tenants ORDER BY rowid")
            .map_err(from_rusqlite)?;

        let tenants = stmt
            .query_map([], |row| {
                Ok(tenant_from_columns(row.get(0)?, row.get(1)?))
            })
            .map_err(from_rusqlite)?
            .collect::<std::result::Result<Vec<_>, _>>()
            .map_err(from_rusqlite)?;

        Ok(tenants)
    }

    fn get(&self, id: &str) -> CoreResult<Option<Tenant>> {
        let conn = self.lock("get")?;
        let tenant = conn
            .query_row(
                "SELECT id, name FROM tenants WHERE id = ?1",
                [id],
                |row| Ok(tenant_from_columns(row.get(0)?, row.get(1)?)),
            )
            .optional()
            .map_err(|e| from_rusqlite(e).with_entity_id(id))?;

        Ok(tenant)
    }

    fn put(&self, tenant: Tenant) -> CoreResult<()> {
        let conn = self.lock("put")?;
        conn.execute(
            "INSERT INTO tenants (id, name) VALUES (?1, ?2)
             ON CONFLICT(id) DO UPDATE SET name = excluded.name",
            rusqlite::params![tenant.id(), tenant.name()],
        )
        .map_err(|e| from_rusqlite(e).with_entity_id(tenant.id()))?;

        Ok(())
    }

    fn delete(&self, id: &str) -> CoreResult<bool> {
        let conn = self.lock("delete")?;
        let changed = conn
            .execute("DELETE FROM tenants WHERE id = ?1", [id])
            .map_err(|e| from_rusqlite(e).with_entity_id(id))?;

        Ok(changed > 0)
    }
}

fn tenant_from_columns(id: String, name: Option<String>) -> Tenant {
    let mut tenant = Tenant::new(id);
    if let Some(name) = name {
        tenant.set_name(name);
    }
    tenant
}
