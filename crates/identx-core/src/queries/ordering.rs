//! Multi-key ordering for tenant query results

use std::cmp::Ordering;

use serde::{Deserialize, Serialize};

use crate::errors::{IdentityError, Result};
use crate::model::Tenant;

/// Sortable tenant fields
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TenantField {
    Id,
    Name,
}

impl TenantField {
    /// Compare two tenants on this field, ascending
    ///
    /// Strings compare by code point. An absent name sorts before any
    /// present name.
    fn compare(self, a: &Tenant, b: &Tenant) -> Ordering {
        match self {
            TenantField::Id => a.id().cmp(b.id()),
            TenantField::Name => a.name().cmp(&b.name()),
        }
    }
}

impl std::str::FromStr for TenantField {
    type Err = IdentityError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "id" => Ok(TenantField::Id),
            "name" => Ok(TenantField::Name),
            other => Err(IdentityError::invalid_query(format!(
                "unknown tenant sort field '{}'",
                other
            ))),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SortDir {
    #[default]
    Asc,
    Desc,
}

impl SortDir {
    fn apply(self, ordering: Ordering) -> Ordering {
        match self {
            SortDir::Asc => ordering,
            SortDir::Desc => ordering.reverse(),
        }
    }
}

impl std::str::FromStr for SortDir {
    type Err = IdentityError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "asc" => Ok(SortDir::Asc),
            "desc" => Ok(SortDir::Desc),
            other => Err(IdentityError::invalid_query(format!(
                "unknown sort direction '{}'",
                other
            ))),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderKey {
    pub field: TenantField,
    pub dir: SortDir,
}

/// Ordered list of sort keys; the first key is primary
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OrderingSpec {
    keys: Vec<OrderKey>,
}

impl OrderingSpec {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a sort key, ascending until a direction is set
    pub fn push(&mut self, field: TenantField) {
        self.keys.push(OrderKey {
            field,
            dir: SortDir::Asc,
        });
    }

    /// Set the direction of the most recently registered key
    ///
    /// # Errors
    ///
    /// Returns `InvalidQuery` when no key has been registered yet.
    pub fn set_direction(&mut self, dir: SortDir) -> Result<()> {
        let key = self.keys.last_mut().ok_or_else(|| {
            IdentityError::invalid_query(
                "call an order_by method before specifying a direction",
            )
        })?;
        key.dir = dir;
        Ok(())
    }

    pub fn keys(&self) -> &[OrderKey] {
        &self.keys
    }

    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }

    /// Compare two tenants key by key; later keys only break ties
    pub fn compare(&self, a: &Tenant, b: &Tenant) -> Ordering {
        self.keys
            .iter()
            .map(|key| key.dir.apply(key.field.compare(a, b)))
            .find(|ordering| ordering.is_ne())
            .unwrap_or(Ordering::Equal)
    }

    /// Stable sort; tenants equal on every key keep their incoming order
    pub fn sort(&self, tenants: &mut [Tenant]) {
        if self.is_empty() {
            return;
        }
        tenants.sort_by(|a, b| self.compare(a, b));
    }
}

impl std::fmt::Display for OrderingSpec {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.keys.is_empty() {
            return write!(f, "(store order)");
        }
        let parts: Vec<String> = self
            .keys
            .iter()
            .map(|k| format!("{:?} {:?}", k.field, k.dir).to_lowercase())
            .collect();
        write!(f, "{}", parts.join(", "))
    }
}
