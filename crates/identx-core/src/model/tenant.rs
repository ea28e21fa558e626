use serde::{Deserialize, Serialize};

/// Tenant - an identity entity that partitions data between customers
///
/// The `id` is the primary key: unique within a store and fixed for the
/// lifetime of the tenant. The `name` is an optional, mutable display label.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tenant {
    id: String,

    /// Human-readable label; not required to be unique
    name: Option<String>,
}

impl Tenant {
    /// Create an unnamed tenant
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: None,
        }
    }

    /// Create a tenant with a name
    pub fn with_name(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: Some(name.into()),
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    pub fn set_name(&mut self, name: impl Into<String>) {
        self.name = Some(name.into());
    }
}
