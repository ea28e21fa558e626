//! Identity service facade
//!
//! Owns a tenant store and hands out tenant queries bound to it. Writes go
//! straight to the store, so a tenant saved before a query runs is visible to
//! that query.

use std::time::Instant;

use identx_core_types::RequestContext;

use crate::errors::{IdentityError, Result};
use crate::model::Tenant;
use crate::ops::TenantStore;
use crate::queries::TenantQuery;
use crate::{log_op_end, log_op_error, log_op_start};

const OP_SAVE_TENANT: &str = "identity.save_tenant";
const OP_DELETE_TENANT: &str = "identity.delete_tenant";

#[derive(Debug)]
pub struct IdentityService<S: TenantStore> {
    store: S,
    context: RequestContext,
}

impl<S: TenantStore> IdentityService<S> {
    pub fn new(store: S) -> Self {
        Self::with_context(store, RequestContext::new())
    }

    pub fn with_context(store: S, context: RequestContext) -> Self {
        Self { store, context }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn context(&self) -> &RequestContext {
        &self.context
    }

    /// Create a transient tenant; nothing is stored until `save_tenant`
    ///
    /// # Errors
    ///
    /// Returns `InvalidInput` if `id` is empty.
    pub fn new_tenant(&self, id: impl Into<String>) -> Result<Tenant> {
        let id = id.into();
        validate_id(&id)?;
        Ok(Tenant::new(id))
    }

    /// Insert the tenant, or update the stored tenant with the same id
    ///
    /// # Errors
    ///
    /// Returns `InvalidInput` for an empty id or an empty name, and propagates
    /// store failures. An absent name is stored as absent.
    pub fn save_tenant(&self, tenant: &Tenant) -> Result<()> {
        let started = Instant::now();
        log_op_start!(
            OP_SAVE_TENANT,
            tenant_id = tenant.id(),
            request_id = self.context.request_id.as_str(),
            trace_id = self.context.trace_id.as_ref().map(|id| id.as_str())
        );

        let outcome = validate_tenant(tenant).and_then(|()| self.store.put(tenant.clone()));
        self.log_outcome(OP_SAVE_TENANT, started, &outcome);
        outcome
    }

    /// Remove a tenant; removing an unknown id is a no-op
    ///
    /// # Errors
    ///
    /// Propagates store failures.
    pub fn delete_tenant(&self, id: &str) -> Result<()> {
        let started = Instant::now();
        log_op_start!(
            OP_DELETE_TENANT,
            tenant_id = id,
            request_id = self.context.request_id.as_str(),
            trace_id = self.context.trace_id.as_ref().map(|id| id.as_str())
        );

        let outcome = self.store.delete(id).map(|existed| {
            if !existed {
                tracing::debug!(tenant_id = id, "delete of unknown tenant ignored");
            }
        });
        self.log_outcome(OP_DELETE_TENANT, started, &outcome);
        outcome
    }

    /// Start a new query over this service's tenants
    pub fn create_tenant_query(&self) -> TenantQuery<'_, S> {
        TenantQuery::with_context(&self.store, self.context.clone())
    }

    fn log_outcome(&self, op: &str, started: Instant, outcome: &Result<()>) {
        let duration_ms = started.elapsed().as_millis() as u64;
        match outcome {
            Ok(()) => {
                log_op_end!(op, duration_ms = duration_ms);
            }
            Err(err) => {
                log_op_error!(op, err, duration_ms = duration_ms);
            }
        }
    }
}

fn validate_id(id: &str) -> Result<()> {
    if id.is_empty() {
        return Err(IdentityError::invalid_input("tenant id must not be empty"));
    }
    Ok(())
}

/// Every stored name must be selectable by `tenant_name`, which rejects ""
fn validate_tenant(tenant: &Tenant) -> Result<()> {
    validate_id(tenant.id())?;
    if tenant.name() == Some("") {
        return Err(IdentityError::invalid_input(
            "tenant name must not be empty; leave it unset instead",
        ));
    }
    Ok(())
}
