//! Fluent tenant query builder
//!
//! A `TenantQuery` accumulates filters, ordering and pagination, and runs
//! against its store each time a terminal operation (`count`, `list`,
//! `list_page`, `single_result`) is called. Terminal operations borrow the
//! builder, so it can be refined and run again; every run reflects the
//! builder's state at that moment.
//!
//! ```
//! use identx_core::model::Tenant;
//! use identx_core::ops::{InMemoryTenantStore, TenantStore};
//! use identx_core::queries::TenantQuery;
//!
//! let store = InMemoryTenantStore::new();
//! store.put(Tenant::with_name("tenant1", "Tenant 1")).unwrap();
//! store.put(Tenant::with_name("tenant2", "Tenant 2")).unwrap();
//!
//! let ids: Vec<String> = TenantQuery::new(&store)
//!     .tenant_name_like("%Tenant%")
//!     .unwrap()
//!     .order_by_tenant_id()
//!     .desc()
//!     .unwrap()
//!     .list()
//!     .unwrap()
//!     .into_iter()
//!     .map(|t| t.id().to_string())
//!     .collect();
//! assert_eq!(ids, vec!["tenant2", "tenant1"]);
//! ```

use std::collections::BTreeSet;
use std::time::Instant;

use identx_core_types::RequestContext;

use super::cardinality::enforce_single;
use super::like::LikePattern;
use super::ordering::{OrderingSpec, SortDir, TenantField};
use super::predicate::{PredicateSet, TenantPredicate};
use crate::errors::{IdentityError, Result};
use crate::model::Tenant;
use crate::ops::TenantStore;
use crate::{log_op_end, log_op_error, log_op_start};

const OP_COUNT: &str = "tenant_query.count";
const OP_LIST: &str = "tenant_query.list";
const OP_SINGLE_RESULT: &str = "tenant_query.single_result";

/// Offset/limit window applied by `list`
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Page {
    pub first_result: usize,
    /// `None` means unlimited
    pub max_results: Option<usize>,
}

impl Page {
    pub fn new(first_result: usize, max_results: usize) -> Self {
        Self {
            first_result,
            max_results: Some(max_results),
        }
    }

    fn apply(&self, tenants: Vec<Tenant>) -> Vec<Tenant> {
        let rest = tenants.into_iter().skip(self.first_result);
        match self.max_results {
            Some(max) => rest.take(max).collect(),
            None => rest.collect(),
        }
    }
}

/// Query over the tenants of one store
///
/// A builder is owned by one caller; it is not meant to be shared between
/// threads while being configured.
#[derive(Debug)]
pub struct TenantQuery<'s, S: TenantStore + ?Sized> {
    store: &'s S,
    context: RequestContext,
    predicates: PredicateSet,
    ordering: OrderingSpec,
    page: Page,
}

impl<'s, S: TenantStore + ?Sized> TenantQuery<'s, S> {
    pub fn new(store: &'s S) -> Self {
        Self::with_context(store, RequestContext::new())
    }

    /// Create a query whose log events carry the given correlation ids
    pub fn with_context(store: &'s S, context: RequestContext) -> Self {
        Self {
            store,
            context,
            predicates: PredicateSet::new(),
            ordering: OrderingSpec::new(),
            page: Page::default(),
        }
    }

    // ----- filters -----

    /// Only the tenant with this id
    ///
    /// # Errors
    ///
    /// Returns `InvalidQuery` if `id` is empty.
    pub fn tenant_id(&mut self, id: impl Into<String>) -> Result<&mut Self> {
        let id = non_empty("tenant id", id.into())?;
        self.predicates.set(TenantPredicate::IdEquals(id));
        Ok(self)
    }

    /// Only tenants whose id is one of `ids`; no ids matches nothing
    pub fn tenant_id_in<I, T>(&mut self, ids: I) -> &mut Self
    where
        I: IntoIterator<Item = T>,
        T: Into<String>,
    {
        let ids: BTreeSet<String> = ids.into_iter().map(Into::into).collect();
        self.predicates.set(TenantPredicate::IdIn(ids));
        self
    }

    /// Only tenants with exactly this name (case-sensitive)
    ///
    /// # Errors
    ///
    /// Returns `InvalidQuery` if `name` is empty.
    pub fn tenant_name(&mut self, name: impl Into<String>) -> Result<&mut Self> {
        let name = non_empty("tenant name", name.into())?;
        self.predicates.set(TenantPredicate::NameEquals(name));
        Ok(self)
    }

    /// Only tenants whose name matches a `%`-wildcard pattern
    ///
    /// # Errors
    ///
    /// Returns `InvalidQuery` if `pattern` is empty.
    pub fn tenant_name_like(&mut self, pattern: &str) -> Result<&mut Self> {
        let pattern = LikePattern::parse(pattern)?;
        self.predicates.set(TenantPredicate::NameLike(pattern));
        Ok(self)
    }

    // ----- ordering -----

    pub fn order_by_tenant_id(&mut self) -> &mut Self {
        self.ordering.push(TenantField::Id);
        self
    }

    pub fn order_by_tenant_name(&mut self) -> &mut Self {
        self.ordering.push(TenantField::Name);
        self
    }

    /// Sort the most recently added order key ascending
    ///
    /// # Errors
    ///
    /// Returns `InvalidQuery` if no `order_by_*` call came first.
    pub fn asc(&mut self) -> Result<&mut Self> {
        self.ordering.set_direction(SortDir::Asc)?;
        Ok(self)
    }

    /// Sort the most recently added order key descending
    ///
    /// # Errors
    ///
    /// Returns `InvalidQuery` if no `order_by_*` call came first.
    pub fn desc(&mut self) -> Result<&mut Self> {
        self.ordering.set_direction(SortDir::Desc)?;
        Ok(self)
    }

    // ----- pagination -----

    pub fn first_result(&mut self, first_result: usize) -> &mut Self {
        self.page.first_result = first_result;
        self
    }

    pub fn max_results(&mut self, max_results: usize) -> &mut Self {
        self.page.max_results = Some(max_results);
        self
    }

    // ----- inspection -----

    pub fn predicates(&self) -> &PredicateSet {
        &self.predicates
    }

    pub fn ordering(&self) -> &OrderingSpec {
        &self.ordering
    }

    pub fn page(&self) -> Page {
        self.page
    }

    // ----- terminal operations -----

    /// Number of matching tenants; ordering and pagination are ignored
    ///
    /// # Errors
    ///
    /// Propagates store failures.
    pub fn count(&self) -> Result<u64> {
        self.observe(
            OP_COUNT,
            |count: &u64| *count,
            || Ok(self.matching()?.len() as u64),
        )
    }

    /// Matching tenants, sorted and paginated
    ///
    /// # Errors
    ///
    /// Propagates store failures.
    pub fn list(&self) -> Result<Vec<Tenant>> {
        self.list_with(self.page)
    }

    /// Like `list`, with an explicit window for this call only
    ///
    /// # Errors
    ///
    /// Propagates store failures.
    pub fn list_page(&self, first_result: usize, max_results: usize) -> Result<Vec<Tenant>> {
        self.list_with(Page::new(first_result, max_results))
    }

    /// The single matching tenant
    ///
    /// Returns `Ok(None)` when nothing matches.
    ///
    /// # Errors
    ///
    /// Returns `TooManyResults` when more than one tenant matches, and
    /// propagates store failures.
    pub fn single_result(&self) -> Result<Option<Tenant>> {
        self.observe(
            OP_SINGLE_RESULT,
            |found: &Option<Tenant>| u64::from(found.is_some()),
            || enforce_single(self.matching()?),
        )
    }

    fn list_with(&self, page: Page) -> Result<Vec<Tenant>> {
        self.observe(
            OP_LIST,
            |tenants: &Vec<Tenant>| tenants.len() as u64,
            || {
                let mut tenants = self.matching()?;
                self.ordering.sort(&mut tenants);
                Ok(page.apply(tenants))
            },
        )
    }

    /// One store pass, filtered, in store order
    fn matching(&self) -> Result<Vec<Tenant>> {
        let tenants = self.store.enumerate_all()?;
        Ok(self.predicates.filter(tenants))
    }

    fn observe<T>(
        &self,
        op: &str,
        result_count: impl Fn(&T) -> u64,
        run: impl FnOnce() -> Result<T>,
    ) -> Result<T> {
        let started = Instant::now();
        log_op_start!(
            op,
            request_id = self.context.request_id.as_str(),
            trace_id = self.context.trace_id.as_ref().map(|id| id.as_str()),
            predicates = self.predicates.len() as u64,
            order_keys = self.ordering.keys().len() as u64,
            filters = %self.predicates,
            ordering = %self.ordering
        );

        let outcome = run();
        let duration_ms = started.elapsed().as_millis() as u64;

        match &outcome {
            Ok(value) => {
                log_op_end!(
                    op,
                    duration_ms = duration_ms,
                    request_id = self.context.request_id.as_str(),
                    results = result_count(value)
                );
            }
            Err(err) => {
                log_op_error!(
                    op,
                    err,
                    duration_ms = duration_ms,
                    request_id = self.context.request_id.as_str()
                );
            }
        }

        outcome
    }
}

fn non_empty(what: &str, value: String) -> Result<String> {
    if value.is_empty() {
        return Err(IdentityError::invalid_query(format!(
            "{} must not be empty",
            what
        )));
    }
    Ok(value)
}
