//! Filter predicates over tenants
//!
//! Each variant tests one field. A `PredicateSet` is the conjunction of its
//! members and holds at most one predicate per variant: setting a filter
//! again replaces the earlier value. New filter kinds are added as new
//! variants.

use std::collections::BTreeSet;

use super::like::LikePattern;
use crate::model::Tenant;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TenantPredicate {
    /// `id == value`
    IdEquals(String),
    /// `id ∈ values`; an empty set matches nothing
    IdIn(BTreeSet<String>),
    /// `name == value`, case-sensitive; an absent name never matches
    NameEquals(String),
    /// Name matches the pattern; an absent name never matches
    NameLike(LikePattern),
}

impl TenantPredicate {
    pub fn matches(&self, tenant: &Tenant) -> bool {
        match self {
            TenantPredicate::IdEquals(id) => tenant.id() == id,
            TenantPredicate::IdIn(ids) => ids.contains(tenant.id()),
            TenantPredicate::NameEquals(name) => tenant.name() == Some(name.as_str()),
            TenantPredicate::NameLike(pattern) => {
                tenant.name().is_some_and(|name| pattern.matches(name))
            }
        }
    }
}

impl std::fmt::Display for TenantPredicate {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TenantPredicate::IdEquals(id) => write!(f, "id = {:?}", id),
            TenantPredicate::IdIn(ids) => write!(f, "id in {:?}", ids),
            TenantPredicate::NameEquals(name) => write!(f, "name = {:?}", name),
            TenantPredicate::NameLike(pattern) => write!(f, "name like {:?}", pattern.to_string()),
        }
    }
}

/// Conjunction of active predicates
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PredicateSet {
    predicates: Vec<TenantPredicate>,
}

impl PredicateSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a predicate, replacing any earlier predicate of the same kind
    pub fn set(&mut self, predicate: TenantPredicate) {
        let kind = std::mem::discriminant(&predicate);
        match self
            .predicates
            .iter()
            .position(|p| std::mem::discriminant(p) == kind)
        {
            Some(index) => self.predicates[index] = predicate,
            None => self.predicates.push(predicate),
        }
    }

    pub fn len(&self) -> usize {
        self.predicates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.predicates.is_empty()
    }

    /// True when every predicate holds; an empty set accepts everything
    pub fn matches(&self, tenant: &Tenant) -> bool {
        self.predicates.iter().all(|p| p.matches(tenant))
    }

    /// Keep only the tenants accepted by the set, preserving order
    pub fn filter(&self, tenants: Vec<Tenant>) -> Vec<Tenant> {
        tenants.into_iter().filter(|t| self.matches(t)).collect()
    }
}

impl std::fmt::Display for PredicateSet {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.predicates.is_empty() {
            return write!(f, "(all)");
        }
        let parts: Vec<String> = self.predicates.iter().map(|p| p.to_string()).collect();
        write!(f, "{}", parts.join(" and "))
    }
}
