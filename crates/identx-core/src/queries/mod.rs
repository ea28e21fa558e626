//! Read-only query operations over identity entities
//!
//! - Filters compose by conjunction; setting the same filter again replaces it
//! - Ordering is a stable multi-key sort; without order keys results follow
//!   store order
//! - `single_result` never picks an arbitrary match: more than one result is
//!   an error

pub mod cardinality;
pub mod like;
pub mod ordering;
pub mod predicate;
pub mod tenant_query;

pub use cardinality::enforce_single;
pub use like::LikePattern;
pub use ordering::{OrderKey, OrderingSpec, SortDir, TenantField};
pub use predicate::{PredicateSet, TenantPredicate};
pub use tenant_query::{Page, TenantQuery};
