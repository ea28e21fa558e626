//! Cardinality enforcement for single-result queries

use crate::errors::{IdentityError, Result};

/// Reduce a match set to at most one element
///
/// Zero matches is absence (`Ok(None)`), not an error. More than one match
/// fails with `TooManyResults` instead of picking one.
pub fn enforce_single<T>(matches: Vec<T>) -> Result<Option<T>> {
    let count = matches.len();
    let mut iter = matches.into_iter();
    match (iter.next(), count) {
        (None, _) => Ok(None),
        (Some(only), 1) => Ok(Some(only)),
        (Some(_), _) => Err(IdentityError::TooManyResults {
            count: count as u64,
        }),
    }
}
