//! `%`-wildcard pattern matching for `*_like` filters
//!
//! `%` stands for zero or more characters. Every other character, including
//! `_` and `\`, is matched literally. Matching is case-sensitive and covers
//! the whole value.

use crate::errors::{IdentityError, Result};

const WILDCARD: char = '%';

/// A parsed like pattern
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LikePattern {
    raw: String,
    /// Literal runs between wildcards. A pattern without `%` has one segment.
    segments: Vec<String>,
}

impl LikePattern {
    /// Parse a pattern
    ///
    /// # Errors
    ///
    /// Returns `InvalidQuery` for an empty pattern.
    pub fn parse(pattern: &str) -> Result<Self> {
        if pattern.is_empty() {
            return Err(IdentityError::invalid_query(
                "like pattern must not be empty",
            ));
        }

        Ok(Self {
            raw: pattern.to_string(),
            segments: pattern.split(WILDCARD).map(str::to_string).collect(),
        })
    }

    /// Full-string match of `value` against the pattern
    pub fn matches(&self, value: &str) -> bool {
        let (first, rest) = match self.segments.split_first() {
            Some(split) => split,
            None => return value.is_empty(),
        };

        let Some((last, middle)) = rest.split_last() else {
            return value == first;
        };

        let Some(mut remaining) = value.strip_prefix(first.as_str()) else {
            return false;
        };

        for segment in middle {
            match remaining.find(segment.as_str()) {
                Some(pos) => remaining = &remaining[pos + segment.len()..],
                None => return false,
            }
        }

        remaining.ends_with(last.as_str())
    }
}

impl std::fmt::Display for LikePattern {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.raw)
    }
}
