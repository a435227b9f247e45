//! # Cardinality Ranges
//!
//! An inclusive `[lower, upper]` range with an optionally unbounded upper
//! bound. Ranges govern both how many instances of a feature are selectable
//! and how many children of a group may be selected at once.

use serde::{Deserialize, Serialize};

/// An inclusive cardinality range.
///
/// # Example
///
/// ```rust
/// use uvl_model::Cardinality;
///
/// let exactly_one = Cardinality::exactly(1);
/// assert!(exactly_one.contains(1));
/// assert!(!exactly_one.contains(2));
///
/// let at_least_two = Cardinality::at_least(2);
/// assert_eq!(at_least_two.upper(), None);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Cardinality {
    lower: u64,
    /// `None` means unbounded.
    upper: Option<u64>,
}

impl Cardinality {
    /// A range with both bounds explicit.
    pub fn of(lower: u64, upper: u64) -> Self {
        Self {
            lower,
            upper: Some(upper),
        }
    }

    /// `[lower, unbounded)`.
    pub fn at_least(lower: u64) -> Self {
        Self { lower, upper: None }
    }

    /// `[0, upper]`.
    pub fn at_most(upper: u64) -> Self {
        Self {
            lower: 0,
            upper: Some(upper),
        }
    }

    /// `[value, value]`.
    pub fn exactly(value: u64) -> Self {
        Self {
            lower: value,
            upper: Some(value),
        }
    }

    pub fn lower(&self) -> u64 {
        self.lower
    }

    /// Upper bound; `None` means unbounded.
    pub fn upper(&self) -> Option<u64> {
        self.upper
    }

    pub fn contains(&self, value: u64) -> bool {
        value >= self.lower && self.upper.map_or(true, |upper| value <= upper)
    }
}
