//! Month indexing for the panel
//!
//! Panel rows are keyed by an integer month index (`modate`). Consecutive
//! calendar months map to consecutive integers, so ordering and the
//! "next month" operation are plain integer arithmetic.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Integer-valued calendar month index
///
/// The encoding is affine: only ordering and succession are meaningful, not
/// the absolute value. Negative indexes are valid (the origin is chosen by
/// the data source).
///
/// # Example
/// ```
/// use arrears_shares_core_rs::Month;
///
/// let m = Month::new(684);
/// assert_eq!(m.next(), Month::new(685));
/// assert!(m < m.next());
/// ```
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct Month(i32);

impl Month {
    /// Create a month from its integer index
    pub fn new(index: i32) -> Self {
        Self(index)
    }

    /// Get the raw integer index
    pub fn index(&self) -> i32 {
        self.0
    }

    /// The immediately following calendar month
    ///
    /// # Example
    /// ```
    /// use arrears_shares_core_rs::Month;
    ///
    /// assert_eq!(Month::new(-1).next(), Month::new(0));
    /// ```
    pub fn next(&self) -> Month {
        Month(self.0 + 1)
    }
}

impl fmt::Display for Month {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
