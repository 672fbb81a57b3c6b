//! Sorting types.

use serde::Deserialize;
use serde::Serialize;

/// Sort direction for the grid's server-side ordering.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    /// Ascending order (A-Z, 0-9). Serializes as `asc`.
    Asc,
    /// Descending order (Z-A, 9-0). Serializes as `desc`.
    Desc,
}

/// The grid's current sort specification.
///
/// The server applies the actual ordering; the client only tracks which
/// column and direction to request next.
///
/// # Example
///
/// ```
/// use gridsync_lib::state::{Direction, Sorting};
///
/// let sorting = Sorting::new("revenue", Direction::Desc);
/// assert_eq!(sorting.column, "revenue");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Sorting {
    /// The column to sort by.
    pub column: String,
    /// The direction to sort in.
    pub direction: Direction,
}

impl Sorting {
    /// Creates a new sort specification.
    pub fn new(column: impl Into<String>, direction: Direction) -> Self {
        Self {
            column: column.into(),
            direction,
        }
    }
}
