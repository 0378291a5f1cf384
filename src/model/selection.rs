use serde::{Deserialize, Serialize};

/// A cell position, zero-based.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct GridCoordinate {
    pub row: usize,
    pub col: usize,
}

impl GridCoordinate {
    pub fn new(row: usize, col: usize) -> Self {
        GridCoordinate { row, col }
    }
}

/// One active-range record: inclusive row/column bounds plus an optional
/// focus cell inside the range.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActiveRange {
    pub row: [usize; 2],
    pub column: [usize; 2],
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub row_focus: Option<usize>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub column_focus: Option<usize>,
}

impl ActiveRange {
    /// A single-cell range focused on `coord`.
    pub fn single(coord: GridCoordinate) -> Self {
        ActiveRange {
            row: [coord.row, coord.row],
            column: [coord.col, coord.col],
            row_focus: Some(coord.row),
            column_focus: Some(coord.col),
        }
    }

    /// The focused cell, falling back to the range start for a missing axis.
    pub fn focus(&self) -> GridCoordinate {
        GridCoordinate {
            row: self.row_focus.unwrap_or(self.row[0]),
            col: self.column_focus.unwrap_or(self.column[0]),
        }
    }
}
