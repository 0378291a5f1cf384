use std::sync::LazyLock;

use regex::Regex;

use crate::model::GridCoordinate;

/// `Sheet!$A$1:$B$2`, with the sheet prefix and the range end optional.
static REF_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"^(?:(?:'([^']+)'|([A-Za-z0-9_.]+))!)?\$?([A-Za-z]{1,3})\$?([0-9]{1,7})(?::\$?([A-Za-z]{1,3})\$?([0-9]{1,7}))?$",
    )
    .expect("cell reference pattern is valid")
});

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CellRefError {
    #[error("invalid cell reference: {0}")]
    Invalid(String),
    #[error("row numbers start at 1: {0}")]
    ZeroRow(String),
}

/// A parsed A1-style reference. A single cell has `start == end`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RangeRef {
    pub sheet: Option<String>,
    pub start: GridCoordinate,
    pub end: GridCoordinate,
}

impl RangeRef {
    /// Cells in row-major order.
    pub fn cells(&self) -> impl Iterator<Item = GridCoordinate> + '_ {
        (self.start.row..=self.end.row).flat_map(move |row| {
            (self.start.col..=self.end.col).map(move |col| GridCoordinate { row, col })
        })
    }

    /// The part of this range inside a `rows` x `cols` grid, if any.
    pub fn clamp_to(&self, rows: usize, cols: usize) -> Option<RangeRef> {
        if rows == 0 || cols == 0 || self.start.row >= rows || self.start.col >= cols {
            return None;
        }
        Some(RangeRef {
            sheet: self.sheet.clone(),
            start: self.start,
            end: GridCoordinate {
                row: self.end.row.min(rows - 1),
                col: self.end.col.min(cols - 1),
            },
        })
    }
}

/// Parse a range (or single cell) reference. A leading `=` is ignored and the
/// corners are normalized so `start` is top-left.
pub fn parse_range(input: &str) -> Result<RangeRef, CellRefError> {
    let text = input.trim();
    let text = text.strip_prefix('=').unwrap_or(text);
    let caps = REF_RE
        .captures(text)
        .ok_or_else(|| CellRefError::Invalid(input.to_string()))?;

    let sheet = caps
        .get(1)
        .or_else(|| caps.get(2))
        .map(|m| m.as_str().to_string());
    let first = coordinate(&caps[3], &caps[4], input)?;
    let second = match (caps.get(5), caps.get(6)) {
        (Some(col), Some(row)) => coordinate(col.as_str(), row.as_str(), input)?,
        _ => first,
    };

    Ok(RangeRef {
        sheet,
        start: GridCoordinate::new(first.row.min(second.row), first.col.min(second.col)),
        end: GridCoordinate::new(first.row.max(second.row), first.col.max(second.col)),
    })
}

/// Parse a single cell such as `B3`.
pub fn parse_cell(input: &str) -> Result<GridCoordinate, CellRefError> {
    let range = parse_range(input)?;
    if range.start != range.end || range.sheet.is_some() {
        return Err(CellRefError::Invalid(input.to_string()));
    }
    Ok(range.start)
}

fn coordinate(col: &str, row: &str, input: &str) -> Result<GridCoordinate, CellRefError> {
    let row: usize = row
        .parse()
        .map_err(|_| CellRefError::Invalid(input.to_string()))?;
    if row == 0 {
        return Err(CellRefError::ZeroRow(input.to_string()));
    }
    Ok(GridCoordinate::new(row - 1, column_index(col)))
}

/// `A` -> 0, `Z` -> 25, `AA` -> 26.
fn column_index(letters: &str) -> usize {
    letters
        .chars()
        .fold(0, |acc, c| acc * 26 + (c.to_ascii_uppercase() as usize - 'A' as usize + 1))
        - 1
}

/// `0` -> `A`, `26` -> `AA`.
pub fn column_name(col: usize) -> String {
    let mut n = col + 1;
    let mut out = Vec::new();
    while n > 0 {
        let rem = (n - 1) % 26;
        out.push((b'A' + rem as u8) as char);
        n = (n - 1) / 26;
    }
    out.iter().rev().collect()
}

/// `B3` style name for a coordinate.
pub fn cell_name(coord: GridCoordinate) -> String {
    format!("{}{}", column_name(coord.col), coord.row + 1)
}
