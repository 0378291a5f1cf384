use std::collections::{BTreeMap, BTreeSet};

use serde::{Deserialize, Serialize};

use super::cell::CellValue;
use super::validation::{ValidationRule, rule_key};

/// A merged block as stored in the sheet: top-left cell plus row/column span.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MergeRange {
    pub r: usize,
    pub c: usize,
    pub rs: usize,
    pub cs: usize,
}

impl MergeRange {
    pub fn contains(&self, row: usize, col: usize) -> bool {
        row >= self.r && row < self.r + self.rs && col >= self.c && col < self.c + self.cs
    }

    pub fn span(&self) -> MergeSpan {
        MergeSpan {
            rows: [self.r, self.r + self.rs.saturating_sub(1)],
            cols: [self.c, self.c + self.cs.saturating_sub(1)],
        }
    }
}

/// Inclusive row and column index bounds of the merge covering a cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MergeSpan {
    pub rows: [usize; 2],
    pub cols: [usize; 2],
}

/// Layout overrides for a sheet.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SheetConfig {
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub merge: Vec<MergeRange>,
    /// Per-row height overrides
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub rowlen: BTreeMap<usize, u32>,
    /// Per-column width overrides
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub columnlen: BTreeMap<usize, u32>,
    #[serde(default, skip_serializing_if = "BTreeSet::is_empty")]
    pub rowhidden: BTreeSet<usize>,
    #[serde(default, skip_serializing_if = "BTreeSet::is_empty")]
    pub colhidden: BTreeSet<usize>,
}

/// One worksheet: a sparse-ish matrix of cell values plus layout and
/// validation rules.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Sheet {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub row_count: usize,
    #[serde(default)]
    pub col_count: usize,
    #[serde(default = "default_row_height")]
    pub default_row_height: u32,
    #[serde(default = "default_col_width")]
    pub default_col_width: u32,
    #[serde(default)]
    pub data: Vec<Vec<Option<CellValue>>>,
    #[serde(default)]
    pub config: SheetConfig,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub data_verification: BTreeMap<String, ValidationRule>,
}

fn default_row_height() -> u32 {
    1
}

fn default_col_width() -> u32 {
    12
}

impl Sheet {
    pub fn new(id: impl Into<String>, name: impl Into<String>, rows: usize, cols: usize) -> Self {
        Sheet {
            id: id.into(),
            name: name.into(),
            row_count: rows,
            col_count: cols,
            default_row_height: default_row_height(),
            default_col_width: default_col_width(),
            data: Vec::new(),
            config: SheetConfig::default(),
            data_verification: BTreeMap::new(),
        }
    }

    /// Number of rows, at least as many as the data matrix holds.
    pub fn rows(&self) -> usize {
        self.row_count.max(self.data.len())
    }

    pub fn cols(&self) -> usize {
        let widest = self.data.iter().map(Vec::len).max().unwrap_or(0);
        self.col_count.max(widest)
    }

    pub fn cell(&self, row: usize, col: usize) -> Option<&CellValue> {
        self.data.get(row)?.get(col)?.as_ref()
    }

    /// Write a cell, growing the matrix as needed. Blank text clears the cell.
    pub fn set_cell(&mut self, row: usize, col: usize, value: Option<CellValue>) {
        let value = value.filter(|v| !v.is_blank());
        if value.is_none() && self.cell(row, col).is_none() {
            return;
        }
        if self.data.len() <= row {
            self.data.resize_with(row + 1, Vec::new);
        }
        let cells = &mut self.data[row];
        if cells.len() <= col {
            cells.resize(col + 1, None);
        }
        cells[col] = value;
    }

    /// Every stored value in a column, top to bottom.
    pub fn column_values(&self, col: usize) -> impl Iterator<Item = &CellValue> {
        self.data
            .iter()
            .filter_map(move |cells| cells.get(col).and_then(Option::as_ref))
    }

    pub fn merge_at(&self, row: usize, col: usize) -> Option<MergeSpan> {
        self.config
            .merge
            .iter()
            .find(|m| m.contains(row, col))
            .map(MergeRange::span)
    }

    pub fn rule_at(&self, row: usize, col: usize) -> Option<&ValidationRule> {
        self.data_verification.get(&rule_key(row, col))
    }

    pub fn set_rule(&mut self, row: usize, col: usize, rule: ValidationRule) {
        self.data_verification.insert(rule_key(row, col), rule);
    }

    pub fn row_height(&self, row: usize) -> u32 {
        if self.config.rowhidden.contains(&row) {
            return 0;
        }
        self.config
            .rowlen
            .get(&row)
            .copied()
            .unwrap_or(self.default_row_height)
    }

    pub fn col_width(&self, col: usize) -> u32 {
        if self.config.colhidden.contains(&col) {
            return 0;
        }
        self.config
            .columnlen
            .get(&col)
            .copied()
            .unwrap_or(self.default_col_width)
    }

    /// Cumulative far edge of each row: `edges[r]` is the offset where row `r` ends.
    /// Hidden rows have zero height, so their edge equals the previous one.
    pub fn row_edges(&self) -> Vec<u32> {
        cumulative((0..self.rows()).map(|r| self.row_height(r)))
    }

    /// Cumulative far edge of each column.
    pub fn col_edges(&self) -> Vec<u32> {
        cumulative((0..self.cols()).map(|c| self.col_width(c)))
    }
}

fn cumulative(sizes: impl Iterator<Item = u32>) -> Vec<u32> {
    let mut total = 0u32;
    sizes
        .map(|size| {
            total = total.saturating_add(size);
            total
        })
        .collect()
}
