use crate::ops::list_source::resolve_dropdown_list;
use crate::ops::write_back::{ApplyReport, GridCommand, apply_batch};
use crate::overlay::{GridView, GridWriter};

use super::cell::CellValue;
use super::selection::{ActiveRange, GridCoordinate};
use super::sheet::{MergeSpan, Sheet};
use super::validation::ValidationRule;
use super::workbook::Workbook;

/// Grid state shared by the host and the overlays: the document, the
/// active-range records and the view flags. All overlay-driven mutation
/// goes through [`GridContext::apply`].
#[derive(Debug, Clone)]
pub struct GridContext {
    pub workbook: Workbook,
    /// Active-range records; the last one is current
    pub select_save: Vec<ActiveRange>,
    /// A cell edit is in progress
    pub cell_update: bool,
    /// The validation dropdown is showing
    pub dropdown_open: bool,
    pub needs_redraw: bool,
    /// Bumped by every batch that writes a value
    pub revision: u64,
    /// Separator for multi-select values stored in one cell
    pub delimiter: String,
    row_edges: Vec<u32>,
    col_edges: Vec<u32>,
}

impl GridContext {
    pub fn new(workbook: Workbook) -> Self {
        let mut ctx = GridContext {
            workbook,
            select_save: vec![ActiveRange::single(GridCoordinate::new(0, 0))],
            cell_update: false,
            dropdown_open: false,
            needs_redraw: true,
            revision: 0,
            delimiter: ",".into(),
            row_edges: Vec::new(),
            col_edges: Vec::new(),
        };
        ctx.refresh_layout();
        ctx
    }

    pub fn with_delimiter(mut self, delimiter: impl Into<String>) -> Self {
        self.delimiter = delimiter.into();
        self
    }

    pub fn sheet(&self) -> Option<&Sheet> {
        self.workbook.current_sheet()
    }

    pub fn cell(&self, coord: GridCoordinate) -> Option<&CellValue> {
        self.sheet()?.cell(coord.row, coord.col)
    }

    pub fn row_count(&self) -> usize {
        self.sheet().map_or(0, Sheet::rows)
    }

    pub fn col_count(&self) -> usize {
        self.sheet().map_or(0, Sheet::cols)
    }

    /// Replace the selection with a single focused cell.
    pub fn focus_on(&mut self, coord: GridCoordinate) {
        self.select_save = vec![ActiveRange::single(coord)];
        self.needs_redraw = true;
    }

    /// Swap in a freshly loaded document. Selection and flags survive.
    pub fn replace_workbook(&mut self, workbook: Workbook) {
        self.workbook = workbook;
        self.refresh_layout();
        self.needs_redraw = true;
    }

    /// Recompute the cached edge tables after a layout-affecting change.
    pub fn refresh_layout(&mut self) {
        let (rows, cols) = match self.workbook.current_sheet() {
            Some(sheet) => (sheet.row_edges(), sheet.col_edges()),
            None => (Vec::new(), Vec::new()),
        };
        self.row_edges = rows;
        self.col_edges = cols;
    }

    pub fn apply(&mut self, batch: &[GridCommand]) -> ApplyReport {
        apply_batch(self, batch)
    }
}

impl GridView for GridContext {
    fn focus(&self) -> Option<GridCoordinate> {
        self.select_save.last().map(ActiveRange::focus)
    }

    fn cell_value(&self, coord: GridCoordinate) -> Option<CellValue> {
        self.cell(coord).cloned()
    }

    fn column_values(&self, col: usize) -> Vec<CellValue> {
        self.sheet()
            .map(|s| s.column_values(col).cloned().collect())
            .unwrap_or_default()
    }

    fn merge_at(&self, coord: GridCoordinate) -> Option<MergeSpan> {
        self.sheet()?.merge_at(coord.row, coord.col)
    }

    fn row_edges(&self) -> &[u32] {
        &self.row_edges
    }

    fn col_edges(&self) -> &[u32] {
        &self.col_edges
    }

    fn validation_rule(&self, coord: GridCoordinate) -> Option<ValidationRule> {
        self.sheet()?.rule_at(coord.row, coord.col).cloned()
    }

    fn dropdown_list(&self, rule: &ValidationRule) -> Vec<CellValue> {
        match self.sheet() {
            Some(sheet) => resolve_dropdown_list(&self.workbook, sheet, rule),
            None => Vec::new(),
        }
    }

    fn dropdown_open(&self) -> bool {
        self.dropdown_open
    }

    fn editing(&self) -> bool {
        self.cell_update
    }

    fn delimiter(&self) -> &str {
        &self.delimiter
    }
}

impl GridWriter for GridContext {
    fn apply(&mut self, batch: &[GridCommand]) -> ApplyReport {
        apply_batch(self, batch)
    }
}
