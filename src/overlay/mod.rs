//! Candidate-picker overlays for the focused cell.
//!
//! Two overlays share one selection engine: the validation dropdown (values
//! come from the cell's list rule, optionally multi-select) and the
//! column-history autocomplete (values come from what the column already
//! holds). The engine only sees the grid through [`GridView`] and changes it
//! only through [`GridWriter::apply`].

pub mod commit;
pub mod controller;
pub mod filter;
pub mod geometry;
pub mod nav;
pub mod source;

use crate::model::{CellValue, GridCoordinate, MergeSpan, ValidationRule};
use crate::ops::write_back::{ApplyReport, GridCommand};

pub use commit::SelectionSet;
pub use controller::{
    Disposition, NavKey, OverlayController, OverlayEvent, PanelRow, PanelView, PickError,
    PointerEvent,
};
pub use geometry::{OverlayGeometry, PanelBounds};
pub use nav::Navigation;

/// Which overlay a focused cell gets.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OverlayKind {
    Dropdown,
    Autocomplete,
}

/// Read access to the host grid.
pub trait GridView {
    /// Focused cell of the current active-range record.
    fn focus(&self) -> Option<GridCoordinate>;
    fn cell_value(&self, coord: GridCoordinate) -> Option<CellValue>;
    /// Every stored value in a column, top to bottom.
    fn column_values(&self, col: usize) -> Vec<CellValue>;
    fn merge_at(&self, coord: GridCoordinate) -> Option<MergeSpan>;
    /// Cumulative far edge of each row
    fn row_edges(&self) -> &[u32];
    /// Cumulative far edge of each column
    fn col_edges(&self) -> &[u32];
    fn validation_rule(&self, coord: GridCoordinate) -> Option<ValidationRule>;
    /// Concrete values for a list rule.
    fn dropdown_list(&self, rule: &ValidationRule) -> Vec<CellValue>;
    fn dropdown_open(&self) -> bool;
    /// A cell edit is in progress.
    fn editing(&self) -> bool;
    fn delimiter(&self) -> &str;
}

/// The single write path into the host grid.
pub trait GridWriter: GridView {
    fn apply(&mut self, batch: &[GridCommand]) -> ApplyReport;
}
