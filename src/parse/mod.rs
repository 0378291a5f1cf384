pub mod cell_ref;

pub use cell_ref::{CellRefError, RangeRef, parse_cell, parse_range};
