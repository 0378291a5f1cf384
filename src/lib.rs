//! Validated-value dropdown and column-history autocomplete for a
//! spreadsheet grid, with a terminal host and a small CLI.

pub mod cli;
pub mod io;
pub mod logging;
pub mod model;
pub mod ops;
pub mod overlay;
pub mod parse;
pub mod tui;
pub mod util;
