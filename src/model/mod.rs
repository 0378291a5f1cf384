pub mod cell;
pub mod config;
pub mod context;
pub mod selection;
pub mod sheet;
pub mod validation;
pub mod workbook;

pub use cell::*;
pub use config::*;
pub use context::*;
pub use selection::*;
pub use sheet::*;
pub use validation::*;
pub use workbook::*;
