pub mod config_io;
pub mod watcher;
pub mod workbook_io;
