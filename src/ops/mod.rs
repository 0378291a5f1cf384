pub mod list_source;
pub mod write_back;
