use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use tempfile::NamedTempFile;

use crate::model::Workbook;

/// Error type for workbook load/save
#[derive(Debug, thiserror::Error)]
pub enum WorkbookError {
    #[error("could not read {path}: {source}")]
    ReadError { path: PathBuf, source: io::Error },
    #[error("could not write {path}: {source}")]
    WriteError { path: PathBuf, source: io::Error },
    #[error("could not parse {path}: {source}")]
    ParseError {
        path: PathBuf,
        source: serde_json::Error,
    },
    #[error("could not serialize workbook: {0}")]
    SerializeError(#[from] serde_json::Error),
    #[error("workbook has no sheets")]
    NoSheets,
    #[error("no sheet named {0:?}")]
    NoSuchSheet(String),
}

/// Load a workbook snapshot from JSON.
///
/// A `current_sheet_id` that names no sheet falls back to the first sheet.
pub fn load_workbook(path: &Path) -> Result<Workbook, WorkbookError> {
    let text = fs::read_to_string(path).map_err(|e| WorkbookError::ReadError {
        path: path.to_path_buf(),
        source: e,
    })?;
    let mut workbook: Workbook =
        serde_json::from_str(&text).map_err(|e| WorkbookError::ParseError {
            path: path.to_path_buf(),
            source: e,
        })?;

    let first = workbook
        .sheets
        .first()
        .map(|s| s.id.clone())
        .ok_or(WorkbookError::NoSheets)?;
    if workbook.current_sheet().is_none() {
        tracing::debug!(id = %workbook.current_sheet_id, "unknown current sheet; using first");
        workbook.current_sheet_id = first;
    }
    Ok(workbook)
}

/// Load a workbook and make `sheet` current when given.
pub fn load_workbook_sheet(path: &Path, sheet: Option<&str>) -> Result<Workbook, WorkbookError> {
    let mut workbook = load_workbook(path)?;
    if let Some(name) = sheet
        && !workbook.select_sheet(name)
    {
        return Err(WorkbookError::NoSuchSheet(name.to_string()));
    }
    Ok(workbook)
}

/// Save a workbook as pretty-printed JSON, atomically.
pub fn save_workbook(path: &Path, workbook: &Workbook) -> Result<(), WorkbookError> {
    let mut json = serde_json::to_string_pretty(workbook)?;
    json.push('\n');
    atomic_write(path, json.as_bytes()).map_err(|e| WorkbookError::WriteError {
        path: path.to_path_buf(),
        source: e,
    })?;
    tracing::debug!(path = %path.display(), "workbook saved");
    Ok(())
}

/// Write via a temp file in the same directory, then rename over the target.
pub fn atomic_write(path: &Path, content: &[u8]) -> io::Result<()> {
    let dir = match path.parent() {
        Some(p) if !p.as_os_str().is_empty() => p,
        _ => Path::new("."),
    };
    let mut tmp = NamedTempFile::new_in(dir)?;
    tmp.write_all(content)?;
    tmp.flush()?;
    tmp.persist(path).map_err(|e| e.error)?;
    Ok(())
}
