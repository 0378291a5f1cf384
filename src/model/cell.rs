use std::fmt;

use serde::{Deserialize, Serialize};

/// A scalar cell value. Dropdown candidates use the same type, since a
/// range-sourced list can carry numbers as well as text.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum CellValue {
    Number(f64),
    Text(String),
}

impl CellValue {
    pub fn text(s: impl Into<String>) -> Self {
        CellValue::Text(s.into())
    }

    /// Interpret typed input: anything that parses as a finite number is
    /// stored as one.
    pub fn from_input(input: &str) -> Self {
        match input.trim().parse::<f64>() {
            Ok(n) if n.is_finite() && !input.trim().is_empty() => CellValue::Number(n),
            _ => CellValue::Text(input.to_string()),
        }
    }

    /// True for values that count as "empty" when scanning a column or
    /// seeding a selection: blank text only. Numbers (including 0) are never empty.
    pub fn is_blank(&self) -> bool {
        match self {
            CellValue::Text(s) => s.is_empty(),
            CellValue::Number(_) => false,
        }
    }

    /// Lower-cased string coercion, used by every case-insensitive comparison.
    pub fn folded(&self) -> String {
        self.to_string().to_lowercase()
    }
}

/// String coercion: integral numbers print without a fractional part
/// (`3`, not `3.0`), everything else prints as-is.
impl fmt::Display for CellValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CellValue::Text(s) => f.write_str(s),
            CellValue::Number(n) => write!(f, "{}", n),
        }
    }
}

impl From<&str> for CellValue {
    fn from(s: &str) -> Self {
        CellValue::Text(s.to_string())
    }
}

impl From<String> for CellValue {
    fn from(s: String) -> Self {
        CellValue::Text(s)
    }
}

impl From<f64> for CellValue {
    fn from(n: f64) -> Self {
        CellValue::Number(n)
    }
}
