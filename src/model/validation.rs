use serde::{Deserialize, Serialize};

/// Rule type whose `value1` is a list of allowed values.
pub const DROPDOWN: &str = "dropdown";

/// A data-verification rule bound to one cell.
///
/// `value1` is the list source (an inline comma list or a range reference).
/// `type2 == "true"` allows several values to be chosen at once.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationRule {
    #[serde(rename = "type")]
    pub kind: String,
    #[serde(default)]
    pub type2: String,
    #[serde(default)]
    pub value1: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub value2: String,
}

impl ValidationRule {
    pub fn dropdown(value1: impl Into<String>) -> Self {
        ValidationRule {
            kind: DROPDOWN.to_string(),
            type2: String::new(),
            value1: value1.into(),
            value2: String::new(),
        }
    }

    pub fn with_multi_select(mut self, multi: bool) -> Self {
        self.type2 = if multi { "true".into() } else { String::new() };
        self
    }

    pub fn is_dropdown(&self) -> bool {
        self.kind == DROPDOWN
    }

    pub fn is_multi_select(&self) -> bool {
        self.type2 == "true"
    }
}

/// Key under which a sheet stores the rule for a cell.
pub fn rule_key(row: usize, col: usize) -> String {
    format!("{}_{}", row, col)
}

/// Inverse of [`rule_key`].
pub fn parse_rule_key(key: &str) -> Option<(usize, usize)> {
    let (r, c) = key.split_once('_')?;
    Some((r.parse().ok()?, c.parse().ok()?))
}
