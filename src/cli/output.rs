use serde::Serialize;

use crate::model::CellValue;

// ---------------------------------------------------------------------------
// JSON output structs
// ---------------------------------------------------------------------------

#[derive(Serialize)]
pub struct CandidatesJson {
    pub cell: String,
    /// `dropdown`, `autocomplete` or `none`
    pub mode: &'static str,
    pub multi: bool,
    pub value: Option<CellValue>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub selected: Vec<String>,
    pub filter: String,
    pub candidates: Vec<CellValue>,
    pub shown: Vec<CellValue>,
}

#[derive(Serialize)]
pub struct PickJson {
    pub cell: String,
    pub value: Option<CellValue>,
}

#[derive(Serialize)]
pub struct RuleJson {
    pub cell: String,
    #[serde(rename = "type")]
    pub kind: String,
    pub multi: bool,
    pub source: String,
    pub values: Vec<CellValue>,
}

pub fn print_json<T: Serialize>(value: &T) -> Result<(), serde_json::Error> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}
