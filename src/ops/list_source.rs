use crate::model::{CellValue, Sheet, ValidationRule, Workbook};
use crate::parse::cell_ref::parse_range;

/// Resolve a rule's list source into the values offered by the dropdown.
///
/// A range reference (`$A$1:$A$5`, `Lists!B1:B9`) yields the non-empty cells
/// of that range in row-major order, keeping numbers as numbers. Anything else
/// is treated as an inline comma-separated list. Rules that are not list rules
/// offer nothing.
pub fn resolve_dropdown_list(
    workbook: &Workbook,
    current: &Sheet,
    rule: &ValidationRule,
) -> Vec<CellValue> {
    if !rule.is_dropdown() {
        return Vec::new();
    }

    match parse_range(&rule.value1) {
        Ok(range) => {
            let sheet = match &range.sheet {
                Some(name) => match workbook.sheet_by_name(name) {
                    Some(s) => s,
                    None => {
                        tracing::debug!(sheet = %name, "list source names an unknown sheet");
                        return Vec::new();
                    }
                },
                None => current,
            };
            let Some(range) = range.clamp_to(sheet.rows(), sheet.cols()) else {
                return Vec::new();
            };
            range
                .cells()
                .filter_map(|coord| sheet.cell(coord.row, coord.col))
                .filter(|v| !v.is_blank())
                .cloned()
                .collect()
        }
        Err(_) => split_inline(&rule.value1),
    }
}

/// Split an inline list on commas, dropping empty items.
pub fn split_inline(source: &str) -> Vec<CellValue> {
    source
        .split(',')
        .filter(|item| !item.is_empty())
        .map(CellValue::text)
        .collect()
}
