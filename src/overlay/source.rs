use std::collections::BTreeSet;

use crate::model::{CellValue, GridCoordinate};

use super::{GridView, OverlayKind};

/// Raw, unfiltered candidates for one focused cell.
#[derive(Debug, Clone, PartialEq)]
pub struct CandidateSet {
    pub kind: OverlayKind,
    pub values: Vec<CellValue>,
    pub multi: bool,
}

/// Decide which overlay `coord` gets and collect its candidates.
///
/// A cell bound to a validation rule always gets the dropdown, even when the
/// rule resolves to no values; autocomplete never runs there. Returns `None`
/// for an unvalidated cell when autocomplete is switched off.
pub fn resolve<G: GridView + ?Sized>(
    grid: &G,
    coord: GridCoordinate,
    autocomplete: bool,
) -> Option<CandidateSet> {
    match grid.validation_rule(coord) {
        Some(rule) => Some(CandidateSet {
            kind: OverlayKind::Dropdown,
            values: grid.dropdown_list(&rule),
            multi: rule.is_multi_select(),
        }),
        None if autocomplete => Some(CandidateSet {
            kind: OverlayKind::Autocomplete,
            values: column_history(grid.column_values(coord.col))
                .into_iter()
                .map(CellValue::Text)
                .collect(),
            multi: false,
        }),
        None => None,
    }
}

/// Distinct, trimmed, non-empty string forms of a column's values in
/// ascending order. Case-sensitive: `apple` and `Apple` are both kept.
pub fn column_history(values: impl IntoIterator<Item = CellValue>) -> Vec<String> {
    values
        .into_iter()
        .map(|v| v.to_string().trim().to_string())
        .filter(|s| !s.is_empty())
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{GridContext, ValidationRule, Workbook};
    use pretty_assertions::assert_eq;

    #[test]
    fn history_is_sorted_distinct_and_trimmed() {
        let values = vec![
            CellValue::text("Banana"),
            CellValue::text("  Apple "),
            CellValue::text("Apple"),
            CellValue::text("apple"),
            CellValue::text("   "),
            CellValue::Number(12.0),
        ];
        assert_eq!(
            column_history(values),
            vec!["12", "Apple", "Banana", "apple"]
        );
    }

    #[test]
    fn unvalidated_cells_get_column_history() {
        let mut wb = Workbook::blank(5, 3);
        let sheet = &mut wb.sheets[0];
        sheet.set_cell(0, 1, Some(CellValue::text("Banana")));
        sheet.set_cell(1, 1, Some(CellValue::text("Apple")));
        sheet.set_cell(2, 0, Some(CellValue::text("Elsewhere")));
        let ctx = GridContext::new(wb);

        let set = resolve(&ctx, GridCoordinate::new(4, 1), true).unwrap();
        assert_eq!(set.kind, OverlayKind::Autocomplete);
        assert!(!set.multi);
        assert_eq!(
            set.values,
            vec![CellValue::text("Apple"), CellValue::text("Banana")]
        );
        assert!(resolve(&ctx, GridCoordinate::new(4, 1), false).is_none());
    }

    #[test]
    fn a_rule_suppresses_autocomplete_even_when_empty() {
        let mut wb = Workbook::blank(5, 3);
        let sheet = &mut wb.sheets[0];
        sheet.set_cell(0, 1, Some(CellValue::text("Apple")));
        let mut rule = ValidationRule::dropdown("");
        rule.kind = "text_length".into();
        sheet.set_rule(3, 1, rule);
        let ctx = GridContext::new(wb);

        let set = resolve(&ctx, GridCoordinate::new(3, 1), true).unwrap();
        assert_eq!(set.kind, OverlayKind::Dropdown);
        assert!(set.values.is_empty());
    }

    #[test]
    fn dropdown_carries_the_multi_select_flag() {
        let mut wb = Workbook::blank(5, 3);
        wb.sheets[0].set_rule(
            0,
            0,
            ValidationRule::dropdown("A,B,C").with_multi_select(true),
        );
        let ctx = GridContext::new(wb);
        let set = resolve(&ctx, GridCoordinate::new(0, 0), true).unwrap();
        assert!(set.multi);
        assert_eq!(set.values.len(), 3);
    }
}
