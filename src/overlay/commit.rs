use indexmap::IndexSet;

use crate::model::{CellValue, GridCoordinate};
use crate::ops::write_back::GridCommand;

/// Values currently chosen for a multi-select cell, in the order they were
/// chosen. Seeded from the cell's stored text, never authoritative.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SelectionSet {
    items: IndexSet<String>,
}

impl SelectionSet {
    /// Split a stored cell value into its chosen items.
    pub fn seed(value: Option<&CellValue>, delimiter: &str) -> Self {
        let text = match value {
            Some(v) if !v.is_blank() => v.to_string(),
            _ => return SelectionSet::default(),
        };
        let items = if delimiter.is_empty() {
            std::iter::once(text).collect()
        } else {
            text.split(delimiter).map(str::to_string).collect()
        };
        SelectionSet { items }
    }

    pub fn contains(&self, value: &str) -> bool {
        self.items.contains(value)
    }

    /// Remove `value` if present, otherwise append it. Returns true if added.
    pub fn toggle(&mut self, value: &str) -> bool {
        if self.items.shift_remove(value) {
            false
        } else {
            self.items.insert(value.to_string());
            true
        }
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.items.iter().map(String::as_str)
    }

    pub fn to_vec(&self) -> Vec<String> {
        self.items.iter().cloned().collect()
    }
}

/// Build the write-back for a dropdown choice and update `selection` to match.
///
/// Multi-select toggles the value and leaves the overlay open. Single-select
/// replaces the cell, closes the overlay, ends the edit, and (when `advance`
/// is set) moves focus one row down.
pub fn commit_dropdown(
    coord: GridCoordinate,
    value: &CellValue,
    selection: &mut SelectionSet,
    multi: bool,
    advance: bool,
) -> Vec<GridCommand> {
    let text = value.to_string();
    if multi {
        selection.toggle(&text);
        return vec![GridCommand::ToggleCandidate {
            coord,
            value: text,
            selection: selection.to_vec(),
        }];
    }

    *selection = SelectionSet::default();
    selection.toggle(&text);
    let mut batch = vec![
        GridCommand::ReplaceValue {
            coord,
            value: value.clone(),
        },
        GridCommand::CloseOverlay,
        GridCommand::ClearPendingEdit,
    ];
    if advance {
        batch.push(GridCommand::AdvanceFocusDown);
    }
    batch
}

/// Build the write-back for an autocomplete suggestion: the text replaces
/// the cell verbatim and the edit ends.
pub fn commit_autocomplete(coord: GridCoordinate, value: &str) -> Vec<GridCommand> {
    vec![
        GridCommand::ReplaceValue {
            coord,
            value: CellValue::text(value),
        },
        GridCommand::RequestRedraw,
        GridCommand::ClearPendingEdit,
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::collections::HashSet;

    const AT: GridCoordinate = GridCoordinate { row: 1, col: 2 };

    #[test]
    fn seed_splits_stored_text() {
        let set = SelectionSet::seed(Some(&CellValue::text("A,B,A")), ",");
        assert_eq!(set.to_vec(), vec!["A", "B"]);
        assert!(SelectionSet::seed(None, ",").is_empty());
        assert!(SelectionSet::seed(Some(&CellValue::text("")), ",").is_empty());
        assert_eq!(
            SelectionSet::seed(Some(&CellValue::Number(7.0)), ",").to_vec(),
            vec!["7"]
        );
    }

    #[test]
    fn toggle_appends_at_end_and_removes_in_place() {
        let mut set = SelectionSet::seed(Some(&CellValue::text("A,B,C")), ",");
        assert!(!set.toggle("A"));
        assert_eq!(set.to_vec(), vec!["B", "C"]);
        assert!(set.toggle("A"));
        assert_eq!(set.to_vec(), vec!["B", "C", "A"]);
    }

    #[test]
    fn toggling_twice_restores_membership() {
        let original = SelectionSet::seed(Some(&CellValue::text("x,y,z")), ",");
        for value in ["x", "y", "z", "w"] {
            let mut set = original.clone();
            set.toggle(value);
            set.toggle(value);
            let got: HashSet<&str> = set.iter().collect();
            let want: HashSet<&str> = original.iter().collect();
            assert_eq!(got, want, "toggling {}", value);
        }
    }

    #[test]
    fn multi_select_writes_the_whole_set_and_stays_open() {
        let mut set = SelectionSet::seed(Some(&CellValue::text("A")), ",");
        let batch = commit_dropdown(AT, &CellValue::text("B"), &mut set, true, true);
        assert_eq!(
            batch,
            vec![GridCommand::ToggleCandidate {
                coord: AT,
                value: "B".into(),
                selection: vec!["A".into(), "B".into()],
            }]
        );
    }

    #[test]
    fn single_select_replaces_closes_and_advances() {
        let mut set = SelectionSet::seed(Some(&CellValue::text("Red")), ",");
        let value = CellValue::Number(3.0);
        let batch = commit_dropdown(AT, &value, &mut set, false, true);
        assert_eq!(set.to_vec(), vec!["3"]);
        assert_eq!(
            batch,
            vec![
                GridCommand::ReplaceValue { coord: AT, value },
                GridCommand::CloseOverlay,
                GridCommand::ClearPendingEdit,
                GridCommand::AdvanceFocusDown,
            ]
        );
    }

    #[test]
    fn single_select_without_advance_keeps_focus() {
        let mut set = SelectionSet::default();
        let batch = commit_dropdown(AT, &CellValue::text("Red"), &mut set, false, false);
        assert!(!batch.contains(&GridCommand::AdvanceFocusDown));
    }

    #[test]
    fn autocomplete_writes_text_verbatim() {
        let batch = commit_autocomplete(AT, "Apricot");
        assert_eq!(
            batch[0],
            GridCommand::ReplaceValue {
                coord: AT,
                value: CellValue::text("Apricot")
            }
        );
        assert!(batch.contains(&GridCommand::ClearPendingEdit));
    }
}
