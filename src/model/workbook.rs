use serde::{Deserialize, Serialize};

use super::sheet::Sheet;

/// The document: an ordered set of sheets and which one is current.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Workbook {
    pub sheets: Vec<Sheet>,
    pub current_sheet_id: String,
}

impl Workbook {
    /// A workbook with one empty sheet.
    pub fn blank(rows: usize, cols: usize) -> Self {
        Workbook {
            sheets: vec![Sheet::new("sheet1", "Sheet1", rows, cols)],
            current_sheet_id: "sheet1".into(),
        }
    }

    pub fn sheet_index(&self, id: &str) -> Option<usize> {
        self.sheets.iter().position(|s| s.id == id)
    }

    pub fn current_sheet(&self) -> Option<&Sheet> {
        self.sheet_index(&self.current_sheet_id)
            .map(|idx| &self.sheets[idx])
    }

    pub fn current_sheet_mut(&mut self) -> Option<&mut Sheet> {
        let idx = self.sheet_index(&self.current_sheet_id)?;
        self.sheets.get_mut(idx)
    }

    /// Look up a sheet by display name, case-insensitively.
    pub fn sheet_by_name(&self, name: &str) -> Option<&Sheet> {
        self.sheets
            .iter()
            .find(|s| s.name.eq_ignore_ascii_case(name))
    }

    /// Make the sheet with the given name or id current. Returns false if none matches.
    pub fn select_sheet(&mut self, name_or_id: &str) -> bool {
        let found = self
            .sheets
            .iter()
            .find(|s| s.id == name_or_id || s.name.eq_ignore_ascii_case(name_or_id))
            .map(|s| s.id.clone());
        match found {
            Some(id) => {
                self.current_sheet_id = id;
                true
            }
            None => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn select_sheet_by_name_or_id() {
        let mut wb = Workbook::blank(5, 5);
        wb.sheets.push(Sheet::new("s2", "Lists", 5, 5));

        assert!(wb.select_sheet("lists"));
        assert_eq!(wb.current_sheet_id, "s2");
        assert!(wb.select_sheet("sheet1"));
        assert_eq!(wb.current_sheet().map(|s| s.name.as_str()), Some("Sheet1"));
        assert!(!wb.select_sheet("missing"));
        assert_eq!(wb.current_sheet_id, "sheet1");
    }

    #[test]
    fn current_sheet_missing_when_id_is_stale() {
        let mut wb = Workbook::blank(1, 1);
        wb.current_sheet_id = "gone".into();
        assert!(wb.current_sheet().is_none());
        assert!(wb.current_sheet_mut().is_none());
    }
}
