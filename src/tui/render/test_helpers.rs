use ratatui::Terminal;
use ratatui::backend::TestBackend;
use ratatui::layout::Rect;

use crate::model::{AppConfig, CellValue, ValidationRule, Workbook};
use crate::tui::app::App;

/// Render into an in-memory buffer and return plain text (no styles).
pub fn render_to_string<F>(w: u16, h: u16, f: F) -> String
where
    F: FnOnce(&mut ratatui::Frame, Rect),
{
    let backend = TestBackend::new(w, h);
    let mut terminal = Terminal::new(backend).unwrap();
    terminal.draw(|frame| f(frame, frame.area())).unwrap();

    let buf = terminal.backend().buffer().clone();
    let lines: Vec<String> = buf
        .content
        .chunks(buf.area.width as usize)
        .map(|row| {
            let s: String = row.iter().map(|cell| cell.symbol()).collect();
            s.trim_end().to_string()
        })
        .collect();

    let end = lines
        .iter()
        .rposition(|l| !l.is_empty())
        .map_or(0, |i| i + 1);
    lines[..end].join("\n")
}

/// A small workbook: fruit history in A, a color list rule on B1, and a
/// multi-select tag rule on B2.
pub fn sample_app() -> App {
    let mut wb = Workbook::blank(12, 4);
    let sheet = &mut wb.sheets[0];
    for (row, fruit) in ["Apple", "Apricot", "Banana"].iter().enumerate() {
        sheet.set_cell(row, 0, Some(CellValue::text(*fruit)));
    }
    sheet.set_rule(0, 1, ValidationRule::dropdown("Red,Green,Blue"));
    sheet.set_rule(1, 1, ValidationRule::dropdown("A,B,C").with_multi_select(true));
    sheet.set_cell(1, 1, Some(CellValue::text("B")));
    App::new(wb, &AppConfig::default(), None)
}
