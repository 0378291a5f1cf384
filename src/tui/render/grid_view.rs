use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;

use crate::model::{GridCoordinate, Sheet};
use crate::parse::cell_ref::column_name;
use crate::tui::app::{App, GUTTER_W, Mode};
use crate::util::unicode::fit_to_width;

/// Render column letters, row numbers and the visible cells.
pub fn render_grid(frame: &mut Frame, app: &App, area: Rect) {
    let Some(sheet) = app.grid.sheet() else {
        return;
    };
    let avail = area.width.saturating_sub(GUTTER_W) as usize;
    let max_lines = area.height as usize;

    let mut lines = Vec::with_capacity(max_lines);
    lines.push(header_line(app, sheet, avail));

    let mut row = app.first_row;
    while lines.len() < max_lines && row < sheet.rows() {
        for sub in 0..sheet.row_height(row) {
            if lines.len() >= max_lines {
                break;
            }
            lines.push(row_line(app, sheet, row, sub == 0, avail));
        }
        row += 1;
    }

    let paragraph = Paragraph::new(lines).style(Style::default().bg(app.theme.background));
    frame.render_widget(paragraph, area);
}

fn header_line(app: &App, sheet: &Sheet, avail: usize) -> Line<'static> {
    let theme = &app.theme;
    let style = Style::default().fg(theme.header).bg(theme.header_bg);
    let focus_col = app.focus().col;

    let mut spans = vec![Span::styled(" ".repeat(GUTTER_W as usize), style)];
    let mut used = 0;
    for col in app.first_col..sheet.cols() {
        if used >= avail {
            break;
        }
        let width = (sheet.col_width(col) as usize).min(avail - used);
        if width == 0 {
            continue;
        }
        let col_style = if col == focus_col {
            style.fg(theme.highlight).add_modifier(Modifier::BOLD)
        } else {
            style
        };
        spans.push(Span::styled(
            fit_to_width(&format!(" {}", column_name(col)), width),
            col_style,
        ));
        used += width;
    }
    Line::from(spans)
}

fn row_line(app: &App, sheet: &Sheet, row: usize, first_line: bool, avail: usize) -> Line<'static> {
    let theme = &app.theme;
    let focus = app.focus();

    let gutter_style = if row == focus.row {
        Style::default()
            .fg(theme.highlight)
            .bg(theme.header_bg)
            .add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(theme.header).bg(theme.header_bg)
    };
    let gutter = if first_line {
        format!("{:>4} ", row + 1)
    } else {
        " ".repeat(GUTTER_W as usize)
    };
    let mut spans = vec![Span::styled(gutter, gutter_style)];

    let mut used = 0;
    let mut col = app.first_col;
    while col < sheet.cols() && used < avail {
        // A merge draws as one wide cell; its text shows on its first row only
        let (last_col, owner, focused) = match sheet.merge_at(row, col) {
            Some(span) => {
                let owner = (row == span.rows[0])
                    .then_some(GridCoordinate::new(span.rows[0], span.cols[0]));
                let focused = (span.rows[0]..=span.rows[1]).contains(&focus.row)
                    && (span.cols[0]..=span.cols[1]).contains(&focus.col);
                (span.cols[1], owner, focused)
            }
            None => {
                let coord = GridCoordinate::new(row, col);
                (col, Some(coord), coord == focus)
            }
        };
        let width = (col..=last_col)
            .map(|c| sheet.col_width(c) as usize)
            .sum::<usize>()
            .min(avail - used);
        col = last_col + 1;
        if width == 0 {
            continue;
        }

        let editing = focused && app.mode == Mode::Edit;
        let text = if !first_line {
            String::new()
        } else if editing {
            format!("{}\u{258C}", app.edit_buffer)
        } else {
            owner
                .and_then(|c| sheet.cell(c.row, c.col))
                .map(|v| v.to_string())
                .unwrap_or_default()
        };
        let style = if editing {
            Style::default().fg(theme.text_bright).bg(theme.edit_bg)
        } else if focused {
            Style::default()
                .fg(theme.text_bright)
                .bg(theme.focus_bg)
                .add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(theme.text).bg(theme.background)
        };
        spans.push(Span::styled(fit_to_width(&format!(" {}", text), width), style));
        used += width;
    }
    Line::from(spans)
}
