use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;

use crate::parse::cell_ref::cell_name;
use crate::tui::app::{App, Mode};
use crate::util::unicode::display_width;

/// Render the status row (bottom of screen)
pub fn render_status_row(frame: &mut Frame, app: &App, area: Rect) {
    let bg = app.theme.background;
    let width = area.width as usize;

    let dirty = if app.is_dirty() { " [+]" } else { "" };
    let (mode, mode_color) = match app.mode {
        Mode::Navigate => ("NAV", app.theme.dim),
        Mode::Edit => ("EDIT", app.theme.highlight),
    };
    let mut spans = vec![
        Span::styled(
            format!(" {}{} ", cell_name(app.focus()), dirty),
            Style::default()
                .fg(app.theme.text_bright)
                .bg(bg)
                .add_modifier(Modifier::BOLD),
        ),
        Span::styled(
            format!(" {} ", mode),
            Style::default().fg(mode_color).bg(bg),
        ),
    ];
    if let Some(msg) = &app.message {
        spans.push(Span::styled(
            format!(" {}", msg),
            Style::default().fg(app.theme.text).bg(bg),
        ));
    }

    let hint = if app.overlay.is_open(&app.grid) {
        "\u{2191}\u{2193} choose  Enter pick  Esc close"
    } else if app.mode == Mode::Edit {
        "Enter commit  Esc cancel"
    } else {
        "Enter edit  Alt+\u{2193} list  ^S save  ^Q quit"
    };
    let content_width: usize = spans.iter().map(|s| display_width(&s.content)).sum();
    let hint_width = display_width(hint);
    if content_width + hint_width < width {
        let padding = width - content_width - hint_width;
        spans.push(Span::styled(" ".repeat(padding), Style::default().bg(bg)));
        spans.push(Span::styled(hint, Style::default().fg(app.theme.dim).bg(bg)));
    }

    let paragraph = Paragraph::new(Line::from(spans)).style(Style::default().bg(bg));
    frame.render_widget(paragraph, area);
}
