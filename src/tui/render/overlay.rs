use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, Paragraph};

use crate::overlay::PanelView;
use crate::tui::theme::Theme;
use crate::util::unicode::fit_to_width;

const ACTIVE_PREFIX: &str = " \u{25B8} ";
const PREFIX: &str = "   ";

/// Draw the candidate panel over the grid.
///
/// `origin` is the screen position of grid-space (0, 0) and `scroll` the
/// grid-space offset of the scrolled view. A panel scrolled past the top
/// or left edge is not drawn.
pub fn render_overlay(
    frame: &mut Frame,
    panel: &PanelView,
    origin: (u16, u16),
    scroll: (u32, u32),
    clip: Rect,
    theme: &Theme,
) {
    let b = panel.bounds;
    let (Some(dx), Some(dy)) = (b.left.checked_sub(scroll.0), b.top.checked_sub(scroll.1)) else {
        return;
    };
    let (Ok(x), Ok(y)) = (
        u16::try_from(origin.0 as u32 + dx),
        u16::try_from(origin.1 as u32 + dy),
    ) else {
        return;
    };
    let width = u16::try_from(b.width).unwrap_or(u16::MAX);
    let height = u16::try_from(b.height).unwrap_or(u16::MAX);
    let area = Rect::new(x, y, width, height).intersection(clip);
    if area.width < 3 || area.height < 3 {
        return;
    }

    let marker_w = if panel.multi { 2 } else { 0 };
    let label_w = (area.width as usize - 2).saturating_sub(PREFIX.len() + marker_w);

    let mut lines: Vec<Line> = Vec::with_capacity(panel.rows.len());
    for row in &panel.rows {
        let style = if row.active {
            Style::default()
                .fg(theme.text_bright)
                .bg(theme.selection_bg)
                .add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(theme.text).bg(theme.panel_bg)
        };

        let mut spans = vec![Span::styled(
            if row.active { ACTIVE_PREFIX } else { PREFIX },
            style,
        )];
        if panel.multi {
            let (mark, mark_style) = if row.checked {
                ("\u{2713} ", style.fg(theme.green))
            } else {
                ("  ", style)
            };
            spans.push(Span::styled(mark, mark_style));
        }
        spans.push(Span::styled(fit_to_width(&row.label, label_w), style));
        lines.push(Line::from(spans));
    }

    let mut block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(theme.panel_border).bg(theme.panel_bg))
        .style(Style::default().bg(theme.panel_bg));
    if panel.hidden_above > 0 {
        block = block.title_top(Line::from(format!(" -{} ", panel.hidden_above)).right_aligned());
    }
    if panel.hidden_below > 0 {
        block =
            block.title_bottom(Line::from(format!(" +{} ", panel.hidden_below)).right_aligned());
    }

    frame.render_widget(Clear, area);
    frame.render_widget(Paragraph::new(lines).block(block), area);
}
