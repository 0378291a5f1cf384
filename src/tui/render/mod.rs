pub mod grid_view;
pub mod overlay;
pub mod status_row;

#[cfg(test)]
pub mod test_helpers;

use ratatui::Frame;
use ratatui::layout::{Constraint, Direction, Layout};
use ratatui::style::Style;
use ratatui::widgets::Block;

use super::app::App;

/// Main render function: grid, then the overlay on top, then the status row
pub fn render(frame: &mut Frame, app: &mut App) {
    let area = frame.area();

    let bg_style = Style::default().bg(app.theme.background);
    frame.render_widget(Block::default().style(bg_style), area);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(1), Constraint::Length(1)])
        .split(area);

    // Hit-testing and scrolling use the area from the latest frame
    if app.grid_area != chunks[0] {
        app.grid_area = chunks[0];
        app.ensure_visible();
    }

    grid_view::render_grid(frame, app, chunks[0]);

    if let Some(panel) = app.overlay.panel(&app.grid) {
        overlay::render_overlay(
            frame,
            &panel,
            app.grid_origin(),
            app.scroll_offset(),
            chunks[0],
            &app.theme,
        );
    }

    status_row::render_status_row(frame, app, chunks[1]);
}
