use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::tui::app::App;

pub(super) fn handle_navigate(app: &mut App, key: KeyEvent) {
    match (key.modifiers, key.code) {
        (KeyModifiers::CONTROL, KeyCode::Char('q')) => app.should_quit = true,
        (KeyModifiers::CONTROL, KeyCode::Char('s')) => app.save(),

        (_, KeyCode::Up) => app.move_focus(-1, 0),
        (_, KeyCode::Down) => app.move_focus(1, 0),
        (_, KeyCode::Left) => app.move_focus(0, -1),
        (_, KeyCode::Right) | (_, KeyCode::Tab) => app.move_focus(0, 1),
        (_, KeyCode::BackTab) => app.move_focus(0, -1),
        (_, KeyCode::PageDown) => app.move_focus(page(app), 0),
        (_, KeyCode::PageUp) => app.move_focus(-page(app), 0),

        (_, KeyCode::Enter) | (_, KeyCode::F(2)) => app.begin_edit(None),
        (_, KeyCode::Delete) | (_, KeyCode::Backspace) => app.clear_cell(),

        (m, KeyCode::Char(c)) if !m.intersects(KeyModifiers::CONTROL | KeyModifiers::ALT) => {
            app.begin_edit(Some(c))
        }
        _ => {}
    }
}

fn page(app: &App) -> isize {
    app.grid_area.height.saturating_sub(2).max(1) as isize
}
