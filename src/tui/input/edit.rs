use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::tui::app::App;

pub(super) fn handle_edit(app: &mut App, key: KeyEvent) {
    match (key.modifiers, key.code) {
        (_, KeyCode::Esc) => app.cancel_edit(),
        (_, KeyCode::Enter) => app.commit_edit(true),
        (_, KeyCode::Tab) => {
            app.commit_edit(false);
            app.move_focus(0, 1);
        }
        (_, KeyCode::Backspace) => app.edit_backspace(),
        (m, KeyCode::Char(c)) if !m.intersects(KeyModifiers::CONTROL | KeyModifiers::ALT) => {
            app.edit_push(c)
        }
        _ => {}
    }
}
