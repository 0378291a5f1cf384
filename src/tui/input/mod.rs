mod edit;
mod navigate;
mod pointer;

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::overlay::{Disposition, NavKey};

use super::app::{App, Mode};

pub use pointer::handle_mouse;

/// Map a key to what the overlay understands. Chords are never overlay keys.
fn nav_key(key: &KeyEvent) -> NavKey {
    if key
        .modifiers
        .intersects(KeyModifiers::CONTROL | KeyModifiers::ALT)
    {
        return NavKey::Other;
    }
    match key.code {
        KeyCode::Up => NavKey::Up,
        KeyCode::Down => NavKey::Down,
        KeyCode::Enter => NavKey::Enter,
        KeyCode::Tab => NavKey::Tab,
        KeyCode::Esc => NavKey::Escape,
        _ => NavKey::Other,
    }
}

/// Handle a key event. The overlay sees every key first; whatever it
/// passes through goes to the current mode.
pub fn handle_key(app: &mut App, key: KeyEvent) {
    // Ignore bare modifier key presses (Shift, Ctrl, Alt, etc.)
    if matches!(key.code, KeyCode::Modifier(_)) {
        return;
    }
    app.message = None;

    if key.modifiers.contains(KeyModifiers::ALT)
        && key.code == KeyCode::Down
        && !app.overlay.is_open(&app.grid)
    {
        app.open_dropdown();
        return;
    }

    if app.overlay.handle_key(nav_key(&key), &mut app.grid) == Disposition::Consumed {
        app.after_overlay_input();
        return;
    }

    match app.mode {
        Mode::Navigate => navigate::handle_navigate(app, key),
        Mode::Edit => edit::handle_edit(app, key),
    }
}
