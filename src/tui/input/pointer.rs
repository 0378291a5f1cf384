use crossterm::event::{MouseButton, MouseEvent, MouseEventKind};

use crate::overlay::{Disposition, PointerEvent};
use crate::tui::app::{App, Mode};

/// Wheel notches are reported one at a time; each scrolls this many rows.
const WHEEL_ROWS: i32 = 1;

/// Handle a mouse event. Positions are translated to grid space and offered
/// to the overlay before the grid reacts.
pub fn handle_mouse(app: &mut App, mouse: MouseEvent) {
    let Some((x, y)) = app.to_grid_space(mouse.column, mouse.row) else {
        return;
    };
    let event = match mouse.kind {
        MouseEventKind::Down(MouseButton::Left) => PointerEvent::Down { x, y },
        MouseEventKind::Moved => PointerEvent::Move { x, y },
        MouseEventKind::ScrollDown => PointerEvent::Wheel {
            x,
            y,
            delta: WHEEL_ROWS,
        },
        MouseEventKind::ScrollUp => PointerEvent::Wheel {
            x,
            y,
            delta: -WHEEL_ROWS,
        },
        _ => return,
    };

    if app.overlay.handle_pointer(event, &mut app.grid) == Disposition::Consumed {
        app.after_overlay_input();
        return;
    }

    match event {
        PointerEvent::Down { x, y } => {
            if let Some(coord) = app.cell_at(x, y) {
                if app.mode == Mode::Edit {
                    app.commit_edit(false);
                }
                app.set_focus(coord);
            }
        }
        PointerEvent::Wheel { delta, .. } => app.scroll_rows(delta),
        PointerEvent::Move { .. } => {}
    }
}
