//! Mouse handling for the results list.

use crossterm::event::{MouseButton, MouseEvent, MouseEventKind};

use crate::state::{AppState, Focus};

/// What: Check if mouse coordinates are within a rectangle.
///
/// Inputs:
/// - `mx`, `my`: Mouse position.
/// - `rect`: Optional rectangle tuple (x, y, width, height).
///
/// Output:
/// - `true` if the position is inside; `false` when `rect` is `None`.
const fn is_in_rect(mx: u16, my: u16, rect: Option<(u16, u16, u16, u16)>) -> bool {
    let Some((x, y, w, h)) = rect else {
        return false;
    };
    mx >= x && mx < x + w && my >= y && my < y + h
}

/// What: Handle a mouse event over the results list.
///
/// Inputs:
/// - `m`: Mouse event.
/// - `app`: Mutable application state.
///
/// Output:
/// - `true` if the event was consumed.
///
/// Details:
/// - Left click selects and activates the row under the cursor; the wheel moves the selection.
pub(super) fn handle_mouse_event(m: MouseEvent, app: &mut AppState) -> bool {
    let Some((_, y, _, _)) = app
        .results_rect
        .filter(|_| is_in_rect(m.column, m.row, app.results_rect))
    else {
        return false;
    };
    match m.kind {
        MouseEventKind::Down(MouseButton::Left) => {
            let row = usize::from(m.row - y);
            let idx = app.list_state.offset() + row;
            if idx >= app.controller.list().len() {
                return false;
            }
            app.focus = Focus::Results;
            app.list_state.select(Some(idx));
            app.activate_selected();
            true
        }
        MouseEventKind::ScrollUp => {
            app.move_selection(-1);
            true
        }
        MouseEventKind::ScrollDown => {
            app.move_selection(1);
            true
        }
        _ => false,
    }
}
