//! Event handling layer for the nearby TUI.
//!
//! `handle_event` dispatches global shortcuts first, then delegates to the
//! focused pane and to mouse handling.

use crossterm::event::{Event as CEvent, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use tokio::sync::mpsc;

use crate::state::{AppState, Focus, SearchRequest};

mod input;
mod mouse;
mod results;

/// What: Dispatch a single terminal event and mutate the [`AppState`].
///
/// Inputs:
/// - `ev`: Terminal event from the reader thread.
/// - `app`: Mutable application state.
/// - `search_tx`: Channel to the search worker.
///
/// Output:
/// - `true` to signal the application should exit; otherwise `false`.
pub fn handle_event(
    ev: CEvent,
    app: &mut AppState,
    search_tx: &mpsc::UnboundedSender<SearchRequest>,
) -> bool {
    match ev {
        CEvent::Key(ke) => {
            if ke.kind != KeyEventKind::Press {
                return false;
            }
            if is_quit(&ke, app.focus) {
                return true;
            }
            match app.focus {
                Focus::Search => input::handle_input_key(ke, app, search_tx),
                Focus::Results => results::handle_results_key(ke, app, search_tx),
            }
            false
        }
        CEvent::Mouse(m) => {
            mouse::handle_mouse_event(m, app);
            false
        }
        _ => false,
    }
}

/// `Ctrl+C` always quits; `q` only quits outside the input.
fn is_quit(ke: &KeyEvent, focus: Focus) -> bool {
    match ke.code {
        KeyCode::Char('c') if ke.modifiers.contains(KeyModifiers::CONTROL) => true,
        KeyCode::Char('q') => focus == Focus::Results && ke.modifiers.is_empty(),
        _ => false,
    }
}

/// What: Fire the search trigger and hand the request to the worker.
///
/// Inputs:
/// - `app`: Mutable application state.
/// - `search_tx`: Channel to the search worker.
///
/// Output:
/// - `true` when a request was sent.
///
/// Details:
/// - While the location is unknown nothing is sent; the status line says so.
pub(crate) fn trigger_search(
    app: &mut AppState,
    search_tx: &mpsc::UnboundedSender<SearchRequest>,
) -> bool {
    let Some(request) = app.request_search() else {
        return false;
    };
    tracing::debug!(id = request.id, query = ?request.query, "search requested");
    if search_tx.send(request).is_err() {
        tracing::error!("search worker is gone; request dropped");
        app.in_flight = app.in_flight.saturating_sub(1);
        app.status = "Search worker stopped".to_string();
        return false;
    }
    true
}

/// Zoom the map one level in (`true`) or out (`false`), if it exists.
pub(crate) fn zoom_map(app: &mut AppState, zoom_in: bool) {
    if let Some(map) = app.controller.map_mut() {
        if zoom_in {
            map.zoom_in();
        } else {
            map.zoom_out();
        }
    }
}
