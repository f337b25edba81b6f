//! Results list key handling.

use crossterm::event::{KeyCode, KeyEvent};
use tokio::sync::mpsc;

use crate::state::{AppState, Focus, SearchRequest};

/// Handle a key while the results list has focus.
pub(super) fn handle_results_key(
    ke: KeyEvent,
    app: &mut AppState,
    search_tx: &mpsc::UnboundedSender<SearchRequest>,
) {
    match ke.code {
        KeyCode::Char('/' | 'i') | KeyCode::Tab => app.focus = Focus::Search,
        KeyCode::Char('s') => {
            super::trigger_search(app, search_tx);
        }
        KeyCode::Up | KeyCode::Char('k') => app.move_selection(-1),
        KeyCode::Down | KeyCode::Char('j') => app.move_selection(1),
        KeyCode::Enter => {
            app.activate_selected();
        }
        KeyCode::Char('+' | '=') => super::zoom_map(app, true),
        KeyCode::Char('-') => super::zoom_map(app, false),
        _ => {}
    }
}
