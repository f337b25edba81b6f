//! Query input key handling.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use tokio::sync::mpsc;

use crate::state::{AppState, Focus, SearchRequest};

/// What: Handle a key while the query input has focus.
///
/// Inputs:
/// - `ke`: Key event.
/// - `app`: Mutable application state.
/// - `search_tx`: Channel to the search worker.
///
/// Details:
/// - `Enter` fires the search trigger, `Esc`/`Tab` move focus to the list,
///   `Ctrl+U` clears the line.
pub(super) fn handle_input_key(
    ke: KeyEvent,
    app: &mut AppState,
    search_tx: &mpsc::UnboundedSender<SearchRequest>,
) {
    match ke.code {
        KeyCode::Enter => {
            super::trigger_search(app, search_tx);
        }
        KeyCode::Esc | KeyCode::Tab => app.focus = Focus::Results,
        KeyCode::Backspace => {
            app.input.pop();
        }
        KeyCode::Char('u') if ke.modifiers.contains(KeyModifiers::CONTROL) => app.input.clear(),
        KeyCode::Char(c) if !ke.modifiers.contains(KeyModifiers::CONTROL) => app.input.push(c),
        _ => {}
    }
}
