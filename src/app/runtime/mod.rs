use std::sync::Arc;

use ratatui::{Terminal, backend::CrosstermBackend};

use crate::sources::{PlaceSearchClient, geolocation};
use crate::state::AppState;
use crate::theme::Settings;

use super::terminal::{restore_terminal, setup_terminal};

mod channels;
mod event_loop;
mod workers;

use channels::Channels;
use event_loop::run_event_loop;
use workers::{spawn_event_thread, spawn_geolocation_worker, spawn_search_worker};

type Result<T> = std::result::Result<T, Box<dyn std::error::Error + Send + Sync>>;

/// What: Run the nearby TUI end-to-end: set up the terminal, spawn the geolocation and search
/// workers, drive the event loop, and restore the terminal on exit.
///
/// Inputs:
/// - `settings`: Effective settings (file, environment and CLI merged).
/// - `initial_query`: Text to prefill the query input with.
///
/// Output:
/// - `Ok(())` when the UI exits cleanly; `Err` on unrecoverable terminal or client errors.
///
/// Details:
/// - Geolocation starts immediately; searching stays a no-op until it succeeds.
/// - Searches only run when the user fires the trigger.
pub async fn run(settings: Settings, initial_query: Option<String>) -> Result<()> {
    let client = Arc::new(PlaceSearchClient::new(&settings)?);
    if settings.places_api_key.is_empty() {
        tracing::warn!(
            env = crate::theme::API_KEY_ENV,
            "no places API key configured; searches will fail"
        );
    }

    let mut app = AppState::new(&settings);
    if let Some(q) = initial_query {
        app.input = q;
    }

    let mut channels = Channels::new();
    spawn_geolocation_worker(geolocation::from_settings(&settings), channels.geo_tx.clone());
    if let Some(req_rx) = channels.search_req_rx.take() {
        spawn_search_worker(req_rx, channels.search_result_tx.clone(), client);
    }

    if let Err(e) = setup_terminal() {
        return keep_primary_error(Err(e), restore_terminal());
    }
    let mut terminal = match Terminal::new(CrosstermBackend::new(std::io::stdout())) {
        Ok(t) => t,
        Err(e) => return keep_primary_error(Err(e.into()), restore_terminal()),
    };
    spawn_event_thread(
        channels.event_tx.clone(),
        channels.event_thread_cancelled.clone(),
    );

    let loop_result = run_event_loop(&mut terminal, &mut app, &mut channels).await;

    channels
        .event_thread_cancelled
        .store(true, std::sync::atomic::Ordering::Relaxed);
    keep_primary_error(loop_result, restore_terminal())
}

/// What: Combine the outcome of the UI with the outcome of restoring the terminal.
///
/// Inputs:
/// - `primary`: Result of the work done while the terminal was set up.
/// - `restore`: Result of `restore_terminal`.
///
/// Output:
/// - `primary` when it failed (a restore failure is only logged); otherwise `restore`.
fn keep_primary_error<T>(primary: Result<T>, restore: Result<()>) -> Result<T> {
    match (primary, restore) {
        (Err(e), Err(restore_err)) => {
            tracing::error!(error = %restore_err, "failed to restore terminal");
            Err(e)
        }
        (Err(e), Ok(())) => Err(e),
        (Ok(_), Err(restore_err)) => Err(restore_err),
        (Ok(v), Ok(())) => Ok(v),
    }
}
