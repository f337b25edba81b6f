use ratatui::{Terminal, backend::CrosstermBackend};
use tokio::select;

use crate::state::AppState;
use crate::ui::ui;

use super::channels::Channels;

type Result<T> = std::result::Result<T, Box<dyn std::error::Error + Send + Sync>>;

/// What: Process one message from any channel.
///
/// Inputs:
/// - `app`: Application state
/// - `channels`: Communication channels for background workers
///
/// Output: `true` if the event loop should exit, `false` to continue
///
/// Details:
/// - Exits as well when the terminal event channel closes.
async fn process_channel_messages(app: &mut AppState, channels: &mut Channels) -> bool {
    select! {
        ev = channels.event_rx.recv() => {
            match ev {
                Some(ev) => crate::events::handle_event(ev, app, &channels.search_req_tx),
                None => true,
            }
        }
        Some(result) = channels.geo_rx.recv() => {
            app.apply_geolocation(result);
            false
        }
        Some(results) = channels.results_rx.recv() => {
            tracing::debug!(id = results.id, "applying search outcome");
            app.apply_results(results);
            false
        }
    }
}

/// What: Run the main event loop, rendering a frame before each message.
///
/// Inputs:
/// - `terminal`: Terminal to draw into.
/// - `app`: Application state.
/// - `channels`: Communication channels for background workers.
///
/// Output:
/// - `Ok(())` on quit; `Err` when drawing fails.
pub async fn run_event_loop(
    terminal: &mut Terminal<CrosstermBackend<std::io::Stdout>>,
    app: &mut AppState,
    channels: &mut Channels,
) -> Result<()> {
    loop {
        terminal.draw(|f| ui(f, app))?;
        if process_channel_messages(app, channels).await {
            tracing::info!("quit requested");
            return Ok(());
        }
    }
}
