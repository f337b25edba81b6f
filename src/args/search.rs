//! Command-line search: one lookup printed to a writer, no TUI.

use std::io::Write;

use crate::logic::InteractionController;
use crate::map::TerminalMap;
use crate::sources::{PlaceSearchClient, geolocation};
use crate::state::SearchMode;
use crate::theme::Settings;

type Result<T> = std::result::Result<T, Box<dyn std::error::Error + Send + Sync>>;

/// What: Locate, search once and print the results.
///
/// Inputs:
/// - `settings`: Effective settings.
/// - `query`: Query text for text mode.
/// - `out`: Destination of the listing.
///
/// Output:
/// - `Ok(true)` when the search succeeded (possibly with zero results), `Ok(false)` when the
///   location is unavailable or the search failed; `Err` on I/O or client setup errors.
///
/// Details:
/// - Goes through the same controller and renderer as the TUI, so skipped items and
///   error strings match what the list would show.
pub async fn print_search<W: Write>(
    settings: &Settings,
    query: Option<&str>,
    out: &mut W,
) -> Result<bool> {
    let client = PlaceSearchClient::new(settings)?;
    let mut controller: InteractionController<TerminalMap> =
        InteractionController::new(settings.search_mode == SearchMode::Text, true);

    let located = geolocation::from_settings(settings).locate().await;
    if !controller.on_geolocation(located) {
        let reason = controller
            .geolocation_error()
            .map_or_else(|| "unknown".to_string(), ToString::to_string);
        writeln!(out, "Location unavailable: {reason}")?;
        return Ok(false);
    }

    let Some(summary) = controller.search(&client, query.unwrap_or_default()).await else {
        return Ok(false);
    };
    if let Some(err) = &summary.error {
        writeln!(out, "Search failed: {err}")?;
        return Ok(false);
    }
    if controller.list().is_empty() {
        writeln!(out, "No places found")?;
        return Ok(true);
    }
    for (i, entry) in controller.list().entries().iter().enumerate() {
        writeln!(out, "{:>2}. {}  ({})", i + 1, entry.name, entry.coordinate)?;
        let detail = [entry.categories.as_deref(), entry.address.as_deref()]
            .into_iter()
            .flatten()
            .collect::<Vec<_>>()
            .join(" · ");
        if !detail.is_empty() {
            writeln!(out, "    {detail}")?;
        }
    }
    if summary.skipped > 0 {
        writeln!(out, "({} without a usable location skipped)", summary.skipped)?;
    }
    Ok(true)
}
