//! Turning search outcomes into list entries and map markers.

use crate::map::{MapWidget, MarkerHandle};
use crate::state::{Coordinate, SearchOutcome};

/// One row of the results list, tagged with the coordinate it was rendered from.
#[derive(Clone, Debug, PartialEq)]
pub struct ListEntry {
    /// Stable element id, `place-{index}` with the index in API order.
    pub id: String,
    /// Place name.
    pub name: String,
    /// Formatted address, when known.
    pub address: Option<String>,
    /// Joined category names, when known.
    pub categories: Option<String>,
    /// Coordinate stored on the entry; used when the entry is activated.
    pub coordinate: Coordinate,
}

/// The results list container.
#[derive(Clone, Debug, Default)]
pub struct ResultList {
    entries: Vec<ListEntry>,
}

impl ResultList {
    /// Rendered entries in display order.
    #[must_use]
    pub fn entries(&self) -> &[ListEntry] {
        &self.entries
    }

    /// Entry at `index`.
    #[must_use]
    pub fn get(&self, index: usize) -> Option<&ListEntry> {
        self.entries.get(index)
    }

    /// Number of entries.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the list shows nothing.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    fn clear(&mut self) {
        self.entries.clear();
    }

    fn push(&mut self, entry: ListEntry) {
        self.entries.push(entry);
    }
}

/// What a call to [`render`] did.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct RenderSummary {
    /// Entries added to the list (and markers added to the map).
    pub listed: usize,
    /// Results skipped because their coordinate was unusable.
    pub skipped: usize,
    /// Error carried by a failed outcome.
    pub error: Option<String>,
}

/// What: Render a search outcome into the list and onto the map.
///
/// Inputs:
/// - `outcome`: Outcome of one search.
/// - `map`: Map to add markers to.
/// - `list`: Results list to repopulate.
///
/// Output:
/// - `RenderSummary` with counts and the outcome's error, if any.
///
/// Details:
/// - The list is always cleared first, also for failed and empty outcomes.
/// - Markers already on the map are left alone.
/// - Results keep API order; results with an invalid coordinate are skipped and logged.
pub fn render<M: MapWidget>(
    outcome: &SearchOutcome,
    map: &mut M,
    list: &mut ResultList,
) -> RenderSummary {
    list.clear();
    let mut summary = RenderSummary {
        error: outcome.error().map(str::to_string),
        ..RenderSummary::default()
    };
    if let Some(err) = &summary.error {
        tracing::warn!(error = %err, "search failed; list cleared");
    }

    for (index, place) in outcome.results().iter().enumerate() {
        if !place.coordinate.is_valid() {
            tracing::warn!(
                name = %place.name,
                latitude = place.coordinate.latitude,
                longitude = place.coordinate.longitude,
                "invalid coordinate for place; skipping"
            );
            summary.skipped += 1;
            continue;
        }
        list.push(ListEntry {
            id: format!("place-{index}"),
            name: place.name.clone(),
            address: place.address.clone(),
            categories: place.categories.clone(),
            coordinate: place.coordinate,
        });
        let marker = map.add_marker(place.coordinate);
        map.bind_popup(marker, &place.name);
        summary.listed += 1;
    }
    tracing::debug!(listed = summary.listed, skipped = summary.skipped, "rendered results");
    summary
}

/// What: Handle activation of a list entry.
///
/// Inputs:
/// - `entry`: Activated entry.
/// - `map`: Map to place the marker on.
///
/// Output:
/// - Handle of the marker whose popup is now open; `None` if the stored coordinate is unusable.
///
/// Details:
/// - Adds a marker at the stored coordinate with the entry's name, opens it, and centers
///   the map there at the current zoom. Never touches the network.
pub fn focus_entry<M: MapWidget>(entry: &ListEntry, map: &mut M) -> Option<MarkerHandle> {
    if !entry.coordinate.is_valid() {
        tracing::error!(id = %entry.id, coordinate = ?entry.coordinate, "invalid coordinate for marker");
        return None;
    }
    let marker = map.add_marker(entry.coordinate);
    map.bind_popup(marker, &entry.name);
    map.open_popup(marker);
    let zoom = map.zoom();
    map.set_view(entry.coordinate, zoom);
    Some(marker)
}
