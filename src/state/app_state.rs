//! Central `AppState` container owned by the UI task.

use ratatui::widgets::ListState;

use crate::logic::InteractionController;
use crate::map::TerminalMap;
use crate::sources::GeolocationError;
use crate::state::types::{Coordinate, Focus, SearchMode, SearchRequest, SearchResults};
use crate::theme::Settings;

/// Application state shared by the event, runtime and UI layers.
///
/// Mutated only by the event loop; background workers talk to it through channels.
#[derive(Debug)]
pub struct AppState {
    /// Search session: map, results list and the Uninitialized/Ready state.
    pub controller: InteractionController<TerminalMap>,
    /// Endpoint variant the search trigger uses.
    pub mode: SearchMode,
    /// Current query input text.
    pub input: String,
    /// Pane receiving keyboard input.
    pub focus: Focus,
    /// Selection state for the results list.
    pub list_state: ListState,
    /// One-line status shown below the panes.
    pub status: String,
    /// Error of the most recently applied search, if it failed.
    pub last_error: Option<String>,
    /// Searches sent to the worker whose outcome has not landed yet.
    pub in_flight: usize,
    /// Inner rectangle of the results list `(x, y, width, height)`, recorded while drawing.
    pub results_rect: Option<(u16, u16, u16, u16)>,
    /// Show the keybinds footer.
    pub show_keybinds_footer: bool,
}

impl Default for AppState {
    fn default() -> Self {
        Self::new(&Settings::default())
    }
}

impl AppState {
    /// What: Build the initial state from settings.
    ///
    /// Inputs:
    /// - `settings`: Loaded settings (mode, marker accumulation, footer visibility).
    ///
    /// Output:
    /// - State waiting for geolocation; text mode starts with the input focused.
    #[must_use]
    pub fn new(settings: &Settings) -> Self {
        let text_mode = settings.search_mode == SearchMode::Text;
        Self {
            controller: InteractionController::new(text_mode, settings.accumulate_markers),
            mode: settings.search_mode,
            input: String::new(),
            focus: if text_mode {
                Focus::Search
            } else {
                Focus::Results
            },
            list_state: ListState::default(),
            status: "Locating…".to_string(),
            last_error: None,
            in_flight: 0,
            results_rect: None,
            show_keybinds_footer: settings.show_keybinds_footer,
        }
    }

    /// Index of the highlighted list entry.
    #[must_use]
    pub fn selected(&self) -> Option<usize> {
        self.list_state
            .selected()
            .filter(|i| *i < self.controller.list().len())
    }

    /// What: Move the list selection by `delta`, clamped to the list.
    ///
    /// Inputs:
    /// - `delta`: Rows to move; negative moves up.
    ///
    /// Output:
    /// - None (updates `list_state`).
    pub fn move_selection(&mut self, delta: isize) {
        let len = self.controller.list().len();
        if len == 0 {
            self.list_state.select(None);
            return;
        }
        let current = self.selected().unwrap_or(0);
        let next = current.saturating_add_signed(delta).min(len - 1);
        self.list_state.select(Some(next));
    }

    /// What: Feed the geolocation result into the controller and update the status line.
    ///
    /// Inputs:
    /// - `result`: Position or error from the geolocation worker.
    pub fn apply_geolocation(&mut self, result: Result<Coordinate, GeolocationError>) {
        if self.controller.on_geolocation(result) {
            let hint = match self.mode {
                SearchMode::Nearby => "press s to search nearby",
                SearchMode::Text => "type a query and press Enter",
            };
            if let Some(session) = self.controller.session() {
                self.status = format!("Location {}; {hint}", session.coordinate);
            }
        } else if let Some(err) = self.controller.geolocation_error() {
            self.status = format!("{err}; searching is unavailable");
        }
    }

    /// What: Handle the search trigger.
    ///
    /// Inputs:
    /// - None (reads `input`).
    ///
    /// Output:
    /// - Request to hand to the search worker, or `None` when the location is unknown.
    pub fn request_search(&mut self) -> Option<SearchRequest> {
        let Some(request) = self.controller.prepare_search(&self.input) else {
            self.status = "Location unknown; search unavailable".to_string();
            return None;
        };
        self.in_flight += 1;
        self.status = match &request.query {
            Some(q) => format!("Searching for \"{q}\"…"),
            None => "Searching nearby…".to_string(),
        };
        Some(request)
    }

    /// What: Apply a landed search outcome.
    ///
    /// Inputs:
    /// - `results`: Outcome tagged with its request id.
    ///
    /// Output:
    /// - None (list, markers, selection and status updated).
    ///
    /// Details:
    /// - Outcomes are applied in arrival order; the last to land owns the list.
    pub fn apply_results(&mut self, results: SearchResults) {
        self.in_flight = self.in_flight.saturating_sub(1);
        tracing::debug!(id = results.id, in_flight = self.in_flight, "applying search outcome");
        let Some(summary) = self.controller.apply_outcome(&results.outcome) else {
            return;
        };
        self.list_state.select((summary.listed > 0).then_some(0));
        self.status = match &summary.error {
            Some(err) => format!("Search failed: {err}"),
            None if summary.listed == 0 => "No places found".to_string(),
            None if summary.skipped > 0 => format!(
                "{} ({} without a usable location skipped)",
                place_count(summary.listed),
                summary.skipped
            ),
            None => place_count(summary.listed),
        };
        self.last_error = summary.error;
    }

    /// What: Activate the highlighted entry: open its popup and center the map on it.
    ///
    /// Output:
    /// - `true` when a popup was opened.
    pub fn activate_selected(&mut self) -> bool {
        let Some(index) = self.selected() else {
            return false;
        };
        let opened = self.controller.activate_entry(index);
        if opened && let Some(entry) = self.controller.list().get(index) {
            self.status = format!("{} at {}", entry.name, entry.coordinate);
        }
        opened
    }
}

fn place_count(n: usize) -> String {
    if n == 1 {
        "1 place".to_string()
    } else {
        format!("{n} places")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::{PlaceResult, SearchOutcome};

    fn place(name: &str, lat: f64, lng: f64) -> PlaceResult {
        PlaceResult {
            name: name.into(),
            coordinate: Coordinate::new(lat, lng),
            address: None,
            categories: None,
        }
    }

    fn located() -> AppState {
        let mut app = AppState::default();
        app.apply_geolocation(Ok(Coordinate::new(48.85, 2.35)));
        app
    }

    #[test]
    /// What: Search trigger is refused before the location is known.
    ///
    /// Inputs:
    /// - Default state without a geolocation result.
    ///
    /// Output:
    /// - No request, nothing in flight, status explains why.
    fn request_search_requires_location() {
        let mut app = AppState::default();
        assert!(app.request_search().is_none());
        assert_eq!(app.in_flight, 0);
        assert!(app.status.contains("unavailable"));
    }

    #[test]
    /// What: A denied geolocation is reported on the status line.
    fn geolocation_error_reaches_status() {
        let mut app = AppState::default();
        app.apply_geolocation(Err(GeolocationError::PermissionDenied("denied".into())));
        assert!(!app.controller.is_ready());
        assert!(app.status.contains("unavailable"));
    }

    #[test]
    /// What: Landed outcomes update the list, selection, counters and status.
    ///
    /// Inputs:
    /// - Two overlapping requests; a successful outcome then a failed one.
    ///
    /// Output:
    /// - After the first: two entries, first selected. After the second: empty list,
    ///   error kept, nothing in flight.
    fn apply_results_updates_view() {
        let mut app = located();
        let a = app.request_search().expect("request");
        let b = app.request_search().expect("request");
        assert_eq!(app.in_flight, 2);

        app.apply_results(SearchResults {
            id: a.id,
            outcome: SearchOutcome::Found(vec![place("A", 48.851, 2.351), place("B", 48.852, 2.352)]),
        });
        assert_eq!(app.controller.list().len(), 2);
        assert_eq!(app.selected(), Some(0));
        assert_eq!(app.status, "2 places");
        assert_eq!(app.in_flight, 1);

        app.apply_results(SearchResults {
            id: b.id,
            outcome: SearchOutcome::Failed("HTTP error! status: 429".into()),
        });
        assert!(app.controller.list().is_empty());
        assert_eq!(app.selected(), None);
        assert_eq!(app.last_error.as_deref(), Some("HTTP error! status: 429"));
        assert_eq!(app.in_flight, 0);
    }

    #[test]
    /// What: Selection moves within bounds and activation opens the popup.
    fn selection_and_activation() {
        let mut app = located();
        app.apply_results(SearchResults {
            id: 1,
            outcome: SearchOutcome::Found(vec![place("A", 48.851, 2.351), place("B", 48.852, 2.352)]),
        });
        app.move_selection(5);
        assert_eq!(app.selected(), Some(1));
        app.move_selection(-9);
        assert_eq!(app.selected(), Some(0));
        app.move_selection(1);
        assert!(app.activate_selected());
        let map = app.controller.map().expect("map");
        assert_eq!(
            map.open_popup_marker().and_then(|m| m.popup.as_deref()),
            Some("B")
        );
    }
}
