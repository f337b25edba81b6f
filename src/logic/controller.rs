//! Search interaction state machine: owns the session once geolocation resolves.

use super::render::{RenderSummary, ResultList, focus_entry, render};
use crate::map::{
    DEFAULT_ZOOM, MAP_ELEMENT_ID, MapWidget, MarkerHandle, OSM_TILE_URL, TileLayerOptions,
};
use crate::sources::{GeolocationError, PlaceSearch};
use crate::state::{Coordinate, SearchOutcome, SearchRequest};

/// Popup text of the marker at the user's position.
pub const USER_LOCATION_POPUP: &str = "Your Location";

/// Everything that exists once the position is known.
#[derive(Debug)]
pub struct Session<M> {
    /// Position resolved by geolocation; fixed for the session.
    pub coordinate: Coordinate,
    /// Map centered on `coordinate` at creation.
    pub map: M,
}

/// Controller state.
#[derive(Debug)]
enum ControllerState<M> {
    /// No position yet (or geolocation failed); searching is a no-op.
    Uninitialized,
    /// Position and map are available.
    Ready(Session<M>),
}

/// Wires the search trigger to the places client and the renderer.
#[derive(Debug)]
pub struct InteractionController<M> {
    state: ControllerState<M>,
    list: ResultList,
    accepts_query: bool,
    accumulate_markers: bool,
    geolocation_settled: bool,
    geolocation_error: Option<GeolocationError>,
    next_request_id: u64,
}

impl<M: MapWidget> InteractionController<M> {
    /// What: Create an uninitialized controller.
    ///
    /// Inputs:
    /// - `accepts_query`: Whether the search trigger forwards the query input.
    /// - `accumulate_markers`: Keep markers from earlier searches.
    ///
    /// Output:
    /// - Controller in `Uninitialized` with an empty list.
    #[must_use]
    pub fn new(accepts_query: bool, accumulate_markers: bool) -> Self {
        Self {
            state: ControllerState::Uninitialized,
            list: ResultList::default(),
            accepts_query,
            accumulate_markers,
            geolocation_settled: false,
            geolocation_error: None,
            next_request_id: 0,
        }
    }

    /// Whether a position and map are available.
    #[must_use]
    pub const fn is_ready(&self) -> bool {
        matches!(self.state, ControllerState::Ready(_))
    }

    /// Session, once ready.
    #[must_use]
    pub const fn session(&self) -> Option<&Session<M>> {
        match &self.state {
            ControllerState::Ready(s) => Some(s),
            ControllerState::Uninitialized => None,
        }
    }

    /// Map, once ready.
    #[must_use]
    pub fn map(&self) -> Option<&M> {
        self.session().map(|s| &s.map)
    }

    /// Mutable map access for view changes such as zooming.
    pub fn map_mut(&mut self) -> Option<&mut M> {
        match &mut self.state {
            ControllerState::Ready(s) => Some(&mut s.map),
            ControllerState::Uninitialized => None,
        }
    }

    /// The results list.
    #[must_use]
    pub const fn list(&self) -> &ResultList {
        &self.list
    }

    /// Error reported by the geolocation callback, if it failed.
    #[must_use]
    pub const fn geolocation_error(&self) -> Option<&GeolocationError> {
        self.geolocation_error.as_ref()
    }

    /// Whether the one-shot geolocation callback already fired.
    #[must_use]
    pub const fn geolocation_settled(&self) -> bool {
        self.geolocation_settled
    }

    fn add_user_marker(map: &mut M, at: Coordinate) -> MarkerHandle {
        let marker = map.add_marker(at);
        map.bind_popup(marker, USER_LOCATION_POPUP);
        marker
    }

    /// What: Handle the one-shot geolocation callback.
    ///
    /// Inputs:
    /// - `result`: Position or geolocation error.
    ///
    /// Output:
    /// - `true` when this call moved the controller to `Ready`.
    ///
    /// Details:
    /// - Only the first callback counts; later ones are logged and ignored.
    /// - Success creates the map at zoom 13 with the OpenStreetMap tile layer and an open
    ///   "Your Location" popup.
    /// - Failure (or an out-of-range position) leaves the controller uninitialized for good.
    pub fn on_geolocation(&mut self, result: Result<Coordinate, GeolocationError>) -> bool {
        if self.geolocation_settled {
            tracing::warn!("ignoring repeated geolocation callback");
            return false;
        }
        self.geolocation_settled = true;
        let coordinate = match result {
            Ok(c) if c.is_valid() => c,
            Ok(c) => {
                let err = GeolocationError::Unavailable(format!("invalid position {c:?}"));
                tracing::error!(error = %err, "geolocation error");
                self.geolocation_error = Some(err);
                return false;
            }
            Err(err) => {
                tracing::error!(error = %err, "geolocation error");
                self.geolocation_error = Some(err);
                return false;
            }
        };

        let mut map = M::create(MAP_ELEMENT_ID, coordinate, DEFAULT_ZOOM);
        map.add_tile_layer(OSM_TILE_URL, TileLayerOptions::openstreetmap());
        let marker = Self::add_user_marker(&mut map, coordinate);
        map.open_popup(marker);
        tracing::info!(%coordinate, "location acquired; map initialized");
        self.state = ControllerState::Ready(Session { coordinate, map });
        true
    }

    /// What: Guard the search trigger and build the request.
    ///
    /// Inputs:
    /// - `input`: Current content of the query input.
    ///
    /// Output:
    /// - `Some(SearchRequest)` when ready; `None` (logged, nothing else happens) otherwise.
    ///
    /// Details:
    /// - The query is only forwarded when the controller accepts free text and the trimmed
    ///   input is non-empty.
    pub fn prepare_search(&mut self, input: &str) -> Option<SearchRequest> {
        let ControllerState::Ready(session) = &self.state else {
            tracing::error!("map is not initialized or location unknown; search ignored");
            return None;
        };
        let query = if self.accepts_query {
            Some(input.trim())
                .filter(|q| !q.is_empty())
                .map(str::to_string)
        } else {
            None
        };
        self.next_request_id += 1;
        Some(SearchRequest {
            id: self.next_request_id,
            coordinate: session.coordinate,
            query,
        })
    }

    /// What: Render a search outcome into the session map and the list.
    ///
    /// Inputs:
    /// - `outcome`: Outcome of a search started by [`Self::prepare_search`].
    ///
    /// Output:
    /// - `Some(RenderSummary)`; `None` if the controller is not ready.
    ///
    /// Details:
    /// - Without marker accumulation, previous markers are cleared and the user marker
    ///   is placed again before rendering.
    pub fn apply_outcome(&mut self, outcome: &SearchOutcome) -> Option<RenderSummary> {
        let ControllerState::Ready(session) = &mut self.state else {
            tracing::warn!("dropping search outcome; controller is not ready");
            return None;
        };
        if !self.accumulate_markers {
            session.map.clear_markers();
            Self::add_user_marker(&mut session.map, session.coordinate);
        }
        Some(render(outcome, &mut session.map, &mut self.list))
    }

    /// What: Run a full search: guard, query the client, render.
    ///
    /// Inputs:
    /// - `client`: Places search implementation.
    /// - `input`: Current content of the query input.
    ///
    /// Output:
    /// - `Some(RenderSummary)` when a search ran; `None` when not ready (no call is made).
    pub async fn search<C: PlaceSearch>(
        &mut self,
        client: &C,
        input: &str,
    ) -> Option<RenderSummary> {
        let request = self.prepare_search(input)?;
        let outcome = client
            .search(request.coordinate, request.query.as_deref())
            .await;
        self.apply_outcome(&outcome)
    }

    /// What: Handle activation ("click") of the list entry at `index`.
    ///
    /// Inputs:
    /// - `index`: Position in the results list.
    ///
    /// Output:
    /// - `true` when a popup was opened.
    pub fn activate_entry(&mut self, index: usize) -> bool {
        let ControllerState::Ready(session) = &mut self.state else {
            return false;
        };
        let Some(entry) = self.list.get(index) else {
            tracing::debug!(index, "no list entry to activate");
            return false;
        };
        focus_entry(entry, &mut session.map).is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::map::{MIN_ZOOM, TerminalMap};
    use crate::state::PlaceResult;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Mutex;

    /// Records calls and replays a fixed outcome.
    struct FakeSearch {
        calls: AtomicUsize,
        last_query: Mutex<Option<String>>,
        outcome: SearchOutcome,
    }

    impl FakeSearch {
        fn new(outcome: SearchOutcome) -> Self {
            Self {
                calls: AtomicUsize::new(0),
                last_query: Mutex::new(None),
                outcome,
            }
        }
    }

    impl PlaceSearch for FakeSearch {
        async fn search(&self, _coordinate: Coordinate, query: Option<&str>) -> SearchOutcome {
            self.calls.fetch_add(1, Ordering::SeqCst);
            if let Ok(mut q) = self.last_query.lock() {
                *q = query.map(str::to_string);
            }
            self.outcome.clone()
        }
    }

    fn place(name: &str, lat: f64, lng: f64) -> PlaceResult {
        PlaceResult {
            name: name.into(),
            coordinate: Coordinate::new(lat, lng),
            address: None,
            categories: None,
        }
    }

    fn ready(accepts_query: bool, accumulate: bool) -> InteractionController<TerminalMap> {
        let mut c = InteractionController::new(accepts_query, accumulate);
        assert!(c.on_geolocation(Ok(Coordinate::new(52.0, 4.0))));
        c
    }

    #[test]
    /// What: Successful geolocation initializes the map once at zoom 13.
    ///
    /// Inputs:
    /// - A successful callback, then a second one at another position.
    ///
    /// Output:
    /// - Map centered at the first position, OSM layer, open "Your Location" popup;
    ///   the second callback changes nothing.
    fn geolocation_initializes_map_once() {
        let mut c: InteractionController<TerminalMap> = InteractionController::new(false, true);
        assert!(!c.is_ready());
        assert!(c.on_geolocation(Ok(Coordinate::new(52.0, 4.0))));
        assert!(!c.on_geolocation(Ok(Coordinate::new(10.0, 10.0))));

        let session = c.session().expect("ready");
        assert_eq!(session.coordinate, Coordinate::new(52.0, 4.0));
        let map = &session.map;
        assert_eq!(map.element_id(), MAP_ELEMENT_ID);
        assert_eq!(map.center(), Coordinate::new(52.0, 4.0));
        assert_eq!(map.zoom(), 13);
        let layer = map.tile_layer().expect("tile layer");
        assert_eq!(layer.url_template, OSM_TILE_URL);
        assert_eq!(layer.options.min_zoom, MIN_ZOOM);
        assert_eq!(map.markers().len(), 1);
        assert_eq!(
            map.open_popup_marker().and_then(|m| m.popup.as_deref()),
            Some(USER_LOCATION_POPUP)
        );
    }

    #[test]
    /// What: A failed callback leaves the controller uninitialized permanently.
    ///
    /// Inputs:
    /// - A denied callback followed by a successful one.
    ///
    /// Output:
    /// - Still uninitialized; the error is kept.
    fn failed_geolocation_is_permanent() {
        let mut c: InteractionController<TerminalMap> = InteractionController::new(false, true);
        assert!(!c.on_geolocation(Err(GeolocationError::PermissionDenied("denied".into()))));
        assert!(!c.on_geolocation(Ok(Coordinate::new(1.0, 1.0))));
        assert!(!c.is_ready());
        assert!(c.geolocation_settled());
        assert!(matches!(
            c.geolocation_error(),
            Some(GeolocationError::PermissionDenied(_))
        ));
    }

    #[test]
    /// What: An out-of-range position counts as a failure.
    fn invalid_position_is_a_failure() {
        let mut c: InteractionController<TerminalMap> = InteractionController::new(false, true);
        assert!(!c.on_geolocation(Ok(Coordinate::new(f64::NAN, 0.0))));
        assert!(!c.is_ready());
        assert!(c.geolocation_error().is_some());
    }

    #[tokio::test]
    /// What: Searching while uninitialized makes no call and leaves the list untouched.
    ///
    /// Inputs:
    /// - Fresh controller and a fake client.
    ///
    /// Output:
    /// - `None`, zero client calls, empty list.
    async fn search_while_uninitialized_is_noop() {
        let mut c: InteractionController<TerminalMap> = InteractionController::new(true, true);
        let fake = FakeSearch::new(SearchOutcome::Found(vec![place("A", 1.0, 1.0)]));
        assert!(c.search(&fake, "coffee").await.is_none());
        assert_eq!(fake.calls.load(Ordering::SeqCst), 0);
        assert!(c.list().is_empty());
        assert!(c.map().is_none());
    }

    #[tokio::test]
    /// What: A ready search calls the client and renders, skipping bad items.
    ///
    /// Inputs:
    /// - Three places with the second one unusable.
    ///
    /// Output:
    /// - Two entries, two place markers plus the user marker.
    async fn search_renders_results() {
        let mut c = ready(false, true);
        let fake = FakeSearch::new(SearchOutcome::Found(vec![
            place("A", 52.001, 4.001),
            place("B", f64::INFINITY, 4.0),
            place("C", 52.002, 4.002),
        ]));
        let summary = c.search(&fake, "ignored").await.expect("ran");
        assert_eq!(summary.listed, 2);
        assert_eq!(fake.calls.load(Ordering::SeqCst), 1);
        assert_eq!(c.list().len(), 2);
        assert_eq!(c.map().expect("map").markers().len(), 3);
    }

    #[tokio::test]
    /// What: The query is forwarded only when the controller accepts free text.
    async fn query_forwarding_follows_mode() {
        let fake = FakeSearch::new(SearchOutcome::Found(Vec::new()));
        let mut text = ready(true, true);
        text.search(&fake, "  ramen ").await;
        assert_eq!(
            fake.last_query.lock().expect("lock").as_deref(),
            Some("ramen")
        );

        let mut nearby = ready(false, true);
        nearby.search(&fake, "ramen").await;
        assert_eq!(fake.last_query.lock().expect("lock").as_deref(), None);
    }

    #[tokio::test]
    /// What: Markers accumulate across searches unless disabled.
    ///
    /// Inputs:
    /// - Two searches returning one place each, with and without accumulation.
    ///
    /// Output:
    /// - Accumulating: user + 2 markers. Not accumulating: user + 1 marker.
    async fn marker_accumulation_setting() {
        let fake = FakeSearch::new(SearchOutcome::Found(vec![place("A", 52.001, 4.001)]));

        let mut keep = ready(false, true);
        keep.search(&fake, "").await;
        keep.search(&fake, "").await;
        assert_eq!(keep.map().expect("map").markers().len(), 3);
        assert_eq!(keep.list().len(), 1);

        let mut replace = ready(false, false);
        replace.search(&fake, "").await;
        replace.search(&fake, "").await;
        let markers = replace.map().expect("map").markers();
        assert_eq!(markers.len(), 2);
        assert_eq!(markers[0].popup.as_deref(), Some(USER_LOCATION_POPUP));
    }

    #[tokio::test]
    /// What: A failed outcome clears the list and reports the error.
    async fn failed_outcome_clears_list() {
        let mut c = ready(false, true);
        let ok = FakeSearch::new(SearchOutcome::Found(vec![place("A", 52.001, 4.001)]));
        c.search(&ok, "").await;
        assert_eq!(c.list().len(), 1);

        let failing = FakeSearch::new(SearchOutcome::Failed("HTTP error! status: 429".into()));
        let summary = c.search(&failing, "").await.expect("ran");
        assert!(c.list().is_empty());
        assert_eq!(summary.error.as_deref(), Some("HTTP error! status: 429"));
        assert_eq!(c.map().expect("map").markers().len(), 2);
    }

    #[tokio::test]
    /// What: Activating an entry opens its popup at its coordinate.
    ///
    /// Inputs:
    /// - One rendered place, activated by index; then an out-of-range index.
    ///
    /// Output:
    /// - Popup text equals the entry name; out-of-range activation is refused.
    async fn activate_entry_round_trip() {
        let mut c = ready(false, true);
        let fake = FakeSearch::new(SearchOutcome::Found(vec![place("Cafe Noir", 52.003, 4.004)]));
        c.search(&fake, "").await;
        assert!(c.activate_entry(0));
        let entry = c.list().get(0).expect("entry").clone();
        let map = c.map().expect("map");
        let open = map.open_popup_marker().expect("open popup");
        assert_eq!(open.popup.as_deref(), Some(entry.name.as_str()));
        assert_eq!(open.position, entry.coordinate);
        assert_eq!(map.center(), entry.coordinate);
        assert!(!c.activate_entry(5));
    }

    #[test]
    /// What: Request ids increase with every accepted trigger.
    fn request_ids_are_monotonic() {
        let mut c = ready(true, true);
        let a = c.prepare_search("x").expect("ready");
        let b = c.prepare_search("").expect("ready");
        assert!(b.id > a.id);
        assert_eq!(b.query, None);
        assert_eq!(a.coordinate, Coordinate::new(52.0, 4.0));
    }
}
