//! Map widget contract and the terminal implementation drawn by the UI.

mod terminal;

pub use terminal::{Marker, TerminalMap, TileLayer, Viewport};

use crate::state::Coordinate;

/// Zoom level the map is created at.
pub const DEFAULT_ZOOM: u8 = 13;
/// Lowest zoom the tile layer allows.
pub const MIN_ZOOM: u8 = 13;
/// Highest zoom the map can be brought to.
pub const MAX_ZOOM: u8 = 19;
/// Element identity of the map container.
pub const MAP_ELEMENT_ID: &str = "map";
/// Public OpenStreetMap tile server template.
pub const OSM_TILE_URL: &str = "https://{s}.tile.openstreetmap.org/{z}/{x}/{y}.png";
/// Attribution required by the OpenStreetMap tile usage policy.
pub const OSM_ATTRIBUTION: &str = "© OpenStreetMap contributors";

/// Options accepted by [`MapWidget::add_tile_layer`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TileLayerOptions {
    /// Attribution text shown with the map.
    pub attribution: String,
    /// Minimum zoom at which tiles are requested.
    pub min_zoom: u8,
}

impl TileLayerOptions {
    /// Options for the public OpenStreetMap tile server.
    #[must_use]
    pub fn openstreetmap() -> Self {
        Self {
            attribution: OSM_ATTRIBUTION.to_string(),
            min_zoom: MIN_ZOOM,
        }
    }
}

/// Handle to a marker previously added to a [`MapWidget`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct MarkerHandle(pub(crate) usize);

/// What: Contract of the mapping widget the controller and renderer draw on.
///
/// Details:
/// - Markers are additive; only [`MapWidget::clear_markers`] removes them.
/// - At most one popup is open at a time; opening one closes the previous.
pub trait MapWidget {
    /// Create a map inside `element_id`, centered at `center`.
    fn create(element_id: &str, center: Coordinate, zoom: u8) -> Self
    where
        Self: Sized;

    /// Attach a raster tile layer.
    fn add_tile_layer(&mut self, url_template: &str, options: TileLayerOptions);

    /// Place a marker and return its handle.
    fn add_marker(&mut self, at: Coordinate) -> MarkerHandle;

    /// Bind popup text to a marker without opening it.
    fn bind_popup(&mut self, marker: MarkerHandle, content: &str);

    /// Open the popup bound to `marker`.
    fn open_popup(&mut self, marker: MarkerHandle);

    /// Move the view.
    fn set_view(&mut self, center: Coordinate, zoom: u8);

    /// Current view center.
    fn center(&self) -> Coordinate;

    /// Current zoom level.
    fn zoom(&self) -> u8;

    /// Remove every marker (and close any open popup).
    fn clear_markers(&mut self);
}
