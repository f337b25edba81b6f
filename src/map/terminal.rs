//! In-memory map widget rendered onto a ratatui canvas.

use super::{MAX_ZOOM, MIN_ZOOM, MapWidget, MarkerHandle, TileLayerOptions};
use crate::state::Coordinate;

/// Number of 256px tiles the terminal viewport spans horizontally.
const VIEWPORT_TILES: f64 = 2.0;

/// A marker placed on a [`TerminalMap`].
#[derive(Clone, Debug, PartialEq)]
pub struct Marker {
    /// Where the marker sits.
    pub position: Coordinate,
    /// Popup text, if one was bound.
    pub popup: Option<String>,
}

/// Tile layer attached to the map.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TileLayer {
    /// URL template with `{s}`, `{z}`, `{x}`, `{y}` placeholders.
    pub url_template: String,
    /// Attribution and zoom options.
    pub options: TileLayerOptions,
}

/// Visible longitude/latitude window, suitable for canvas bounds.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Viewport {
    /// `[west, east]` longitude bounds.
    pub x_bounds: [f64; 2],
    /// `[south, north]` latitude bounds.
    pub y_bounds: [f64; 2],
}

impl Viewport {
    /// Whether `c` falls inside the window.
    #[must_use]
    pub fn contains(&self, c: Coordinate) -> bool {
        c.longitude >= self.x_bounds[0]
            && c.longitude <= self.x_bounds[1]
            && c.latitude >= self.y_bounds[0]
            && c.latitude <= self.y_bounds[1]
    }
}

/// Map widget that keeps its state in memory; the UI draws it every frame.
#[derive(Clone, Debug)]
pub struct TerminalMap {
    element_id: String,
    center: Coordinate,
    zoom: u8,
    tile_layer: Option<TileLayer>,
    markers: Vec<Marker>,
    open_popup: Option<MarkerHandle>,
}

impl TerminalMap {
    /// Element identity the map was created in.
    #[must_use]
    pub fn element_id(&self) -> &str {
        &self.element_id
    }

    /// All markers in insertion order.
    #[must_use]
    pub fn markers(&self) -> &[Marker] {
        &self.markers
    }

    /// Attached tile layer, if any.
    #[must_use]
    pub const fn tile_layer(&self) -> Option<&TileLayer> {
        self.tile_layer.as_ref()
    }

    /// Marker whose popup is currently open.
    #[must_use]
    pub fn open_popup_marker(&self) -> Option<&Marker> {
        self.open_popup.and_then(|h| self.markers.get(h.0))
    }

    /// What: Compute the visible window for the current center and zoom.
    ///
    /// Inputs: none
    ///
    /// Output:
    /// - `Viewport` spanning [`VIEWPORT_TILES`] web-mercator tiles of longitude.
    ///
    /// Details:
    /// - Latitude span is scaled by `cos(latitude)` and halved to account for
    ///   terminal cells being about twice as tall as they are wide.
    #[must_use]
    pub fn viewport(&self) -> Viewport {
        let lng_span = 360.0 / 2f64.powi(i32::from(self.zoom)) * VIEWPORT_TILES;
        let lat_span = lng_span * self.center.latitude.to_radians().cos().abs().max(0.01) / 2.0;
        Viewport {
            x_bounds: [
                self.center.longitude - lng_span / 2.0,
                self.center.longitude + lng_span / 2.0,
            ],
            y_bounds: [
                self.center.latitude - lat_span / 2.0,
                self.center.latitude + lat_span / 2.0,
            ],
        }
    }

    /// Zoom in one level, up to [`MAX_ZOOM`].
    pub fn zoom_in(&mut self) {
        self.zoom = (self.zoom + 1).min(MAX_ZOOM);
    }

    /// Zoom out one level, down to the tile layer's minimum zoom.
    pub fn zoom_out(&mut self) {
        let floor = self
            .tile_layer
            .as_ref()
            .map_or(MIN_ZOOM, |t| t.options.min_zoom);
        self.zoom = self.zoom.saturating_sub(1).max(floor);
    }
}

impl MapWidget for TerminalMap {
    fn create(element_id: &str, center: Coordinate, zoom: u8) -> Self {
        tracing::debug!(element = element_id, %center, zoom, "map created");
        Self {
            element_id: element_id.to_string(),
            center,
            zoom: zoom.clamp(MIN_ZOOM, MAX_ZOOM),
            tile_layer: None,
            markers: Vec::new(),
            open_popup: None,
        }
    }

    fn add_tile_layer(&mut self, url_template: &str, options: TileLayerOptions) {
        self.zoom = self.zoom.max(options.min_zoom);
        self.tile_layer = Some(TileLayer {
            url_template: url_template.to_string(),
            options,
        });
    }

    fn add_marker(&mut self, at: Coordinate) -> MarkerHandle {
        self.markers.push(Marker {
            position: at,
            popup: None,
        });
        MarkerHandle(self.markers.len() - 1)
    }

    fn bind_popup(&mut self, marker: MarkerHandle, content: &str) {
        if let Some(m) = self.markers.get_mut(marker.0) {
            m.popup = Some(content.to_string());
        }
    }

    fn open_popup(&mut self, marker: MarkerHandle) {
        if self.markers.get(marker.0).is_some_and(|m| m.popup.is_some()) {
            self.open_popup = Some(marker);
        }
    }

    fn set_view(&mut self, center: Coordinate, zoom: u8) {
        self.center = center;
        self.zoom = zoom.clamp(MIN_ZOOM, MAX_ZOOM);
    }

    fn center(&self) -> Coordinate {
        self.center
    }

    fn zoom(&self) -> u8 {
        self.zoom
    }

    fn clear_markers(&mut self) {
        self.markers.clear();
        self.open_popup = None;
    }
}
