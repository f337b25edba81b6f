//! Core value types shared by the search client, renderer, controller and UI.

/// A latitude/longitude pair in decimal degrees.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Coordinate {
    /// Degrees north of the equator (negative for south).
    pub latitude: f64,
    /// Degrees east of Greenwich (negative for west).
    pub longitude: f64,
}

impl Coordinate {
    /// Build a coordinate from latitude and longitude.
    #[must_use]
    pub const fn new(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude,
            longitude,
        }
    }

    /// What: Check that the coordinate can be placed on a map.
    ///
    /// Inputs: none
    ///
    /// Output:
    /// - `true` when both components are finite and within WGS84 bounds.
    #[must_use]
    pub fn is_valid(&self) -> bool {
        self.latitude.is_finite()
            && self.longitude.is_finite()
            && self.latitude.abs() <= 90.0
            && self.longitude.abs() <= 180.0
    }

    /// Format as the `lat,lng` pair expected by the places API `ll` parameter.
    #[must_use]
    pub fn to_ll_param(&self) -> String {
        format!("{},{}", self.latitude, self.longitude)
    }
}

impl std::fmt::Display for Coordinate {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:.5}, {:.5}", self.latitude, self.longitude)
    }
}

/// One business returned by the places API, normalized for rendering.
#[derive(Clone, Debug, PartialEq)]
pub struct PlaceResult {
    /// Display name of the place.
    pub name: String,
    /// Main geocode of the place.
    pub coordinate: Coordinate,
    /// Formatted street address when the endpoint provides one.
    pub address: Option<String>,
    /// Category names joined with `", "`.
    pub categories: Option<String>,
}

/// Result of one place search: either places (possibly none) or an error message.
#[derive(Clone, Debug, PartialEq)]
pub enum SearchOutcome {
    /// Places in the order returned by the API.
    Found(Vec<PlaceResult>),
    /// The search failed; carries a human-readable description.
    Failed(String),
}

impl SearchOutcome {
    /// Places carried by the outcome; empty for a failed search.
    #[must_use]
    pub fn results(&self) -> &[PlaceResult] {
        match self {
            Self::Found(results) => results,
            Self::Failed(_) => &[],
        }
    }

    /// Error message of a failed search.
    #[must_use]
    pub fn error(&self) -> Option<&str> {
        match self {
            Self::Found(_) => None,
            Self::Failed(msg) => Some(msg),
        }
    }
}

/// Which places endpoint the search trigger uses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum)]
pub enum SearchMode {
    /// Proximity browse with a fixed radius and result limit.
    #[default]
    Nearby,
    /// Free-text query sorted by distance.
    Text,
}

impl SearchMode {
    /// Return the string key used in settings files for this mode.
    #[must_use]
    pub const fn as_config_key(&self) -> &'static str {
        match self {
            Self::Nearby => "nearby",
            Self::Text => "text",
        }
    }

    /// What: Parse a search mode from its settings key or aliases.
    ///
    /// Inputs: `s` config string (case-insensitive).
    ///
    /// Output: `Some(SearchMode)` on recognized value; `None` otherwise.
    #[must_use]
    pub fn from_config_key(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "nearby" | "browse" | "proximity" => Some(Self::Nearby),
            "text" | "query" | "search" => Some(Self::Text),
            _ => None,
        }
    }
}

/// Search request handed from the controller to the background search worker.
#[derive(Clone, Debug, PartialEq)]
pub struct SearchRequest {
    /// Monotonic identifier used to correlate responses.
    pub id: u64,
    /// Center of the search.
    pub coordinate: Coordinate,
    /// Free-text query, when the search mode accepts one.
    pub query: Option<String>,
}

/// Outcome corresponding to a prior [`SearchRequest`].
#[derive(Clone, Debug)]
pub struct SearchResults {
    /// Echoed identifier from the originating request.
    pub id: u64,
    /// What the search produced.
    pub outcome: SearchOutcome,
}

/// Which pane currently receives keyboard input.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Focus {
    /// Query input line.
    Search,
    /// Results list.
    #[default]
    Results,
}
