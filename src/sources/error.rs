//! Error types for the places API and geolocation providers.

use thiserror::Error;

/// Why a place search did not produce results.
#[derive(Debug, Error)]
pub enum SearchError {
    /// The API answered with a non-2xx status.
    #[error("HTTP error! status: {status}{}", .message.as_deref().map(|m| format!(", message: {m}")).unwrap_or_default())]
    Api {
        /// HTTP status code.
        status: u16,
        /// Server-supplied `message`, when the error body was JSON.
        message: Option<String>,
    },
    /// The request could not be sent or the body could not be read.
    #[error("network error: {0}")]
    Network(#[from] reqwest::Error),
    /// The body was not valid JSON.
    #[error("malformed response body: {0}")]
    Decode(#[from] serde_json::Error),
    /// No credential is configured, so no request is sent.
    #[error("places API key is not configured (set places_api_key or NEARBY_PLACES_API_KEY)")]
    MissingApiKey,
    /// The endpoint or HTTP client could not be set up.
    #[error("invalid places client configuration: {0}")]
    Client(String),
}

/// Why a single result item was dropped during normalization.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum MalformedPlace {
    /// The item has no `geocodes.main` with numeric latitude and longitude.
    #[error("invalid geocode data for place {name:?}")]
    MissingGeocode {
        /// Name of the item, if it had one.
        name: String,
    },
    /// The item does not match the endpoint's item shape at all.
    #[error("undecodable place entry: {0}")]
    Undecodable(String),
}

/// Why the current position could not be determined.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum GeolocationError {
    /// Geolocation is disabled or not configured.
    #[error("geolocation permission denied: {0}")]
    PermissionDenied(String),
    /// The provider was reachable in principle but did not yield a position.
    #[error("position unavailable: {0}")]
    Unavailable(String),
}
