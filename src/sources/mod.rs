//! Network-backed data sources: the places API and geolocation providers.

mod error;
pub mod geolocation;
mod places;
mod response;

pub use error::{GeolocationError, MalformedPlace, SearchError};
pub use geolocation::Geolocator;
pub use places::{PlaceQuery, PlaceSearch, PlaceSearchClient};
pub use response::{Endpoint, parse_error_message, parse_places};
