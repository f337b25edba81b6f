//! Response shapes of the places endpoints and their normalization into [`PlaceResult`].
//!
//! Each endpoint variant has its own item type; items are decoded one by one so a
//! single malformed entry never discards the rest of the batch.

use serde::Deserialize;
use serde_json::Value;

use super::error::MalformedPlace;
use crate::state::{Coordinate, PlaceResult};

/// Which endpoint produced a response body.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Endpoint {
    /// `/nearby`: proximity browse.
    Nearby,
    /// `/search`: text query with distance sort.
    Search,
}

/// Error body returned with non-2xx statuses.
#[derive(Deserialize)]
struct ErrorBody {
    message: Option<String>,
}

#[derive(Deserialize, Default)]
struct Geocodes {
    main: Option<LatLng>,
}

#[derive(Deserialize)]
struct LatLng {
    latitude: Option<f64>,
    longitude: Option<f64>,
}

#[derive(Deserialize)]
struct Category {
    #[serde(default)]
    name: String,
}

#[derive(Deserialize, Default)]
struct NearbyLocation {
    formatted_address: Option<String>,
}

/// Item of the `/nearby` endpoint.
#[derive(Deserialize)]
struct NearbyPlace {
    #[serde(default)]
    name: String,
    geocodes: Option<Geocodes>,
    location: Option<NearbyLocation>,
    #[serde(default)]
    categories: Vec<Category>,
}

#[derive(Deserialize, Default)]
struct SearchLocation {
    formatted_address: Option<String>,
    address: Option<String>,
    locality: Option<String>,
}

/// Item of the `/search` endpoint.
#[derive(Deserialize)]
struct SearchPlace {
    #[serde(default)]
    name: String,
    geocodes: Option<Geocodes>,
    location: Option<SearchLocation>,
    #[serde(default)]
    categories: Vec<Category>,
}

/// Typed item of either endpoint.
enum PlaceItem {
    Nearby(NearbyPlace),
    Search(SearchPlace),
}

fn non_empty(s: Option<String>) -> Option<String> {
    s.map(|v| v.trim().to_string()).filter(|v| !v.is_empty())
}

fn join_categories(categories: &[Category]) -> Option<String> {
    let names: Vec<&str> = categories
        .iter()
        .map(|c| c.name.trim())
        .filter(|n| !n.is_empty())
        .collect();
    if names.is_empty() {
        None
    } else {
        Some(names.join(", "))
    }
}

fn main_geocode(name: &str, geocodes: Option<&Geocodes>) -> Result<Coordinate, MalformedPlace> {
    match geocodes.and_then(|g| g.main.as_ref()) {
        Some(LatLng {
            latitude: Some(lat),
            longitude: Some(lng),
        }) => Ok(Coordinate::new(*lat, *lng)),
        _ => Err(MalformedPlace::MissingGeocode {
            name: name.to_string(),
        }),
    }
}

impl PlaceItem {
    fn decode(endpoint: Endpoint, raw: Value) -> Result<Self, MalformedPlace> {
        let decoded = match endpoint {
            Endpoint::Nearby => serde_json::from_value(raw).map(Self::Nearby),
            Endpoint::Search => serde_json::from_value(raw).map(Self::Search),
        };
        decoded.map_err(|e| MalformedPlace::Undecodable(e.to_string()))
    }

    fn normalize(self) -> Result<PlaceResult, MalformedPlace> {
        match self {
            Self::Nearby(p) => {
                let coordinate = main_geocode(&p.name, p.geocodes.as_ref())?;
                Ok(PlaceResult {
                    address: non_empty(p.location.and_then(|l| l.formatted_address)),
                    categories: join_categories(&p.categories),
                    name: p.name,
                    coordinate,
                })
            }
            Self::Search(p) => {
                let coordinate = main_geocode(&p.name, p.geocodes.as_ref())?;
                let address = p.location.and_then(|l| {
                    non_empty(l.formatted_address).or_else(|| {
                        let parts: Vec<String> = [l.address, l.locality]
                            .into_iter()
                            .filter_map(non_empty)
                            .collect();
                        non_empty(Some(parts.join(", ")))
                    })
                });
                Ok(PlaceResult {
                    address,
                    categories: join_categories(&p.categories),
                    name: p.name,
                    coordinate,
                })
            }
        }
    }
}

/// What: Normalize a successful response body into place results.
///
/// Inputs:
/// - `endpoint`: Endpoint the body came from (selects the item shape).
/// - `body`: Raw JSON text.
///
/// Output:
/// - `Ok(Vec<PlaceResult>)` in API order; `Err` when the body is not JSON.
///
/// Details:
/// - The body is read as raw JSON so items can fail individually.
/// - A body that is not an object, or a missing or non-array `results`, yields an empty list.
/// - Items that fail to decode or lack a main geocode are logged and dropped.
pub fn parse_places(endpoint: Endpoint, body: &str) -> Result<Vec<PlaceResult>, serde_json::Error> {
    let mut value: Value = serde_json::from_str(body)?;
    let Some(Value::Array(items)) = value.get_mut("results").map(Value::take) else {
        tracing::debug!(?endpoint, "response carries no results array");
        return Ok(Vec::new());
    };
    let total = items.len();
    let places: Vec<PlaceResult> = items
        .into_iter()
        .enumerate()
        .filter_map(|(index, raw)| {
            match PlaceItem::decode(endpoint, raw).and_then(PlaceItem::normalize) {
                Ok(place) => Some(place),
                Err(err) => {
                    tracing::warn!(index, error = %err, "dropping place entry");
                    None
                }
            }
        })
        .collect();
    tracing::debug!(?endpoint, total, kept = places.len(), "normalized places");
    Ok(places)
}

/// Extract the server `message` from an error body, when it is JSON.
#[must_use]
pub fn parse_error_message(body: &str) -> Option<String> {
    serde_json::from_str::<ErrorBody>(body)
        .ok()
        .and_then(|b| non_empty(b.message))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    /// What: Nearby items map name, geocode, formatted address and categories.
    ///
    /// Inputs:
    /// - A `/nearby` body with one complete item.
    ///
    /// Output:
    /// - One `PlaceResult` with categories joined by `", "`.
    fn nearby_item_normalizes() {
        let body = r#"{"results":[{
            "name":"Bakkerij Jansen",
            "geocodes":{"main":{"latitude":52.371,"longitude":4.896}},
            "location":{"formatted_address":"Damstraat 1, Amsterdam"},
            "categories":[{"name":"Bakery"},{"name":"Cafe"}]
        }]}"#;
        let places = parse_places(Endpoint::Nearby, body).expect("valid json");
        assert_eq!(
            places,
            vec![PlaceResult {
                name: "Bakkerij Jansen".into(),
                coordinate: Coordinate::new(52.371, 4.896),
                address: Some("Damstraat 1, Amsterdam".into()),
                categories: Some("Bakery, Cafe".into()),
            }]
        );
    }

    #[test]
    /// What: A malformed middle item is dropped and the batch continues.
    ///
    /// Inputs:
    /// - Three items where the second has no `geocodes.main`.
    ///
    /// Output:
    /// - Two results, first and third, in API order.
    fn malformed_item_is_dropped() {
        let body = r#"{"results":[
            {"name":"A","geocodes":{"main":{"latitude":1.0,"longitude":2.0}}},
            {"name":"B","geocodes":{"roof":{"latitude":1.0,"longitude":2.0}}},
            {"name":"C","geocodes":{"main":{"latitude":3.0,"longitude":4.0}}}
        ]}"#;
        let places = parse_places(Endpoint::Nearby, body).expect("valid json");
        let names: Vec<&str> = places.iter().map(|p| p.name.as_str()).collect();
        assert_eq!(names, ["A", "C"]);
        assert!(places.iter().all(|p| p.address.is_none() && p.categories.is_none()));
    }

    #[test]
    /// What: Non-numeric coordinates and wrongly typed items are dropped.
    ///
    /// Inputs:
    /// - An item with string latitude, a bare string item, and a valid item.
    ///
    /// Output:
    /// - Only the valid item survives.
    fn undecodable_items_are_dropped() {
        let body = r#"{"results":[
            {"name":"Bad","geocodes":{"main":{"latitude":"1.0","longitude":2.0}}},
            "not an object",
            {"name":"Good","geocodes":{"main":{"latitude":1.0,"longitude":2.0}}}
        ]}"#;
        let places = parse_places(Endpoint::Search, body).expect("valid json");
        assert_eq!(places.len(), 1);
        assert_eq!(places[0].name, "Good");
    }

    #[test]
    /// What: Search items fall back to address + locality.
    ///
    /// Inputs:
    /// - A `/search` item without `formatted_address`.
    ///
    /// Output:
    /// - Address is the joined street and locality.
    fn search_item_address_fallback() {
        let body = r#"{"results":[{
            "name":"Blue Bottle",
            "geocodes":{"main":{"latitude":37.77,"longitude":-122.42}},
            "location":{"address":"66 Mint St","locality":"San Francisco"},
            "categories":[]
        }]}"#;
        let places = parse_places(Endpoint::Search, body).expect("valid json");
        assert_eq!(places[0].address.as_deref(), Some("66 Mint St, San Francisco"));
        assert_eq!(places[0].categories, None);
    }

    #[test]
    /// What: Missing or non-array `results` is an empty success, invalid JSON an error.
    fn results_field_shapes() {
        assert!(parse_places(Endpoint::Nearby, "{}").expect("json").is_empty());
        assert!(
            parse_places(Endpoint::Nearby, r#"{"results":{"a":1}}"#)
                .expect("json")
                .is_empty()
        );
        assert!(parse_places(Endpoint::Nearby, "<html>").is_err());
    }

    #[test]
    /// What: JSON bodies that are not objects carry no results instead of failing.
    ///
    /// Inputs:
    /// - `null`, a string, a number, and a nested array that looks like a tuple struct.
    ///
    /// Output:
    /// - An empty list for each.
    fn non_object_bodies_are_empty() {
        let nested = r#"[[{"name":"A","geocodes":{"main":{"latitude":1.0,"longitude":2.0}}}]]"#;
        for body in ["null", "\"x\"", "42", nested] {
            let places = parse_places(Endpoint::Nearby, body).expect("valid json");
            assert!(places.is_empty(), "body {body} yielded {places:?}");
        }
    }

    #[test]
    /// What: Error bodies yield their message only when it is present and JSON.
    fn error_message_extraction() {
        assert_eq!(
            parse_error_message(r#"{"message":"Quota exceeded"}"#).as_deref(),
            Some("Quota exceeded")
        );
        assert_eq!(parse_error_message(r#"{"message":""}"#), None);
        assert_eq!(parse_error_message("Too Many Requests"), None);
    }
}
