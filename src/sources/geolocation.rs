//! One-shot position providers.

use futures::FutureExt;
use futures::future::BoxFuture;
use serde::Deserialize;

use super::error::GeolocationError;
use crate::state::Coordinate;
use crate::theme::{GeolocationProvider, Settings};

/// What: Resolve the user's current position once.
///
/// Details:
/// - Success and failure are explicit; callers decide what a failure means.
pub trait Geolocator: Send + Sync {
    /// Query the current position.
    fn locate(&self) -> BoxFuture<'_, Result<Coordinate, GeolocationError>>;
}

/// Position taken from settings or the command line.
#[derive(Clone, Copy, Debug)]
pub struct FixedLocation(pub Coordinate);

impl Geolocator for FixedLocation {
    fn locate(&self) -> BoxFuture<'_, Result<Coordinate, GeolocationError>> {
        let c = self.0;
        async move {
            if c.is_valid() {
                Ok(c)
            } else {
                Err(GeolocationError::Unavailable(format!(
                    "configured position {c} is out of range"
                )))
            }
        }
        .boxed()
    }
}

/// Provider used when geolocation is switched off; always denies.
#[derive(Clone, Debug)]
pub struct Disabled(pub String);

impl Geolocator for Disabled {
    fn locate(&self) -> BoxFuture<'_, Result<Coordinate, GeolocationError>> {
        let reason = self.0.clone();
        async move { Err(GeolocationError::PermissionDenied(reason)) }.boxed()
    }
}

/// Body of an ipapi.co-compatible lookup.
#[derive(Deserialize)]
struct IpLookup {
    latitude: Option<f64>,
    longitude: Option<f64>,
    #[serde(default)]
    error: bool,
    reason: Option<String>,
}

/// Approximate position from the public IP address.
#[derive(Clone, Debug)]
pub struct IpGeolocator {
    http: reqwest::Client,
    url: String,
}

impl IpGeolocator {
    /// Create a provider querying `url`.
    #[must_use]
    pub fn new(url: &str) -> Self {
        Self {
            http: reqwest::Client::new(),
            url: url.to_string(),
        }
    }
}

/// What: Interpret an IP lookup response body.
///
/// Inputs:
/// - `body`: JSON text returned by the lookup endpoint.
///
/// Output:
/// - `Ok(Coordinate)` when both components are present and valid.
///
/// # Errors
/// - `Unavailable` when the body is not JSON, reports an error, or lacks a valid position.
pub fn parse_ip_lookup(body: &str) -> Result<Coordinate, GeolocationError> {
    let lookup: IpLookup = serde_json::from_str(body)
        .map_err(|e| GeolocationError::Unavailable(format!("unreadable lookup response: {e}")))?;
    if lookup.error {
        return Err(GeolocationError::Unavailable(
            lookup.reason.unwrap_or_else(|| "lookup refused".to_string()),
        ));
    }
    match (lookup.latitude, lookup.longitude) {
        (Some(lat), Some(lng)) if Coordinate::new(lat, lng).is_valid() => {
            Ok(Coordinate::new(lat, lng))
        }
        _ => Err(GeolocationError::Unavailable(
            "lookup response has no usable position".to_string(),
        )),
    }
}

impl Geolocator for IpGeolocator {
    fn locate(&self) -> BoxFuture<'_, Result<Coordinate, GeolocationError>> {
        async move {
            let response = self
                .http
                .get(&self.url)
                .send()
                .await
                .map_err(|e| GeolocationError::Unavailable(format!("network error: {e}")))?;
            let status = response.status();
            let body = response
                .text()
                .await
                .map_err(|e| GeolocationError::Unavailable(format!("network error: {e}")))?;
            if !status.is_success() {
                return Err(GeolocationError::Unavailable(format!(
                    "lookup returned status {status}"
                )));
            }
            parse_ip_lookup(&body)
        }
        .boxed()
    }
}

/// What: Pick the geolocation provider described by settings.
///
/// Inputs:
/// - `settings`: Loaded settings (provider, fixed position, lookup URL).
///
/// Output:
/// - Boxed provider ready to be queried once.
///
/// Details:
/// - `fixed` without both coordinates degrades to a denying provider.
#[must_use]
pub fn from_settings(settings: &Settings) -> Box<dyn Geolocator> {
    match settings.geolocation_provider {
        GeolocationProvider::Fixed => settings.fixed_location.map_or_else(
            || {
                Box::new(Disabled(
                    "fixed provider selected but latitude/longitude are not set".to_string(),
                )) as Box<dyn Geolocator>
            },
            |c| Box::new(FixedLocation(c)) as Box<dyn Geolocator>,
        ),
        GeolocationProvider::Ip => Box::new(IpGeolocator::new(&settings.ip_geolocation_url)),
        GeolocationProvider::Off => Box::new(Disabled("geolocation is turned off".to_string())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    /// What: IP lookup bodies map to coordinates or `Unavailable`.
    ///
    /// Inputs:
    /// - Successful, refused, incomplete and non-JSON bodies.
    ///
    /// Output:
    /// - Only the complete body yields a coordinate.
    fn ip_lookup_parsing() {
        assert_eq!(
            parse_ip_lookup(r#"{"ip":"1.2.3.4","latitude":48.85,"longitude":2.35}"#),
            Ok(Coordinate::new(48.85, 2.35))
        );
        assert_eq!(
            parse_ip_lookup(r#"{"error":true,"reason":"RateLimited"}"#),
            Err(GeolocationError::Unavailable("RateLimited".into()))
        );
        assert!(parse_ip_lookup(r#"{"latitude":48.85}"#).is_err());
        assert!(parse_ip_lookup("<html>").is_err());
    }

    #[tokio::test]
    /// What: Fixed and disabled providers resolve without network access.
    async fn fixed_and_disabled_providers() {
        let fixed = FixedLocation(Coordinate::new(10.0, 20.0));
        assert_eq!(fixed.locate().await, Ok(Coordinate::new(10.0, 20.0)));
        let out_of_range = FixedLocation(Coordinate::new(100.0, 20.0));
        assert!(matches!(
            out_of_range.locate().await,
            Err(GeolocationError::Unavailable(_))
        ));
        let off = Disabled("off".into());
        assert_eq!(
            off.locate().await,
            Err(GeolocationError::PermissionDenied("off".into()))
        );
    }

    #[tokio::test]
    /// What: `fixed` without a position falls back to a denying provider.
    async fn fixed_without_position_denies() {
        let settings = Settings {
            geolocation_provider: GeolocationProvider::Fixed,
            fixed_location: None,
            ..Settings::default()
        };
        let provider = from_settings(&settings);
        assert!(matches!(
            provider.locate().await,
            Err(GeolocationError::PermissionDenied(_))
        ));
    }
}
