use ratatui::style::Color;
use reqwest::header::HeaderValue;
use zeroize::Zeroizing;

use crate::sources::SearchError;
use crate::state::{Coordinate, SearchMode};

/// Application theme palette used by rendering code.
///
/// All colors are provided as [`ratatui::style::Color`] and are suitable for
/// direct use with widgets and styles.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Theme {
    /// Primary background color for the canvas.
    pub base: Color,
    /// Darkest background shade, used as text on highlighted rows.
    pub crust: Color,
    /// Subtle surface color for borders of unfocused panes.
    pub surface2: Color,
    /// Muted overlay line/border color (primary).
    pub overlay1: Color,
    /// Muted overlay line/border color (secondary).
    pub overlay2: Color,
    /// Primary foreground text color.
    pub text: Color,
    /// Secondary text for less prominent content.
    pub subtext0: Color,
    /// Accent color used for focus and interactive highlights.
    pub sapphire: Color,
    /// Accent color for headings and the user location marker.
    pub mauve: Color,
    /// Success/positive state color.
    pub green: Color,
    /// Warning/attention state color; place markers.
    pub yellow: Color,
    /// Error/danger state color.
    pub red: Color,
    /// Accent color for selection backgrounds.
    pub lavender: Color,
}

impl Default for Theme {
    /// Catppuccin Mocha.
    fn default() -> Self {
        Self {
            base: Color::Rgb(0x1e, 0x1e, 0x2e),
            crust: Color::Rgb(0x11, 0x11, 0x1b),
            surface2: Color::Rgb(0x58, 0x5b, 0x70),
            overlay1: Color::Rgb(0x7f, 0x84, 0x9c),
            overlay2: Color::Rgb(0x93, 0x99, 0xb2),
            text: Color::Rgb(0xcd, 0xd6, 0xf4),
            subtext0: Color::Rgb(0xa6, 0xad, 0xc8),
            sapphire: Color::Rgb(0x74, 0xc7, 0xec),
            mauve: Color::Rgb(0xcb, 0xa6, 0xf7),
            green: Color::Rgb(0xa6, 0xe3, 0xa1),
            yellow: Color::Rgb(0xf9, 0xe2, 0xaf),
            red: Color::Rgb(0xf3, 0x8b, 0xa8),
            lavender: Color::Rgb(0xb4, 0xbe, 0xfe),
        }
    }
}

/// Places API credential. Wiped on drop and never printed.
#[derive(Clone, Default)]
pub struct ApiKey(Zeroizing<String>);

impl ApiKey {
    /// Wrap a credential, trimming surrounding whitespace.
    #[must_use]
    pub fn new(key: &str) -> Self {
        Self(Zeroizing::new(key.trim().to_string()))
    }

    /// Whether no credential is configured.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// What: Turn the credential into an `Authorization` header value.
    ///
    /// Inputs: none
    ///
    /// Output:
    /// - Sensitive `HeaderValue` carrying the key verbatim.
    ///
    /// # Errors
    /// - `SearchError::Client` when the key contains characters not allowed in headers.
    pub fn header_value(&self) -> Result<HeaderValue, SearchError> {
        let mut value = HeaderValue::from_str(&self.0)
            .map_err(|_| SearchError::Client("API key is not a valid header value".into()))?;
        value.set_sensitive(true);
        Ok(value)
    }
}

impl std::fmt::Debug for ApiKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.is_empty() {
            f.write_str("ApiKey(<unset>)")
        } else {
            f.write_str("ApiKey(<redacted>)")
        }
    }
}

/// Where the one-shot position comes from.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum GeolocationProvider {
    /// Approximate position from the public IP address.
    #[default]
    Ip,
    /// `latitude`/`longitude` from settings or the command line.
    Fixed,
    /// Never resolve; searching stays unavailable.
    Off,
}

impl GeolocationProvider {
    /// Return the string key used in settings files.
    #[must_use]
    pub const fn as_config_key(&self) -> &'static str {
        match self {
            Self::Ip => "ip",
            Self::Fixed => "fixed",
            Self::Off => "off",
        }
    }

    /// Parse a provider from its settings key (case-insensitive).
    #[must_use]
    pub fn from_config_key(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "ip" | "auto" => Some(Self::Ip),
            "fixed" | "manual" | "static" => Some(Self::Fixed),
            "off" | "none" | "disabled" => Some(Self::Off),
            _ => None,
        }
    }
}

/// User-configurable application settings parsed from `settings.conf`.
#[derive(Clone, Debug)]
#[allow(clippy::struct_excessive_bools)]
pub struct Settings {
    /// Places API credential, sent as the `Authorization` header.
    pub places_api_key: ApiKey,
    /// Base URL of the places endpoints (`/nearby` and `/search` are appended).
    pub places_base_url: String,
    /// Endpoint variant used by the search trigger.
    pub search_mode: SearchMode,
    /// Radius in meters for nearby browsing.
    pub search_radius_m: u32,
    /// Result limit for nearby browsing.
    pub search_limit: u32,
    /// Position provider.
    pub geolocation_provider: GeolocationProvider,
    /// Position used by the fixed provider; requires both `latitude` and `longitude`.
    pub fixed_location: Option<Coordinate>,
    /// Endpoint of the IP lookup provider.
    pub ip_geolocation_url: String,
    /// Keep markers from earlier searches on the map.
    pub accumulate_markers: bool,
    /// Show the keybinds footer below the panes.
    pub show_keybinds_footer: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            places_api_key: ApiKey::default(),
            places_base_url: "https://api.foursquare.com/v3/places".to_string(),
            search_mode: SearchMode::Nearby,
            search_radius_m: 1000,
            search_limit: 30,
            geolocation_provider: GeolocationProvider::Ip,
            fixed_location: None,
            ip_geolocation_url: "https://ipapi.co/json/".to_string(),
            accumulate_markers: true,
            show_keybinds_footer: true,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    /// What: The API key never leaks through `Debug`.
    ///
    /// Inputs:
    /// - Settings carrying a secret key.
    ///
    /// Output:
    /// - Debug output contains `<redacted>` and not the secret.
    fn api_key_is_redacted() {
        let settings = Settings {
            places_api_key: ApiKey::new("  fsq3-secret-value "),
            ..Settings::default()
        };
        let dbg = format!("{settings:?}");
        assert!(dbg.contains("<redacted>"));
        assert!(!dbg.contains("fsq3-secret-value"));
        let header = settings
            .places_api_key
            .header_value()
            .expect("valid header");
        assert!(header.is_sensitive());
        assert_eq!(header.to_str().expect("ascii"), "fsq3-secret-value");
    }

    #[test]
    /// What: Provider keys round-trip and accept aliases.
    fn provider_config_keys() {
        for p in [
            GeolocationProvider::Ip,
            GeolocationProvider::Fixed,
            GeolocationProvider::Off,
        ] {
            assert_eq!(GeolocationProvider::from_config_key(p.as_config_key()), Some(p));
        }
        assert_eq!(
            GeolocationProvider::from_config_key("Manual"),
            Some(GeolocationProvider::Fixed)
        );
        assert_eq!(GeolocationProvider::from_config_key("gps"), None);
    }
}
