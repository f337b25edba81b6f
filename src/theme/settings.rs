use std::fs;
use std::path::Path;

use tracing::{debug, info, warn};

use super::parsing::{parse_bool, split_assignment};
use super::paths::{config_dir, resolve_config_file};
use super::types::{ApiKey, GeolocationProvider, Settings};
use crate::state::{Coordinate, SearchMode};

/// Environment variable that overrides `places_api_key`.
pub const API_KEY_ENV: &str = "NEARBY_PLACES_API_KEY";

/// Skeleton written on first run.
pub const SETTINGS_SKELETON_CONTENT: &str = "# nearby settings\n\
#\n\
# Format: key = value\n\
# Lines starting with # are comments.\n\
#\n\
# Places API credential, sent as the Authorization header.\n\
# The NEARBY_PLACES_API_KEY environment variable takes precedence.\n\
places_api_key =\n\
places_base_url = https://api.foursquare.com/v3/places\n\
#\n\
# nearby = browse within a radius, text = free-text query sorted by distance\n\
search_mode = nearby\n\
search_radius_m = 1000\n\
search_limit = 30\n\
#\n\
# ip = approximate position from your IP address\n\
# fixed = use latitude/longitude below\n\
# off = never locate (searching stays unavailable)\n\
geolocation_provider = ip\n\
# latitude = 52.3676\n\
# longitude = 4.9041\n\
ip_geolocation_url = https://ipapi.co/json/\n\
#\n\
# Keep markers from earlier searches on the map.\n\
accumulate_markers = true\n\
show_keybinds_footer = true\n";

/// What: Apply `settings.conf` content onto `settings`.
///
/// Inputs:
/// - `content`: File content.
/// - `settings`: Settings to update in place.
///
/// Output:
/// - None (modifies `settings` in-place).
///
/// Details:
/// - Unknown keys and unparsable values are logged and ignored.
/// - `fixed_location` is only set when both `latitude` and `longitude` are valid.
pub fn parse_settings(content: &str, settings: &mut Settings) {
    let mut latitude: Option<f64> = None;
    let mut longitude: Option<f64> = None;
    for (line_no, line) in content.lines().enumerate() {
        let Some((key, val)) = split_assignment(line) else {
            continue;
        };
        let applied = match key.as_str() {
            "places_api_key" | "api_key" => {
                settings.places_api_key = ApiKey::new(val);
                true
            }
            "places_base_url" | "base_url" => {
                if val.is_empty() {
                    false
                } else {
                    settings.places_base_url = val.to_string();
                    true
                }
            }
            "search_mode" | "mode" => SearchMode::from_config_key(val)
                .map(|m| settings.search_mode = m)
                .is_some(),
            "search_radius_m" | "radius" => val
                .parse::<u32>()
                .ok()
                .filter(|r| *r > 0)
                .map(|r| settings.search_radius_m = r)
                .is_some(),
            "search_limit" | "limit" => val
                .parse::<u32>()
                .ok()
                .filter(|l| *l > 0)
                .map(|l| settings.search_limit = l)
                .is_some(),
            "geolocation_provider" | "geolocation" => GeolocationProvider::from_config_key(val)
                .map(|p| settings.geolocation_provider = p)
                .is_some(),
            "latitude" | "lat" => {
                latitude = val.parse::<f64>().ok();
                latitude.is_some()
            }
            "longitude" | "lon" | "lng" => {
                longitude = val.parse::<f64>().ok();
                longitude.is_some()
            }
            "ip_geolocation_url" => {
                if val.is_empty() {
                    false
                } else {
                    settings.ip_geolocation_url = val.to_string();
                    true
                }
            }
            "accumulate_markers" => parse_bool(val)
                .map(|b| settings.accumulate_markers = b)
                .is_some(),
            "show_keybinds_footer" | "keybinds_visible" => parse_bool(val)
                .map(|b| settings.show_keybinds_footer = b)
                .is_some(),
            _ => {
                warn!(key = %key, line = line_no + 1, "unknown settings key");
                continue;
            }
        };
        if !applied {
            warn!(key = %key, line = line_no + 1, "ignoring invalid settings value");
        }
    }
    match (latitude, longitude) {
        (Some(lat), Some(lng)) if Coordinate::new(lat, lng).is_valid() => {
            settings.fixed_location = Some(Coordinate::new(lat, lng));
        }
        (None, None) => {}
        _ => warn!("latitude/longitude must both be set to a valid position; ignoring"),
    }
}

/// What: Load settings from a file, writing the skeleton when it does not exist yet.
///
/// Inputs:
/// - `path`: Location of `settings.conf`.
///
/// Output:
/// - Parsed `Settings`, falling back to defaults for anything missing or invalid.
pub fn load_settings_from(path: &Path) -> Settings {
    let mut settings = Settings::default();
    if !path.exists() {
        if let Some(dir) = path.parent() {
            let _ = fs::create_dir_all(dir);
        }
        match fs::write(path, SETTINGS_SKELETON_CONTENT) {
            Ok(()) => info!(path = %path.display(), "wrote default settings skeleton"),
            Err(e) => warn!(path = %path.display(), error = %e, "could not write settings skeleton"),
        }
    }
    match fs::read_to_string(path) {
        Ok(content) => {
            parse_settings(&content, &mut settings);
            debug!(path = %path.display(), "loaded settings");
        }
        Err(e) => warn!(path = %path.display(), error = %e, "could not read settings; using defaults"),
    }
    settings
}

/// What: Load user settings from the config directory and the environment.
///
/// Inputs:
/// - None (reads `settings.conf` and `NEARBY_PLACES_API_KEY`).
///
/// Output:
/// - A `Settings` value; defaults where the file is missing or invalid.
#[must_use]
pub fn settings() -> Settings {
    let path = resolve_config_file("settings.conf")
        .unwrap_or_else(|| config_dir().join("settings.conf"));
    let mut settings = load_settings_from(&path);
    apply_env_overrides(&mut settings, std::env::var(API_KEY_ENV).ok().as_deref());
    settings
}

/// Apply the API key from the environment; a non-blank value wins over the file.
pub fn apply_env_overrides(settings: &mut Settings, env_key: Option<&str>) {
    if let Some(key) = env_key.filter(|k| !k.trim().is_empty()) {
        settings.places_api_key = ApiKey::new(key);
    }
}
