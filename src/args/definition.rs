//! Command-line argument definition and processing.

use clap::Parser;

use crate::state::{Coordinate, SearchMode};
use crate::theme::{GeolocationProvider, Settings};

/// nearby - find places around you from the terminal
#[derive(Parser, Debug)]
#[command(name = "nearby")]
#[command(version)]
#[command(about = "Find places around you from the terminal", long_about = None)]
pub struct Args {
    /// Latitude to search around (requires --lon; skips geolocation)
    #[arg(long, requires = "lon", allow_negative_numbers = true)]
    pub lat: Option<f64>,

    /// Longitude to search around (requires --lat; skips geolocation)
    #[arg(long, requires = "lat", allow_negative_numbers = true)]
    pub lon: Option<f64>,

    /// Search endpoint: nearby browsing or free-text search
    #[arg(long, value_enum)]
    pub mode: Option<SearchMode>,

    /// Free-text query (implies --mode text unless a mode is given)
    #[arg(short, long)]
    pub query: Option<String>,

    /// Radius in meters for nearby browsing
    #[arg(long)]
    pub radius: Option<u32>,

    /// Maximum number of nearby results
    #[arg(long)]
    pub limit: Option<u32>,

    /// Search once and print the results instead of starting the TUI
    #[arg(long)]
    pub print: bool,

    /// Set the logging level (trace, debug, info, warn, error)
    #[arg(long, default_value = "info")]
    pub log_level: String,

    /// Enable verbose output (equivalent to --log-level debug)
    #[arg(short, long)]
    pub verbose: bool,
}

impl Args {
    /// What: Apply command-line overrides onto loaded settings.
    ///
    /// Inputs:
    /// - `settings`: Settings from `settings.conf` and the environment.
    ///
    /// Output:
    /// - None (modifies `settings` in-place).
    ///
    /// Details:
    /// - `--lat/--lon` switch to the fixed provider when the position is valid.
    /// - Zero radius or limit is ignored.
    pub fn apply_to_settings(&self, settings: &mut Settings) {
        if let (Some(lat), Some(lon)) = (self.lat, self.lon) {
            let c = Coordinate::new(lat, lon);
            if c.is_valid() {
                settings.fixed_location = Some(c);
                settings.geolocation_provider = GeolocationProvider::Fixed;
            } else {
                tracing::warn!(lat, lon, "ignoring out-of-range --lat/--lon");
            }
        }
        match (self.mode, &self.query) {
            (Some(mode), _) => settings.search_mode = mode,
            (None, Some(_)) => settings.search_mode = SearchMode::Text,
            (None, None) => {}
        }
        if let Some(r) = self.radius.filter(|r| *r > 0) {
            settings.search_radius_m = r;
        }
        if let Some(l) = self.limit.filter(|l| *l > 0) {
            settings.search_limit = l;
        }
    }

    /// What: Determine the log filter level.
    ///
    /// Output:
    /// - `"debug"` with `--verbose`, otherwise `--log-level`.
    #[must_use]
    pub fn log_level(&self) -> String {
        if self.verbose {
            "debug".to_string()
        } else {
            self.log_level.clone()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    /// What: Flags parse and override settings.
    ///
    /// Inputs:
    /// - Negative coordinates, a query, radius and limit.
    ///
    /// Output:
    /// - Fixed provider at the given position, text mode, overridden radius and limit.
    fn flags_override_settings() {
        let args = Args::try_parse_from([
            "nearby", "--lat", "-33.86", "--lon", "151.21", "-q", "ramen", "--radius", "500",
            "--limit", "0",
        ])
        .expect("parse");
        let mut s = Settings::default();
        args.apply_to_settings(&mut s);
        assert_eq!(s.fixed_location, Some(Coordinate::new(-33.86, 151.21)));
        assert_eq!(s.geolocation_provider, GeolocationProvider::Fixed);
        assert_eq!(s.search_mode, SearchMode::Text);
        assert_eq!(s.search_radius_m, 500);
        assert_eq!(s.search_limit, 30);
    }

    #[test]
    /// What: `--lat` without `--lon` is rejected; an explicit mode wins over the query.
    fn lat_requires_lon_and_mode_wins() {
        assert!(Args::try_parse_from(["nearby", "--lat", "1.0"]).is_err());
        let args = Args::try_parse_from(["nearby", "--mode", "nearby", "-q", "x"]).expect("parse");
        let mut s = Settings::default();
        s.search_mode = SearchMode::Text;
        args.apply_to_settings(&mut s);
        assert_eq!(s.search_mode, SearchMode::Nearby);
    }

    #[test]
    /// What: `--verbose` maps to debug logging.
    fn verbose_means_debug() {
        let args = Args::try_parse_from(["nearby", "-v", "--log-level", "warn"]).expect("parse");
        assert_eq!(args.log_level(), "debug");
        let args = Args::try_parse_from(["nearby"]).expect("parse");
        assert_eq!(args.log_level(), "info");
    }
}
