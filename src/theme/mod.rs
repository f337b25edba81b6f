//! Configuration for nearby: palette, settings and config paths.
//!
//! Public re-exports keep the `crate::theme::*` API stable.

/// Configuration parsing utilities.
mod parsing;
/// Path resolution for config directories.
mod paths;
/// Settings loading.
mod settings;
/// Palette store.
mod store;
/// Theme and settings type definitions.
mod types;

pub use paths::{config_dir, logs_dir};
pub use settings::{
    API_KEY_ENV, SETTINGS_SKELETON_CONTENT, apply_env_overrides, load_settings_from,
    parse_settings, settings,
};
pub use store::{parse_theme, theme};
pub use types::{ApiKey, GeolocationProvider, Settings, Theme};

#[cfg(test)]
static TEST_MUTEX: std::sync::OnceLock<std::sync::Mutex<()>> = std::sync::OnceLock::new();

#[cfg(test)]
/// What: Provide a process-wide mutex to serialize environment-mutating tests.
///
/// Inputs:
/// - None
///
/// Output:
/// - Shared reference to a lazily-initialized `Mutex<()>`.
pub(crate) fn test_mutex() -> &'static std::sync::Mutex<()> {
    TEST_MUTEX.get_or_init(|| std::sync::Mutex::new(()))
}
