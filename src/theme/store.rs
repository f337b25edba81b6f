use std::collections::HashMap;
use std::fs;
use std::path::Path;
use std::sync::OnceLock;

use ratatui::style::Color;

use super::parsing::{canonical_for_key, nearest_key, parse_color_value, split_assignment};
use super::paths::resolve_config_file;
use super::types::Theme;

/// Process-wide palette, loaded on first use.
static THEME_STORE: OnceLock<Theme> = OnceLock::new();

/// What: Parse `theme.conf` content into a palette, collecting diagnostics.
///
/// Inputs:
/// - `content`: File content with `key = color` lines.
///
/// Output:
/// - Tuple of the resulting theme (defaults for unset keys) and human-readable problems.
///
/// Details:
/// - Unknown keys get a "did you mean" hint when a palette key is close.
pub fn parse_theme(content: &str) -> (Theme, Vec<String>) {
    let mut colors: HashMap<&'static str, Color> = HashMap::new();
    let mut errors = Vec::new();
    for (idx, line) in content.lines().enumerate() {
        let Some((key, val)) = split_assignment(line) else {
            continue;
        };
        let line_no = idx + 1;
        let Some(canon) = canonical_for_key(&key) else {
            match nearest_key(&key) {
                Some(s) => errors.push(format!(
                    "- Unknown key '{key}' on line {line_no} (did you mean '{s}'?)"
                )),
                None => errors.push(format!("- Unknown key '{key}' on line {line_no}")),
            }
            continue;
        };
        match parse_color_value(val) {
            Some(c) => {
                colors.insert(canon, c);
            }
            None => errors.push(format!(
                "- Invalid color for '{key}' on line {line_no} (use #RRGGBB or R,G,B)"
            )),
        }
    }

    let mut theme = Theme::default();
    for (key, color) in colors {
        let slot = match key {
            "base" => &mut theme.base,
            "crust" => &mut theme.crust,
            "surface2" => &mut theme.surface2,
            "overlay1" => &mut theme.overlay1,
            "overlay2" => &mut theme.overlay2,
            "text" => &mut theme.text,
            "subtext0" => &mut theme.subtext0,
            "sapphire" => &mut theme.sapphire,
            "mauve" => &mut theme.mauve,
            "green" => &mut theme.green,
            "yellow" => &mut theme.yellow,
            "red" => &mut theme.red,
            "lavender" => &mut theme.lavender,
            _ => continue,
        };
        *slot = color;
    }
    (theme, errors)
}

fn load_theme_file(path: &Path) -> Theme {
    match fs::read_to_string(path) {
        Ok(content) => {
            let (theme, errors) = parse_theme(&content);
            if errors.is_empty() {
                tracing::info!(path = %path.display(), "loaded theme configuration");
            } else {
                tracing::warn!(
                    path = %path.display(),
                    problems = %errors.join("\n"),
                    "theme configuration has errors; affected keys use defaults"
                );
            }
            theme
        }
        Err(e) => {
            tracing::warn!(path = %path.display(), error = %e, "could not read theme; using defaults");
            Theme::default()
        }
    }
}

/// Return the application's palette: `theme.conf` when present, Catppuccin Mocha otherwise.
pub fn theme() -> Theme {
    *THEME_STORE.get_or_init(|| {
        resolve_config_file("theme.conf").map_or_else(Theme::default, |p| load_theme_file(&p))
    })
}
