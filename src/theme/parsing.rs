use ratatui::style::Color;

/// What: Split a `key = value` config line into a normalized key and a cleaned value.
///
/// Inputs:
/// - `line`: One raw line from a config file.
///
/// Output:
/// - `Some((key, value))` for assignments; `None` for blanks, comments and lines without `=`.
///
/// Details:
/// - Keys are lowercased with `.`, `-` and spaces replaced by `_`.
/// - Values have inline comments stripped via [`strip_inline_comment`].
pub(crate) fn split_assignment(line: &str) -> Option<(String, &str)> {
    let trimmed = line.trim();
    if trimmed.is_empty() || trimmed.starts_with('#') || trimmed.starts_with("//") {
        return None;
    }
    let (raw_key, raw_val) = trimmed.split_once('=')?;
    let key = raw_key.trim().to_lowercase().replace(['.', '-', ' '], "_");
    Some((key, strip_inline_comment(raw_val)))
}

/// What: Strip a trailing `# ...` or `// ...` comment from a value.
///
/// Inputs:
/// - `s`: Raw value text.
///
/// Output:
/// - Trimmed value without the comment.
///
/// Details:
/// - A marker only starts a comment at the beginning or after whitespace, so
///   `#RRGGBB` colors and `https://` URLs survive intact.
pub(crate) fn strip_inline_comment(s: &str) -> &str {
    let s = s.trim();
    let bytes = s.as_bytes();
    let mut cut = s.len();
    for (i, &b) in bytes.iter().enumerate() {
        let after_space = i > 0 && bytes[i - 1].is_ascii_whitespace();
        let is_marker = b == b'#' || (b == b'/' && bytes.get(i + 1) == Some(&b'/'));
        if is_marker && after_space {
            cut = i;
            break;
        }
    }
    s[..cut].trim()
}

/// Parse the boolean spellings accepted in config files (`true/1/yes/on`, `false/0/no/off`).
pub(crate) fn parse_bool(val: &str) -> Option<bool> {
    match val.trim().to_ascii_lowercase().as_str() {
        "true" | "1" | "yes" | "on" => Some(true),
        "false" | "0" | "no" | "off" => Some(false),
        _ => None,
    }
}

/// What: Parse a color value from config into a [`Color`].
///
/// Inputs:
/// - `s`: `#RRGGBB`, `RRGGBB` or `R,G,B`.
///
/// Output:
/// - `Some(Color::Rgb)` on success; `None` when the format is not recognized.
pub(crate) fn parse_color_value(s: &str) -> Option<Color> {
    let t = strip_inline_comment(s);
    if t.is_empty() {
        return None;
    }
    let h = t.strip_prefix('#').unwrap_or(t);
    if h.len() == 6 && h.chars().all(|c| c.is_ascii_hexdigit()) {
        let r = u8::from_str_radix(&h[0..2], 16).ok()?;
        let g = u8::from_str_radix(&h[2..4], 16).ok()?;
        let b = u8::from_str_radix(&h[4..6], 16).ok()?;
        return Some(Color::Rgb(r, g, b));
    }
    let parts: Vec<&str> = t.split(',').collect();
    if let [r, g, b] = parts.as_slice() {
        let r = r.trim().parse::<u8>().ok()?;
        let g = g.trim().parse::<u8>().ok()?;
        let b = b.trim().parse::<u8>().ok()?;
        return Some(Color::Rgb(r, g, b));
    }
    None
}

/// Canonical palette keys recognized in `theme.conf`.
pub(crate) const PALETTE_KEYS: [&str; 13] = [
    "base", "crust", "surface2", "overlay1", "overlay2", "text", "subtext0", "sapphire", "mauve",
    "green", "yellow", "red", "lavender",
];

/// What: Map a normalized theme key to its canonical palette name.
///
/// Inputs:
/// - `norm`: Normalized key string pulled from user configuration.
///
/// Output:
/// - `Some(&'static str)` when recognized; `None` otherwise.
pub(crate) fn canonical_for_key(norm: &str) -> Option<&'static str> {
    match norm {
        "base" | "background" | "background_base" => Some("base"),
        "crust" | "background_crust" => Some("crust"),
        "surface2" | "surface_2" | "surface_level2" => Some("surface2"),
        "overlay1" | "overlay_primary" | "border_primary" => Some("overlay1"),
        "overlay2" | "overlay_secondary" | "border_secondary" => Some("overlay2"),
        "text" | "text_primary" => Some("text"),
        "subtext0" | "text_secondary" => Some("subtext0"),
        "sapphire" | "accent_interactive" => Some("sapphire"),
        "mauve" | "accent_heading" | "marker_user" => Some("mauve"),
        "green" | "semantic_success" => Some("green"),
        "yellow" | "semantic_warning" | "marker_place" => Some("yellow"),
        "red" | "semantic_error" => Some("red"),
        "lavender" | "accent_emphasis" => Some("lavender"),
        _ => None,
    }
}

/// What: Suggest the canonical key closest to a potentially misspelled input.
///
/// Inputs:
/// - `input`: User-provided key string.
///
/// Output:
/// - `Some(&'static str)` when the best match is within edit distance 3; `None` otherwise.
pub(crate) fn nearest_key(input: &str) -> Option<&'static str> {
    PALETTE_KEYS
        .iter()
        .map(|&k| (k, levenshtein(input, k)))
        .min_by_key(|&(_, d)| d)
        .and_then(|(k, d)| (d <= 3).then_some(k))
}

/// Levenshtein edit distance with a rolling row.
pub(crate) fn levenshtein(a: &str, b: &str) -> usize {
    let b: Vec<char> = b.chars().collect();
    let mut dp: Vec<usize> = (0..=b.len()).collect();
    for (i, ca) in a.chars().enumerate() {
        let mut prev = dp[0];
        dp[0] = i + 1;
        for (j, &cb) in b.iter().enumerate() {
            let tmp = dp[j + 1];
            dp[j + 1] = if ca == cb {
                prev
            } else {
                1 + prev.min(dp[j]).min(dp[j + 1])
            };
            prev = tmp;
        }
    }
    dp[b.len()]
}
