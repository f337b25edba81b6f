//! Small text helpers shared by the panes.

use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

/// What: Truncate `s` to at most `max` display columns, marking the cut with `…`.
///
/// Inputs:
/// - `s`: Text to fit.
/// - `max`: Available columns.
///
/// Output:
/// - `s` unchanged when it fits; otherwise a prefix plus `…` within `max` columns.
///
/// Details:
/// - Uses display width, so wide characters (CJK, emoji) count as two columns.
pub fn truncate_to_width(s: &str, max: usize) -> String {
    if s.width() <= max {
        return s.to_string();
    }
    if max == 0 {
        return String::new();
    }
    let mut out = String::new();
    let mut used = 0;
    for ch in s.chars() {
        let w = ch.width().unwrap_or(0);
        if used + w > max - 1 {
            break;
        }
        out.push(ch);
        used += w;
    }
    out.push('…');
    out
}
