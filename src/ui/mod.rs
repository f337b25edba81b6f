//! TUI rendering for nearby.
//!
//! Layout, top to bottom: query input, results list beside the map, status
//! line and an optional keybinds footer.

use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout, Position},
    prelude::Rect,
    style::Style,
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Paragraph},
};
use unicode_width::UnicodeWidthStr;

use crate::state::{AppState, Focus, SearchMode};
use crate::theme::theme;

/// Width-aware text helpers.
pub mod helpers;
mod map;
mod results;
mod status;

/// What: Render one frame of the application.
///
/// Inputs:
/// - `f`: Frame to draw into.
/// - `app`: Mutable application state (hit-test rectangles and list scroll are updated).
pub fn ui(f: &mut Frame, app: &mut AppState) {
    let th = theme();
    let area = f.area();
    f.render_widget(
        Block::default().style(Style::default().bg(th.base).fg(th.text)),
        area,
    );

    let footer_height = u16::from(app.show_keybinds_footer);
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Min(5),
            Constraint::Length(1),
            Constraint::Length(footer_height),
        ])
        .split(area);
    let body = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(40), Constraint::Percentage(60)])
        .split(rows[1]);

    render_input(f, app, rows[0]);
    results::render_results(f, app, body[0]);
    map::render_map(f, app, body[1]);
    status::render_status(f, app, rows[2]);
    if app.show_keybinds_footer {
        status::render_footer(f, app, rows[3]);
    }
}

fn render_input(f: &mut Frame, app: &AppState, area: Rect) {
    let th = theme();
    let focused = app.focus == Focus::Search;
    let placeholder = match app.mode {
        SearchMode::Nearby => "nearby mode: press s to search around you",
        SearchMode::Text => "type what you are looking for",
    };
    let line = if app.input.is_empty() && !focused {
        Line::from(Span::styled(placeholder, Style::default().fg(th.overlay1)))
    } else {
        Line::from(vec![
            Span::styled("> ", Style::default().fg(th.sapphire)),
            Span::styled(app.input.as_str(), Style::default().fg(th.text)),
        ])
    };
    let border = if focused { th.mauve } else { th.surface2 };
    let input = Paragraph::new(line).block(
        Block::default()
            .title(Span::styled(" Search ", Style::default().fg(th.overlay2)))
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(Style::default().fg(border)),
    );
    f.render_widget(input, area);

    if focused {
        let right = area.x + area.width.saturating_sub(2);
        let width = u16::try_from(app.input.width()).unwrap_or(u16::MAX);
        let x = (area.x + 3).saturating_add(width).min(right);
        f.set_cursor_position(Position::new(x, area.y + 1));
    }
}
