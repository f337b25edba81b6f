use ratatui::{
    Frame,
    prelude::Rect,
    style::Style,
    text::{Line, Span},
    widgets::Paragraph,
};

use crate::state::{AppState, Focus, SearchMode};
use crate::theme::theme;

/// Render the one-line status: mode, in-flight searches and the last message.
pub fn render_status(f: &mut Frame, app: &AppState, area: Rect) {
    let th = theme();
    let mode = match app.mode {
        SearchMode::Nearby => "nearby",
        SearchMode::Text => "text",
    };
    let mut spans = vec![Span::styled(
        format!(" [{mode}] "),
        Style::default().fg(th.crust).bg(th.sapphire),
    )];
    if app.in_flight > 0 {
        spans.push(Span::styled(
            format!(" ⟳ {} ", app.in_flight),
            Style::default().fg(th.yellow),
        ));
    }
    let color = if app.last_error.is_some() || app.controller.geolocation_error().is_some() {
        th.red
    } else if app.in_flight == 0 && !app.controller.list().is_empty() {
        th.green
    } else {
        th.subtext0
    };
    spans.push(Span::styled(
        format!(" {}", app.status),
        Style::default().fg(color),
    ));
    f.render_widget(Paragraph::new(Line::from(spans)), area);
}

/// Render the keybinds footer for the focused pane.
pub fn render_footer(f: &mut Frame, app: &AppState, area: Rect) {
    let th = theme();
    let binds: &[(&str, &str)] = match app.focus {
        Focus::Search => &[("Enter", "search"), ("Esc", "list"), ("Ctrl+U", "clear"), ("Ctrl+C", "quit")],
        Focus::Results => &[
            ("/", "query"),
            ("s", "search"),
            ("↑↓", "select"),
            ("Enter", "show"),
            ("+/-", "zoom"),
            ("q", "quit"),
        ],
    };
    let mut spans = Vec::with_capacity(binds.len() * 2);
    for (key, label) in binds {
        spans.push(Span::styled(format!(" {key}"), Style::default().fg(th.mauve)));
        spans.push(Span::styled(format!(" {label} "), Style::default().fg(th.overlay1)));
    }
    f.render_widget(Paragraph::new(Line::from(spans)), area);
}
