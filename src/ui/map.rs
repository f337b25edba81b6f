use ratatui::{
    Frame,
    prelude::Rect,
    style::{Modifier, Style},
    symbols,
    text::{Line, Span},
    widgets::{
        Block, BorderType, Borders, Paragraph, Wrap,
        canvas::{Canvas, Points},
    },
};

use crate::logic::USER_LOCATION_POPUP;
use crate::map::{MapWidget, TerminalMap};
use crate::state::AppState;
use crate::theme::theme;

/// What: Render the map pane.
///
/// Inputs:
/// - `f`: Frame to draw into.
/// - `app`: Application state (reads the session map, status).
/// - `area`: Pane rectangle.
///
/// Details:
/// - Before geolocation resolves the pane shows a waiting or error message.
/// - Markers are drawn as points in geographic coordinates; the open popup is printed
///   next to its marker. Markers outside the viewport are clipped by the canvas.
pub fn render_map(f: &mut Frame, app: &AppState, area: Rect) {
    let th = theme();
    let Some(map) = app.controller.map() else {
        let msg = app.controller.geolocation_error().map_or_else(
            || "Waiting for your location…".to_string(),
            |e| format!("Location unavailable: {e}"),
        );
        let p = Paragraph::new(Line::from(Span::styled(msg, Style::default().fg(th.subtext0))))
            .wrap(Wrap { trim: true })
            .block(
                Block::default()
                    .title(" Map ")
                    .borders(Borders::ALL)
                    .border_type(BorderType::Rounded)
                    .border_style(Style::default().fg(th.surface2)),
            );
        f.render_widget(p, area);
        return;
    };

    let block = Block::default()
        .title(Span::styled(
            format!(" Map · {} · z{} ", map.center(), map.zoom()),
            Style::default().fg(th.overlay2),
        ))
        .title_bottom(Span::styled(
            format!(" {} ", attribution(map)),
            Style::default().fg(th.overlay1),
        ))
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(th.sapphire));

    let viewport = map.viewport();
    let places: Vec<(f64, f64)> = map
        .markers()
        .iter()
        .filter(|m| m.popup.as_deref() != Some(USER_LOCATION_POPUP))
        .map(|m| (m.position.longitude, m.position.latitude))
        .collect();
    let user: Vec<(f64, f64)> = map
        .markers()
        .iter()
        .filter(|m| m.popup.as_deref() == Some(USER_LOCATION_POPUP))
        .map(|m| (m.position.longitude, m.position.latitude))
        .collect();
    let popup = map
        .open_popup_marker()
        .and_then(|m| m.popup.clone().map(|text| (m.position, text)));

    let canvas = Canvas::default()
        .block(block)
        .background_color(th.base)
        .marker(symbols::Marker::Dot)
        .x_bounds(viewport.x_bounds)
        .y_bounds(viewport.y_bounds)
        .paint(move |ctx| {
            ctx.draw(&Points {
                coords: &places,
                color: th.yellow,
            });
            ctx.draw(&Points {
                coords: &user,
                color: th.mauve,
            });
            ctx.layer();
            if let Some((at, text)) = &popup {
                ctx.print(
                    at.longitude,
                    at.latitude,
                    Line::from(Span::styled(
                        format!(" {text}"),
                        Style::default()
                            .fg(th.lavender)
                            .add_modifier(Modifier::BOLD),
                    )),
                );
            }
        });
    f.render_widget(canvas, area);
}

/// Attribution of the attached tile layer, empty without one.
fn attribution(map: &TerminalMap) -> &str {
    map.tile_layer()
        .map_or("", |t| t.options.attribution.as_str())
}
