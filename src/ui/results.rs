use ratatui::{
    Frame,
    prelude::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, List, ListItem},
};
use unicode_width::UnicodeWidthStr;

use super::helpers::truncate_to_width;
use crate::state::{AppState, Focus};
use crate::theme::theme;

/// Render the results list and record its inner rectangle for mouse hit-testing.
///
/// Each row shows the place name, then categories and address when known.
pub fn render_results(f: &mut Frame, app: &mut AppState, area: Rect) {
    let th = theme();
    let inner_width = usize::from(area.width.saturating_sub(4));
    let list = app.controller.list();

    let items: Vec<ListItem> = list
        .entries()
        .iter()
        .map(|e| {
            let name = truncate_to_width(&e.name, inner_width);
            let mut spans = vec![Span::styled(
                name.clone(),
                Style::default().fg(th.text).add_modifier(Modifier::BOLD),
            )];
            let detail = [e.categories.as_deref(), e.address.as_deref()]
                .into_iter()
                .flatten()
                .collect::<Vec<_>>()
                .join(" · ");
            let room = inner_width.saturating_sub(name.width() + 3);
            if !detail.is_empty() && room > 1 {
                spans.push(Span::styled(
                    format!("  {}", truncate_to_width(&detail, room)),
                    Style::default().fg(th.overlay1),
                ));
            }
            ListItem::new(Line::from(spans))
        })
        .collect();

    let focused = app.focus == Focus::Results;
    let border = if focused { th.mauve } else { th.surface2 };
    let title = if list.is_empty() {
        " Results ".to_string()
    } else {
        format!(" Results ({}) ", list.len())
    };
    let widget = List::new(items)
        .block(
            Block::default()
                .title(Span::styled(title, Style::default().fg(th.overlay2)))
                .borders(Borders::ALL)
                .border_type(BorderType::Rounded)
                .border_style(Style::default().fg(border)),
        )
        .highlight_style(Style::default().fg(th.crust).bg(th.lavender))
        .highlight_symbol("▶ ");

    app.results_rect = Some((
        area.x + 1,
        area.y + 1,
        area.width.saturating_sub(2),
        area.height.saturating_sub(2),
    ));
    f.render_stateful_widget(widget, area, &mut app.list_state);
}
