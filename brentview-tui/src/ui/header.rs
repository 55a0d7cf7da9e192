//! Title bar with the two date inputs, loading indicator and API status.

use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::Modifier;
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph};

use crate::app::{AppState, DateField};
use crate::theme;

pub const TITLE: &str = " Brent Oil Price - Change Point Dashboard ";

pub fn render(f: &mut Frame, area: Rect, app: &AppState) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(theme::panel_border(true))
        .title(TITLE)
        .title_style(theme::panel_title(true));

    let mut spans = vec![Span::raw(" ")];
    spans.extend(date_input(app, DateField::Start));
    spans.push(Span::raw("   "));
    spans.extend(date_input(app, DateField::End));

    let range = app.dashboard.range();
    if range.is_inverted() {
        spans.push(Span::styled("   end precedes start", theme::warning()));
    }
    if app.dashboard.is_loading() {
        spans.push(Span::styled("   loading...", theme::neutral()));
    }

    spans.push(Span::styled("   API: ", theme::label()));
    spans.push(Span::styled(app.api_base.as_str(), theme::secondary()));
    let (health, style) = match app.api_healthy {
        Some(true) => (" (ok)", theme::positive()),
        Some(false) => (" (unreachable)", theme::negative()),
        None => ("", theme::muted()),
    };
    spans.push(Span::styled(health, style));

    f.render_widget(Paragraph::new(Line::from(spans)).block(block), area);
}

fn date_input(app: &AppState, field: DateField) -> Vec<Span<'_>> {
    let focused = app.inputs.focus == field;
    let dirty = app.inputs.is_dirty(field, app.dashboard.range());

    let mut style = if dirty { theme::warning() } else { theme::text() };
    if focused {
        style = style.add_modifier(Modifier::REVERSED);
    }

    vec![
        Span::styled(format!("{}: ", field.label()), theme::label()),
        Span::styled(format!("{:<10}", app.inputs.buffer(field)), style),
    ]
}
