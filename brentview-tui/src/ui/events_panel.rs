//! Events inside the selected range, scrollable with j/k.

use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;

use brentview_core::domain::{format_date, EventRecord};

use crate::app::AppState;
use crate::theme;
use crate::ui::panel_block;

pub const EMPTY_MESSAGE: &str = "No events in the selected range.";

pub fn render(f: &mut Frame, area: Rect, app: &AppState) {
    let events = &app.view.events;
    let block = panel_block(format!("Events in Range ({}) [j/k]scroll", events.len()));

    if events.is_empty() {
        let para = Paragraph::new(Span::styled(EMPTY_MESSAGE, theme::muted())).block(block);
        f.render_widget(para, area);
        return;
    }

    let visible = block.inner(area).height as usize;
    let lines: Vec<Line> = events
        .iter()
        .skip(app.events_scroll)
        .take(visible)
        .map(event_line)
        .collect();

    f.render_widget(Paragraph::new(lines).block(block), area);
}

fn event_line(ev: &EventRecord) -> Line<'_> {
    let mut spans = vec![
        Span::styled(format_date(ev.event_date), theme::accent()),
        Span::styled(" - ", theme::muted()),
        Span::styled(ev.event_title.as_str(), theme::text()),
    ];
    if !ev.event_type.is_empty() {
        spans.push(Span::styled(format!(" ({})", ev.event_type), theme::secondary()));
    }
    Line::from(spans)
}
