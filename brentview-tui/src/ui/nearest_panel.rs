//! Nearest event to the median change point, as reported by the server.

use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::text::{Line, Span};
use ratatui::widgets::{Paragraph, Wrap};

use crate::app::AppState;
use crate::theme;
use crate::ui::panel_block;

pub const EMPTY_MESSAGE: &str = "No nearby event found within the matching window.";

pub fn render(f: &mut Frame, area: Rect, app: &AppState) {
    let lines = match &app.view.nearest {
        None => vec![Line::from(Span::styled(EMPTY_MESSAGE, theme::muted()))],
        Some(ev) => {
            let mut lines = vec![
                Line::from(vec![
                    Span::styled("Date: ", theme::label()),
                    Span::styled(ev.date.as_str(), theme::text()),
                    Span::styled(format!("  ({})", ev.distance_label()), theme::muted()),
                ]),
                Line::from(vec![
                    Span::styled("Title: ", theme::label()),
                    Span::styled(ev.title.as_str(), theme::accent_bold()),
                ]),
                Line::from(vec![
                    Span::styled("Type: ", theme::label()),
                    Span::styled(ev.event_type.as_str(), theme::text()),
                    Span::styled("  Region: ", theme::label()),
                    Span::styled(ev.region.as_str(), theme::text()),
                ]),
            ];
            if !ev.notes.is_empty() {
                lines.push(Line::from(Span::styled(ev.notes.as_str(), theme::secondary())));
            }
            lines
        }
    };

    let para = Paragraph::new(lines)
        .block(panel_block("Nearest Event to Change Point"))
        .wrap(Wrap { trim: true });
    f.render_widget(para, area);
}
