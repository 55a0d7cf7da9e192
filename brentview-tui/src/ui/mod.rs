//! Top-level UI layout: header, chart, summary/nearest row, events list,
//! footnote and status bar.

pub mod chart_panel;
pub mod events_panel;
pub mod header;
pub mod nearest_panel;
pub mod overlays;
pub mod status_bar;
pub mod summary_panel;

use ratatui::Frame;
use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::text::Span;
use ratatui::widgets::{Block, Borders, Paragraph};

use crate::app::{AppState, Overlay};
use crate::theme;

pub const CAUSALITY_NOTE: &str = "Visual alignment of events and change points indicates \
temporal association, not proof of causality.";

/// Draw the entire UI.
pub fn draw(f: &mut Frame, app: &AppState) {
    let area = f.area();
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Min(10),
            Constraint::Length(10),
            Constraint::Min(5),
            Constraint::Length(1),
            Constraint::Length(1),
        ])
        .split(area);

    header::render(f, chunks[0], app);
    chart_panel::render(f, chunks[1], app);

    let row = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
        .split(chunks[2]);
    summary_panel::render(f, row[0], app);
    nearest_panel::render(f, row[1], app);

    events_panel::render(f, chunks[3], app);
    f.render_widget(
        Paragraph::new(Span::styled(format!(" {CAUSALITY_NOTE}"), theme::muted())),
        chunks[4],
    );
    status_bar::render(f, chunks[5], app);

    // Draw overlays on top.
    match app.overlay {
        Overlay::ErrorHistory => overlays::render_error_history(f, area, app),
        Overlay::Help => overlays::render_help(f, area),
        Overlay::None => {}
    }
}

/// Bordered block with a panel title.
pub fn panel_block(title: impl Into<String>) -> Block<'static> {
    Block::default()
        .borders(Borders::ALL)
        .border_style(theme::panel_border(false))
        .title(format!(" {} ", title.into()))
        .title_style(theme::panel_title(false))
}

/// Compute a centered rect for overlays.
pub fn centered_rect(percent_x: u16, percent_y: u16, area: Rect) -> Rect {
    let popup_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(area);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(popup_layout[1])[1]
}
