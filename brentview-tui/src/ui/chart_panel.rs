//! Brent price line with the tau (median) marker.

use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::Style;
use ratatui::symbols;
use ratatui::text::{Line, Span};
use ratatui::widgets::{Axis, Block, Chart, Dataset, GraphType, Paragraph};

use brentview_core::domain::format_date;
use brentview_core::view::ChartSeries;

use crate::app::AppState;
use crate::theme;
use crate::ui::panel_block;

pub const EMPTY_MESSAGE: &str = "No price data in the selected range.";

pub fn render(f: &mut Frame, area: Rect, app: &AppState) {
    let series = &app.view.chart;

    let title = match &series.marker {
        Some(m) => format!("Brent Price (USD) | {}: {}", m.label, format_date(m.date)),
        None => "Brent Price (USD)".to_string(),
    };
    let block = panel_block(title);

    if series.is_empty() {
        let lines = vec![
            Line::from(""),
            Line::from(Span::styled(format!("  {EMPTY_MESSAGE}"), theme::muted())),
        ];
        f.render_widget(Paragraph::new(lines).block(block), area);
        return;
    }

    render_chart(f, area, series, block);
}

fn render_chart(f: &mut Frame, area: Rect, series: &ChartSeries, block: Block<'static>) {
    let [y_min, y_max] = series.y_bounds;

    let marker_line: Vec<(f64, f64)> = series
        .marker
        .as_ref()
        .map(|m| vec![(m.x, y_min), (m.x, y_max)])
        .unwrap_or_default();

    let mut datasets = vec![Dataset::default()
        .name("Brent")
        .marker(symbols::Marker::Braille)
        .style(Style::default().fg(theme::ACCENT))
        .graph_type(GraphType::Line)
        .data(&series.points)];
    if let Some(m) = &series.marker {
        datasets.push(
            Dataset::default()
                .name(m.label)
                .marker(symbols::Marker::Braille)
                .style(Style::default().fg(theme::NEGATIVE))
                .graph_type(GraphType::Line)
                .data(&marker_line),
        );
    }

    let x_labels: Vec<Span> = series
        .x_labels()
        .into_iter()
        .map(|l| Span::styled(l, theme::muted()))
        .collect();

    let chart = Chart::new(datasets)
        .block(block)
        .x_axis(
            Axis::default()
                .title(Span::styled("Date", theme::muted()))
                .style(theme::muted())
                .bounds(series.x_bounds)
                .labels(x_labels),
        )
        .y_axis(
            Axis::default()
                .title(Span::styled("USD", theme::muted()))
                .style(theme::muted())
                .bounds(series.y_bounds)
                .labels(vec![
                    Span::styled(format!("{y_min:.2}"), theme::muted()),
                    Span::styled(format!("{y_max:.2}"), theme::muted()),
                ]),
        );

    f.render_widget(chart, area);
}
