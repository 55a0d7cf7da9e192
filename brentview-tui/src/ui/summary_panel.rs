//! Change-point summary: tau, HDI, impact statistics and model parameters.

use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::text::{Line, Span};
use ratatui::widgets::{Paragraph, Wrap};

use brentview_core::view::{SummaryDisplay, SummaryView};

use crate::app::AppState;
use crate::theme;
use crate::ui::panel_block;

pub const EMPTY_MESSAGE: &str = "No model summary found.";

pub fn render(f: &mut Frame, area: Rect, app: &AppState) {
    let lines = match &app.view.summary {
        SummaryView::Unavailable => vec![Line::from(Span::styled(EMPTY_MESSAGE, theme::muted()))],
        SummaryView::Available(s) => summary_lines(s),
    };
    let para = Paragraph::new(lines)
        .block(panel_block("Change Point Summary"))
        .wrap(Wrap { trim: true });
    f.render_widget(para, area);
}

fn summary_lines(s: &SummaryDisplay) -> Vec<Line<'static>> {
    let mut lines = Vec::new();

    if let Some(tau) = &s.tau_median {
        lines.push(field("tau (median): ", tau.clone(), theme::accent_bold()));
    }
    if let Some(hdi) = &s.hdi {
        lines.push(field("94% HDI: ", hdi.label(), theme::text()));
    }
    if let Some(impact) = &s.impact {
        if let Some(v) = &impact.pre_mean {
            lines.push(field("90-day mean price (pre): ", format!("{v} USD"), theme::text()));
        }
        if let Some(v) = &impact.post_mean {
            lines.push(field("90-day mean price (post): ", format!("{v} USD"), theme::text()));
        }
        if let Some(v) = &impact.pct_change {
            lines.push(field("% change (mean): ", format!("{v}%"), theme::signed(v)));
        }
    }
    if let Some(m) = &s.model {
        let mu = match (&m.mu_before, &m.mu_after) {
            (Some(b), Some(a)) => Some(format!("{b} -> {a}")),
            (Some(b), None) => Some(format!("{b} -> ?")),
            (None, Some(a)) => Some(format!("? -> {a}")),
            (None, None) => None,
        };
        let sigma = match (&m.sigma_before, &m.sigma_after) {
            (Some(b), Some(a)) => Some(format!("{b} -> {a}")),
            (Some(b), None) => Some(format!("{b} -> ?")),
            (None, Some(a)) => Some(format!("? -> {a}")),
            (None, None) => None,
        };
        if let Some(v) = &m.tau_index {
            lines.push(field("tau index: ", v.clone(), theme::secondary()));
        }
        if let Some(v) = mu {
            lines.push(field("mu (log return): ", v, theme::secondary()));
        }
        if let Some(v) = sigma {
            lines.push(field("sigma: ", v, theme::secondary()));
        }
        if let Some(v) = &m.prob_mu_increase {
            lines.push(field("P(mu after > before): ", v.clone(), theme::secondary()));
        }
    }
    lines
}

fn field(label: &'static str, value: String, style: ratatui::style::Style) -> Line<'static> {
    Line::from(vec![
        Span::styled(label, theme::label()),
        Span::styled(value, style),
    ])
}
