//! ChangepointSummaryProjector: display strings for the summary panel.

use crate::domain::{format_date, ChangepointSummary, ImpactStats};

/// What the summary panel shows.
#[derive(Debug, Clone, PartialEq)]
pub enum SummaryView {
    /// No summary, or none of its fields were recognized.
    Unavailable,
    Available(SummaryDisplay),
}

/// Each part is independently optional.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SummaryDisplay {
    pub tau_median: Option<String>,
    pub hdi: Option<HdiDisplay>,
    pub impact: Option<ImpactDisplay>,
    pub model: Option<ModelDisplay>,
}

/// 94% highest-density interval bounds.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HdiDisplay {
    pub lower: String,
    pub upper: String,
}

impl HdiDisplay {
    /// `"2020-03-01 to 2020-05-01"`
    pub fn label(&self) -> String {
        format!("{} to {}", self.lower, self.upper)
    }
}

/// Impact values rounded to 2 decimal places.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ImpactDisplay {
    pub pre_mean: Option<String>,
    pub post_mean: Option<String>,
    pub pct_change: Option<String>,
}

/// Posterior parameters of the model run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ModelDisplay {
    pub tau_index: Option<String>,
    pub mu_before: Option<String>,
    pub mu_after: Option<String>,
    pub sigma_before: Option<String>,
    pub sigma_after: Option<String>,
    /// P(mu_after > mu_before) as a percentage.
    pub prob_mu_increase: Option<String>,
}

impl ModelDisplay {
    fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}

pub fn project_summary(summary: Option<&ChangepointSummary>) -> SummaryView {
    let Some(summary) = summary.filter(|s| !s.is_empty()) else {
        return SummaryView::Unavailable;
    };

    let hdi = summary.tau_date_hdi_94.map(|(lo, hi)| HdiDisplay {
        lower: format_date(lo),
        upper: format_date(hi),
    });

    let model = project_model(summary);

    SummaryView::Available(SummaryDisplay {
        tau_median: summary.tau_date_median.map(format_date),
        hdi,
        impact: summary.impact_stats_usd.as_ref().and_then(project_impact),
        model: (!model.is_empty()).then_some(model),
    })
}

fn project_impact(stats: &ImpactStats) -> Option<ImpactDisplay> {
    let display = ImpactDisplay {
        pre_mean: stats.pre_mean_price_usd.and_then(two_dp),
        post_mean: stats.post_mean_price_usd.and_then(two_dp),
        pct_change: stats.pct_change_mean_price.and_then(two_dp),
    };
    (display != ImpactDisplay::default()).then_some(display)
}

fn project_model(s: &ChangepointSummary) -> ModelDisplay {
    let tau_index = match (s.tau_index_median, s.tau_index_hdi_94) {
        (Some(m), Some((lo, hi))) => Some(format!("{m} [{lo}, {hi}]")),
        (Some(m), None) => Some(m.to_string()),
        (None, Some((lo, hi))) => Some(format!("[{lo}, {hi}]")),
        (None, None) => None,
    };
    ModelDisplay {
        tau_index,
        mu_before: s.mu_before_mean.and_then(four_dp),
        mu_after: s.mu_after_mean.and_then(four_dp),
        sigma_before: s.sigma_before_mean.and_then(four_dp),
        sigma_after: s.sigma_after_mean.and_then(four_dp),
        prob_mu_increase: s
            .prob_mu_after_gt_before
            .filter(|p| p.is_finite())
            .map(|p| format!("{:.1}%", p * 100.0)),
    }
}

fn two_dp(v: f64) -> Option<String> {
    v.is_finite().then(|| format!("{v:.2}"))
}

fn four_dp(v: f64) -> Option<String> {
    v.is_finite().then(|| format!("{v:.4}"))
}
