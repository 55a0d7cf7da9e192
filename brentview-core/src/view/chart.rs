//! TimeSeriesView projection: chart-ready points, bounds and the tau marker.
//!
//! The x coordinate of a date is its day number since the common era, so
//! gaps in the series (weekends, holidays) keep their true width.

use chrono::{Datelike, NaiveDate};

use crate::domain::{format_date, ChangepointSummary, PricePoint};

pub const TAU_MARKER_LABEL: &str = "tau (median)";

/// Y padding as a fraction of the price span.
const Y_PADDING: f64 = 0.05;

/// Vertical marker at the estimated change point.
#[derive(Debug, Clone, PartialEq)]
pub struct ChartMarker {
    pub date: NaiveDate,
    pub x: f64,
    pub label: &'static str,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ChartSeries {
    /// `(x, price)` in series order.
    pub points: Vec<(f64, f64)>,
    pub x_bounds: [f64; 2],
    pub y_bounds: [f64; 2],
    /// Present only when tau falls inside the plotted date domain.
    pub marker: Option<ChartMarker>,
}

impl ChartSeries {
    pub fn empty() -> Self {
        Self {
            points: Vec::new(),
            x_bounds: [0.0, 0.0],
            y_bounds: [0.0, 0.0],
            marker: None,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Start, middle and end of the x domain as ISO dates.
    pub fn x_labels(&self) -> Vec<String> {
        if self.is_empty() {
            return Vec::new();
        }
        let [lo, hi] = self.x_bounds;
        [lo, (lo + hi) / 2.0, hi]
            .iter()
            .filter_map(|&x| date_at(x))
            .map(format_date)
            .collect()
    }
}

/// Day-number x coordinate of a date.
pub fn x_of(date: NaiveDate) -> f64 {
    f64::from(date.num_days_from_ce())
}

/// Date under an x coordinate, rounded to the nearest day.
pub fn date_at(x: f64) -> Option<NaiveDate> {
    if !x.is_finite() {
        return None;
    }
    NaiveDate::from_num_days_from_ce_opt(x.round() as i32)
}

pub fn project_chart(prices: &[PricePoint], summary: Option<&ChangepointSummary>) -> ChartSeries {
    let points: Vec<(f64, f64)> = prices
        .iter()
        .filter(|p| p.price.is_finite())
        .map(|p| (x_of(p.date), p.price))
        .collect();

    if points.is_empty() {
        return ChartSeries::empty();
    }

    let (x_min, x_max) = points
        .iter()
        .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), &(x, _)| {
            (lo.min(x), hi.max(x))
        });
    let (y_min, y_max) = points
        .iter()
        .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), &(_, y)| {
            (lo.min(y), hi.max(y))
        });

    let x_bounds = if x_max > x_min {
        [x_min, x_max]
    } else {
        [x_min - 1.0, x_max + 1.0]
    };

    let span = y_max - y_min;
    let pad = if span > 0.0 { span * Y_PADDING } else { 1.0 };
    let y_bounds = [y_min - pad, y_max + pad];

    let marker = summary
        .and_then(|s| s.tau_date_median)
        .map(|date| ChartMarker {
            date,
            x: x_of(date),
            label: TAU_MARKER_LABEL,
        })
        .filter(|m| x_min <= m.x && m.x <= x_max);

    ChartSeries {
        points,
        x_bounds,
        y_bounds,
        marker,
    }
}
