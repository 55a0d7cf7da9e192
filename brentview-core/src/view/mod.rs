//! Pure projections from state to display-ready data.
//!
//! Nothing here fetches or mutates; [`project`] is recomputed after every
//! state transition.

pub mod chart;
pub mod filter;
pub mod nearest;
pub mod summary;

pub use chart::{project_chart, ChartMarker, ChartSeries, TAU_MARKER_LABEL};
pub use filter::filter_events;
pub use nearest::{project_nearest, NearestEventView};
pub use summary::{
    project_summary, HdiDisplay, ImpactDisplay, ModelDisplay, SummaryDisplay, SummaryView,
};

use crate::domain::{DateRange, EventRecord, ViewSnapshot};

/// Everything the dashboard renders, derived from one range and one snapshot.
#[derive(Debug, Clone, PartialEq)]
pub struct DashboardView {
    pub range: DateRange,
    pub chart: ChartSeries,
    pub summary: SummaryView,
    pub nearest: Option<NearestEventView>,
    pub events: Vec<EventRecord>,
}

/// Events are windowed by the active `range`; the chart shows the snapshot's prices.
pub fn project(range: DateRange, snapshot: &ViewSnapshot) -> DashboardView {
    let changepoint = snapshot.changepoint.as_ref();
    DashboardView {
        range,
        chart: project_chart(&snapshot.prices, changepoint),
        summary: project_summary(changepoint),
        nearest: project_nearest(changepoint),
        events: filter_events(&snapshot.events, &range),
    }
}
