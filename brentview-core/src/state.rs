//! DashboardState: the selected range, the displayed snapshot, and the
//! fetch epochs that keep them consistent.
//!
//! Every range change (or explicit refresh) issues a new [`FetchEpoch`].
//! A completed fetch is applied only if it carries the latest epoch, so a
//! slow response for an older range can never overwrite a newer one.

use std::fmt;
use std::sync::Arc;

use chrono::NaiveDate;

use crate::data::FetchError;
use crate::domain::{DateRange, ViewSnapshot};
use crate::view::{self, DashboardView};

/// Monotonically increasing fetch sequence number.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct FetchEpoch(pub u64);

impl fmt::Display for FetchEpoch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// A fetch the caller must dispatch.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FetchTicket {
    pub epoch: FetchEpoch,
    pub range: DateRange,
}

/// What happened to a completed fetch.
#[derive(Debug, Clone, PartialEq)]
pub enum FetchOutcome {
    /// The snapshot was replaced.
    Applied,
    /// A newer fetch was issued since; the result was discarded.
    Stale { epoch: FetchEpoch, latest: FetchEpoch },
    /// The latest fetch failed; the previous snapshot is kept.
    Failed(FetchError),
}

#[derive(Debug, Clone)]
pub struct DashboardState {
    range: DateRange,
    snapshot: Arc<ViewSnapshot>,
    latest: FetchEpoch,
    loading: bool,
}

impl DashboardState {
    pub fn new(range: DateRange) -> Self {
        Self {
            range,
            snapshot: Arc::new(ViewSnapshot::empty(range)),
            latest: FetchEpoch(0),
            loading: false,
        }
    }

    pub fn range(&self) -> DateRange {
        self.range
    }

    pub fn snapshot(&self) -> &Arc<ViewSnapshot> {
        &self.snapshot
    }

    /// True while the latest issued fetch has not completed.
    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn set_start(&mut self, start: NaiveDate) -> FetchTicket {
        self.set_range(self.range.with_start(start))
    }

    pub fn set_end(&mut self, end: NaiveDate) -> FetchTicket {
        self.set_range(self.range.with_end(end))
    }

    /// Replace the range and issue a fetch for it. An inverted range is kept as-is.
    pub fn set_range(&mut self, range: DateRange) -> FetchTicket {
        self.range = range;
        self.issue()
    }

    /// Re-fetch the current range.
    pub fn refresh(&mut self) -> FetchTicket {
        self.issue()
    }

    fn issue(&mut self) -> FetchTicket {
        self.latest = FetchEpoch(self.latest.0 + 1);
        self.loading = true;
        FetchTicket {
            epoch: self.latest,
            range: self.range,
        }
    }

    /// The fetch for `epoch` was never dispatched; stop waiting for it.
    pub fn abandon(&mut self, epoch: FetchEpoch) {
        if epoch == self.latest {
            self.loading = false;
        }
    }

    /// Record a finished fetch.
    pub fn complete(
        &mut self,
        epoch: FetchEpoch,
        result: Result<ViewSnapshot, FetchError>,
    ) -> FetchOutcome {
        if epoch != self.latest {
            tracing::debug!(%epoch, latest = %self.latest, "discarding stale fetch result");
            return FetchOutcome::Stale {
                epoch,
                latest: self.latest,
            };
        }

        self.loading = false;
        match result {
            Ok(snapshot) => {
                self.snapshot = Arc::new(snapshot);
                FetchOutcome::Applied
            }
            Err(e) => {
                tracing::error!(
                    %epoch,
                    error = %e,
                    "fetch cycle failed; keeping previous snapshot"
                );
                FetchOutcome::Failed(e)
            }
        }
    }

    /// Recompute every projection for the current range and snapshot.
    pub fn view(&self) -> DashboardView {
        view::project(self.range, &self.snapshot)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::Endpoint;
    use crate::domain::PricePoint;

    fn d(y: i32, m: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, day).unwrap()
    }

    fn snapshot_for(range: DateRange, price: f64) -> ViewSnapshot {
        ViewSnapshot {
            prices: vec![PricePoint {
                date: range.start,
                price,
            }],
            ..ViewSnapshot::empty(range)
        }
    }

    #[test]
    fn epochs_increase_per_request() {
        let mut state = DashboardState::new(DateRange::new(d(2020, 1, 1), d(2020, 12, 31)));
        let a = state.refresh();
        let b = state.set_start(d(2020, 2, 1));
        let c = state.set_end(d(2020, 3, 1));
        assert!(a.epoch < b.epoch && b.epoch < c.epoch);
        assert_eq!(c.range, DateRange::new(d(2020, 2, 1), d(2020, 3, 1)));
        assert!(state.is_loading());
    }

    #[test]
    fn abandoning_latest_fetch_clears_loading() {
        let mut state = DashboardState::new(DateRange::new(d(2020, 1, 1), d(2020, 12, 31)));
        let a = state.refresh();
        let b = state.refresh();
        state.abandon(a.epoch);
        assert!(state.is_loading());
        state.abandon(b.epoch);
        assert!(!state.is_loading());
    }

    #[test]
    fn late_response_for_older_range_is_discarded() {
        let r1 = DateRange::new(d(2020, 1, 1), d(2020, 6, 30));
        let r2 = DateRange::new(d(2021, 1, 1), d(2021, 6, 30));
        let mut state = DashboardState::new(r1);

        let t1 = state.set_range(r1);
        let t2 = state.set_range(r2);

        assert_eq!(state.complete(t2.epoch, Ok(snapshot_for(r2, 2.0))), FetchOutcome::Applied);
        assert_eq!(
            state.complete(t1.epoch, Ok(snapshot_for(r1, 1.0))),
            FetchOutcome::Stale {
                epoch: t1.epoch,
                latest: t2.epoch
            }
        );

        assert_eq!(state.snapshot().range, r2);
        assert_eq!(state.snapshot().prices[0].price, 2.0);
        assert!(!state.is_loading());
    }

    #[test]
    fn early_response_for_older_range_is_discarded_too() {
        let r1 = DateRange::new(d(2020, 1, 1), d(2020, 6, 30));
        let r2 = DateRange::new(d(2021, 1, 1), d(2021, 6, 30));
        let mut state = DashboardState::new(r1);

        let t1 = state.set_range(r1);
        let t2 = state.set_range(r2);

        assert!(matches!(
            state.complete(t1.epoch, Ok(snapshot_for(r1, 1.0))),
            FetchOutcome::Stale { .. }
        ));
        assert!(state.is_loading());
        state.complete(t2.epoch, Ok(snapshot_for(r2, 2.0)));
        assert_eq!(state.snapshot().range, r2);
    }

    #[test]
    fn failure_keeps_previous_snapshot() {
        let r = DateRange::new(d(2020, 1, 1), d(2020, 12, 31));
        let mut state = DashboardState::new(r);
        let t1 = state.refresh();
        state.complete(t1.epoch, Ok(snapshot_for(r, 40.0)));

        let t2 = state.refresh();
        let err = FetchError::Status {
            endpoint: Endpoint::Prices,
            status: 503,
        };
        assert_eq!(state.complete(t2.epoch, Err(err.clone())), FetchOutcome::Failed(err));
        assert_eq!(state.snapshot().prices[0].price, 40.0);
        assert!(!state.is_loading());
    }

    #[test]
    fn stale_failure_is_ignored() {
        let r = DateRange::new(d(2020, 1, 1), d(2020, 12, 31));
        let mut state = DashboardState::new(r);
        let t1 = state.refresh();
        let _t2 = state.refresh();
        let err = FetchError::Transport {
            endpoint: Endpoint::Events,
            message: "reset".into(),
        };
        assert!(matches!(state.complete(t1.epoch, Err(err)), FetchOutcome::Stale { .. }));
        assert!(state.is_loading());
    }

    #[test]
    fn view_filters_events_by_the_active_range() {
        use crate::domain::EventRecord;
        let r = DateRange::new(d(2020, 1, 1), d(2020, 12, 31));
        let mut state = DashboardState::new(r);
        let t = state.refresh();
        state.complete(
            t.epoch,
            Ok(ViewSnapshot {
                events: vec![EventRecord {
                    event_date: d(2020, 3, 1),
                    event_title: "X".into(),
                    event_type: String::new(),
                    region: String::new(),
                    notes: String::new(),
                }],
                ..ViewSnapshot::empty(r)
            }),
        );
        assert_eq!(state.view().events.len(), 1);

        // Narrowing the range re-windows immediately, before the re-fetch lands.
        state.set_end(d(2020, 2, 1));
        assert!(state.view().events.is_empty());
    }
}
