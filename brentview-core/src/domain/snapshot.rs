//! ViewSnapshot: the three datasets of one completed fetch cycle.

use super::changepoint::ChangepointSummary;
use super::event::EventRecord;
use super::price::PricePoint;
use super::range::DateRange;

/// Prices, events and change-point summary retrieved together.
///
/// A snapshot is only ever replaced as a whole; readers hold it behind an
/// `Arc` and never observe a partial update.
#[derive(Debug, Clone, PartialEq)]
pub struct ViewSnapshot {
    /// The range the price series was requested for.
    pub range: DateRange,
    pub prices: Vec<PricePoint>,
    pub events: Vec<EventRecord>,
    pub changepoint: Option<ChangepointSummary>,
}

impl ViewSnapshot {
    /// The snapshot shown before the first fetch completes.
    pub fn empty(range: DateRange) -> Self {
        Self {
            range,
            prices: Vec::new(),
            events: Vec::new(),
            changepoint: None,
        }
    }
}
