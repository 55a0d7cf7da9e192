//! Domain types shared by the fetcher, the projections and the TUI.

pub mod changepoint;
pub mod date;
pub mod event;
pub mod price;
pub mod range;
pub mod snapshot;

pub use changepoint::{ChangepointSummary, ImpactStats, NearestEvent};
pub use date::{format_date, parse_date, DateParseError, DATE_FORMAT};
pub use event::EventRecord;
pub use price::PricePoint;
pub use range::{shift_days, DateRange};
pub use snapshot::ViewSnapshot;
