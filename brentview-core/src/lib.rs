//! BrentView Core: what the change-point dashboard knows, independent of any terminal.
//!
//! - Domain types (prices, events, change-point summary, snapshots, ranges)
//! - Configuration resolved once at startup
//! - Concurrent retrieval of the three datasets from the dashboard API
//! - Fetch-epoch bookkeeping so stale responses never reach the screen
//! - Pure projections: event window, summary, nearest event, chart series

pub mod config;
pub mod data;
pub mod domain;
pub mod state;
pub mod view;

pub use config::{ConfigError, DashboardConfig};
pub use data::{DatasetFetcher, FetchError};
pub use state::{DashboardState, FetchEpoch, FetchOutcome, FetchTicket};
pub use view::DashboardView;
