//! Test helpers for building an app wired to in-memory channels.

use std::sync::mpsc::{self, Receiver, Sender};

use brentview_core::domain::{parse_date, DateRange};
use brentview_core::DashboardConfig;

use crate::app::AppState;
use crate::worker::{WorkerCommand, WorkerResponse};

/// App with default config; returns the worker's ends of both channels.
pub fn test_app() -> (AppState, Receiver<WorkerCommand>, Sender<WorkerResponse>) {
    let (cmd_tx, cmd_rx) = mpsc::channel();
    let (resp_tx, resp_rx) = mpsc::channel();
    let app = AppState::new(&DashboardConfig::default(), cmd_tx, resp_rx);
    (app, cmd_rx, resp_tx)
}

pub fn range(start: &str, end: &str) -> DateRange {
    DateRange::new(parse_date(start).unwrap(), parse_date(end).unwrap())
}
