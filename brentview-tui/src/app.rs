//! Application state: single-owner, main-thread only.
//!
//! All TUI state lives here. The worker thread communicates via channels;
//! every transition ends with [`AppState::recompute_view`] so the panels
//! always render one consistent projection.

use std::collections::VecDeque;
use std::sync::mpsc::{Receiver, Sender};

use chrono::NaiveDateTime;

use brentview_core::domain::{format_date, parse_date, shift_days, DateRange};
use brentview_core::{
    DashboardConfig, DashboardState, DashboardView, FetchError, FetchOutcome, FetchTicket,
};

use crate::worker::{WorkerCommand, WorkerResponse};

const ERROR_HISTORY_CAP: usize = 50;
const DATE_INPUT_LEN: usize = 10;

/// Which date input has focus.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DateField {
    Start,
    End,
}

impl DateField {
    pub fn label(self) -> &'static str {
        match self {
            DateField::Start => "Start",
            DateField::End => "End",
        }
    }

    pub fn toggle(self) -> DateField {
        match self {
            DateField::Start => DateField::End,
            DateField::End => DateField::Start,
        }
    }
}

/// Status message severity.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusLevel {
    Info,
    Warning,
    Error,
}

/// Error category for display.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Network,
    Data,
    Worker,
}

impl ErrorCategory {
    pub fn label(self) -> &'static str {
        match self {
            ErrorCategory::Network => "NET",
            ErrorCategory::Data => "DATA",
            ErrorCategory::Worker => "WRK",
        }
    }

    fn of(err: &FetchError) -> Self {
        if err.is_network() {
            ErrorCategory::Network
        } else {
            ErrorCategory::Data
        }
    }
}

/// An error record for the error history overlay.
#[derive(Debug, Clone)]
pub struct ErrorRecord {
    pub timestamp: NaiveDateTime,
    pub category: ErrorCategory,
    pub message: String,
    pub context: String,
}

/// Which overlay (if any) is shown on top.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Overlay {
    None,
    ErrorHistory,
    Help,
}

/// Text buffers behind the two date inputs.
///
/// A buffer may hold an uncommitted edit; the committed value lives in
/// [`DashboardState::range`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RangeInputs {
    pub focus: DateField,
    pub start: String,
    pub end: String,
}

impl RangeInputs {
    pub fn new(range: DateRange) -> Self {
        Self {
            focus: DateField::Start,
            start: format_date(range.start),
            end: format_date(range.end),
        }
    }

    pub fn buffer(&self, field: DateField) -> &str {
        match field {
            DateField::Start => &self.start,
            DateField::End => &self.end,
        }
    }

    fn buffer_mut(&mut self, field: DateField) -> &mut String {
        match field {
            DateField::Start => &mut self.start,
            DateField::End => &mut self.end,
        }
    }

    /// Append a digit or `-` to the focused input.
    pub fn push(&mut self, c: char) {
        let buf = self.buffer_mut(self.focus);
        if buf.len() < DATE_INPUT_LEN && (c.is_ascii_digit() || c == '-') {
            buf.push(c);
        }
    }

    pub fn pop(&mut self) {
        self.buffer_mut(self.focus).pop();
    }

    /// Overwrite a buffer with the committed date.
    pub fn reset(&mut self, field: DateField, range: DateRange) {
        *self.buffer_mut(field) = format_date(committed(field, range));
    }

    /// True when the buffer differs from the committed value.
    pub fn is_dirty(&self, field: DateField, range: DateRange) -> bool {
        self.buffer(field) != format_date(committed(field, range))
    }
}

fn committed(field: DateField, range: DateRange) -> chrono::NaiveDate {
    match field {
        DateField::Start => range.start,
        DateField::End => range.end,
    }
}

/// Top-level application state.
pub struct AppState {
    pub running: bool,

    // Data
    pub dashboard: DashboardState,
    pub view: DashboardView,
    pub inputs: RangeInputs,
    pub events_scroll: usize,

    // Worker communication
    pub worker_tx: Sender<WorkerCommand>,
    pub worker_rx: Receiver<WorkerResponse>,

    // Cross-cutting
    pub api_base: String,
    pub api_healthy: Option<bool>,
    pub status_message: Option<(String, StatusLevel)>,
    pub error_history: VecDeque<ErrorRecord>,
    pub error_scroll: usize,
    pub overlay: Overlay,
}

impl AppState {
    pub fn new(
        config: &DashboardConfig,
        worker_tx: Sender<WorkerCommand>,
        worker_rx: Receiver<WorkerResponse>,
    ) -> Self {
        let dashboard = DashboardState::new(config.default_range);
        let view = dashboard.view();
        Self {
            running: true,
            inputs: RangeInputs::new(config.default_range),
            dashboard,
            view,
            events_scroll: 0,
            worker_tx,
            worker_rx,
            api_base: config.api_base.clone(),
            api_healthy: None,
            status_message: None,
            error_history: VecDeque::with_capacity(ERROR_HISTORY_CAP),
            error_scroll: 0,
            overlay: Overlay::None,
        }
    }

    /// Kick off the health probe and the first fetch for the default range.
    pub fn start(&mut self) {
        self.send(WorkerCommand::CheckHealth);
        let ticket = self.dashboard.refresh();
        self.dispatch(ticket);
    }

    /// Parse and commit the given input. Unchanged values do not re-fetch.
    pub fn commit(&mut self, field: DateField) {
        let date = match parse_date(self.inputs.buffer(field)) {
            Ok(d) => d,
            Err(e) => {
                self.set_warning(e.to_string());
                return;
            }
        };

        let range = self.dashboard.range();
        if committed(field, range) == date {
            self.inputs.reset(field, range);
            return;
        }

        let ticket = match field {
            DateField::Start => self.dashboard.set_start(date),
            DateField::End => self.dashboard.set_end(date),
        };
        self.inputs.reset(field, ticket.range);
        self.dispatch(ticket);
    }

    /// Step `field` by `days` and re-fetch. A pending edit is stepped from
    /// its typed value; an unparseable one blocks the step.
    pub fn shift(&mut self, field: DateField, days: i64) {
        let range = self.dashboard.range();
        let base = if self.inputs.is_dirty(field, range) {
            match parse_date(self.inputs.buffer(field)) {
                Ok(d) => d,
                Err(e) => {
                    self.set_warning(e.to_string());
                    return;
                }
            }
        } else {
            committed(field, range)
        };
        let date = shift_days(base, days);
        let ticket = match field {
            DateField::Start => self.dashboard.set_start(date),
            DateField::End => self.dashboard.set_end(date),
        };
        self.inputs.reset(field, ticket.range);
        self.dispatch(ticket);
    }

    /// Explicit re-fetch of the current range.
    pub fn refresh(&mut self) {
        let ticket = self.dashboard.refresh();
        self.dispatch(ticket);
    }

    /// Discard an uncommitted edit.
    pub fn revert(&mut self, field: DateField) {
        self.inputs.reset(field, self.dashboard.range());
    }

    fn dispatch(&mut self, ticket: FetchTicket) {
        if ticket.range.is_inverted() {
            self.set_warning(format!("End date precedes start date ({})", ticket.range));
        } else {
            self.set_status(format!("Loading {}...", ticket.range));
        }
        let sent = self.send(WorkerCommand::Fetch {
            epoch: ticket.epoch,
            range: ticket.range,
        });
        if !sent {
            self.dashboard.abandon(ticket.epoch);
        }
        self.events_scroll = 0;
        self.recompute_view();
    }

    fn send(&mut self, cmd: WorkerCommand) -> bool {
        if self.worker_tx.send(cmd).is_err() {
            self.push_error(
                ErrorCategory::Worker,
                "fetch worker is not running".into(),
                String::new(),
            );
            return false;
        }
        true
    }

    pub fn handle_worker_response(&mut self, resp: WorkerResponse) {
        match resp {
            WorkerResponse::FetchDone {
                epoch,
                range,
                result,
            } => match self.dashboard.complete(epoch, result) {
                FetchOutcome::Applied => {
                    let snap = self.dashboard.snapshot();
                    let msg = format!(
                        "Loaded {} prices, {} events for {range}",
                        snap.prices.len(),
                        snap.events.len()
                    );
                    self.set_status(msg);
                }
                FetchOutcome::Stale { .. } => {}
                FetchOutcome::Failed(err) => {
                    self.push_error(
                        ErrorCategory::of(&err),
                        err.to_string(),
                        format!("range {range}"),
                    );
                }
            },
            WorkerResponse::Health { result } => match result {
                Ok(()) => {
                    tracing::info!(api_base = %self.api_base, "API health check passed");
                    self.api_healthy = Some(true);
                }
                Err(err) => {
                    tracing::warn!(
                        api_base = %self.api_base,
                        error = %err,
                        "API health check failed"
                    );
                    self.api_healthy = Some(false);
                    self.push_error(
                        ErrorCategory::of(&err),
                        err.to_string(),
                        "health check".into(),
                    );
                }
            },
        }
        self.recompute_view();
    }

    /// Re-derive every panel's data from the current range and snapshot.
    pub fn recompute_view(&mut self) {
        self.view = self.dashboard.view();
        let max_scroll = self.view.events.len().saturating_sub(1);
        self.events_scroll = self.events_scroll.min(max_scroll);
    }

    /// Push an error to the history, capping at 50.
    pub fn push_error(&mut self, category: ErrorCategory, message: String, context: String) {
        let record = ErrorRecord {
            timestamp: chrono::Local::now().naive_local(),
            category,
            message: message.clone(),
            context,
        };
        self.error_history.push_front(record);
        if self.error_history.len() > ERROR_HISTORY_CAP {
            self.error_history.pop_back();
        }
        self.status_message = Some((message, StatusLevel::Error));
    }

    pub fn set_status(&mut self, msg: impl Into<String>) {
        self.status_message = Some((msg.into(), StatusLevel::Info));
    }

    pub fn set_warning(&mut self, msg: impl Into<String>) {
        self.status_message = Some((msg.into(), StatusLevel::Warning));
    }
}
