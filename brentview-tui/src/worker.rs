//! Background fetch worker.
//!
//! Communication with the TUI main thread is via `mpsc` channels. The worker
//! owns a private tokio runtime with a single I/O thread; every fetch cycle is
//! its own task, so a cycle for a new range can start while an older one is
//! still in flight. Ordering is resolved on the UI side by fetch epoch.

use std::io;
use std::sync::mpsc::{Receiver, Sender};
use std::sync::Arc;
use std::thread::{self, JoinHandle};

use tokio::runtime::Runtime;

use brentview_core::domain::{DateRange, ViewSnapshot};
use brentview_core::{DatasetFetcher, FetchEpoch, FetchError};

/// Commands sent from the TUI to the worker.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WorkerCommand {
    Fetch { epoch: FetchEpoch, range: DateRange },
    CheckHealth,
    Shutdown,
}

/// Responses sent from the worker back to the TUI.
#[derive(Debug, Clone)]
pub enum WorkerResponse {
    FetchDone {
        epoch: FetchEpoch,
        range: DateRange,
        result: Result<ViewSnapshot, FetchError>,
    },
    Health {
        result: Result<(), FetchError>,
    },
}

/// Spawn the background worker thread.
pub fn spawn_worker(
    fetcher: Arc<DatasetFetcher>,
    rx: Receiver<WorkerCommand>,
    tx: Sender<WorkerResponse>,
) -> io::Result<JoinHandle<()>> {
    thread::Builder::new()
        .name("brentview-worker".into())
        .spawn(move || worker_loop(fetcher, rx, tx))
}

fn worker_loop(
    fetcher: Arc<DatasetFetcher>,
    rx: Receiver<WorkerCommand>,
    tx: Sender<WorkerResponse>,
) {
    let runtime = match tokio::runtime::Builder::new_multi_thread()
        .worker_threads(1)
        .thread_name("brentview-io")
        .enable_all()
        .build()
    {
        Ok(rt) => rt,
        Err(e) => {
            tracing::error!(error = %e, "failed to build worker runtime");
            return;
        }
    };

    loop {
        match rx.recv() {
            Ok(WorkerCommand::Shutdown) | Err(_) => break,
            Ok(cmd) => handle_command(&runtime, &fetcher, cmd, &tx),
        }
    }

    // In-flight requests are abandoned; nobody is listening for them.
    runtime.shutdown_background();
}

fn handle_command(
    runtime: &Runtime,
    fetcher: &Arc<DatasetFetcher>,
    cmd: WorkerCommand,
    tx: &Sender<WorkerResponse>,
) {
    match cmd {
        WorkerCommand::Fetch { epoch, range } => {
            let fetcher = Arc::clone(fetcher);
            let tx = tx.clone();
            tracing::debug!(%epoch, %range, "dispatching fetch");
            runtime.spawn(async move {
                let result = fetcher.fetch(range).await;
                let _ = tx.send(WorkerResponse::FetchDone {
                    epoch,
                    range,
                    result,
                });
            });
        }
        WorkerCommand::CheckHealth => {
            let fetcher = Arc::clone(fetcher);
            let tx = tx.clone();
            runtime.spawn(async move {
                let result = fetcher.health().await;
                let _ = tx.send(WorkerResponse::Health { result });
            });
        }
        WorkerCommand::Shutdown => {} // handled in loop
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::mpsc;
    use std::time::Duration;

    use brentview_core::data::StaticHttpClient;
    use brentview_core::domain::parse_date;
    use brentview_core::DashboardConfig;

    fn range(start: &str, end: &str) -> DateRange {
        DateRange::new(parse_date(start).unwrap(), parse_date(end).unwrap())
    }

    fn fetcher(client: StaticHttpClient) -> Arc<DatasetFetcher> {
        Arc::new(DatasetFetcher::new(&DashboardConfig::default(), Arc::new(client)))
    }

    #[test]
    fn worker_shutdown() {
        let (cmd_tx, cmd_rx) = mpsc::channel();
        let (resp_tx, _resp_rx) = mpsc::channel();

        let handle = spawn_worker(fetcher(StaticHttpClient::new()), cmd_rx, resp_tx).unwrap();
        cmd_tx.send(WorkerCommand::Shutdown).unwrap();
        handle.join().expect("worker should join cleanly");
    }

    #[test]
    fn worker_exits_when_ui_drops_sender() {
        let (cmd_tx, cmd_rx) = mpsc::channel::<WorkerCommand>();
        let (resp_tx, _resp_rx) = mpsc::channel();

        let handle = spawn_worker(fetcher(StaticHttpClient::new()), cmd_rx, resp_tx).unwrap();
        drop(cmd_tx);
        handle.join().expect("worker should join cleanly");
    }

    #[test]
    fn fetch_result_carries_its_epoch() {
        let client = StaticHttpClient::new()
            .json("/api/prices", r#"[{"date":"2020-01-01","price":40.0}]"#)
            .json("/api/events", "[]")
            .json("/api/changepoint", "{}");
        let (cmd_tx, cmd_rx) = mpsc::channel();
        let (resp_tx, resp_rx) = mpsc::channel();
        let handle = spawn_worker(fetcher(client), cmd_rx, resp_tx).unwrap();

        let r = range("2020-01-01", "2020-12-31");
        cmd_tx
            .send(WorkerCommand::Fetch {
                epoch: FetchEpoch(7),
                range: r,
            })
            .unwrap();

        match resp_rx.recv_timeout(Duration::from_secs(5)).unwrap() {
            WorkerResponse::FetchDone { epoch, range, result } => {
                assert_eq!(epoch, FetchEpoch(7));
                assert_eq!(range, r);
                assert_eq!(result.unwrap().prices.len(), 1);
            }
            other => panic!("unexpected response: {other:?}"),
        }

        cmd_tx.send(WorkerCommand::Shutdown).unwrap();
        handle.join().unwrap();
    }

    #[test]
    fn overlapping_fetches_can_finish_out_of_order() {
        let client = StaticHttpClient::new()
            .json_delayed("start=2020-01-01", Duration::from_millis(300), "[]")
            .json("start=2021-01-01", "[]")
            .json("/api/events", "[]")
            .json("/api/changepoint", "{}");
        let (cmd_tx, cmd_rx) = mpsc::channel();
        let (resp_tx, resp_rx) = mpsc::channel();
        let handle = spawn_worker(fetcher(client), cmd_rx, resp_tx).unwrap();

        cmd_tx
            .send(WorkerCommand::Fetch {
                epoch: FetchEpoch(1),
                range: range("2020-01-01", "2020-12-31"),
            })
            .unwrap();
        cmd_tx
            .send(WorkerCommand::Fetch {
                epoch: FetchEpoch(2),
                range: range("2021-01-01", "2021-12-31"),
            })
            .unwrap();

        let mut order = Vec::new();
        for _ in 0..2 {
            if let WorkerResponse::FetchDone { epoch, .. } =
                resp_rx.recv_timeout(Duration::from_secs(5)).unwrap()
            {
                order.push(epoch);
            }
        }
        assert_eq!(order, vec![FetchEpoch(2), FetchEpoch(1)]);

        cmd_tx.send(WorkerCommand::Shutdown).unwrap();
        handle.join().unwrap();
    }

    #[test]
    fn health_check_reports_back() {
        let client = StaticHttpClient::new().json("/api/health", r#"{"status":"ok"}"#);
        let (cmd_tx, cmd_rx) = mpsc::channel();
        let (resp_tx, resp_rx) = mpsc::channel();
        let handle = spawn_worker(fetcher(client), cmd_rx, resp_tx).unwrap();

        cmd_tx.send(WorkerCommand::CheckHealth).unwrap();
        match resp_rx.recv_timeout(Duration::from_secs(5)).unwrap() {
            WorkerResponse::Health { result } => assert!(result.is_ok()),
            other => panic!("unexpected response: {other:?}"),
        }

        cmd_tx.send(WorkerCommand::Shutdown).unwrap();
        handle.join().unwrap();
    }
}
