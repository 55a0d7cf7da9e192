//! File-backed tracing setup. The terminal belongs to the UI, so log lines
//! go to `brentview.log` under the data directory instead of stderr.

use std::fs::{self, OpenOptions};
use std::path::PathBuf;
use std::sync::Mutex;

use anyhow::Context;
use tracing_subscriber::EnvFilter;

pub const LOG_DIR_ENV: &str = "BRENTVIEW_LOG_DIR";
pub const LOG_FILE: &str = "brentview.log";
const DEFAULT_FILTER: &str = "brentview=info,brentview_core=info,brentview_tui=info";

/// `$BRENTVIEW_LOG_DIR`, else `<data-local-dir>/brentview`.
pub fn log_dir() -> PathBuf {
    match std::env::var_os(LOG_DIR_ENV) {
        Some(dir) if !dir.is_empty() => PathBuf::from(dir),
        _ => dirs::data_local_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("brentview"),
    }
}

/// Install the global subscriber. `RUST_LOG` overrides the default filter.
pub fn init(dir: PathBuf) -> anyhow::Result<PathBuf> {
    fs::create_dir_all(&dir).with_context(|| format!("create log dir {}", dir.display()))?;
    let path = dir.join(LOG_FILE);
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(&path)
        .with_context(|| format!("open log file {}", path.display()))?;

    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .try_init()
        .map_err(|e| anyhow::anyhow!("install tracing subscriber: {e}"))?;

    Ok(path)
}
