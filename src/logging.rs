//! Tracing setup. The terminal belongs to the TUI, so events go to a log file
//! in the data directory instead of stdout.

use std::fs::{self, OpenOptions};
use std::sync::Mutex;

use anyhow::{anyhow, Context, Result};
use tracing_subscriber::EnvFilter;

use crate::config::{Config, DEFAULT_LOG_FILTER};

/// Install the global subscriber. Unknown filter directives fall back to the
/// default filter.
pub fn init_tracing(config: &Config) -> Result<()> {
    let path = config.log_path();
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).context("failed to create log directory")?;
    }
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(&path)
        .with_context(|| format!("failed to open log file {}", path.display()))?;

    let filter = EnvFilter::try_new(&config.log_filter)
        .unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_ansi(false)
        .with_writer(Mutex::new(file))
        .try_init()
        .map_err(|err| anyhow!("failed to install tracing subscriber: {err}"))?;

    tracing::info!(log = %path.display(), "contact collector starting up");
    Ok(())
}
