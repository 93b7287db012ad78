//! Logger setup for the terminal binary.
//!
//! The game owns the alternate screen, so logs never go to stderr. With a
//! log path configured they are appended to that file; without one the
//! logger is not installed and every `log` macro is a no-op.

use std::fs::OpenOptions;
use std::path::Path;

use anyhow::{Context, Result};
use env_logger::{Builder, Env, Target};

/// Filter used when `RUST_LOG` is unset.
pub const DEFAULT_FILTER: &str = "info";

/// Install the global logger. Returns `false` when logging stays off.
pub fn init(log_path: Option<&Path>) -> Result<bool> {
    let Some(path) = log_path else {
        return Ok(false);
    };

    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .with_context(|| format!("failed to open log file {}", path.display()))?;

    Builder::from_env(Env::default().default_filter_or(DEFAULT_FILTER))
        .target(Target::Pipe(Box::new(file)))
        .format_timestamp_millis()
        .try_init()
        .context("logger already initialised")?;

    Ok(true)
}
