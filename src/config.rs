//! Runtime configuration read from environment variables.

use std::path::PathBuf;
use std::time::{SystemTime, UNIX_EPOCH};

use crate::store::DEFAULT_HIGH_SCORE_FILE;

pub const HIGH_SCORE_PATH_VAR: &str = "BLOCKFALL_HIGH_SCORE_PATH";
pub const SEED_VAR: &str = "BLOCKFALL_SEED";
pub const LOG_PATH_VAR: &str = "BLOCKFALL_LOG_PATH";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub high_score_path: PathBuf,
    pub seed: u32,
    /// Logging is off unless this is set.
    pub log_path: Option<PathBuf>,
}

impl Config {
    /// Create from environment variables
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup<F>(mut lookup: F) -> Self
    where
        F: FnMut(&str) -> Option<String>,
    {
        let high_score_path = non_empty(lookup(HIGH_SCORE_PATH_VAR))
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from(DEFAULT_HIGH_SCORE_FILE));

        let seed = lookup(SEED_VAR)
            .and_then(|s| s.trim().parse().ok())
            .unwrap_or_else(clock_seed);

        let log_path = non_empty(lookup(LOG_PATH_VAR)).map(PathBuf::from);

        Self {
            high_score_path,
            seed,
            log_path,
        }
    }
}

fn non_empty(value: Option<String>) -> Option<String> {
    value
        .map(|s| s.trim().to_string())
        .and_then(|s| if s.is_empty() { None } else { Some(s) })
}

/// Low 32 bits of the wall clock in nanoseconds; `1` if the clock is before the epoch.
fn clock_seed() -> u32 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_nanos() as u32)
        .unwrap_or(1)
}
