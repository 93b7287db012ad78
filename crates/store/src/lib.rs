//! File-backed best-score store.
//!
//! The file holds a single decimal integer. A missing, unreadable or corrupt
//! file reads as zero. Saves go to a sibling temp file first and are then
//! renamed over the target, so a crash mid-write never leaves a torn number.

use std::fs;
use std::io::{self, ErrorKind};
use std::path::{Path, PathBuf};

use blockfall_core::HighScoreStore;

/// Default file name, relative to the working directory
pub const DEFAULT_HIGH_SCORE_FILE: &str = "highscore.txt";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileStore {
    path: PathBuf,
}

impl FileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn temp_path(&self) -> PathBuf {
        let mut name = self
            .path
            .file_name()
            .map(|n| n.to_os_string())
            .unwrap_or_default();
        name.push(".tmp");
        self.path.with_file_name(name)
    }
}

impl Default for FileStore {
    fn default() -> Self {
        Self::new(DEFAULT_HIGH_SCORE_FILE)
    }
}

/// Parse stored text; anything but a single non-negative integer is `None`
pub fn parse_score(text: &str) -> Option<u32> {
    text.trim().parse().ok()
}

impl HighScoreStore for FileStore {
    fn load(&self) -> u32 {
        match fs::read_to_string(&self.path) {
            Ok(text) => match parse_score(&text) {
                Some(score) => {
                    log::info!("loaded high score {} from {}", score, self.path.display());
                    score
                }
                None => {
                    log::warn!(
                        "ignoring corrupt high score file {}",
                        self.path.display()
                    );
                    0
                }
            },
            Err(err) if err.kind() == ErrorKind::NotFound => {
                log::info!("no high score file at {}, starting fresh", self.path.display());
                0
            }
            Err(err) => {
                log::warn!("failed to read {}: {}", self.path.display(), err);
                0
            }
        }
    }

    fn save(&mut self, score: u32) -> io::Result<()> {
        let tmp = self.temp_path();
        fs::write(&tmp, format!("{}\n", score))?;
        fs::rename(&tmp, &self.path)?;
        log::debug!("saved high score {} to {}", score, self.path.display());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicU32, Ordering};

    fn scratch_path(tag: &str) -> PathBuf {
        static COUNTER: AtomicU32 = AtomicU32::new(0);
        let n = COUNTER.fetch_add(1, Ordering::Relaxed);
        std::env::temp_dir().join(format!(
            "blockfall-store-{}-{}-{}.txt",
            tag,
            std::process::id(),
            n
        ))
    }

    #[test]
    fn test_parse_score() {
        assert_eq!(parse_score("120\n"), Some(120));
        assert_eq!(parse_score("  7 "), Some(7));
        assert_eq!(parse_score(""), None);
        assert_eq!(parse_score("-3"), None);
        assert_eq!(parse_score("12abc"), None);
    }

    #[test]
    fn test_missing_file_reads_zero() {
        let store = FileStore::new(scratch_path("missing"));
        assert_eq!(store.load(), 0);
    }

    #[test]
    fn test_save_then_load() {
        let path = scratch_path("roundtrip");
        let mut store = FileStore::new(&path);
        store.save(4_250).unwrap();

        assert_eq!(fs::read_to_string(&path).unwrap(), "4250\n");
        assert_eq!(FileStore::new(&path).load(), 4_250);
        assert!(!store.temp_path().exists());

        fs::remove_file(&path).unwrap();
    }

    #[test]
    fn test_corrupt_file_reads_zero() {
        let path = scratch_path("corrupt");
        fs::write(&path, "not a number").unwrap();
        assert_eq!(FileStore::new(&path).load(), 0);
        fs::remove_file(&path).unwrap();
    }

    #[test]
    fn test_save_into_missing_directory_fails() {
        let path = scratch_path("nodir").join("deeper").join("score.txt");
        let mut store = FileStore::new(path);
        assert!(store.save(1).is_err());
    }

    #[test]
    fn test_temp_path_is_sibling() {
        let store = FileStore::new("/var/games/highscore.txt");
        assert_eq!(
            store.temp_path(),
            PathBuf::from("/var/games/highscore.txt.tmp")
        );
    }
}
