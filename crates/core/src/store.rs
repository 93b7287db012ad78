//! Persistence seam for the best score.
//!
//! The session only ever talks to a [`HighScoreStore`]. Loading never fails
//! (absent or unreadable data is a best score of zero); a failed save is
//! reported to the caller, which logs it and keeps playing.

use std::io;

/// Reads and writes a single best-score integer
pub trait HighScoreStore {
    /// Stored best score, `0` when absent or unreadable
    fn load(&self) -> u32;

    /// Persist `score` as the new best score
    fn save(&mut self, score: u32) -> io::Result<()>;
}

/// In-memory store, for tests and headless sessions
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MemoryStore {
    best: u32,
    saves: u32,
}

impl MemoryStore {
    pub fn new(best: u32) -> Self {
        Self { best, saves: 0 }
    }

    pub fn best(&self) -> u32 {
        self.best
    }

    /// Number of successful `save` calls
    pub fn saves(&self) -> u32 {
        self.saves
    }
}

impl HighScoreStore for MemoryStore {
    fn load(&self) -> u32 {
        self.best
    }

    fn save(&mut self, score: u32) -> io::Result<()> {
        self.best = score;
        self.saves += 1;
        Ok(())
    }
}

impl<S: HighScoreStore + ?Sized> HighScoreStore for Box<S> {
    fn load(&self) -> u32 {
        (**self).load()
    }

    fn save(&mut self, score: u32) -> io::Result<()> {
        (**self).save(score)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_memory_store_round_trip() {
        let mut store = MemoryStore::new(40);
        assert_eq!(store.load(), 40);
        store.save(120).unwrap();
        assert_eq!(store.load(), 120);
        assert_eq!(store.saves(), 1);
    }

    #[test]
    fn test_boxed_store_delegates() {
        let mut store: Box<dyn HighScoreStore> = Box::new(MemoryStore::new(7));
        assert_eq!(store.load(), 7);
        store.save(9).unwrap();
        assert_eq!(store.load(), 9);
    }
}
