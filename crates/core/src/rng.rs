//! RNG module - uniform random piece generation
//!
//! Each draw picks one of the seven kinds with equal probability. A small LCG
//! keeps the sequence deterministic for a given seed, which tests and replays
//! rely on.

use crate::types::PieceKind;

/// Simple LCG (Linear Congruential Generator) RNG
/// Uses constants from Numerical Recipes
#[derive(Debug, Clone)]
pub struct SimpleRng {
    state: u32,
}

impl SimpleRng {
    /// Create a new RNG with the given seed
    pub fn new(seed: u32) -> Self {
        // Avoid 0 seed which would produce all zeros
        let state = if seed == 0 { 1 } else { seed };
        Self { state }
    }

    /// Generate next random u32
    pub fn next_u32(&mut self) -> u32 {
        // LCG formula: (a * state + c) mod m
        // Using Numerical Recipes constants: a=1664525, c=1013904223, m=2^32
        self.state = self.state.wrapping_mul(1664525).wrapping_add(1013904223);
        self.state
    }

    /// Generate random value in range [0, max)
    pub fn next_range(&mut self, max: u32) -> u32 {
        // High bits of an LCG are far better distributed than the low ones.
        (self.next_u32() >> 16) % max.max(1)
    }

    pub fn state(&self) -> u32 {
        self.state
    }
}

/// Uniform piece generator
#[derive(Debug, Clone)]
pub struct PieceSource {
    rng: SimpleRng,
}

impl PieceSource {
    pub fn new(seed: u32) -> Self {
        Self {
            rng: SimpleRng::new(seed),
        }
    }

    /// Draw the next kind
    pub fn draw(&mut self) -> PieceKind {
        let idx = self.rng.next_range(PieceKind::ALL.len() as u32) as usize;
        PieceKind::ALL[idx]
    }

    /// Current RNG state (reseeding with it continues the same sequence)
    pub fn seed(&self) -> u32 {
        self.rng.state()
    }
}

impl Default for PieceSource {
    fn default() -> Self {
        Self::new(1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rng_deterministic() {
        let mut rng1 = SimpleRng::new(12345);
        let mut rng2 = SimpleRng::new(12345);

        for _ in 0..100 {
            assert_eq!(rng1.next_u32(), rng2.next_u32());
        }
    }

    #[test]
    fn test_rng_different_seeds() {
        let mut rng1 = SimpleRng::new(12345);
        let mut rng2 = SimpleRng::new(54321);
        assert_ne!(rng1.next_u32(), rng2.next_u32());
    }

    #[test]
    fn test_zero_seed_is_usable() {
        let mut rng = SimpleRng::new(0);
        assert_ne!(rng.next_u32(), 0);
    }

    #[test]
    fn test_next_range_in_bounds() {
        let mut rng = SimpleRng::new(7);
        for _ in 0..1_000 {
            assert!(rng.next_range(7) < 7);
        }
        assert_eq!(rng.next_range(0), 0);
    }

    #[test]
    fn test_source_draws_every_kind() {
        let mut source = PieceSource::new(1);
        let mut seen = [false; 7];
        for _ in 0..500 {
            let kind = source.draw();
            let idx = PieceKind::ALL.iter().position(|&k| k == kind).unwrap();
            seen[idx] = true;
        }
        assert!(seen.iter().all(|&s| s), "missing kinds: {:?}", seen);
    }

    #[test]
    fn test_source_resumes_from_seed() {
        let mut a = PieceSource::new(99);
        a.draw();
        let mut b = PieceSource::new(a.seed());
        for _ in 0..20 {
            assert_eq!(a.draw(), b.draw());
        }
    }
}
