//! Deterministic PRNG shared by board setup, food spawning and movers.

// RNG helpers use intentional truncating casts
#![allow(clippy::cast_possible_truncation)]

/// Deterministic PRNG using xorshift64.
#[derive(Debug, Clone, Copy)]
pub(crate) struct Rng {
    state: u64,
}

impl Rng {
    /// Create a new RNG with the given seed.
    pub(crate) const fn new(seed: u64) -> Self {
        // Ensure non-zero state
        let state = if seed == 0 { 0x5555_5555_5555_5555 } else { seed };
        Self { state }
    }

    /// Derive an RNG for one turn of a seeded stream.
    pub(crate) const fn for_turn(seed: u64, turn: u32) -> Self {
        Self::new(seed ^ (turn as u64).wrapping_mul(0x9E37_79B9_7F4A_7C15))
    }

    /// Generate next random u64.
    pub(crate) fn next_u64(&mut self) -> u64 {
        let mut x = self.state;
        x ^= x << 13;
        x ^= x >> 7;
        x ^= x << 17;
        self.state = x;
        x
    }

    /// Generate random u32 in [0, max).
    pub(crate) fn next_u32(&mut self, max: u32) -> u32 {
        if max == 0 {
            return 0;
        }
        (self.next_u64() % u64::from(max)) as u32
    }

    /// Pick an index in [0, len).
    pub(crate) fn next_index(&mut self, len: usize) -> usize {
        if len == 0 {
            return 0;
        }
        (self.next_u64() % len as u64) as usize
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rng_deterministic() {
        let mut a = Rng::new(42);
        let mut b = Rng::new(42);
        for _ in 0..100 {
            assert_eq!(a.next_u64(), b.next_u64());
        }
    }

    #[test]
    fn test_rng_bounds() {
        let mut rng = Rng::new(7);
        for _ in 0..1000 {
            assert!(rng.next_u32(10) < 10);
            assert!(rng.next_index(3) < 3);
        }
        assert_eq!(rng.next_u32(0), 0);
        assert_eq!(rng.next_index(0), 0);
    }

    #[test]
    fn test_turn_streams_differ() {
        let mut a = Rng::for_turn(1, 1);
        let mut b = Rng::for_turn(1, 2);
        assert_ne!(a.next_u64(), b.next_u64());
    }
}
