//! Injectable random sources.

use std::time::{SystemTime, UNIX_EPOCH};

/// Source of uniform random numbers for animations.
pub trait RandomSource {
    /// Next value in `[0, 1)`.
    fn next_f32(&mut self) -> f32;

    /// True with probability `p`.
    fn chance(&mut self, p: f32) -> bool {
        self.next_f32() < p
    }

    /// Uniform index in `0..len`. Returns 0 for an empty range.
    fn pick(&mut self, len: usize) -> usize {
        if len == 0 {
            return 0;
        }
        ((self.next_f32() * len as f32) as usize).min(len - 1)
    }
}

impl<R: RandomSource + ?Sized> RandomSource for Box<R> {
    fn next_f32(&mut self) -> f32 {
        (**self).next_f32()
    }
}

/// Xorshift generator, fast and good enough for visuals.
#[derive(Debug, Clone)]
pub struct XorShift64 {
    state: u64,
}

impl XorShift64 {
    /// Create a generator from a fixed seed. A zero seed is remapped since
    /// xorshift never leaves the all-zero state.
    pub fn new(seed: u64) -> Self {
        Self { state: seed.max(1) }
    }

    /// Create a generator seeded from the system clock.
    pub fn from_time() -> Self {
        let seed = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_nanos() as u64)
            .unwrap_or(0x9E37_79B9_7F4A_7C15);
        Self::new(seed)
    }

    pub fn next_u64(&mut self) -> u64 {
        let mut x = self.state;
        x ^= x << 13;
        x ^= x >> 7;
        x ^= x << 17;
        self.state = x;
        x
    }
}

impl RandomSource for XorShift64 {
    fn next_f32(&mut self) -> f32 {
        // 24 high bits convert to f32 exactly, keeping the result below 1.0.
        (self.next_u64() >> 40) as f32 / (1u64 << 24) as f32
    }
}

/// Replays a fixed list of values in a loop.
///
/// Lets tests pin down every random decision an animation makes.
#[derive(Debug, Clone)]
pub struct SequenceRandom {
    values: Vec<f32>,
    pos: usize,
}

impl SequenceRandom {
    pub fn new(values: impl Into<Vec<f32>>) -> Self {
        Self {
            values: values.into(),
            pos: 0,
        }
    }

    /// A source that always returns `value`.
    pub fn constant(value: f32) -> Self {
        Self::new(vec![value])
    }
}

impl RandomSource for SequenceRandom {
    fn next_f32(&mut self) -> f32 {
        if self.values.is_empty() {
            return 0.0;
        }
        let value = self.values[self.pos % self.values.len()];
        self.pos = self.pos.wrapping_add(1);
        value.clamp(0.0, 0.999_999)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_xorshift_range_and_determinism() {
        let mut a = XorShift64::new(42);
        let mut b = XorShift64::new(42);
        for _ in 0..1000 {
            let v = a.next_f32();
            assert!((0.0..1.0).contains(&v));
            assert_eq!(v, b.next_f32());
        }
    }

    #[test]
    fn test_zero_seed_still_moves() {
        let mut rng = XorShift64::new(0);
        assert_ne!(rng.next_u64(), rng.next_u64());
    }

    #[test]
    fn test_sequence_cycles() {
        let mut rng = SequenceRandom::new(vec![0.1, 0.9]);
        assert_eq!(rng.next_f32(), 0.1);
        assert_eq!(rng.next_f32(), 0.9);
        assert_eq!(rng.next_f32(), 0.1);
    }

    #[test]
    fn test_pick_bounds() {
        let mut rng = SequenceRandom::new(vec![0.0, 0.5, 1.0]);
        assert_eq!(rng.pick(4), 0);
        assert_eq!(rng.pick(4), 2);
        assert_eq!(rng.pick(4), 3);
        assert_eq!(rng.pick(0), 0);
    }

    #[test]
    fn test_chance() {
        let mut rng = SequenceRandom::new(vec![0.01, 0.5]);
        assert!(rng.chance(0.025));
        assert!(!rng.chance(0.025));
    }
}
