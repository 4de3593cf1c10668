use rand_chacha::{ChaCha8Rng, rand_core::SeedableRng};
use rand_core::RngCore;

pub struct Source {
    source: ChaCha8Rng,
}

/// Returns a fresh 32-byte seed drawn from the thread-local generator.
pub fn new_seed() -> [u8; 32] {
    let mut seed: [u8; 32] = [0u8; 32];
    rand::rng().fill_bytes(&mut seed);
    seed
}

impl Source {
    pub fn new(seed: [u8; 32]) -> Source {
        Source {
            source: ChaCha8Rng::from_seed(seed),
        }
    }

    /// Returns a [Source] seeded from [new_seed].
    pub fn from_entropy() -> Source {
        Source::new(new_seed())
    }

    pub fn branch(&mut self) -> ([u8; 32], Self) {
        let seed: [u8; 32] = self.new_seed();
        (seed, Source::new(seed))
    }

    pub fn new_seed(&mut self) -> [u8; 32] {
        let mut seed: [u8; 32] = [0u8; 32];
        self.fill_bytes(&mut seed);
        seed
    }

    /// Returns x in [0, max) by rejection on `next_u64() & mask`.
    /// `mask` must cover `max - 1`.
    #[inline(always)]
    pub fn next_u64n(&mut self, max: u64, mask: u64) -> u64 {
        debug_assert!(max > 0, "invalid max: 0");
        debug_assert!(mask >= max - 1, "invalid mask: {} < max-1={}", mask, max - 1);
        let mut x: u64 = self.next_u64() & mask;
        while x >= max {
            x = self.next_u64() & mask;
        }
        x
    }

    /// Returns x uniform in [-bound, bound].
    #[inline(always)]
    pub fn next_i64_bounded(&mut self, bound: u64) -> i64 {
        debug_assert!(bound < 1 << 62, "invalid bound: {} >= 2^62", bound);
        let width: u64 = 2 * bound + 1;
        let mask: u64 = width.next_power_of_two() - 1;
        self.next_u64n(width, mask) as i64 - bound as i64
    }
}

impl RngCore for Source {
    #[inline(always)]
    fn next_u32(&mut self) -> u32 {
        self.source.next_u32()
    }

    #[inline(always)]
    fn next_u64(&mut self) -> u64 {
        self.source.next_u64()
    }

    #[inline(always)]
    fn fill_bytes(&mut self, bytes: &mut [u8]) {
        self.source.fill_bytes(bytes)
    }
}
