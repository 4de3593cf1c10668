use crate::error::{MathError, Result};
use crate::modulus::prime::{NTTFriendlyPrimesGenerator, Prime};
use primality_test::is_prime;

impl NTTFriendlyPrimesGenerator<u64> {
    /// Starts the search at 2^bit_size + 1 (upstream) and
    /// 2^bit_size + 1 - nth_root (downstream). Candidates stay within half
    /// a bit of bit_size.
    pub fn new(bit_size: u64, nth_root: u64) -> Self {
        let mut check_next_prime: bool = true;
        let mut check_prev_prime: bool = true;
        let next_prime: u64 = (1 << bit_size) + 1;
        let mut prev_prime: u64 = next_prime;

        if next_prime > nth_root.wrapping_neg() {
            check_next_prime = false;
        }

        if prev_prime < nth_root {
            check_prev_prime = false
        }

        prev_prime = prev_prime.wrapping_sub(nth_root);

        Self {
            size: bit_size as f64,
            bit_size,
            check_next_prime,
            check_prev_prime,
            nth_root,
            next_prime,
            prev_prime,
        }
    }

    fn exhausted(&self) -> MathError {
        MathError::PrimesExhausted {
            bit_size: self.bit_size,
            nth_root: self.nth_root,
        }
    }

    fn upstream_in_range(&self) -> bool {
        (self.next_prime as f64).log2() - self.size < 0.5
            && self.next_prime <= u64::MAX - self.nth_root
    }

    fn downstream_in_range(&self) -> bool {
        self.prev_prime >= self.nth_root && self.size - (self.prev_prime as f64).log2() < 0.5
    }

    pub fn next_upstream_primes(&mut self, k: usize) -> Result<Vec<Prime<u64>>> {
        (0..k).map(|_| self.next_upstream_prime()).collect()
    }

    pub fn next_downstream_primes(&mut self, k: usize) -> Result<Vec<Prime<u64>>> {
        (0..k).map(|_| self.next_downstream_prime()).collect()
    }

    pub fn next_alternating_primes(&mut self, k: usize) -> Result<Vec<Prime<u64>>> {
        (0..k).map(|_| self.next_alternating_prime()).collect()
    }

    pub fn next_upstream_prime(&mut self) -> Result<Prime<u64>> {
        while self.check_next_prime {
            if !self.upstream_in_range() {
                self.check_next_prime = false;
                break;
            }
            let candidate: u64 = self.next_prime;
            self.next_prime += self.nth_root;
            if is_prime(candidate) {
                return Prime::new(candidate);
            }
        }
        Err(self.exhausted())
    }

    pub fn next_downstream_prime(&mut self) -> Result<Prime<u64>> {
        while self.check_prev_prime {
            if !self.downstream_in_range() {
                self.check_prev_prime = false;
                break;
            }
            let candidate: u64 = self.prev_prime;
            self.prev_prime -= self.nth_root;
            if is_prime(candidate) {
                return Prime::new(candidate);
            }
        }
        Err(self.exhausted())
    }

    /// Returns the next prime closest to 2^bit_size, alternating between the
    /// upstream and downstream searches.
    pub fn next_alternating_prime(&mut self) -> Result<Prime<u64>> {
        loop {
            if !(self.check_next_prime || self.check_prev_prime) {
                return Err(self.exhausted());
            }

            if self.check_next_prime {
                if !self.upstream_in_range() {
                    self.check_next_prime = false;
                } else {
                    let candidate: u64 = self.next_prime;
                    self.next_prime += self.nth_root;
                    if is_prime(candidate) {
                        return Prime::new(candidate);
                    }
                }
            }

            if self.check_prev_prime {
                if !self.downstream_in_range() {
                    self.check_prev_prime = false;
                } else {
                    let candidate: u64 = self.prev_prime;
                    self.prev_prime -= self.nth_root;
                    if is_prime(candidate) {
                        return Prime::new(candidate);
                    }
                }
            }
        }
    }
}
