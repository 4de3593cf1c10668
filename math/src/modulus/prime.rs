use crate::modulus::barrett::BarrettPrecomp;
use crate::modulus::montgomery::{Montgomery, MontgomeryPrecomp};

/// A word-sized prime modulus with its reduction precomputations.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Prime<O> {
    pub q: O,
    pub two_q: O,
    pub four_q: O,
    pub montgomery: MontgomeryPrecomp<O>,
    pub barrett: BarrettPrecomp<O>,
    /// 2^128 mod q, in Montgomery form of 2^64.
    pub r2: Montgomery<O>,
    pub phi: O,
}

/// Enumerates primes p = 1 mod nth_root around 2^bit_size, moving away
/// from 2^bit_size in both directions.
pub struct NTTFriendlyPrimesGenerator<O> {
    pub(crate) size: f64,
    pub(crate) bit_size: u64,
    pub(crate) next_prime: O,
    pub(crate) prev_prime: O,
    pub(crate) nth_root: O,
    pub(crate) check_next_prime: bool,
    pub(crate) check_prev_prime: bool,
}
