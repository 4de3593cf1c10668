use crate::error::{MathError, Result};
use crate::modulus::prime::Prime;
use crate::modulus::REDUCEMOD;
use crate::poly::PolyRNS;
use crate::ring::{Ring, RingRNS};
use num_bigint::{BigInt, BigUint};
use rayon::prelude::*;
use std::sync::Arc;

impl RingRNS<u64> {
    pub fn new(n: usize, primes: &[Prime<u64>]) -> Result<Self> {
        if primes.is_empty() {
            return Err(MathError::InvalidModulus("empty prime list".to_string()));
        }
        let rings: Vec<Arc<Ring<u64>>> = primes
            .iter()
            .map(|prime| Ring::new(n, *prime).map(Arc::new))
            .collect::<Result<_>>()?;
        Ok(RingRNS(rings))
    }

    /// Product of all channel primes.
    pub fn modulus(&self) -> BigUint {
        self.0
            .iter()
            .fold(BigUint::from(1u8), |acc, r| acc * r.modulus.q)
    }

    /// Splits coeffs into one residue channel per prime.
    pub fn from_bigint(&self, coeffs: &[BigInt]) -> PolyRNS<u64> {
        let mut a: PolyRNS<u64> = self.new_polyrns();
        self.0
            .par_iter()
            .zip(a.0.par_iter_mut())
            .for_each(|(ring, a)| ring.from_bigint(coeffs, a));
        a
    }

    /// Residues of x for each channel.
    pub fn reduce_bigint(&self, x: &BigInt) -> Vec<u64> {
        self.0.iter().map(|ring| ring.modulus.reduce_bigint(x)).collect()
    }
}

impl RingRNS<u64> {
    pub fn ntt_inplace<const LAZY: bool>(&self, a: &mut PolyRNS<u64>) {
        self.0
            .par_iter()
            .zip(a.0.par_iter_mut())
            .for_each(|(ring, a)| ring.ntt_inplace::<LAZY>(a));
    }

    pub fn intt_inplace<const LAZY: bool>(&self, a: &mut PolyRNS<u64>) {
        self.0
            .par_iter()
            .zip(a.0.par_iter_mut())
            .for_each(|(ring, a)| ring.intt_inplace::<LAZY>(a));
    }
}

impl RingRNS<u64> {
    #[inline(always)]
    pub fn add<const REDUCE: REDUCEMOD>(&self, a: &PolyRNS<u64>, b: &PolyRNS<u64>, c: &mut PolyRNS<u64>) {
        debug_assert!(a.level() >= self.level(), "a.level()={} < self.level()={}", a.level(), self.level());
        debug_assert!(b.level() >= self.level(), "b.level()={} < self.level()={}", b.level(), self.level());
        debug_assert!(c.level() >= self.level(), "c.level()={} < self.level()={}", c.level(), self.level());
        self.0
            .par_iter()
            .zip(a.0.par_iter().zip(b.0.par_iter()))
            .zip(c.0.par_iter_mut())
            .for_each(|((ring, (a, b)), c)| ring.add::<REDUCE>(a, b, c));
    }

    #[inline(always)]
    pub fn add_inplace<const REDUCE: REDUCEMOD>(&self, a: &PolyRNS<u64>, b: &mut PolyRNS<u64>) {
        debug_assert!(a.level() >= self.level(), "a.level()={} < self.level()={}", a.level(), self.level());
        debug_assert!(b.level() >= self.level(), "b.level()={} < self.level()={}", b.level(), self.level());
        self.0
            .par_iter()
            .zip(a.0.par_iter())
            .zip(b.0.par_iter_mut())
            .for_each(|((ring, a), b)| ring.add_inplace::<REDUCE>(a, b));
    }

    /// Adds the per-channel residues of a scalar to every slot.
    pub fn add_scalar_inplace<const REDUCE: REDUCEMOD>(&self, b: &[u64], a: &mut PolyRNS<u64>) {
        debug_assert!(b.len() == self.0.len(), "b.len()={} != channels={}", b.len(), self.0.len());
        self.0
            .par_iter()
            .zip(b.par_iter())
            .zip(a.0.par_iter_mut())
            .for_each(|((ring, b), a)| ring.add_scalar_inplace::<REDUCE>(b, a));
    }

    /// Adds the per-channel residues of a scalar to the constant slot.
    pub fn add_constant_inplace(&self, b: &[u64], a: &mut PolyRNS<u64>) {
        debug_assert!(b.len() == self.0.len(), "b.len()={} != channels={}", b.len(), self.0.len());
        self.0
            .iter()
            .zip(b)
            .zip(a.0.iter_mut())
            .for_each(|((ring, b), a)| ring.add_constant_inplace(b, a));
    }

    #[inline(always)]
    pub fn mul<const REDUCE: REDUCEMOD>(&self, a: &PolyRNS<u64>, b: &PolyRNS<u64>, c: &mut PolyRNS<u64>) {
        debug_assert!(a.level() >= self.level(), "a.level()={} < self.level()={}", a.level(), self.level());
        debug_assert!(b.level() >= self.level(), "b.level()={} < self.level()={}", b.level(), self.level());
        debug_assert!(c.level() >= self.level(), "c.level()={} < self.level()={}", c.level(), self.level());
        self.0
            .par_iter()
            .zip(a.0.par_iter().zip(b.0.par_iter()))
            .zip(c.0.par_iter_mut())
            .for_each(|((ring, (a, b)), c)| ring.mul::<REDUCE>(a, b, c));
    }

    #[inline(always)]
    pub fn mul_inplace<const REDUCE: REDUCEMOD>(&self, a: &PolyRNS<u64>, b: &mut PolyRNS<u64>) {
        debug_assert!(a.level() >= self.level(), "a.level()={} < self.level()={}", a.level(), self.level());
        debug_assert!(b.level() >= self.level(), "b.level()={} < self.level()={}", b.level(), self.level());
        self.0
            .par_iter()
            .zip(a.0.par_iter())
            .zip(b.0.par_iter_mut())
            .for_each(|((ring, a), b)| ring.mul_inplace::<REDUCE>(a, b));
    }

    /// Multiplies every slot by the per-channel residues of a scalar.
    pub fn mul_scalar_inplace<const REDUCE: REDUCEMOD>(&self, b: &[u64], a: &mut PolyRNS<u64>) {
        debug_assert!(b.len() == self.0.len(), "b.len()={} != channels={}", b.len(), self.0.len());
        self.0
            .par_iter()
            .zip(b.par_iter())
            .zip(a.0.par_iter_mut())
            .for_each(|((ring, b), a)| {
                let b_barrett = ring.modulus.barrett.prepare(*b);
                ring.mul_scalar_barrett_inplace::<REDUCE>(&b_barrett, a)
            });
    }
}
