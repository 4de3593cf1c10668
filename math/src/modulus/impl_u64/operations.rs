use crate::modulus::barrett::Barrett;
use crate::modulus::prime::Prime;
use crate::modulus::{ONCE, REDUCEMOD};
use crate::modulus::{ScalarOperations, VectorOperations};
use crate::{apply_sv, apply_vv, apply_vvv};
use itertools::izip;

impl ScalarOperations<u64> for Prime<u64> {
    /// Applies a modular reduction on x based on REDUCE:
    /// - NONE: no modular reduction.
    /// - ONCE: subtracts q if x >= q.
    /// - TWICE: subtracts 2q if x >= 2q.
    /// - FOURTIMES: subtracts 4q if x >= 4q.
    /// - BARRETT: maps x to x mod q using Barrett reduction.
    /// - BARRETTLAZY: maps x to [0, 2q-1] using Barrett reduction.
    #[inline(always)]
    fn sa_reduce_into_sa<const REDUCE: REDUCEMOD>(&self, a: &mut u64) {
        self.barrett.reduce_assign::<REDUCE>(a);
    }

    #[inline(always)]
    fn sa_add_sb_into_sc<const REDUCE: REDUCEMOD>(&self, a: &u64, b: &u64, c: &mut u64) {
        *c = a.wrapping_add(*b);
        self.sa_reduce_into_sa::<REDUCE>(c);
    }

    #[inline(always)]
    fn sa_add_sb_into_sb<const REDUCE: REDUCEMOD>(&self, a: &u64, b: &mut u64) {
        *b = a.wrapping_add(*b);
        self.sa_reduce_into_sa::<REDUCE>(b);
    }

    /// Two Montgomery steps: a * b * 2^-64, then * 2^128 * 2^-64.
    #[inline(always)]
    fn sa_mul_sb_into_sc<const REDUCE: REDUCEMOD>(&self, a: &u64, b: &u64, c: &mut u64) {
        *c = *b;
        self.sa_mul_sb_into_sb::<REDUCE>(a, c);
    }

    #[inline(always)]
    fn sa_mul_sb_into_sb<const REDUCE: REDUCEMOD>(&self, a: &u64, b: &mut u64) {
        debug_assert!(*a < self.q, "a:{} >= q:{}", a, self.q);
        self.montgomery.mul_external_assign::<ONCE>(*a, b);
        self.montgomery.mul_external_assign::<REDUCE>(self.r2, b);
    }

    #[inline(always)]
    fn sa_barrett_mul_sb_into_sb<const REDUCE: REDUCEMOD>(&self, a: &Barrett<u64>, b: &mut u64) {
        self.barrett.mul_external_assign::<REDUCE>(*a, b);
    }
}

impl VectorOperations<u64> for Prime<u64> {
    #[inline(always)]
    fn va_add_vb_into_vc<const CHUNK: usize, const REDUCE: REDUCEMOD>(
        &self,
        a: &[u64],
        b: &[u64],
        c: &mut [u64],
    ) {
        apply_vvv!(self, Self::sa_add_sb_into_sc::<REDUCE>, a, b, c, CHUNK);
    }

    #[inline(always)]
    fn va_add_vb_into_vb<const CHUNK: usize, const REDUCE: REDUCEMOD>(&self, a: &[u64], b: &mut [u64]) {
        apply_vv!(self, Self::sa_add_sb_into_sb::<REDUCE>, a, b, CHUNK);
    }

    #[inline(always)]
    fn sa_add_vb_into_vb<const CHUNK: usize, const REDUCE: REDUCEMOD>(&self, a: &u64, b: &mut [u64]) {
        apply_sv!(self, Self::sa_add_sb_into_sb::<REDUCE>, a, b, CHUNK);
    }

    #[inline(always)]
    fn va_mul_vb_into_vc<const CHUNK: usize, const REDUCE: REDUCEMOD>(
        &self,
        a: &[u64],
        b: &[u64],
        c: &mut [u64],
    ) {
        apply_vvv!(self, Self::sa_mul_sb_into_sc::<REDUCE>, a, b, c, CHUNK);
    }

    #[inline(always)]
    fn va_mul_vb_into_vb<const CHUNK: usize, const REDUCE: REDUCEMOD>(&self, a: &[u64], b: &mut [u64]) {
        apply_vv!(self, Self::sa_mul_sb_into_sb::<REDUCE>, a, b, CHUNK);
    }

    #[inline(always)]
    fn sa_barrett_mul_vb_into_vb<const CHUNK: usize, const REDUCE: REDUCEMOD>(
        &self,
        a: &Barrett<u64>,
        b: &mut [u64],
    ) {
        apply_sv!(self, Self::sa_barrett_mul_sb_into_sb::<REDUCE>, a, b, CHUNK);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::CHUNK;

    const Q: u64 = 0x0fffffffffe00001;

    #[test]
    fn vector_mul_matches_u128() {
        let prime: Prime<u64> = Prime::new_unchecked(Q);
        let q: u64 = prime.q;
        let a: Vec<u64> = (0..19u64).map(|i| i.wrapping_mul(0x9e3779b97f4a7c15) % q).collect();
        let b: Vec<u64> = (0..19u64).map(|i| i.wrapping_mul(0x2545f4914f6cdd1d) % q + 3).collect();
        let mut c: Vec<u64> = vec![0; 19];
        prime.va_mul_vb_into_vc::<CHUNK, ONCE>(&a, &b, &mut c);
        izip!(&a, &b, &c).for_each(|(a, b, c)| {
            assert_eq!(*c, (*a as u128 * *b as u128 % q as u128) as u64)
        });
    }

    #[test]
    fn vector_add_and_scalar_ops() {
        let prime: Prime<u64> = Prime::new_unchecked(Q);
        let a: Vec<u64> = vec![Q - 1; 11];
        let mut b: Vec<u64> = vec![2; 11];
        prime.va_add_vb_into_vb::<CHUNK, ONCE>(&a, &mut b);
        assert!(b.iter().all(|x| *x == 1));
        prime.sa_add_vb_into_vb::<CHUNK, ONCE>(&(Q - 1), &mut b);
        assert!(b.iter().all(|x| *x == 0));
        let mut c: Vec<u64> = vec![5; 11];
        prime.sa_barrett_mul_vb_into_vb::<CHUNK, ONCE>(&prime.barrett.prepare(7), &mut c);
        assert!(c.iter().all(|x| *x == 35));
    }
}
