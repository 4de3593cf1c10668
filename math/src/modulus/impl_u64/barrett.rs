use crate::modulus::ReduceOnce;
use crate::modulus::barrett::{Barrett, BarrettPrecomp};
use crate::modulus::{BARRETT, BARRETTLAZY, FOURTIMES, NONE, ONCE, REDUCEMOD, TWICE};

impl BarrettPrecomp<u64> {
    /// Returns the precomputation for an odd modulus q > 1.
    pub fn new(q: u64) -> BarrettPrecomp<u64> {
        debug_assert!(q & 1 == 1 && q > 1, "invalid modulus q={}", q);
        // q odd, so floor((2^128 - 1) / q) == floor(2^128 / q).
        let big_r: u128 = u128::MAX / q as u128;
        let mut precomp: BarrettPrecomp<u64> = Self {
            q,
            two_q: q << 1,
            four_q: q << 2,
            lo: big_r as u64,
            hi: (big_r >> 64) as u64,
            one: Barrett(0, 0),
        };
        precomp.one = precomp.prepare(1);
        precomp
    }

    #[inline(always)]
    pub fn one(&self) -> Barrett<u64> {
        self.one
    }

    /// Applies a modular reduction on x based on REDUCE:
    /// - NONE: no modular reduction.
    /// - ONCE: subtracts q if x >= q.
    /// - TWICE: subtracts 2q if x >= 2q.
    /// - FOURTIMES: subtracts 4q if x >= 4q.
    /// - BARRETT: maps x to x mod q.
    /// - BARRETTLAZY: maps x to [0, 2q-1].
    #[inline(always)]
    pub fn reduce_assign<const REDUCE: REDUCEMOD>(&self, x: &mut u64) {
        match REDUCE {
            NONE => {}
            ONCE => x.reduce_once_assign(self.q),
            TWICE => x.reduce_once_assign(self.two_q),
            FOURTIMES => x.reduce_once_assign(self.four_q),
            BARRETT => {
                let mhi: u64 = ((*x as u128 * self.hi as u128) >> 64) as u64;
                *x -= mhi.wrapping_mul(self.q);
                x.reduce_once_assign(self.q);
            }
            BARRETTLAZY => {
                let mhi: u64 = ((*x as u128 * self.hi as u128) >> 64) as u64;
                *x -= mhi.wrapping_mul(self.q)
            }
            _ => unreachable!("invalid REDUCE argument"),
        }
    }

    #[inline(always)]
    pub fn reduce<const REDUCE: REDUCEMOD>(&self, x: &u64) -> u64 {
        let mut r: u64 = *x;
        self.reduce_assign::<REDUCE>(&mut r);
        r
    }

    /// Reduces a double-word x < q * 2^64 modulo q.
    #[inline(always)]
    pub fn reduce_u128(&self, x: u128) -> u64 {
        debug_assert!(x >> 64 < self.q as u128, "x >= q * 2^64");
        let (xlo, xhi) = (x as u64, (x >> 64) as u64);
        // floor(x * floor(2^128/q) / 2^128) with the partial product x_lo * lo dropped.
        let mid: u128 = ((xlo as u128 * self.lo as u128) >> 64)
            + (xhi as u128 * self.lo as u128 & u64::MAX as u128)
            + (xlo as u128 * self.hi as u128 & u64::MAX as u128);
        let quotient: u128 = (xhi as u128 * self.hi as u128)
            + ((xhi as u128 * self.lo as u128) >> 64)
            + ((xlo as u128 * self.hi as u128) >> 64)
            + (mid >> 64);
        let mut r: u64 = (x.wrapping_sub(quotient.wrapping_mul(self.q as u128))) as u64;
        r.reduce_once_assign(self.two_q);
        r.reduce_once_assign(self.q);
        r
    }

    /// Returns v prepared for multiplication: (v, floor(v * 2^64 / q)).
    #[inline(always)]
    pub fn prepare(&self, v: u64) -> Barrett<u64> {
        debug_assert!(v < self.q);
        let quotient: u64 = (((v as u128) << 64) / self.q as u128) as _;
        Barrett(v, quotient)
    }

    #[inline(always)]
    pub fn mul_external<const REDUCE: REDUCEMOD>(&self, lhs: Barrett<u64>, rhs: u64) -> u64 {
        let mut r: u64 = rhs;
        self.mul_external_assign::<REDUCE>(lhs, &mut r);
        r
    }

    /// Assigns lhs * rhs mod q to rhs; before reduction the value lies in [0, 2q-1].
    #[inline(always)]
    pub fn mul_external_assign<const REDUCE: REDUCEMOD>(&self, lhs: Barrett<u64>, rhs: &mut u64) {
        let t: u64 = ((*lhs.quotient() as u128 * *rhs as u128) >> 64) as _;
        *rhs = (rhs.wrapping_mul(*lhs.value())).wrapping_sub(self.q.wrapping_mul(t));
        self.reduce_assign::<REDUCE>(rhs);
    }
}
