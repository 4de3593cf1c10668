use crate::modulus::ReduceOnce;
use crate::modulus::barrett::BarrettPrecomp;
use crate::modulus::montgomery::{Montgomery, MontgomeryPrecomp};
use crate::modulus::{BARRETT, BARRETTLAZY, FOURTIMES, NONE, ONCE, REDUCEMOD, TWICE};

/// Montgomery arithmetic over u64 with radix 2^64.
impl MontgomeryPrecomp<u64> {
    /// Returns a new instance of MontgomeryPrecomp<u64> for an odd q.
    pub fn new(q: u64) -> MontgomeryPrecomp<u64> {
        debug_assert!(q & 1 != 0, "invalid argument: gcd(q={}, radix=2^64) != 1", q);
        // q^(2^63 - 1) = q^-1 mod 2^64.
        let mut q_inv: u64 = 1;
        let mut q_pow: u64 = q;
        for _ in 0..63 {
            q_inv = q_inv.wrapping_mul(q_pow);
            q_pow = q_pow.wrapping_mul(q_pow);
        }
        let mut precomp: MontgomeryPrecomp<u64> = Self {
            q,
            two_q: q << 1,
            four_q: q << 2,
            barrett: BarrettPrecomp::new(q),
            q_inv,
            one: 0,
            minus_one: 0,
        };

        precomp.one = precomp.prepare::<ONCE>(1);
        precomp.minus_one = q - precomp.one;

        precomp
    }

    /// Returns 2^64 mod q as a Montgomery<u64>.
    #[inline(always)]
    pub fn one(&self) -> Montgomery<u64> {
        self.one
    }

    /// Returns (q-1) * 2^64 mod q as a Montgomery<u64>.
    #[inline(always)]
    pub fn minus_one(&self) -> Montgomery<u64> {
        self.minus_one
    }

    #[inline(always)]
    pub fn reduce<const REDUCE: REDUCEMOD>(&self, x: u64) -> u64 {
        let mut r: u64 = x;
        self.reduce_assign::<REDUCE>(&mut r);
        r
    }

    #[inline(always)]
    pub fn reduce_assign<const REDUCE: REDUCEMOD>(&self, x: &mut u64) {
        match REDUCE {
            NONE => {}
            ONCE => x.reduce_once_assign(self.q),
            TWICE => x.reduce_once_assign(self.two_q),
            FOURTIMES => x.reduce_once_assign(self.four_q),
            BARRETT => self.barrett.reduce_assign::<BARRETT>(x),
            BARRETTLAZY => self.barrett.reduce_assign::<BARRETTLAZY>(x),
            _ => unreachable!("invalid REDUCE argument"),
        }
    }

    /// Returns lhs * 2^64 mod q as a Montgomery<u64>.
    #[inline(always)]
    pub fn prepare<const REDUCE: REDUCEMOD>(&self, lhs: u64) -> Montgomery<u64> {
        let mut rhs: u64 = 0;
        self.prepare_assign::<REDUCE>(lhs, &mut rhs);
        rhs
    }

    /// Assigns lhs * 2^64 mod q to rhs.
    #[inline(always)]
    pub fn prepare_assign<const REDUCE: REDUCEMOD>(&self, lhs: u64, rhs: &mut Montgomery<u64>) {
        *rhs = self.barrett.reduce_u128(((lhs % self.q) as u128) << 64);
        self.reduce_assign::<REDUCE>(rhs);
    }

    /// Returns lhs * (2^64)^-1 mod q as a u64.
    #[inline(always)]
    pub fn unprepare<const REDUCE: REDUCEMOD>(&self, lhs: Montgomery<u64>) -> u64 {
        self.mul_external::<REDUCE>(lhs, 1)
    }

    /// Returns lhs * rhs * (2^64)^-1 mod q.
    #[inline(always)]
    pub fn mul_external<const REDUCE: REDUCEMOD>(&self, lhs: Montgomery<u64>, rhs: u64) -> u64 {
        let mut r: u64 = rhs;
        self.mul_external_assign::<REDUCE>(lhs, &mut r);
        r
    }

    /// Assigns lhs * rhs * (2^64)^-1 mod q to rhs. Requires lhs < q;
    /// before reduction the value lies in [1, 2q-1].
    #[inline(always)]
    pub fn mul_external_assign<const REDUCE: REDUCEMOD>(&self, lhs: Montgomery<u64>, rhs: &mut u64) {
        let m: u128 = lhs as u128 * *rhs as u128;
        let (mlo, mhi) = (m as u64, (m >> 64) as u64);
        let hhi: u64 = ((self.q as u128 * mlo.wrapping_mul(self.q_inv) as u128) >> 64) as u64;
        *rhs = self.reduce::<REDUCE>(mhi.wrapping_sub(hhi).wrapping_add(self.q));
    }

    #[inline(always)]
    pub fn mul_internal<const REDUCE: REDUCEMOD>(
        &self,
        lhs: Montgomery<u64>,
        rhs: Montgomery<u64>,
    ) -> Montgomery<u64> {
        self.mul_external::<REDUCE>(lhs, rhs)
    }

    #[inline(always)]
    pub fn mul_internal_assign<const REDUCE: REDUCEMOD>(
        &self,
        lhs: Montgomery<u64>,
        rhs: &mut Montgomery<u64>,
    ) {
        self.mul_external_assign::<REDUCE>(lhs, rhs);
    }

    /// Returns (x^exponent) * 2^64 mod q.
    #[inline(always)]
    pub fn pow(&self, x: Montgomery<u64>, exponent: u64) -> Montgomery<u64> {
        let mut y: Montgomery<u64> = self.one();
        let mut x_mut: Montgomery<u64> = x;
        let mut i: u64 = exponent;
        while i > 0 {
            if i & 1 == 1 {
                self.mul_internal_assign::<ONCE>(x_mut, &mut y);
            }
            self.mul_internal_assign::<ONCE>(x_mut, &mut x_mut);
            i >>= 1;
        }
        y
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const Q: u64 = 0x1fffffffffe00001;

    #[test]
    fn mul_external() {
        let precomp: MontgomeryPrecomp<u64> = MontgomeryPrecomp::new(Q);
        let x: u64 = 0x5f876e514845cc8b;
        let y: u64 = 0xad726f98f24a761a;
        let y_mont: Montgomery<u64> = precomp.prepare::<ONCE>(y);
        assert_eq!(
            precomp.mul_external::<ONCE>(y_mont, x),
            (x as u128 * y as u128 % Q as u128) as u64
        );
    }

    #[test]
    fn prepare_unprepare() {
        let precomp: MontgomeryPrecomp<u64> = MontgomeryPrecomp::new(Q);
        for x in [0u64, 1, 2, Q - 1, 0x123456789abcdef] {
            let x_mont: Montgomery<u64> = precomp.prepare::<ONCE>(x);
            assert_eq!(precomp.unprepare::<ONCE>(x_mont), x);
        }
    }

    #[test]
    fn pow_small() {
        let precomp: MontgomeryPrecomp<u64> = MontgomeryPrecomp::new(Q);
        let three: Montgomery<u64> = precomp.prepare::<ONCE>(3);
        assert_eq!(precomp.unprepare::<ONCE>(precomp.pow(three, 5)), 243);
        assert_eq!(precomp.unprepare::<ONCE>(precomp.pow(three, 0)), 1);
    }
}
