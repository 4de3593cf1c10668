use crate::error::{MathError, Result};
use crate::modulus::barrett::BarrettPrecomp;
use crate::modulus::montgomery::{Montgomery, MontgomeryPrecomp};
use crate::modulus::prime::Prime;
use crate::modulus::{ONCE, ScalarOperations};
use num_bigint::{BigInt, Sign};
use primality_test::is_prime;

/// Largest supported bit size: lazy NTT butterflies keep values below 4q.
pub const MAX_PRIME_BITS: u32 = 61;

impl Prime<u64> {
    /// Returns a new instance of Prime<u64>.
    /// Fails if q is not a prime > 2 or does not fit in MAX_PRIME_BITS.
    pub fn new(q: u64) -> Result<Self> {
        if q <= 2 || !is_prime(q) {
            return Err(MathError::InvalidModulus(format!("{} is not an odd prime", q)));
        }
        if u64::BITS - q.leading_zeros() > MAX_PRIME_BITS {
            return Err(MathError::InvalidModulus(format!(
                "{} exceeds {} bits",
                q, MAX_PRIME_BITS
            )));
        }
        Ok(Self::new_unchecked(q))
    }

    /// Returns a new instance of Prime<u64>.
    /// Does not check that q is an odd prime of at most MAX_PRIME_BITS bits.
    pub fn new_unchecked(q: u64) -> Self {
        let montgomery: MontgomeryPrecomp<u64> = MontgomeryPrecomp::new(q);
        let r2: Montgomery<u64> = montgomery.prepare::<ONCE>(montgomery.one());
        Self {
            q,
            two_q: q << 1,
            four_q: q << 2,
            montgomery,
            barrett: BarrettPrecomp::new(q),
            r2,
            phi: q - 1,
        }
    }

    pub fn q(&self) -> u64 {
        self.q
    }

    /// Returns x * y mod q for x < q.
    #[inline(always)]
    pub fn mul(&self, x: u64, y: u64) -> u64 {
        let mut r: u64 = y;
        self.sa_mul_sb_into_sb::<ONCE>(&x, &mut r);
        r
    }

    /// Returns x^exponent mod q.
    #[inline(always)]
    pub fn pow(&self, x: u64, exponent: u64) -> u64 {
        let x_mont: Montgomery<u64> = self.montgomery.prepare::<ONCE>(x);
        self.montgomery
            .unprepare::<ONCE>(self.montgomery.pow(x_mont, exponent))
    }

    /// Returns x^-1 mod q.
    /// User must ensure that x is not divisible by q.
    #[inline(always)]
    pub fn inv(&self, x: u64) -> u64 {
        self.pow(x, self.phi - 1)
    }

    /// Returns x mod q in [0, q-1] for any signed x, folding its 64-bit
    /// digits from the most significant one.
    pub fn reduce_bigint(&self, x: &BigInt) -> u64 {
        let (sign, digits) = x.to_u64_digits();
        let r: u64 = digits.iter().rev().fold(0u64, |r, d| {
            self.barrett.reduce_u128(((r as u128) << 64) | *d as u128)
        });
        if sign == Sign::Minus && r != 0 {
            self.q - r
        } else {
            r
        }
    }

    /// Returns a primitive nth root of unity for a power-of-two nth_root
    /// dividing q-1.
    ///
    /// For a candidate c, g = c^((q-1)/nth_root) has order dividing nth_root,
    /// and the order is exactly nth_root iff g^(nth_root/2) = -1.
    pub fn primitive_nth_root(&self, nth_root: u64) -> Result<u64> {
        if nth_root < 2 || nth_root & (nth_root - 1) != 0 || self.phi % nth_root != 0 {
            return Err(MathError::InvalidModulus(format!(
                "q={} is not 1 mod nth_root={}",
                self.q, nth_root
            )));
        }

        let exponent: u64 = self.phi / nth_root;
        let minus_one: u64 = self.q - 1;

        (2..self.q)
            .map(|candidate| self.pow(candidate, exponent))
            .find(|psi| self.pow(*psi, nth_root >> 1) == minus_one)
            .ok_or_else(|| {
                MathError::InvalidModulus(format!(
                    "no primitive {}th root of unity mod {}",
                    nth_root, self.q
                ))
            })
    }
}
