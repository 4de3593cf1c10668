use crate::error::{MathError, Result};
use num_bigint::{BigInt, BigUint, Sign};
use num_traits::{One, Zero};

/// A big prime modulus Q of nq bits with its Barrett reciprocal
/// floor(2^(2nq) / Q).
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BigModulus {
    q: BigUint,
    q_signed: BigInt,
    nq: usize,
    reciprocal: BigUint,
    mask: BigUint,
}

impl BigModulus {
    pub fn new(q: BigUint) -> Result<Self> {
        if q < BigUint::from(3u8) {
            return Err(MathError::InvalidModulus(format!("Q={} is too small", q)));
        }
        let nq: usize = q.bits() as usize;
        let reciprocal: BigUint = Self::compute_reciprocal(&q);
        Ok(Self::from_parts(q, nq, reciprocal))
    }

    /// Returns the Mersenne modulus 2^nq - 1.
    pub fn mersenne(nq: usize) -> Result<Self> {
        Self::new((BigUint::one() << nq) - 1u8)
    }

    /// Builds the modulus from an externally computed reciprocal, which must
    /// equal floor(2^(2nq) / Q) and thus have nq + 1 bits.
    pub fn with_reciprocal(q: BigUint, reciprocal: BigUint) -> Result<Self> {
        let modulus: BigModulus = Self::new(q)?;
        let expected: u64 = modulus.nq as u64 + 1;
        if reciprocal.bits() != expected {
            return Err(MathError::ReciprocalMismatch {
                nq: modulus.nq,
                expected,
                found: reciprocal.bits(),
            });
        }
        if reciprocal != modulus.reciprocal {
            return Err(MathError::InvalidModulus(format!(
                "reciprocal {} is not floor(2^{}/Q)",
                reciprocal,
                2 * modulus.nq
            )));
        }
        Ok(modulus)
    }

    /// floor(2^(2 * bits(q)) / q).
    pub fn compute_reciprocal(q: &BigUint) -> BigUint {
        (BigUint::one() << (2 * q.bits() as usize)) / q
    }

    fn from_parts(q: BigUint, nq: usize, reciprocal: BigUint) -> Self {
        Self {
            q_signed: BigInt::from(q.clone()),
            q,
            nq,
            reciprocal,
            mask: (BigUint::one() << nq) - 1u8,
        }
    }

    pub fn q(&self) -> &BigUint {
        &self.q
    }

    pub fn q_signed(&self) -> &BigInt {
        &self.q_signed
    }

    pub fn nq(&self) -> usize {
        self.nq
    }

    pub fn reciprocal(&self) -> &BigUint {
        &self.reciprocal
    }

    /// Returns x mod Q. Inputs wider than 2nq bits are folded nq bits at a
    /// time: x = hi * 2^nq + lo = (hi mod Q) * 2^nq + lo.
    pub fn reduce(&self, x: &BigUint) -> BigUint {
        if x.bits() as usize > 2 * self.nq {
            let hi: BigUint = self.reduce(&(x >> self.nq));
            let lo: BigUint = x & &self.mask;
            return self.barrett((hi << self.nq) | lo);
        }
        self.barrett(x.clone())
    }

    /// Barrett reduction for x < 2^(2nq): at most two final subtractions.
    fn barrett(&self, x: BigUint) -> BigUint {
        debug_assert!(x.bits() as usize <= 2 * self.nq);
        let q_hat: BigUint = ((&x >> (self.nq - 1)) * &self.reciprocal) >> (self.nq + 1);
        let mut r: BigUint = x - q_hat * &self.q;
        while r >= self.q {
            r -= &self.q;
        }
        r
    }

    /// Returns x mod Q in [0, Q-1] for any signed x.
    pub fn reduce_signed(&self, x: &BigInt) -> BigInt {
        let r: BigUint = self.reduce(x.magnitude());
        if x.sign() == Sign::Minus && !r.is_zero() {
            BigInt::from(&self.q - r)
        } else {
            BigInt::from(r)
        }
    }

    /// Returns x mod Q in [-(Q-1)/2, (Q-1)/2].
    pub fn center(&self, x: &BigInt) -> BigInt {
        let r: BigInt = self.reduce_signed(x);
        if r > (&self.q_signed >> 1usize) {
            r - &self.q_signed
        } else {
            r
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use num_integer::Integer;
    use proptest::prelude::*;

    fn q127() -> BigModulus {
        BigModulus::mersenne(127).unwrap()
    }

    #[test]
    fn reciprocal_width() {
        let modulus: BigModulus = q127();
        assert_eq!(modulus.nq(), 127);
        assert_eq!(modulus.reciprocal().bits(), 128);
    }

    #[test]
    fn with_reciprocal_checks_width_and_value() {
        let q: BigUint = (BigUint::one() << 127usize) - 1u8;
        let good: BigUint = BigModulus::compute_reciprocal(&q);
        assert!(BigModulus::with_reciprocal(q.clone(), good.clone()).is_ok());
        assert!(matches!(
            BigModulus::with_reciprocal(q.clone(), &good >> 1usize),
            Err(MathError::ReciprocalMismatch { nq: 127, expected: 128, found: 127 })
        ));
        assert!(matches!(
            BigModulus::with_reciprocal(q, good + 1u8),
            Err(MathError::InvalidModulus(_))
        ));
    }

    #[test]
    fn reduce_edges() {
        let modulus: BigModulus = q127();
        let q: &BigUint = modulus.q();
        assert!(modulus.reduce(&BigUint::zero()).is_zero());
        assert!(modulus.reduce(q).is_zero());
        assert_eq!(modulus.reduce(&(q - 1u8)), q - 1u8);
        assert_eq!(modulus.reduce(&(q * q - 1u8)), q - 1u8);
        let wide: BigUint = BigUint::one() << 1000usize;
        assert_eq!(modulus.reduce(&wide), &wide % q);
    }

    #[test]
    fn center_and_signed() {
        let modulus: BigModulus = q127();
        let q: &BigInt = modulus.q_signed();
        assert_eq!(modulus.reduce_signed(&BigInt::from(-1)), q - 1);
        assert_eq!(modulus.center(&(q - 1)), BigInt::from(-1));
        assert_eq!(modulus.center(&(q >> 1usize)), q >> 1usize);
        assert_eq!(modulus.center(&((q >> 1usize) + 1)), -(q >> 1usize));
    }

    proptest! {
        #[test]
        fn reduce_matches_mod_floor(digits in proptest::collection::vec(any::<u32>(), 0..24), negative in any::<bool>()) {
            let modulus: BigModulus = q127();
            let mut x: BigInt = BigInt::from(BigUint::new(digits));
            if negative {
                x = -x;
            }
            prop_assert_eq!(modulus.reduce_signed(&x), x.mod_floor(modulus.q_signed()));
        }

        #[test]
        fn reduce_small_odd_modulus(x in any::<u64>(), q in 3u64..1 << 40) {
            let modulus: BigModulus = BigModulus::new(BigUint::from(q | 1)).unwrap();
            prop_assert_eq!(modulus.reduce(&BigUint::from(x)), BigUint::from(x % (q | 1)));
        }
    }
}
