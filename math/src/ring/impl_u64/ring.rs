use crate::dft::ntt::Table;
use crate::error::Result;
use crate::modulus::VectorOperations;
use crate::modulus::barrett::Barrett;
use crate::modulus::prime::Prime;
use crate::modulus::{ONCE, REDUCEMOD};
use crate::poly::Poly;
use crate::ring::Ring;
use crate::CHUNK;
use num_bigint::BigInt;

impl Ring<u64> {
    /// Returns the ring of length n over `prime`; q must be 1 mod 2n.
    pub fn new(n: usize, prime: Prime<u64>) -> Result<Self> {
        Ok(Self {
            n,
            modulus: prime,
            dft: Box::new(Table::<u64>::new(prime, (2 * n) as u64)?),
        })
    }

    /// Assigns coeffs mod q to a; missing coefficients are zero.
    pub fn from_bigint(&self, coeffs: &[BigInt], a: &mut Poly<u64>) {
        assert!(
            coeffs.len() <= a.n(),
            "invalid coeffs: coeffs.len()={} > a.n()={}",
            coeffs.len(),
            a.n()
        );
        a.zero();
        a.0.iter_mut()
            .zip(coeffs)
            .for_each(|(v, c)| *v = self.modulus.reduce_bigint(c));
    }
}

impl Ring<u64> {
    pub fn ntt_inplace<const LAZY: bool>(&self, poly: &mut Poly<u64>) {
        match LAZY {
            true => self.dft.forward_inplace_lazy(&mut poly.0),
            false => self.dft.forward_inplace(&mut poly.0),
        }
    }

    pub fn intt_inplace<const LAZY: bool>(&self, poly: &mut Poly<u64>) {
        match LAZY {
            true => self.dft.backward_inplace_lazy(&mut poly.0),
            false => self.dft.backward_inplace(&mut poly.0),
        }
    }
}

impl Ring<u64> {
    #[inline(always)]
    pub fn add_inplace<const REDUCE: REDUCEMOD>(&self, a: &Poly<u64>, b: &mut Poly<u64>) {
        debug_assert!(a.n() == self.n(), "a.n()={} != n={}", a.n(), self.n());
        debug_assert!(b.n() == self.n(), "b.n()={} != n={}", b.n(), self.n());
        self.modulus
            .va_add_vb_into_vb::<CHUNK, REDUCE>(&a.0, &mut b.0);
    }

    #[inline(always)]
    pub fn add<const REDUCE: REDUCEMOD>(&self, a: &Poly<u64>, b: &Poly<u64>, c: &mut Poly<u64>) {
        debug_assert!(a.n() == self.n(), "a.n()={} != n={}", a.n(), self.n());
        debug_assert!(b.n() == self.n(), "b.n()={} != n={}", b.n(), self.n());
        debug_assert!(c.n() == self.n(), "c.n()={} != n={}", c.n(), self.n());
        self.modulus
            .va_add_vb_into_vc::<CHUNK, REDUCE>(&a.0, &b.0, &mut c.0);
    }

    /// Adds b to every slot of a.
    #[inline(always)]
    pub fn add_scalar_inplace<const REDUCE: REDUCEMOD>(&self, b: &u64, a: &mut Poly<u64>) {
        debug_assert!(a.n() == self.n(), "a.n()={} != n={}", a.n(), self.n());
        self.modulus.sa_add_vb_into_vb::<CHUNK, REDUCE>(b, &mut a.0);
    }

    /// Adds b to the constant slot of a.
    #[inline(always)]
    pub fn add_constant_inplace(&self, b: &u64, a: &mut Poly<u64>) {
        debug_assert!(a.n() == self.n(), "a.n()={} != n={}", a.n(), self.n());
        a.0[0] = a.0[0].wrapping_add(*b);
        self.modulus.barrett.reduce_assign::<ONCE>(&mut a.0[0]);
    }

    /// Pointwise product c = a * b; inputs in [0, q-1].
    #[inline(always)]
    pub fn mul<const REDUCE: REDUCEMOD>(&self, a: &Poly<u64>, b: &Poly<u64>, c: &mut Poly<u64>) {
        debug_assert!(a.n() == self.n(), "a.n()={} != n={}", a.n(), self.n());
        debug_assert!(b.n() == self.n(), "b.n()={} != n={}", b.n(), self.n());
        debug_assert!(c.n() == self.n(), "c.n()={} != n={}", c.n(), self.n());
        self.modulus
            .va_mul_vb_into_vc::<CHUNK, REDUCE>(&a.0, &b.0, &mut c.0);
    }

    #[inline(always)]
    pub fn mul_inplace<const REDUCE: REDUCEMOD>(&self, a: &Poly<u64>, b: &mut Poly<u64>) {
        debug_assert!(a.n() == self.n(), "a.n()={} != n={}", a.n(), self.n());
        debug_assert!(b.n() == self.n(), "b.n()={} != n={}", b.n(), self.n());
        self.modulus
            .va_mul_vb_into_vb::<CHUNK, REDUCE>(&a.0, &mut b.0);
    }

    #[inline(always)]
    pub fn mul_scalar_barrett_inplace<const REDUCE: REDUCEMOD>(
        &self,
        b: &Barrett<u64>,
        a: &mut Poly<u64>,
    ) {
        debug_assert!(a.n() == self.n(), "a.n()={} != n={}", a.n(), self.n());
        self.modulus
            .sa_barrett_mul_vb_into_vb::<CHUNK, REDUCE>(b, &mut a.0);
    }
}
