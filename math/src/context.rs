use crate::crt::CrtParameters;
use crate::error::{MathError, Result};
use crate::modulus::big::BigModulus;
use crate::ring::RingRNS;
use std::sync::Arc;
use tracing::info;

/// Everything polynomials of one parameter set share: the cyclotomic degree
/// nphi, the big modulus Q, the CRT primes and the per-prime rings of
/// length 2 * nphi. Immutable once built; shared through `Arc`.
pub struct Context {
    nphi: usize,
    modulus: BigModulus,
    crt: CrtParameters,
    ring: RingRNS<u64>,
}

impl Context {
    pub fn new(modulus: BigModulus, nphi: usize) -> Result<Arc<Self>> {
        if nphi == 0 || !nphi.is_power_of_two() {
            return Err(MathError::InvalidDegree(nphi));
        }
        let crt: CrtParameters = CrtParameters::generate(modulus.q(), nphi)?;
        let ring: RingRNS<u64> = RingRNS::new(2 * nphi, crt.primes())?;
        info!(
            nphi,
            nq = modulus.nq(),
            channels = crt.primes().len(),
            "polynomial context ready"
        );
        Ok(Arc::new(Self {
            nphi,
            modulus,
            crt,
            ring,
        }))
    }

    /// Context over the Mersenne modulus 2^nq - 1.
    pub fn mersenne(nq: usize, nphi: usize) -> Result<Arc<Self>> {
        Self::new(BigModulus::mersenne(nq)?, nphi)
    }

    /// Degree of the cyclotomic modulus x^nphi - 1.
    pub fn nphi(&self) -> usize {
        self.nphi
    }

    /// Coefficient capacity of a polynomial: the transform length 2 * nphi.
    pub fn n(&self) -> usize {
        self.ring.n()
    }

    pub fn modulus(&self) -> &BigModulus {
        &self.modulus
    }

    pub fn crt(&self) -> &CrtParameters {
        &self.crt
    }

    pub fn ring(&self) -> &RingRNS<u64> {
        &self.ring
    }
}

impl PartialEq for Context {
    fn eq(&self, other: &Self) -> bool {
        self.nphi == other.nphi && self.modulus == other.modulus && self.crt == other.crt
    }
}

impl std::fmt::Debug for Context {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Context")
            .field("nphi", &self.nphi)
            .field("nq", &self.modulus.nq())
            .field("primes", &self.crt.moduli())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ring_length_is_twice_nphi() {
        let ctx: Arc<Context> = Context::mersenne(127, 32).unwrap();
        assert_eq!(ctx.nphi(), 32);
        assert_eq!(ctx.n(), 64);
        assert_eq!(ctx.ring().0.len(), ctx.crt().primes().len());
    }

    #[test]
    fn rejects_non_power_of_two() {
        assert_eq!(
            Context::mersenne(127, 12).unwrap_err(),
            MathError::InvalidDegree(12)
        );
    }

    #[test]
    fn structural_equality() {
        let a: Arc<Context> = Context::mersenne(61, 8).unwrap();
        let b: Arc<Context> = Context::mersenne(61, 8).unwrap();
        let c: Arc<Context> = Context::mersenne(61, 16).unwrap();
        assert_eq!(*a, *b);
        assert_ne!(*a, *c);
    }
}
