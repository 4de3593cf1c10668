use crate::error::{MathError, Result};
use crate::modulus::prime::{NTTFriendlyPrimesGenerator, Prime};
use crate::poly::PolyRNS;
use itertools::izip;
use num_bigint::{BigInt, BigUint};
use num_traits::{One, ToPrimitive, Zero};
use rayon::prelude::*;
use tracing::debug;

/// Bit size of the CRT primes.
pub const PRIME_BIT_SIZE: u64 = 60;

/// Word-sized NTT-friendly primes whose product M bounds every intermediate
/// coefficient, with the constants of CRT reconstruction.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CrtParameters {
    primes: Vec<Prime<u64>>,
    product: BigUint,
    half_product: BigUint,
    /// M / p_i.
    punctured: Vec<BigUint>,
    /// (M / p_i)^-1 mod p_i.
    inverses: Vec<u64>,
}

impl CrtParameters {
    /// Number of bits M must exceed for products of two polynomials of
    /// `degree` coefficients bounded by q: 2 log2(q) for the coefficient
    /// product, log2(2 degree) for the summation, and two bits for sign and
    /// accumulation headroom.
    pub fn bound_bits(q: &BigUint, degree: usize) -> u64 {
        2 * q.bits() + (2 * degree as u64).trailing_zeros() as u64 + 2
    }

    /// Selects primes p = 1 mod 4 * degree (transform length 2 * degree)
    /// until their product exceeds 2^bound_bits(q, degree).
    pub fn generate(q: &BigUint, degree: usize) -> Result<Self> {
        if degree == 0 || !degree.is_power_of_two() {
            return Err(MathError::InvalidDegree(degree));
        }

        let bound: u64 = Self::bound_bits(q, degree);
        let nth_root: u64 = 4 * degree as u64;
        let mut generator: NTTFriendlyPrimesGenerator<u64> =
            NTTFriendlyPrimesGenerator::new(PRIME_BIT_SIZE, nth_root);

        let mut primes: Vec<Prime<u64>> = Vec::new();
        let mut product: BigUint = BigUint::one();
        while product.bits() <= bound {
            let prime: Prime<u64> = generator.next_alternating_prime()?;
            product *= prime.q;
            primes.push(prime);
        }

        debug!(
            q_bits = q.bits(),
            degree,
            bound,
            primes = primes.len(),
            product_bits = product.bits(),
            "generated crt primes"
        );

        Self::from_primes(primes)
    }

    /// Builds the reconstruction constants of pairwise distinct primes.
    pub fn from_primes(primes: Vec<Prime<u64>>) -> Result<Self> {
        if primes.is_empty() {
            return Err(MathError::InvalidModulus("empty prime list".to_string()));
        }
        for (i, p) in primes.iter().enumerate() {
            if primes[..i].iter().any(|other| other.q == p.q) {
                return Err(MathError::InvalidModulus(format!("duplicate prime {}", p.q)));
            }
        }

        let product: BigUint = primes
            .iter()
            .fold(BigUint::one(), |acc, p| acc * p.q);

        let punctured: Vec<BigUint> = primes.iter().map(|p| &product / p.q).collect();

        let inverses: Vec<u64> = izip!(&primes, &punctured)
            .map(|(p, m)| {
                let m_mod_p: u64 = (m % p.q).to_u64().unwrap_or_default();
                p.inv(m_mod_p)
            })
            .collect();

        Ok(Self {
            half_product: &product >> 1usize,
            product,
            primes,
            punctured,
            inverses,
        })
    }

    pub fn primes(&self) -> &[Prime<u64>] {
        &self.primes
    }

    pub fn moduli(&self) -> Vec<u64> {
        self.primes.iter().map(|p| p.q).collect()
    }

    /// M.
    pub fn product(&self) -> &BigUint {
        &self.product
    }

    pub fn punctured(&self) -> &[BigUint] {
        &self.punctured
    }

    pub fn inverses(&self) -> &[u64] {
        &self.inverses
    }

    /// Residues of x modulo every prime.
    pub fn split(&self, x: &BigInt) -> Vec<u64> {
        self.primes.iter().map(|p| p.reduce_bigint(x)).collect()
    }

    /// Recombines residues into the centered representative of x mod M in
    /// [-(M-1)/2, (M-1)/2].
    pub fn reconstruct(&self, residues: &[u64]) -> BigInt {
        debug_assert!(
            residues.len() == self.primes.len(),
            "residues.len()={} != primes={}",
            residues.len(),
            self.primes.len()
        );
        let sum: BigUint = izip!(residues, &self.primes, &self.inverses, &self.punctured).fold(
            BigUint::zero(),
            |acc, (r, p, inv, m)| acc + m * p.mul(*inv, *r),
        );
        let x: BigUint = sum % &self.product;
        if x > self.half_product {
            BigInt::from(x) - BigInt::from(self.product.clone())
        } else {
            BigInt::from(x)
        }
    }

    /// Reconstructs every coefficient of a residue polynomial.
    pub fn reconstruct_poly(&self, a: &PolyRNS<u64>) -> Vec<BigInt> {
        (0..a.n())
            .into_par_iter()
            .map(|i| self.reconstruct(&a.column(i)))
            .collect()
    }
}
