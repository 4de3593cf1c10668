//! Inversion modulo (x^nphi - 1, p) by the extended Euclidean algorithm
//! over F_p[x].

use super::{Data, Polynomial};
use super::reduction::cyclotomic_fold;
use crate::error::{MathError, Result};
use num_bigint::BigInt;
use num_integer::Integer;
use num_traits::{One, Zero};
use prime_factorization::Factorization;
use tracing::trace;

type Coeffs = Vec<BigInt>;

fn trim(a: &mut Coeffs) {
    while a.last().is_some_and(|c| c.is_zero()) {
        a.pop();
    }
}

fn divrem(a: &[BigInt], b: &[BigInt], p: &BigInt) -> Result<(Coeffs, Coeffs)> {
    let lead: &BigInt = b.last().ok_or(MathError::NotInvertible {
        modulus: p.to_string(),
    })?;
    let lead_inv: BigInt = lead.modinv(p).ok_or(MathError::NotInvertible {
        modulus: p.to_string(),
    })?;
    let mut r: Coeffs = a.to_vec();
    trim(&mut r);
    let mut q: Coeffs = vec![BigInt::zero(); (r.len() + 1).saturating_sub(b.len())];
    while r.len() >= b.len() {
        let shift: usize = r.len() - b.len();
        let coef: BigInt = (&r[r.len() - 1] * &lead_inv).mod_floor(p);
        b.iter().enumerate().for_each(|(i, bi)| {
            r[shift + i] = (&r[shift + i] - &coef * bi).mod_floor(p);
        });
        q[shift] = coef;
        trim(&mut r);
    }
    trim(&mut q);
    Ok((q, r))
}

fn mul(a: &[BigInt], b: &[BigInt], p: &BigInt) -> Coeffs {
    if a.is_empty() || b.is_empty() {
        return Vec::new();
    }
    let mut c: Coeffs = vec![BigInt::zero(); a.len() + b.len() - 1];
    for (i, ai) in a.iter().enumerate() {
        for (j, bj) in b.iter().enumerate() {
            c[i + j] += ai * bj;
        }
    }
    c.iter_mut().for_each(|x| *x = x.mod_floor(p));
    trim(&mut c);
    c
}

fn sub(a: &[BigInt], b: &[BigInt], p: &BigInt) -> Coeffs {
    let zero: BigInt = BigInt::zero();
    let mut c: Coeffs = (0..a.len().max(b.len()))
        .map(|i| (a.get(i).unwrap_or(&zero) - b.get(i).unwrap_or(&zero)).mod_floor(p))
        .collect();
    trim(&mut c);
    c
}

/// Returns u of degree < nphi with coeffs * u = 1 mod (x^nphi - 1, p) for a
/// prime p, coefficients in [0, p).
pub fn poly_invmod(coeffs: &[BigInt], nphi: usize, p: &BigInt) -> Result<Vec<BigInt>> {
    let not_invertible = || MathError::NotInvertible {
        modulus: p.to_string(),
    };

    let mut r0: Coeffs = vec![BigInt::zero(); nphi + 1];
    r0[0] = (p - 1u8).mod_floor(p);
    r0[nphi] = BigInt::one();
    trim(&mut r0);

    let mut r1: Coeffs = cyclotomic_fold(coeffs, nphi)?
        .iter()
        .map(|c| c.mod_floor(p))
        .collect();
    trim(&mut r1);

    // s_i * a = r_i mod x^nphi - 1
    let mut s0: Coeffs = Vec::new();
    let mut s1: Coeffs = vec![BigInt::one()];

    while !r1.is_empty() {
        let (q, r) = divrem(&r0, &r1, p)?;
        let s: Coeffs = sub(&s0, &mul(&q, &s1, p), p);
        r0 = std::mem::replace(&mut r1, r);
        s0 = std::mem::replace(&mut s1, s);
    }

    if r0.len() != 1 {
        return Err(not_invertible());
    }
    let scale: BigInt = r0[0].modinv(p).ok_or_else(not_invertible)?;
    let mut inv: Coeffs = s0.iter().map(|c| (c * &scale).mod_floor(p)).collect();
    inv.resize(nphi, BigInt::zero());
    Ok(inv)
}

/// Distinct prime factors of t, in increasing order.
pub(crate) fn prime_factors(t: u64) -> Vec<u64> {
    Factorization::run(t)
        .prime_factor_repr()
        .into_iter()
        .map(|(p, _)| p)
        .collect()
}

impl Polynomial {
    /// Inverse modulo (x^nphi - 1, Q), in [State::Coefficient] with
    /// coefficients in [0, Q).
    pub fn invmod(&self) -> Result<Polynomial> {
        let coeffs: &[BigInt] = self.coefficient_slice("invmod")?;
        let mut inv: Vec<BigInt> = poly_invmod(
            coeffs,
            self.context.nphi(),
            self.context.modulus().q_signed(),
        )?;
        inv.resize(self.context.n(), BigInt::zero());
        Ok(Polynomial {
            context: self.context.clone(),
            data: Data::Coefficient(inv),
            span: 0,
        })
    }

    /// Whether an inverse modulo (x^nphi - 1, t) exists, i.e. one exists
    /// modulo every prime factor of t.
    pub fn is_invertible_mod(&self, t: u64) -> Result<bool> {
        if t < 2 {
            return Err(MathError::InvalidModulus(format!("t={} must be at least 2", t)));
        }
        let coeffs: &[BigInt] = self.coefficient_slice("is_invertible_mod")?;
        for p in prime_factors(t) {
            match poly_invmod(coeffs, self.context.nphi(), &BigInt::from(p)) {
                Ok(_) => {}
                Err(MathError::NotInvertible { .. }) => {
                    trace!(t, p, "not invertible");
                    return Ok(false);
                }
                Err(e) => return Err(e),
            }
        }
        Ok(true)
    }
}
