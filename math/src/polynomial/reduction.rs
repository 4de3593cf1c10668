//! Reduction modulo the cyclotomic x^nphi - 1 and modulo Q.

use super::{Data, Polynomial, State};
use crate::error::{MathError, Result};
use crate::modulus::big::BigModulus;
use num_bigint::BigInt;
use num_traits::Zero;
use rayon::prelude::*;

/// Folds coefficients modulo x^nphi - 1: x^(nphi + i) = x^i. Accepts at
/// most 2 * nphi coefficients and returns exactly nphi.
pub fn cyclotomic_fold(coeffs: &[BigInt], nphi: usize) -> Result<Vec<BigInt>> {
    if nphi == 0 || !nphi.is_power_of_two() {
        return Err(MathError::CyclotomicMismatch { nphi });
    }
    if coeffs.len() > 2 * nphi {
        return Err(MathError::DegreeOverflow {
            len: coeffs.len(),
            nphi,
        });
    }
    let mut out: Vec<BigInt> = vec![BigInt::zero(); nphi];
    out.iter_mut()
        .zip(coeffs)
        .for_each(|(o, c)| *o += c);
    out.iter_mut()
        .zip(coeffs.iter().skip(nphi))
        .for_each(|(o, c)| *o += c);
    Ok(out)
}

/// Folds modulo x^nphi - 1, then reduces every coefficient into [0, Q).
pub fn poly_reduce(coeffs: &[BigInt], nphi: usize, modulus: &BigModulus) -> Result<Vec<BigInt>> {
    let mut out: Vec<BigInt> = cyclotomic_fold(coeffs, nphi)?;
    out.par_iter_mut()
        .for_each(|c| *c = modulus.reduce_signed(c));
    Ok(out)
}

impl Polynomial {
    /// Folds modulo x^nphi - 1 without reducing the coefficients.
    pub fn fold(&mut self) -> Result<()> {
        let nphi: usize = self.context.nphi();
        let folded: Vec<BigInt> = cyclotomic_fold(self.coefficient_slice("fold")?, nphi)?;
        self.set_low_coefficients(folded);
        Ok(())
    }

    /// Reduces modulo (x^nphi - 1, Q): afterwards the degree is below nphi
    /// and every coefficient lies in [0, Q).
    pub fn reduce(&mut self) -> Result<()> {
        let nphi: usize = self.context.nphi();
        let reduced: Vec<BigInt> =
            poly_reduce(self.coefficient_slice("reduce")?, nphi, self.context.modulus())?;
        self.set_low_coefficients(reduced);
        Ok(())
    }

    /// Reduces, then maps every coefficient into [-(Q-1)/2, (Q-1)/2].
    pub fn center(&mut self) -> Result<()> {
        self.reduce()?;
        let modulus = self.context.modulus();
        if let Data::Coefficient(coeffs) = &mut self.data {
            coeffs.par_iter_mut().for_each(|c| *c = modulus.center(c));
        }
        Ok(())
    }

    pub(crate) fn coefficient_slice(&self, operation: &'static str) -> Result<&[BigInt]> {
        match &self.data {
            Data::Coefficient(coeffs) => Ok(coeffs),
            _ => Err(MathError::UnexpectedState {
                operation,
                expected: State::Coefficient,
                found: self.state(),
            }),
        }
    }

    fn set_low_coefficients(&mut self, mut low: Vec<BigInt>) {
        low.resize(self.context.n(), BigInt::zero());
        self.data = Data::Coefficient(low);
    }
}
