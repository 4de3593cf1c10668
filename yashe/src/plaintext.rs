use crate::error::{Result, YasheError};
use crate::parameters::Parameters;
use math::{Context, Polynomial};
use num_bigint::BigInt;
use std::fmt;
use std::sync::Arc;

/// A message in Z_t[x] / (x^nphi - 1): nphi coefficients in [0, t).
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Plaintext {
    t: u64,
    coeffs: Vec<u64>,
}

impl Plaintext {
    pub fn new(params: &Parameters, coeffs: &[u64]) -> Result<Self> {
        if coeffs.len() > params.nphi() {
            return Err(YasheError::InvalidPlaintext(format!(
                "{} coefficients > nphi={}",
                coeffs.len(),
                params.nphi()
            )));
        }
        if let Some(c) = coeffs.iter().find(|c| **c >= params.t()) {
            return Err(YasheError::InvalidPlaintext(format!(
                "coefficient {} not in [0, {})",
                c,
                params.t()
            )));
        }
        let mut coeffs: Vec<u64> = coeffs.to_vec();
        coeffs.resize(params.nphi(), 0);
        Ok(Self {
            t: params.t(),
            coeffs,
        })
    }

    /// The constant polynomial m.
    pub fn from_integer(params: &Parameters, m: u64) -> Result<Self> {
        Self::new(params, &[m])
    }

    pub(crate) fn from_reduced(t: u64, coeffs: Vec<u64>) -> Self {
        Self { t, coeffs }
    }

    pub fn t(&self) -> u64 {
        self.t
    }

    pub fn coeffs(&self) -> &[u64] {
        &self.coeffs
    }

    /// The constant coefficient.
    pub fn value(&self) -> u64 {
        self.coeffs.first().copied().unwrap_or(0)
    }

    /// Delta * m as a polynomial of the ring.
    pub(crate) fn scaled(&self, context: &Arc<Context>, delta: &BigInt) -> Result<Polynomial> {
        let coeffs: Vec<BigInt> = self.coeffs.iter().map(|c| delta * *c).collect();
        Ok(Polynomial::from_coefficients(context, coeffs)?)
    }
}

impl fmt::Display for Plaintext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let end: usize = self.coeffs.iter().rposition(|c| *c != 0).map_or(1, |d| d + 1);
        write!(f, "{:?} mod {}", &self.coeffs[..end.min(self.coeffs.len())], self.t)
    }
}
