use crate::ciphertext::Ciphertext;
use crate::error::{Result, YasheError};
use crate::keys::EvaluationKey;
use crate::parameters::Parameters;
use math::num_bigint::DivRound;
use math::{Polynomial, State};
use num_bigint::BigInt;
use num_traits::One;
use rayon::prelude::*;
use tracing::trace;

/// Homomorphic operations. Holds the evaluation key in the transform
/// domain.
pub struct Evaluator {
    params: Parameters,
    gamma: Vec<Polynomial>,
}

impl Evaluator {
    pub fn new(params: &Parameters, evk: &EvaluationKey) -> Result<Self> {
        if !evk.check(params) {
            return Err(YasheError::InvalidParameters(format!(
                "evaluation key has {} elements, expected ell={}",
                evk.gamma().len(),
                params.ell()
            )));
        }
        Ok(Self {
            params: params.clone(),
            gamma: evk.prepare(),
        })
    }

    /// [c1 + c2]_Q.
    pub fn add(&self, a: &Ciphertext, b: &Ciphertext) -> Result<Ciphertext> {
        a.check(&self.params)?;
        b.check(&self.params)?;
        let mut c: Polynomial = a.c.add(&b.c)?;
        c.reduce()?;
        Ok(Ciphertext {
            c,
            depth: a.depth.max(b.depth),
        })
    }

    /// Relinearized [round(t/Q * c1 * c2)]_Q.
    pub fn mul(&self, a: &Ciphertext, b: &Ciphertext) -> Result<Ciphertext> {
        a.check(&self.params)?;
        b.check(&self.params)?;

        let mut c1: Polynomial = a.c.clone();
        let mut c2: Polynomial = b.c.clone();
        c1.center()?;
        c2.center()?;
        c1.to_state(State::Transform);
        c2.to_state(State::Transform);

        // Integer tensor product folded mod x^nphi - 1, not reduced mod Q.
        let mut x: Polynomial = c1.mul(&c2)?;
        x.to_state(State::Coefficient);
        x.fold()?;

        let t: BigInt = BigInt::from(self.params.t());
        let q: &BigInt = self.params.context().modulus().q_signed();
        let scaled: Vec<BigInt> = x
            .into_coefficients()
            .par_iter()
            .map(|x| (&t * x).div_round(q))
            .collect();
        let mut c: Polynomial = Polynomial::from_coefficients(self.params.context(), scaled)?;
        c.reduce()?;

        Ok(Ciphertext {
            c: self.relinearize(&c)?,
            depth: a.depth.max(b.depth) + 1,
        })
    }

    /// [sum_i D_i(c) * gamma_i]_Q, where D_i(c) is the i-th base-w digit of
    /// the coefficients of c in [0, Q).
    pub fn relinearize(&self, c: &Polynomial) -> Result<Polynomial> {
        let log_w: usize = self.params.log_w();
        let mask: BigInt = (BigInt::one() << log_w) - 1u8;
        let coeffs: Vec<BigInt> = c.to_coefficients();

        let terms: Vec<Polynomial> = self
            .gamma
            .par_iter()
            .enumerate()
            .map(|(i, gamma)| {
                let digits: Vec<BigInt> = coeffs
                    .iter()
                    .map(|c| (c >> (i * log_w)) & &mask)
                    .collect();
                let mut d: Polynomial = Polynomial::from_coefficients(self.params.context(), digits)?;
                d.to_state(State::Transform);
                d.mul_inplace(gamma)?;
                Ok(d)
            })
            .collect::<math::Result<_>>()?;

        let mut acc: Polynomial = Polynomial::zero(self.params.context());
        acc.to_state(State::Transform);
        for term in &terms {
            acc.add_inplace(term)?;
        }
        acc.to_state(State::Coefficient);
        acc.reduce()?;
        trace!(ell = terms.len(), "relinearized");
        Ok(acc)
    }
}
