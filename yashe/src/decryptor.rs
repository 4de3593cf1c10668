use crate::ciphertext::Ciphertext;
use crate::error::Result;
use crate::keys::SecretKey;
use crate::parameters::Parameters;
use crate::plaintext::Plaintext;
use crate::utils::mul_reduce;
use math::Polynomial;
use math::num_bigint::DivRound;
use num_bigint::{BigInt, BigUint};
use num_integer::Integer;
use num_traits::{Signed, ToPrimitive, Zero};
use rayon::prelude::*;

pub struct Decryptor {
    params: Parameters,
    f: Polynomial,
}

impl Decryptor {
    pub fn new(params: &Parameters, sk: &SecretKey) -> Self {
        Self {
            params: params.clone(),
            f: sk.prepare(),
        }
    }

    /// [f * c]_Q centered into (-Q/2, Q/2).
    fn phase(&self, ct: &Ciphertext) -> Result<Vec<BigInt>> {
        ct.check(&self.params)?;
        let mut x: Polynomial = mul_reduce(&ct.c, &self.f)?;
        x.center()?;
        let mut coeffs: Vec<BigInt> = x.into_coefficients();
        coeffs.truncate(self.params.nphi());
        Ok(coeffs)
    }

    /// m = [round(t * [f * c]_Q / Q)]_t.
    pub fn decrypt(&self, ct: &Ciphertext) -> Result<Plaintext> {
        let phase: Vec<BigInt> = self.phase(ct)?;
        let t: BigInt = BigInt::from(self.params.t());
        let q: BigInt = BigInt::from(self.params.q().clone());
        let coeffs: Vec<u64> = phase
            .par_iter()
            .map(|x| {
                (&t * x)
                    .div_round(&q)
                    .mod_floor(&t)
                    .to_u64()
                    .unwrap_or_default()
            })
            .collect();
        Ok(Plaintext::from_reduced(self.params.t(), coeffs))
    }

    /// Infinity norm of [f * c - Delta * m]_Q for the plaintext m that `ct`
    /// decrypts to. Decryption is correct while this stays below
    /// (Q - (Q mod t)) / (2t).
    pub fn noise(&self, ct: &Ciphertext) -> Result<BigUint> {
        let phase: Vec<BigInt> = self.phase(ct)?;
        let pt: Plaintext = self.decrypt(ct)?;
        let modulus = self.params.context().modulus();
        let delta: &BigInt = self.params.delta();
        Ok(phase
            .iter()
            .zip(pt.coeffs())
            .map(|(x, m)| modulus.center(&(x - delta * *m)).abs().magnitude().clone())
            .fold(BigUint::zero(), |acc, v| acc.max(v)))
    }
}
