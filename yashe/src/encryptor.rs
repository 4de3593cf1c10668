use crate::ciphertext::Ciphertext;
use crate::error::{Result, YasheError};
use crate::keys::PublicKey;
use crate::parameters::Parameters;
use crate::plaintext::Plaintext;
use crate::utils::mul_reduce;
use math::Polynomial;
use sampling::{Source, new_seed};

/// Public-key encryptor: c = [Delta * m + e + h * s]_Q with e and s from
/// the error distribution.
pub struct Encryptor {
    params: Parameters,
    h: Polynomial,
    source_s: Source,
    source_xe: Source,
}

impl Encryptor {
    pub fn new(params: &Parameters, pk: &PublicKey) -> Self {
        Self {
            params: params.clone(),
            h: pk.prepare(),
            source_s: Source::new(new_seed()),
            source_xe: Source::new(new_seed()),
        }
    }

    pub fn seed_source_s(&mut self, seed: [u8; 32]) {
        self.source_s = Source::new(seed)
    }

    pub fn seed_source_xe(&mut self, seed: [u8; 32]) {
        self.source_xe = Source::new(seed)
    }

    pub fn encrypt(&mut self, pt: &Plaintext) -> Result<Ciphertext> {
        if pt.t() != self.params.t() {
            return Err(YasheError::InvalidPlaintext(format!(
                "plaintext modulus {} != t={}",
                pt.t(),
                self.params.t()
            )));
        }

        let context = self.params.context();
        let s: Polynomial = Polynomial::sample(
            context,
            &mut self.source_s,
            self.params.xe(),
            self.params.xe_bound(),
            self.params.nphi(),
        )?;
        let e: Polynomial = Polynomial::sample(
            context,
            &mut self.source_xe,
            self.params.xe(),
            self.params.xe_bound(),
            self.params.nphi(),
        )?;

        let mut c: Polynomial = pt.scaled(context, self.params.delta())?;
        c.add_inplace(&e)?;
        c.add_inplace(&mul_reduce(&s, &self.h)?)?;
        c.reduce()?;
        Ok(Ciphertext { c, depth: 0 })
    }

    pub fn encrypt_integer(&mut self, m: u64) -> Result<Ciphertext> {
        let pt: Plaintext = Plaintext::from_integer(&self.params, m)?;
        self.encrypt(&pt)
    }
}
