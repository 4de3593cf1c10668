//! YASHE somewhat-homomorphic encryption over Z_Q[x] / (x^nphi - 1) with a
//! Mersenne prime Q, built on the CRT/NTT polynomial engine of [math].

pub mod ciphertext;
pub mod decryptor;
pub mod encryptor;
pub mod error;
pub mod evaluator;
pub mod key_generator;
pub mod keys;
pub mod noise;
pub mod parameters;
pub mod plaintext;
mod utils;

pub use ciphertext::Ciphertext;
pub use decryptor::Decryptor;
pub use encryptor::Encryptor;
pub use error::{Result, YasheError};
pub use evaluator::Evaluator;
pub use key_generator::KeyGenerator;
pub use keys::{EvaluationKey, KeySet, PublicKey, SecretKey};
pub use noise::NoiseEstimator;
pub use parameters::{Parameters, ParametersLiteral};
pub use plaintext::Plaintext;

use sampling::Source;

/// A scheme instance: parameters, a freshly generated key set, and the
/// encryptor, decryptor and evaluator built from it.
pub struct Yashe {
    params: Parameters,
    keys: KeySet,
    encryptor: Encryptor,
    decryptor: Decryptor,
    evaluator: Evaluator,
}

impl Yashe {
    pub fn new(literal: &ParametersLiteral) -> Result<Self> {
        Self::with_source(literal, Source::from_entropy())
    }

    /// Deterministic instance: keys and encryption randomness derive from
    /// `seed`.
    pub fn with_seed(literal: &ParametersLiteral, seed: [u8; 32]) -> Result<Self> {
        Self::with_source(literal, Source::new(seed))
    }

    fn with_source(literal: &ParametersLiteral, mut source: Source) -> Result<Self> {
        let params: Parameters = Parameters::new(literal)?;
        let keys: KeySet = KeyGenerator {}.gen_keys(&params, &mut source)?;
        let mut encryptor: Encryptor = Encryptor::new(&params, &keys.pk);
        encryptor.seed_source_s(source.new_seed());
        encryptor.seed_source_xe(source.new_seed());
        let decryptor: Decryptor = Decryptor::new(&params, &keys.sk);
        let evaluator: Evaluator = Evaluator::new(&params, &keys.evk)?;
        Ok(Self {
            params,
            keys,
            encryptor,
            decryptor,
            evaluator,
        })
    }

    pub fn params(&self) -> &Parameters {
        &self.params
    }

    pub fn keys(&self) -> &KeySet {
        &self.keys
    }

    pub fn encrypt(&mut self, pt: &Plaintext) -> Result<Ciphertext> {
        self.encryptor.encrypt(pt)
    }

    pub fn encrypt_integer(&mut self, m: u64) -> Result<Ciphertext> {
        self.encryptor.encrypt_integer(m)
    }

    pub fn decrypt(&self, ct: &Ciphertext) -> Result<Plaintext> {
        self.decryptor.decrypt(ct)
    }

    pub fn decrypt_integer(&self, ct: &Ciphertext) -> Result<u64> {
        Ok(self.decryptor.decrypt(ct)?.value())
    }

    pub fn noise(&self, ct: &Ciphertext) -> Result<num_bigint::BigUint> {
        self.decryptor.noise(ct)
    }

    pub fn add(&self, a: &Ciphertext, b: &Ciphertext) -> Result<Ciphertext> {
        self.evaluator.add(a, b)
    }

    pub fn mul(&self, a: &Ciphertext, b: &Ciphertext) -> Result<Ciphertext> {
        self.evaluator.mul(a, b)
    }

    pub fn noise_estimator(&self) -> NoiseEstimator {
        NoiseEstimator::new(&self.params)
    }

    pub fn max_multiplicative_depth(&self) -> usize {
        self.noise_estimator().max_multiplicative_depth()
    }
}
