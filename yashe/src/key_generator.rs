use crate::error::{Result, YasheError};
use crate::keys::{EvaluationKey, KeySet, PublicKey, SecretKey};
use crate::parameters::Parameters;
use crate::utils::{mul_reduce, prepare};
use math::{MathError, Polynomial};
use num_bigint::BigInt;
use num_traits::One;
use sampling::Source;
use tracing::{debug, warn};

/// Secret keys are resampled at most this many times.
pub const MAX_KEYGEN_ATTEMPTS: usize = 64;

pub struct KeyGenerator {}

impl KeyGenerator {
    /// Samples f = t * f' + 1 with f' from the key distribution until f is
    /// invertible modulo Q and modulo t.
    pub fn gen_secret_key(&self, params: &Parameters, source: &mut Source) -> Result<SecretKey> {
        let t: BigInt = BigInt::from(params.t());
        for attempt in 1..=MAX_KEYGEN_ATTEMPTS {
            let mut f: Polynomial = Polynomial::sample(
                params.context(),
                source,
                params.xs(),
                params.xs_bound(),
                params.nphi(),
            )?;
            f.biginteger_mul(&t);
            f.integer_add(1);

            match f.invmod() {
                Ok(f_inv) => {
                    if f.is_invertible_mod(params.t())? {
                        debug!(attempt, "generated secret key");
                        return Ok(SecretKey { f, f_inv });
                    }
                    warn!(attempt, t = params.t(), "secret key not invertible mod t, resampling");
                }
                Err(MathError::NotInvertible { .. }) => {
                    warn!(attempt, "secret key not invertible mod Q, resampling");
                }
                Err(e) => return Err(e.into()),
            }
        }
        Err(YasheError::KeyGeneration {
            attempts: MAX_KEYGEN_ATTEMPTS,
        })
    }

    /// h = [t * g * f^-1]_Q with g from the key distribution.
    pub fn gen_public_key(
        &self,
        params: &Parameters,
        sk: &SecretKey,
        source: &mut Source,
    ) -> Result<PublicKey> {
        let mut g: Polynomial = Polynomial::sample(
            params.context(),
            source,
            params.xs(),
            params.xs_bound(),
            params.nphi(),
        )?;
        g.biginteger_mul(&BigInt::from(params.t()));
        Ok(PublicKey(mul_reduce(&g, &sk.f_inv)?))
    }

    /// gamma_i = [f * w^i + e_i + h * s_i]_Q for i < ell, with e_i and s_i
    /// from the error distribution.
    pub fn gen_evaluation_key(
        &self,
        params: &Parameters,
        sk: &SecretKey,
        pk: &PublicKey,
        source: &mut Source,
    ) -> Result<EvaluationKey> {
        let h: Polynomial = prepare(&pk.0);
        let mut power: BigInt = BigInt::one();
        let mut gamma: Vec<Polynomial> = Vec::with_capacity(params.ell());
        for _ in 0..params.ell() {
            let e: Polynomial = self.sample_error(params, source)?;
            let s: Polynomial = self.sample_error(params, source)?;

            let mut gamma_i: Polynomial = sk.f.clone();
            gamma_i.biginteger_mul(&power);
            gamma_i.add_inplace(&e)?;
            gamma_i.add_inplace(&mul_reduce(&s, &h)?)?;
            gamma_i.reduce()?;
            gamma.push(gamma_i);

            power <<= params.log_w();
        }
        debug!(ell = params.ell(), "generated evaluation key");
        Ok(EvaluationKey(gamma))
    }

    pub fn gen_keys(&self, params: &Parameters, source: &mut Source) -> Result<KeySet> {
        let (_, mut source_xs) = source.branch();
        let (_, mut source_xe) = source.branch();
        let sk: SecretKey = self.gen_secret_key(params, &mut source_xs)?;
        let pk: PublicKey = self.gen_public_key(params, &sk, &mut source_xs)?;
        let evk: EvaluationKey = self.gen_evaluation_key(params, &sk, &pk, &mut source_xe)?;
        Ok(KeySet { sk, pk, evk })
    }

    fn sample_error(&self, params: &Parameters, source: &mut Source) -> Result<Polynomial> {
        Ok(Polynomial::sample(
            params.context(),
            source,
            params.xe(),
            params.xe_bound(),
            params.nphi(),
        )?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parameters::ParametersLiteral;
    use math::State;
    use num_integer::Integer;
    use num_traits::Signed;

    fn params() -> Parameters {
        Parameters::new(&ParametersLiteral::default()).unwrap()
    }

    #[test]
    fn secret_key_shape() {
        let params: Parameters = params();
        let mut source: Source = Source::new([3u8; 32]);
        let sk: SecretKey = KeyGenerator {}.gen_secret_key(&params, &mut source).unwrap();
        let t: BigInt = BigInt::from(params.t());
        for c in sk.f().to_coefficients() {
            assert!(c.abs() <= &t + 1u8);
        }
        let f: Vec<BigInt> = sk.f().to_coefficients();
        assert_eq!(f[0].mod_floor(&t), BigInt::one());
        assert!(f[1..].iter().all(|c| c.mod_floor(&t) == BigInt::from(0)));
        // f * f^-1 = 1
        let mut one: Polynomial = mul_reduce(sk.f(), sk.f_inv()).unwrap();
        assert_eq!(one.state(), State::Coefficient);
        assert_eq!(one.degree(), Some(0));
        assert_eq!(one.coeff(0).unwrap(), BigInt::one());
    }

    #[test]
    fn public_key_decrypts_to_multiple_of_t() {
        let params: Parameters = params();
        let mut source: Source = Source::new([4u8; 32]);
        let generator: KeyGenerator = KeyGenerator {};
        let sk: SecretKey = generator.gen_secret_key(&params, &mut source).unwrap();
        let pk: PublicKey = generator.gen_public_key(&params, &sk, &mut source).unwrap();
        // f * h = t * g
        let mut tg: Polynomial = mul_reduce(sk.f(), pk.h()).unwrap();
        tg.center().unwrap();
        let t: BigInt = BigInt::from(params.t());
        for c in tg.coefficients() {
            assert!(c.is_multiple_of(&t));
            assert!(c.abs() <= t);
        }
    }

    #[test]
    fn evaluation_key_length() {
        let params: Parameters = params();
        let mut source: Source = Source::new([5u8; 32]);
        let keys: KeySet = KeyGenerator {}.gen_keys(&params, &mut source).unwrap();
        assert_eq!(keys.evk.gamma().len(), params.ell());
        assert!(keys.evk.check(&params));
        let q: BigInt = BigInt::from(params.q().clone());
        for gamma in keys.evk.gamma() {
            assert!(gamma.to_coefficients().iter().all(|c| c.sign() != num_bigint::Sign::Minus && *c < q));
        }
    }

    #[test]
    fn same_seed_same_keys() {
        let params: Parameters = params();
        let a: KeySet = KeyGenerator {}.gen_keys(&params, &mut Source::new([6u8; 32])).unwrap();
        let b: KeySet = KeyGenerator {}.gen_keys(&params, &mut Source::new([6u8; 32])).unwrap();
        assert_eq!(a.pk, b.pk);
        assert_eq!(a.evk, b.evk);
    }
}
