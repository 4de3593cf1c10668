//! Worst-case noise bounds in the infinity norm.
//!
//! The noise of a ciphertext c encrypting m is v = [f * c]_Q - Delta * [m]_t.
//! Decryption returns m as long as ||v|| < (Q - r_t) / (2t) where
//! r_t = Q mod t. All bounds below are deterministic given the supports of
//! the key and error distributions.

use crate::parameters::Parameters;
use num_bigint::BigUint;
use num_traits::One;

/// Upper bound on the number of chained squarings explored by
/// [NoiseEstimator::max_multiplicative_depth].
const MAX_DEPTH: usize = 64;

#[derive(Clone, Debug)]
pub struct NoiseEstimator {
    q: BigUint,
    t: BigUint,
    r_t: BigUint,
    nphi: BigUint,
    w: BigUint,
    ell: BigUint,
    /// ||f'||, key distribution support.
    b_key: BigUint,
    /// ||e||, error distribution support.
    b_e: BigUint,
    /// ||f|| <= t * b_key + 1.
    f_norm: BigUint,
}

impl NoiseEstimator {
    pub fn new(params: &Parameters) -> Self {
        let q: BigUint = params.q().clone();
        let t: BigUint = BigUint::from(params.t());
        let b_key: BigUint = BigUint::from(params.xs().max_norm(params.xs_bound()));
        let f_norm: BigUint = &t * &b_key + 1u8;
        Self {
            r_t: &q % &t,
            q,
            nphi: BigUint::from(params.nphi()),
            w: BigUint::one() << params.log_w(),
            ell: BigUint::from(params.ell()),
            b_e: BigUint::from(params.xe().max_norm(params.xe_bound())),
            b_key,
            f_norm,
            t,
        }
    }

    /// (Q - r_t) / (2t).
    pub fn threshold(&self) -> BigUint {
        (&self.q - &self.r_t) / (&self.t << 1usize)
    }

    pub fn is_decryptable(&self, v: &BigUint) -> bool {
        *v < self.threshold()
    }

    /// B_e (1 + 2 nphi t B_key) + r_t nphi t B_key.
    pub fn fresh(&self) -> BigUint {
        let ntb: BigUint = &self.nphi * &self.t * &self.b_key;
        &self.b_e * (BigUint::one() + (&ntb << 1usize)) + &self.r_t * ntb
    }

    /// v1 + v2 + r_t: the carry of [m1 + m2]_t costs r_t.
    pub fn add(&self, v1: &BigUint, v2: &BigUint) -> BigUint {
        v1 + v2 + &self.r_t
    }

    /// Key switching: ell nphi^2 w B_e (||f|| + t B_key).
    pub fn relinearization(&self) -> BigUint {
        &self.ell * &self.nphi * &self.nphi * &self.w * &self.b_e * (&self.f_norm + &self.t * &self.b_key)
    }

    /// Noise after multiplying ciphertexts of noise v1 and v2, including
    /// relinearization.
    pub fn mul(&self, v1: &BigUint, v2: &BigUint) -> BigUint {
        let n: &BigUint = &self.nphi;
        let t: &BigUint = &self.t;
        let sum: BigUint = v1 + v2;
        let tensor: BigUint = t * n * ((n * &self.f_norm >> 1usize) + 1u8) * &sum
            + n * t * &sum
            + t * n * v1 * v2 / &self.q;
        let rounding: BigUint = &self.r_t * n * t * (n * &self.f_norm + 3u8) + n * n * &self.f_norm * &self.f_norm;
        tensor + rounding + self.relinearization()
    }

    /// Bound after `depth` levels of squaring a fresh ciphertext.
    pub fn bound_for_depth(&self, depth: usize) -> BigUint {
        (0..depth).fold(self.fresh(), |v, _| self.mul(&v, &v))
    }

    /// Largest d such that a product tree of depth d over fresh ciphertexts
    /// is guaranteed to decrypt.
    pub fn max_multiplicative_depth(&self) -> usize {
        let threshold: BigUint = self.threshold();
        let mut v: BigUint = self.fresh();
        if v >= threshold {
            return 0;
        }
        let mut depth: usize = 0;
        while depth < MAX_DEPTH {
            let next: BigUint = self.mul(&v, &v);
            if next >= threshold {
                break;
            }
            v = next;
            depth += 1;
        }
        depth
    }
}
