use crate::parameters::Parameters;
use crate::utils::prepare;
use math::Polynomial;

/// The secret f = t * f' + 1, kept in coefficient form with small
/// coefficients, together with its inverse modulo (x^nphi - 1, Q).
#[derive(Clone, Debug)]
pub struct SecretKey {
    pub(crate) f: Polynomial,
    pub(crate) f_inv: Polynomial,
}

impl SecretKey {
    pub fn f(&self) -> &Polynomial {
        &self.f
    }

    pub fn f_inv(&self) -> &Polynomial {
        &self.f_inv
    }

    /// f in the transform domain.
    pub fn prepare(&self) -> Polynomial {
        prepare(&self.f)
    }
}

/// h = [t * g * f^-1]_Q.
#[derive(Clone, Debug, PartialEq)]
pub struct PublicKey(pub(crate) Polynomial);

impl PublicKey {
    pub fn h(&self) -> &Polynomial {
        &self.0
    }

    pub fn prepare(&self) -> Polynomial {
        prepare(&self.0)
    }
}

/// gamma_i = [f * w^i + e_i + h * s_i]_Q for i < ell: encryptions of the
/// powers-of-w expansion of f used to relinearize products.
#[derive(Clone, Debug, PartialEq)]
pub struct EvaluationKey(pub(crate) Vec<Polynomial>);

impl EvaluationKey {
    pub fn gamma(&self) -> &[Polynomial] {
        &self.0
    }

    pub fn prepare(&self) -> Vec<Polynomial> {
        self.0.iter().map(prepare).collect()
    }

    pub(crate) fn check(&self, params: &Parameters) -> bool {
        self.0.len() == params.ell()
    }
}

#[derive(Clone, Debug)]
pub struct KeySet {
    pub sk: SecretKey,
    pub pk: PublicKey,
    pub evk: EvaluationKey,
}
