use crate::error::{Result, YasheError};
use crate::parameters::Parameters;
use math::{Polynomial, State};
use std::sync::Arc;

/// A YASHE ciphertext: one polynomial in [0, Q) coefficient form and the
/// number of multiplications it went through.
#[derive(Clone, Debug, PartialEq)]
pub struct Ciphertext {
    pub(crate) c: Polynomial,
    pub(crate) depth: usize,
}

impl Ciphertext {
    pub fn polynomial(&self) -> &Polynomial {
        &self.c
    }

    pub fn depth(&self) -> usize {
        self.depth
    }

    /// Fails if the ciphertext does not belong to `params`.
    pub(crate) fn check(&self, params: &Parameters) -> Result<()> {
        let context = self.c.context();
        if !(Arc::ptr_eq(context, params.context()) || **context == **params.context()) {
            return Err(YasheError::InvalidCiphertext(
                "ciphertext context differs from parameters".into(),
            ));
        }
        if self.c.state() != State::Coefficient {
            return Err(YasheError::InvalidCiphertext(format!(
                "ciphertext in {} state",
                self.c.state()
            )));
        }
        Ok(())
    }
}
