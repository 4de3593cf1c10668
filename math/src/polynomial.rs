//! The ring element of the engine and its representation state machine.
//!
//! A [Polynomial] always holds exactly one authoritative buffer:
//!
//! - [State::Coefficient]: big-integer coefficients.
//! - [State::Residue]: one word-sized residue per coefficient and CRT prime.
//! - [State::Transform]: the residues after the forward NTT of each channel.
//!
//! [Polynomial::elevate] and [Polynomial::demote] move one step along
//! Coefficient <-> Residue <-> Transform and are no-ops at the ends. The
//! logical value, the coefficients modulo the CRT product M, is the same in
//! every state as long as coefficients stay within (-M/2, M/2).

pub mod arithmetic;
pub mod inverse;
pub mod reduction;
pub mod sampling;

use crate::context::Context;
use crate::error::{MathError, Result};
use crate::poly::PolyRNS;
use num_bigint::BigInt;
use num_traits::Zero;
use std::fmt;
use std::sync::Arc;
use tracing::trace;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum State {
    Coefficient,
    Residue,
    Transform,
}

impl fmt::Display for State {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            State::Coefficient => write!(f, "COEFFICIENT"),
            State::Residue => write!(f, "RESIDUE"),
            State::Transform => write!(f, "TRANSFORM"),
        }
    }
}

#[derive(Clone, Debug)]
pub(crate) enum Data {
    Coefficient(Vec<BigInt>),
    Residue(PolyRNS<u64>),
    Transform(PolyRNS<u64>),
}

impl Default for Data {
    fn default() -> Self {
        Data::Coefficient(Vec::new())
    }
}

#[derive(Clone, Debug)]
pub struct Polynomial {
    context: Arc<Context>,
    pub(crate) data: Data,
    /// Upper bound on the number of significant coefficients, maintained
    /// while the data is in [State::Residue] or [State::Transform].
    pub(crate) span: usize,
}

impl Polynomial {
    /// The zero polynomial, in [State::Coefficient].
    pub fn zero(context: &Arc<Context>) -> Self {
        Self {
            context: context.clone(),
            data: Data::Coefficient(vec![BigInt::zero(); context.n()]),
            span: 0,
        }
    }

    /// Builds a polynomial from at most `context.n()` coefficients.
    pub fn from_coefficients(context: &Arc<Context>, mut coeffs: Vec<BigInt>) -> Result<Self> {
        let capacity: usize = context.n();
        if coeffs.len() > capacity {
            return Err(MathError::IndexOutOfRange {
                index: coeffs.len() - 1,
                capacity,
            });
        }
        coeffs.resize(capacity, BigInt::zero());
        Ok(Self {
            context: context.clone(),
            data: Data::Coefficient(coeffs),
            span: 0,
        })
    }

    pub fn from_i64(context: &Arc<Context>, coeffs: &[i64]) -> Result<Self> {
        Self::from_coefficients(context, coeffs.iter().map(|c| BigInt::from(*c)).collect())
    }

    /// The cyclotomic modulus x^nphi - 1.
    pub fn cyclotomic(context: &Arc<Context>) -> Self {
        let mut coeffs: Vec<BigInt> = vec![BigInt::zero(); context.n()];
        coeffs[0] = BigInt::from(-1);
        coeffs[context.nphi()] = BigInt::from(1);
        Self {
            context: context.clone(),
            data: Data::Coefficient(coeffs),
            span: 0,
        }
    }

    pub fn context(&self) -> &Arc<Context> {
        &self.context
    }

    pub fn state(&self) -> State {
        match self.data {
            Data::Coefficient(_) => State::Coefficient,
            Data::Residue(_) => State::Residue,
            Data::Transform(_) => State::Transform,
        }
    }

    /// Maximum number of coefficients: the transform length 2 * nphi.
    pub fn capacity(&self) -> usize {
        self.context.n()
    }

    /// Coefficient -> Residue -> Transform; no-op in Transform.
    pub fn elevate(&mut self) {
        let from: State = self.state();
        let ring = self.context.ring();
        self.data = match std::mem::take(&mut self.data) {
            Data::Coefficient(coeffs) => {
                self.span = coeffs.iter().rposition(|c| !c.is_zero()).map_or(0, |d| d + 1);
                Data::Residue(ring.from_bigint(&coeffs))
            }
            Data::Residue(mut a) => {
                ring.ntt_inplace::<false>(&mut a);
                Data::Transform(a)
            }
            data @ Data::Transform(_) => data,
        };
        trace!(from = %from, to = %self.state(), "elevate");
    }

    /// Transform -> Residue -> Coefficient; no-op in Coefficient.
    pub fn demote(&mut self) {
        let from: State = self.state();
        let context: &Context = &self.context;
        self.data = match std::mem::take(&mut self.data) {
            Data::Transform(mut a) => {
                context.ring().intt_inplace::<false>(&mut a);
                Data::Residue(a)
            }
            Data::Residue(a) => Data::Coefficient(context.crt().reconstruct_poly(&a)),
            data @ Data::Coefficient(_) => data,
        };
        trace!(from = %from, to = %self.state(), "demote");
    }

    /// Elevates or demotes until the polynomial is in `target`.
    pub fn to_state(&mut self, target: State) {
        while self.state() != target {
            match (self.state(), target) {
                (State::Coefficient, _) | (State::Residue, State::Transform) => self.elevate(),
                _ => self.demote(),
            }
        }
    }

    /// Coefficients after demotion to [State::Coefficient].
    pub fn coefficients(&mut self) -> &[BigInt] {
        self.to_state(State::Coefficient);
        match &self.data {
            Data::Coefficient(coeffs) => coeffs,
            _ => unreachable!("demotion to COEFFICIENT left the polynomial in {}", self.state()),
        }
    }

    /// Coefficients without changing the state of `self`.
    pub fn to_coefficients(&self) -> Vec<BigInt> {
        match &self.data {
            Data::Coefficient(coeffs) => coeffs.clone(),
            _ => {
                let mut copy: Polynomial = self.clone();
                copy.coefficients().to_vec()
            }
        }
    }

    /// Takes the coefficient buffer, demoting first.
    pub fn into_coefficients(mut self) -> Vec<BigInt> {
        self.to_state(State::Coefficient);
        let state: State = self.state();
        match self.data {
            Data::Coefficient(coeffs) => coeffs,
            _ => unreachable!("demotion to COEFFICIENT left the polynomial in {}", state),
        }
    }

    pub fn coeff(&mut self, index: usize) -> Result<BigInt> {
        let capacity: usize = self.capacity();
        self.coefficients()
            .get(index)
            .cloned()
            .ok_or(MathError::IndexOutOfRange { index, capacity })
    }

    /// Sets one coefficient. Demotes first, so residue and transform data
    /// never outlive the write.
    pub fn set_coeff(&mut self, index: usize, value: impl Into<BigInt>) -> Result<()> {
        let capacity: usize = self.capacity();
        self.to_state(State::Coefficient);
        let found: State = self.state();
        match &mut self.data {
            Data::Coefficient(coeffs) => match coeffs.get_mut(index) {
                Some(c) => {
                    *c = value.into();
                    Ok(())
                }
                None => Err(MathError::IndexOutOfRange { index, capacity }),
            },
            _ => Err(MathError::UnexpectedState {
                operation: "set_coeff",
                expected: State::Coefficient,
                found,
            }),
        }
    }

    /// Index of the highest non-zero coefficient, None for zero.
    pub fn degree(&mut self) -> Option<usize> {
        self.coefficients().iter().rposition(|c| !c.is_zero())
    }

    pub fn is_zero(&mut self) -> bool {
        self.degree().is_none()
    }

    /// Resets to the zero polynomial in [State::Coefficient].
    pub fn clear(&mut self) {
        self.data = Data::Coefficient(vec![BigInt::zero(); self.context.n()]);
        self.span = 0;
    }

    pub(crate) fn check_context(&self, other: &Polynomial) -> Result<()> {
        if Arc::ptr_eq(&self.context, &other.context) || *self.context == *other.context {
            Ok(())
        } else {
            Err(MathError::ContextMismatch)
        }
    }
}

/// Compares logical values: coefficients after demotion.
impl PartialEq for Polynomial {
    fn eq(&self, other: &Self) -> bool {
        self.check_context(other).is_ok() && self.to_coefficients() == other.to_coefficients()
    }
}

/// Prints `[c0, c1, ..., cd]` up to the degree; `[0]` for zero.
impl fmt::Display for Polynomial {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let coeffs: Vec<BigInt> = self.to_coefficients();
        let end: usize = coeffs.iter().rposition(|c| !c.is_zero()).map_or(1, |d| d + 1);
        write!(f, "[")?;
        for (i, c) in coeffs.iter().take(end).enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{}", c)?;
        }
        write!(f, "]")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn context() -> Arc<Context> {
        Context::mersenne(127, 32).unwrap()
    }

    #[test]
    fn elevate_demote_roundtrip_from_every_state() {
        let ctx: Arc<Context> = context();
        let coeffs: Vec<i64> = (0..32).map(|i| i * i).collect();
        let reference: Polynomial = Polynomial::from_i64(&ctx, &coeffs).unwrap();

        let mut a: Polynomial = reference.clone();
        a.elevate();
        assert_eq!(a.state(), State::Residue);
        a.elevate();
        assert_eq!(a.state(), State::Transform);
        a.elevate();
        assert_eq!(a.state(), State::Transform);
        a.demote();
        assert_eq!(a.state(), State::Residue);
        a.demote();
        assert_eq!(a.state(), State::Coefficient);
        a.demote();
        assert_eq!(a.state(), State::Coefficient);
        assert_eq!(a.coefficients(), reference.to_coefficients().as_slice());

        let mut b: Polynomial = reference.clone();
        b.elevate();
        b.demote();
        assert_eq!(b.into_coefficients(), reference.to_coefficients());
    }

    #[test]
    fn set_coeff_demotes_and_invalidates() {
        let ctx: Arc<Context> = context();
        let mut a: Polynomial = Polynomial::from_i64(&ctx, &[1, 2, 3]).unwrap();
        a.to_state(State::Transform);
        a.set_coeff(1, -7).unwrap();
        assert_eq!(a.state(), State::Coefficient);
        assert_eq!(a.coeff(1).unwrap(), BigInt::from(-7));
        a.to_state(State::Transform);
        assert_eq!(a.coeff(0).unwrap(), BigInt::from(1));
        assert_eq!(a.coeff(1).unwrap(), BigInt::from(-7));
        assert_eq!(a.coeff(2).unwrap(), BigInt::from(3));
    }

    #[test]
    fn coefficient_index_bounds() {
        let ctx: Arc<Context> = context();
        let mut a: Polynomial = Polynomial::zero(&ctx);
        assert_eq!(a.capacity(), 64);
        assert!(a.set_coeff(63, 1).is_ok());
        assert_eq!(
            a.set_coeff(64, 1),
            Err(MathError::IndexOutOfRange {
                index: 64,
                capacity: 64
            })
        );
        assert!(a.coeff(64).is_err());
        assert!(Polynomial::from_i64(&ctx, &[0; 65]).is_err());
    }

    #[test]
    fn degree_and_clear() {
        let ctx: Arc<Context> = context();
        let mut a: Polynomial = Polynomial::zero(&ctx);
        assert_eq!(a.degree(), None);
        a.set_coeff(5, 2).unwrap();
        a.elevate();
        assert_eq!(a.degree(), Some(5));
        a.elevate();
        a.clear();
        assert_eq!(a.state(), State::Coefficient);
        assert!(a.is_zero());
    }

    #[test]
    fn cyclotomic_shape() {
        let ctx: Arc<Context> = context();
        let mut phi: Polynomial = Polynomial::cyclotomic(&ctx);
        assert_eq!(phi.degree(), Some(32));
        assert_eq!(phi.coeff(0).unwrap(), BigInt::from(-1));
        assert_eq!(phi.coeff(32).unwrap(), BigInt::from(1));
    }

    #[test]
    fn display_lists_coefficients() {
        let ctx: Arc<Context> = context();
        let mut a: Polynomial = Polynomial::from_i64(&ctx, &[3, 0, -4]).unwrap();
        assert_eq!(a.to_string(), "[3, 0, -4]");
        a.elevate();
        assert_eq!(a.to_string(), "[3, 0, -4]");
        assert_eq!(Polynomial::zero(&ctx).to_string(), "[0]");
    }

    #[test]
    fn mismatched_contexts_are_detected() {
        let a: Polynomial = Polynomial::zero(&context());
        let b: Polynomial = Polynomial::zero(&Context::mersenne(127, 16).unwrap());
        assert_eq!(a.check_context(&b), Err(MathError::ContextMismatch));
        assert!(a.check_context(&Polynomial::zero(&context())).is_ok());
    }

    proptest! {
        #[test]
        fn roundtrip_random_coefficients(coeffs in proptest::collection::vec(any::<i64>(), 0..64)) {
            let ctx: Arc<Context> = context();
            let a: Polynomial = Polynomial::from_i64(&ctx, &coeffs).unwrap();
            let mut b: Polynomial = a.clone();
            b.to_state(State::Transform);
            prop_assert_eq!(b.into_coefficients(), a.to_coefficients());
        }
    }
}
