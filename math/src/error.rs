use crate::polynomial::State;
use thiserror::Error;

/// Failures of the polynomial engine.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum MathError {
    #[error("operation `{operation}` requires state {expected}, found {found}")]
    UnexpectedState {
        operation: &'static str,
        expected: State,
        found: State,
    },

    #[error("operands of `{operation}` are in different states: {lhs} and {rhs}")]
    StateMismatch {
        operation: &'static str,
        lhs: State,
        rhs: State,
    },

    #[error("operands were built under different contexts")]
    ContextMismatch,

    #[error("coefficient index {index} outside capacity {capacity}")]
    IndexOutOfRange { index: usize, capacity: usize },

    #[error("polynomial of length {len} exceeds the cyclotomic bound 2*{nphi}")]
    DegreeOverflow { len: usize, nphi: usize },

    #[error("polynomial is not invertible modulo {modulus}")]
    NotInvertible { modulus: String },

    #[error("reciprocal has {found} bits, expected {expected} for a {nq}-bit modulus")]
    ReciprocalMismatch {
        nq: usize,
        expected: u64,
        found: u64,
    },

    #[error("invalid cyclotomic degree {nphi}")]
    CyclotomicMismatch { nphi: usize },

    #[error("no more {bit_size}-bit primes congruent to 1 mod {nth_root}")]
    PrimesExhausted { bit_size: u64, nth_root: u64 },

    #[error("invalid degree {0}: must be a non-zero power of two")]
    InvalidDegree(usize),

    #[error("invalid modulus: {0}")]
    InvalidModulus(String),
}

pub type Result<T> = std::result::Result<T, MathError>;
