pub mod impl_u64;

use crate::dft::DFT;
use crate::modulus::prime::Prime;
use crate::poly::{Poly, PolyRNS};
use num_traits::Unsigned;
use std::sync::Arc;

/// Z_p[X]/(X^n + 1) for one word prime p, with its transform.
pub struct Ring<O: Unsigned> {
    pub n: usize,
    pub modulus: Prime<O>,
    pub dft: Box<dyn DFT<O>>,
}

impl<O: Unsigned> Ring<O> {
    pub fn log_n(&self) -> usize {
        self.n.trailing_zeros() as usize
    }

    pub fn n(&self) -> usize {
        self.n
    }

    pub fn new_poly(&self) -> Poly<u64> {
        Poly::<u64>::new(self.n())
    }
}

/// The rings of every CRT prime, sharing one length n.
pub struct RingRNS<O: Unsigned>(pub Vec<Arc<Ring<O>>>);

impl<O: Unsigned> RingRNS<O> {
    pub fn log_n(&self) -> usize {
        self.n().trailing_zeros() as usize
    }

    pub fn n(&self) -> usize {
        self.0[0].n()
    }

    pub fn new_polyrns(&self) -> PolyRNS<u64> {
        PolyRNS::<u64>::new(self.n(), self.level())
    }

    pub fn level(&self) -> usize {
        self.0.len() - 1
    }

    pub fn at(&self, level: usize) -> &Ring<O> {
        &self.0[level]
    }
}
