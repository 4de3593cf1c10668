use crate::modulus::barrett::BarrettPrecomp;

/// An element stored as x * 2^64 mod q.
pub type Montgomery<O> = O;

/// Montgomery precomputation for an odd word modulus q.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct MontgomeryPrecomp<O> {
    pub q: O,
    pub two_q: O,
    pub four_q: O,
    pub barrett: BarrettPrecomp<O>,
    pub q_inv: O,
    pub one: Montgomery<O>,
    pub minus_one: Montgomery<O>,
}
