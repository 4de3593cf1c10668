use num_bigint::BigInt;
use num_integer::Integer;
use num_traits::{One, Signed, Zero};

pub trait DivRound {
    /// Returns self / other rounded to the nearest integer, ties away from zero.
    fn div_round(&self, other: &Self) -> Self;
}

impl DivRound for BigInt {
    fn div_round(&self, other: &Self) -> Self {
        let (quo, rem) = self.div_rem(other);
        if !rem.is_zero() && (rem.abs() << 1usize) >= other.abs() {
            if self.sign() == other.sign() {
                return quo + BigInt::one();
            } else {
                return quo - BigInt::one();
            }
        }
        quo
    }
}

/// Returns the representative of x mod q in [-(q-1)/2, (q-1)/2] for odd q,
/// [-q/2 + 1, q/2] for even q.
pub fn center(x: &BigInt, q: &BigInt) -> BigInt {
    let r: BigInt = x.mod_floor(q);
    if r > (q >> 1usize) { r - q } else { r }
}
