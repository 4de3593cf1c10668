use super::Polynomial;
use crate::context::Context;
use crate::error::Result;
use num_bigint::BigInt;
use ::sampling::{Distribution, Source};
use std::sync::Arc;

impl Polynomial {
    /// Draws `len` coefficients from `distribution`, each bounded in
    /// magnitude by `bound`; the remaining coefficients are zero.
    pub fn sample(
        context: &Arc<Context>,
        source: &mut Source,
        distribution: Distribution,
        bound: u64,
        len: usize,
    ) -> Result<Polynomial> {
        let mut values: Vec<i64> = vec![0; len];
        distribution.fill(source, bound, &mut values);
        Polynomial::from_coefficients(context, values.into_iter().map(BigInt::from).collect())
    }

    /// Overwrites the first `len` coefficients with fresh samples.
    pub fn fill_random(
        &mut self,
        source: &mut Source,
        distribution: Distribution,
        bound: u64,
        len: usize,
    ) -> Result<()> {
        *self = Polynomial::sample(&self.context, source, distribution, bound, len)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use num_traits::Signed;

    #[test]
    fn samples_fit_length_and_bound() {
        let ctx: Arc<Context> = Context::mersenne(127, 16).unwrap();
        let mut source: Source = Source::new([7u8; 32]);
        for (distribution, bound) in [
            (Distribution::Uniform, 1000),
            (Distribution::Normal(3.2), 19),
            (Distribution::Ternary, 1),
        ] {
            let mut a: Polynomial = Polynomial::sample(&ctx, &mut source, distribution, bound, 16).unwrap();
            assert!(a.degree().is_none_or(|d| d < 16));
            assert!(a.coefficients().iter().all(|c| c.abs() <= BigInt::from(bound)));
        }
        assert!(Polynomial::sample(&ctx, &mut source, Distribution::Uniform, 1, 33).is_err());
    }

    #[test]
    fn same_seed_same_polynomial() {
        let ctx: Arc<Context> = Context::mersenne(127, 16).unwrap();
        let a: Polynomial =
            Polynomial::sample(&ctx, &mut Source::new([1u8; 32]), Distribution::Uniform, 1 << 40, 16).unwrap();
        let mut b: Polynomial = Polynomial::zero(&ctx);
        b.fill_random(&mut Source::new([1u8; 32]), Distribution::Uniform, 1 << 40, 16)
            .unwrap();
        assert_eq!(a, b);
    }
}
