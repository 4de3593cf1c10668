use super::{Data, Polynomial, State};
use crate::error::{MathError, Result};
use crate::modulus::ONCE;
use crate::poly::PolyRNS;
use num_bigint::BigInt;
use rayon::prelude::*;

impl Polynomial {
    /// Coefficient-wise sum. Both operands must share a context and a state;
    /// the result keeps that state.
    pub fn add(&self, other: &Polynomial) -> Result<Polynomial> {
        let mut c: Polynomial = self.clone();
        c.add_inplace(other)?;
        Ok(c)
    }

    pub fn add_inplace(&mut self, other: &Polynomial) -> Result<()> {
        self.check_context(other)?;
        let (lhs, rhs) = (self.state(), other.state());
        let ring = self.context.ring();
        match (&mut self.data, &other.data) {
            (Data::Coefficient(a), Data::Coefficient(b)) => {
                a.par_iter_mut().zip(b.par_iter()).for_each(|(a, b)| *a += b);
            }
            (Data::Residue(a), Data::Residue(b)) | (Data::Transform(a), Data::Transform(b)) => {
                ring.add_inplace::<ONCE>(b, a);
                self.span = self.span.max(other.span);
            }
            _ => {
                return Err(MathError::StateMismatch {
                    operation: "add",
                    lhs,
                    rhs,
                });
            }
        }
        Ok(())
    }

    /// Adds the constant polynomial `k`. In [State::Transform] the constant
    /// evaluates to `k` at every root, so it is added to every slot.
    pub fn integer_add(&mut self, k: i64) {
        let k: BigInt = BigInt::from(k);
        let ring = self.context.ring();
        if self.state() != State::Coefficient {
            self.span = self.span.max(1);
        }
        match &mut self.data {
            Data::Coefficient(a) => a[0] += k,
            Data::Residue(a) => ring.add_constant_inplace(&ring.reduce_bigint(&k), a),
            Data::Transform(a) => ring.add_scalar_inplace::<ONCE>(&ring.reduce_bigint(&k), a),
        }
    }

    pub fn integer_mul(&mut self, k: i64) {
        self.biginteger_mul(&BigInt::from(k));
    }

    /// Multiplies every coefficient by `k`. Valid in any state since scalar
    /// multiplication commutes with the residue split and the transform.
    pub fn biginteger_mul(&mut self, k: &BigInt) {
        let ring = self.context.ring();
        match &mut self.data {
            Data::Coefficient(a) => a.par_iter_mut().for_each(|a| *a *= k),
            Data::Residue(a) | Data::Transform(a) => {
                ring.mul_scalar_inplace::<ONCE>(&ring.reduce_bigint(k), a)
            }
        }
    }

    /// Pointwise product of two polynomials in [State::Transform]: the
    /// non-reduced product of degree up to 2(nphi-1), still in
    /// [State::Transform].
    ///
    /// Fails with [MathError::DegreeOverflow] when the product has more
    /// coefficients than the transform length 2 * nphi, since it would wrap.
    pub fn mul(&self, other: &Polynomial) -> Result<Polynomial> {
        self.check_context(other)?;
        let (a, b) = (self.transform("mul")?, other.transform("mul")?);
        let span: usize = self.product_span(other)?;
        let mut c: PolyRNS<u64> = self.context.ring().new_polyrns();
        self.context.ring().mul::<ONCE>(a, b, &mut c);
        Ok(Polynomial {
            context: self.context.clone(),
            data: Data::Transform(c),
            span,
        })
    }

    pub fn mul_inplace(&mut self, other: &Polynomial) -> Result<()> {
        self.check_context(other)?;
        let b: &PolyRNS<u64> = other.transform("mul")?;
        let found: State = self.state();
        let span: Result<usize> = self.product_span(other);
        match &mut self.data {
            Data::Transform(a) => {
                let span: usize = span?;
                self.context.ring().mul_inplace::<ONCE>(b, a);
                self.span = span;
                Ok(())
            }
            _ => Err(MathError::UnexpectedState {
                operation: "mul",
                expected: State::Transform,
                found,
            }),
        }
    }

    /// Number of coefficients of the linear product of `self` and `other`.
    fn product_span(&self, other: &Polynomial) -> Result<usize> {
        if self.span == 0 || other.span == 0 {
            return Ok(0);
        }
        let len: usize = self.span + other.span - 1;
        if len > self.context.n() {
            return Err(MathError::DegreeOverflow {
                len,
                nphi: self.context.nphi(),
            });
        }
        Ok(len)
    }

    fn transform(&self, operation: &'static str) -> Result<&PolyRNS<u64>> {
        match &self.data {
            Data::Transform(a) => Ok(a),
            _ => Err(MathError::UnexpectedState {
                operation,
                expected: State::Transform,
                found: self.state(),
            }),
        }
    }
}

impl std::ops::Add for &Polynomial {
    type Output = Result<Polynomial>;

    fn add(self, rhs: &Polynomial) -> Result<Polynomial> {
        Polynomial::add(self, rhs)
    }
}

impl std::ops::Mul for &Polynomial {
    type Output = Result<Polynomial>;

    fn mul(self, rhs: &Polynomial) -> Result<Polynomial> {
        Polynomial::mul(self, rhs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::context::Context;
    use std::sync::Arc;

    fn context() -> Arc<Context> {
        Context::mersenne(127, 16).unwrap()
    }

    fn poly(ctx: &Arc<Context>, coeffs: &[i64]) -> Polynomial {
        Polynomial::from_i64(ctx, coeffs).unwrap()
    }

    #[test]
    fn add_in_every_state() {
        let ctx: Arc<Context> = context();
        let expected: Polynomial = poly(&ctx, &[5, -1, 9]);
        for state in [State::Coefficient, State::Residue, State::Transform] {
            let mut a: Polynomial = poly(&ctx, &[1, 2, 3]);
            let mut b: Polynomial = poly(&ctx, &[4, -3, 6]);
            a.to_state(state);
            b.to_state(state);
            let c: Polynomial = (&a + &b).unwrap();
            assert_eq!(c.state(), state);
            assert_eq!(c, expected);
        }
    }

    #[test]
    fn add_rejects_state_mismatch() {
        let ctx: Arc<Context> = context();
        let a: Polynomial = poly(&ctx, &[1]);
        let mut b: Polynomial = poly(&ctx, &[1]);
        b.elevate();
        assert_eq!(
            a.add(&b),
            Err(MathError::StateMismatch {
                operation: "add",
                lhs: State::Coefficient,
                rhs: State::Residue
            })
        );
    }

    #[test]
    fn integer_add_targets_constant_term() {
        let ctx: Arc<Context> = context();
        for state in [State::Coefficient, State::Residue, State::Transform] {
            let mut a: Polynomial = poly(&ctx, &[1, 2]);
            a.to_state(state);
            a.integer_add(-10);
            assert_eq!(a.state(), state);
            assert_eq!(a.to_coefficients()[..3], [BigInt::from(-9), BigInt::from(2), BigInt::from(0)]);
        }
    }

    #[test]
    fn integer_and_biginteger_mul() {
        let ctx: Arc<Context> = context();
        let big: BigInt = BigInt::from(1u128 << 100);
        for state in [State::Coefficient, State::Residue, State::Transform] {
            let mut a: Polynomial = poly(&ctx, &[1, -2, 0, 3]);
            a.to_state(state);
            a.integer_mul(-3);
            assert_eq!(a, poly(&ctx, &[-3, 6, 0, -9]));
            a.biginteger_mul(&big);
            assert_eq!(a.to_coefficients()[3], BigInt::from(-9) * &big);
        }
    }

    #[test]
    fn mul_requires_transform() {
        let ctx: Arc<Context> = context();
        let a: Polynomial = poly(&ctx, &[1]);
        let mut b: Polynomial = poly(&ctx, &[1]);
        b.to_state(State::Transform);
        assert_eq!(
            a.mul(&b),
            Err(MathError::UnexpectedState {
                operation: "mul",
                expected: State::Transform,
                found: State::Coefficient
            })
        );
        let mut a: Polynomial = a;
        a.elevate();
        assert!(a.mul_inplace(&b).is_err());
    }

    #[test]
    fn mul_is_non_reduced_product() {
        let ctx: Arc<Context> = context();
        // (1 + x^15) * (2 + x^15) = 2 + 3x^15 + x^30
        let mut a: Polynomial = Polynomial::zero(&ctx);
        a.set_coeff(0, 1).unwrap();
        a.set_coeff(15, 1).unwrap();
        let mut b: Polynomial = a.clone();
        b.set_coeff(0, 2).unwrap();
        a.to_state(State::Transform);
        b.to_state(State::Transform);
        let mut c: Polynomial = a.mul(&b).unwrap();
        assert_eq!(c.state(), State::Transform);
        assert_eq!(c.degree(), Some(30));
        assert_eq!(c.coeff(0).unwrap(), BigInt::from(2));
        assert_eq!(c.coeff(15).unwrap(), BigInt::from(3));
        assert_eq!(c.coeff(30).unwrap(), BigInt::from(1));

        a.mul_inplace(&b).unwrap();
        assert_eq!(a, c);
    }

    fn monomial(ctx: &Arc<Context>, degree: usize) -> Polynomial {
        let mut a: Polynomial = Polynomial::zero(ctx);
        a.set_coeff(degree, 1).unwrap();
        a.to_state(State::Transform);
        a
    }

    #[test]
    fn mul_rejects_products_that_would_wrap() {
        let ctx: Arc<Context> = Context::mersenne(127, 8).unwrap();
        let a: Polynomial = monomial(&ctx, 8);
        assert_eq!(a.mul(&a), Err(MathError::DegreeOverflow { len: 17, nphi: 8 }));
        let mut b: Polynomial = a.clone();
        assert_eq!(b.mul_inplace(&a), Err(MathError::DegreeOverflow { len: 17, nphi: 8 }));
        assert_eq!(b, a);

        // x^7 * x^8 = x^15 still fits the transform and folds to x^7
        let mut c: Polynomial = monomial(&ctx, 7).mul(&a).unwrap();
        c.to_state(State::Coefficient);
        c.reduce().unwrap();
        assert_eq!(c, Polynomial::from_i64(&ctx, &[0, 0, 0, 0, 0, 0, 0, 1]).unwrap());
    }

    #[test]
    fn degree_bound_follows_products_and_sums() {
        let ctx: Arc<Context> = Context::mersenne(127, 8).unwrap();
        let x7: Polynomial = monomial(&ctx, 7);
        let square: Polynomial = x7.mul(&x7).unwrap();
        assert!(square.mul(&monomial(&ctx, 1)).is_ok());
        assert!(square.mul(&monomial(&ctx, 2)).is_err());

        let sum: Polynomial = (&square + &monomial(&ctx, 0)).unwrap();
        assert!(sum.mul(&monomial(&ctx, 2)).is_err());

        let zero: Polynomial = {
            let mut z: Polynomial = Polynomial::zero(&ctx);
            z.to_state(State::Transform);
            z
        };
        assert!(square.mul(&zero).is_ok());
    }

    #[test]
    fn context_mismatch() {
        let a: Polynomial = Polynomial::zero(&context());
        let b: Polynomial = Polynomial::zero(&Context::mersenne(127, 8).unwrap());
        assert_eq!(a.add(&b), Err(MathError::ContextMismatch));
    }
}
