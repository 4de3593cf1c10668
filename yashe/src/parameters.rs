use crate::error::{Result, YasheError};
use math::Context;
use num_bigint::{BigInt, BigUint};
use num_traits::One;
use sampling::Distribution;
use std::sync::Arc;
use tracing::info;

/// Exponents p for which 2^p - 1 is prime.
pub const MERSENNE_EXPONENTS: [usize; 20] = [
    2, 3, 5, 7, 13, 17, 19, 31, 61, 89, 107, 127, 521, 607, 1279, 2203, 2281, 3217, 4253, 4423,
];

pub const MIN_LOG_N: usize = 3;
pub const MAX_LOG_N: usize = 16;

/// Unvalidated scheme parameters.
#[derive(Clone, Debug, PartialEq)]
pub struct ParametersLiteral {
    /// nphi = 2^log_n.
    pub log_n: usize,
    /// Q = 2^nq - 1.
    pub nq: usize,
    pub t: u64,
    /// w = 2^log_w.
    pub log_w: usize,
    pub xs: Distribution,
    pub xs_bound: u64,
    pub xe: Distribution,
    pub xe_bound: u64,
}

impl Default for ParametersLiteral {
    fn default() -> Self {
        Self {
            log_n: 5,
            nq: 127,
            t: 1024,
            log_w: 32,
            xs: Distribution::Ternary,
            xs_bound: 1,
            xe: Distribution::Normal(3.2),
            xe_bound: 19,
        }
    }
}

#[derive(Clone, Debug)]
pub struct Parameters {
    log_n: usize,
    nq: usize,
    t: u64,
    log_w: usize,
    ell: usize,
    delta: BigInt,
    xs: Distribution,
    xs_bound: u64,
    xe: Distribution,
    xe_bound: u64,
    context: Arc<Context>,
}

impl Parameters {
    pub fn new(p: &ParametersLiteral) -> Result<Self> {
        if !(MIN_LOG_N..=MAX_LOG_N).contains(&p.log_n) {
            return Err(YasheError::InvalidParameters(format!(
                "log_n={} not in [{}, {}]",
                p.log_n, MIN_LOG_N, MAX_LOG_N
            )));
        }
        if !MERSENNE_EXPONENTS.contains(&p.nq) {
            return Err(YasheError::InvalidParameters(format!(
                "2^{} - 1 is not a known Mersenne prime",
                p.nq
            )));
        }

        let q: BigUint = (BigUint::one() << p.nq) - 1u8;
        if p.t < 2 || BigUint::from(p.t) >= q {
            return Err(YasheError::InvalidParameters(format!(
                "t={} not in [2, Q)",
                p.t
            )));
        }
        if p.log_w == 0 {
            return Err(YasheError::InvalidParameters("log_w must be at least 1".into()));
        }

        let ell: usize = p.nq.div_ceil(p.log_w) + 1;
        if BigUint::from(ell) << p.log_w >= q {
            return Err(YasheError::InvalidParameters(format!(
                "ell * w = {} * 2^{} does not fit below Q",
                ell, p.log_w
            )));
        }

        let context: Arc<Context> = Context::mersenne(p.nq, 1 << p.log_n)?;
        let delta: BigInt = BigInt::from(q / p.t);

        info!(
            nphi = 1usize << p.log_n,
            nq = p.nq,
            t = p.t,
            log_w = p.log_w,
            ell,
            crt_primes = context.crt().primes().len(),
            "yashe parameters"
        );

        Ok(Self {
            log_n: p.log_n,
            nq: p.nq,
            t: p.t,
            log_w: p.log_w,
            ell,
            delta,
            xs: p.xs,
            xs_bound: p.xs_bound,
            xe: p.xe,
            xe_bound: p.xe_bound,
            context,
        })
    }

    pub fn log_n(&self) -> usize {
        self.log_n
    }

    pub fn nphi(&self) -> usize {
        1 << self.log_n
    }

    pub fn nq(&self) -> usize {
        self.nq
    }

    pub fn q(&self) -> &BigUint {
        self.context.modulus().q()
    }

    pub fn t(&self) -> u64 {
        self.t
    }

    pub fn log_w(&self) -> usize {
        self.log_w
    }

    /// Number of base-w digits of a coefficient in [0, Q).
    pub fn ell(&self) -> usize {
        self.ell
    }

    /// floor(Q / t).
    pub fn delta(&self) -> &BigInt {
        &self.delta
    }

    pub fn xs(&self) -> Distribution {
        self.xs
    }

    pub fn xs_bound(&self) -> u64 {
        self.xs_bound
    }

    pub fn xe(&self) -> Distribution {
        self.xe
    }

    pub fn xe_bound(&self) -> u64 {
        self.xe_bound
    }

    pub fn context(&self) -> &Arc<Context> {
        &self.context
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_parameters() {
        let params: Parameters = Parameters::new(&ParametersLiteral::default()).unwrap();
        assert_eq!(params.nphi(), 32);
        assert_eq!(params.ell(), 5);
        assert_eq!(params.context().n(), 64);
        assert_eq!(params.delta() * BigInt::from(1024) + 1023, BigInt::from(params.q().clone()));
    }

    #[test]
    fn invalid_parameters_are_rejected() {
        let base: ParametersLiteral = ParametersLiteral::default();
        let cases: [ParametersLiteral; 6] = [
            ParametersLiteral { log_n: 2, ..base.clone() },
            ParametersLiteral { nq: 128, ..base.clone() },
            ParametersLiteral { t: 1, ..base.clone() },
            ParametersLiteral { nq: 7, t: 127, ..base.clone() },
            ParametersLiteral { log_w: 0, ..base.clone() },
            ParametersLiteral { log_w: 126, ..base.clone() },
        ];
        for p in cases {
            assert!(
                matches!(Parameters::new(&p), Err(YasheError::InvalidParameters(_))),
                "{:?}",
                p
            );
        }
    }
}
