use crate::source::Source;
use rand_distr::{Distribution as _, StandardNormal};

/// Coefficient distributions. Every variant is bounded: no sample ever
/// leaves [-bound, bound].
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub enum Distribution {
    /// Uniform over [-bound, bound].
    #[default]
    Uniform,
    /// Rounded normal of standard deviation `sigma`, tail-cut at the bound.
    Normal(f64),
    /// Uniform over {-1, 0, 1} (clamped to {0} for a zero bound).
    Ternary,
}

impl Distribution {
    pub fn sample(&self, source: &mut Source, bound: u64) -> i64 {
        match self {
            Distribution::Uniform => source.next_i64_bounded(bound),
            Distribution::Normal(sigma) => {
                if bound == 0 {
                    return 0;
                }
                loop {
                    let x: f64 = StandardNormal.sample(source);
                    let v: f64 = (x * sigma).round();
                    if v.abs() <= bound as f64 {
                        return v as i64;
                    }
                }
            }
            Distribution::Ternary => source.next_i64_bounded(bound.min(1)),
        }
    }

    /// Fills `out` with independent samples.
    pub fn fill(&self, source: &mut Source, bound: u64, out: &mut [i64]) {
        out.iter_mut().for_each(|x| *x = self.sample(source, bound));
    }

    /// Largest magnitude a sample can take under `bound`.
    pub fn max_norm(&self, bound: u64) -> u64 {
        match self {
            Distribution::Ternary => bound.min(1),
            _ => bound,
        }
    }
}
