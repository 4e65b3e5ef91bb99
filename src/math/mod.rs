//! Closed-form distribution mathematics.
//!
//! Each family implements [`Univariate`] on plain, already-validated
//! parameters. Callers are responsible for rejecting NaN and out-of-domain
//! evaluation points before calling in; the formulae here assume both.

pub mod continuous;
pub mod discrete;
pub mod special;

use crate::error::Result;
use crate::rng::Generator;
use crate::types::OperationResult;

pub use continuous::{Exponential, Gamma, LogNormal, Logistic, Normal, Uniform, Weibull};
pub use discrete::{Bernoulli, Binomial, Poisson};

/// Math interface implemented once per family.
pub trait Univariate {
    /// Smallest closed interval containing every possible variate.
    fn range(&self) -> (f64, f64);

    /// Interval on which the density or mass is positive.
    ///
    /// Unbounded ends are reported as the largest finite magnitude.
    fn support(&self) -> (f64, f64) {
        let (lo, hi) = self.range();
        (lo.max(-f64::MAX), hi.min(f64::MAX))
    }

    /// Interval of evaluation points accepted by `pdf` and `cdf`.
    fn domain(&self) -> (f64, f64) {
        self.range()
    }

    fn pdf(&self, x: f64) -> f64;

    fn ln_pdf(&self, x: f64) -> f64 {
        self.pdf(x).ln()
    }

    fn cdf(&self, x: f64) -> f64;

    /// Survival function 1 − F(x).
    fn sf(&self, x: f64) -> f64 {
        1.0 - self.cdf(x)
    }

    /// Inverse CDF for `p` in [0, 1].
    fn quantile(&self, p: f64) -> f64;

    /// Value `x` with P(X > x) = `q`.
    fn quantile_complement(&self, q: f64) -> f64 {
        self.quantile(1.0 - q)
    }

    fn mean(&self) -> f64;

    fn variance(&self) -> f64;

    fn std_dev(&self) -> f64 {
        self.variance().sqrt()
    }

    /// Most likely value, or `None` where it is undefined.
    fn mode(&self) -> Option<f64>;

    fn median(&self) -> f64 {
        self.quantile(0.5)
    }

    fn skewness(&self) -> f64;

    fn excess_kurtosis(&self) -> f64;

    /// Draws one variate.
    ///
    /// # Errors
    ///
    /// Returns `SamplingError` if the random-variate collaborator rejects the parameters.
    fn sample(&self, rng: &mut Generator) -> Result<OperationResult>;
}

/// Smallest integer `k` in `[lo, hi]` with `cdf(k) >= p`, by binary search.
pub(crate) fn discrete_quantile(cdf: impl Fn(f64) -> f64, p: f64, lo: f64, hi: f64) -> f64 {
    let mut lo = lo;
    let mut hi = hi;
    if hi.is_infinite() {
        let mut probe = lo.max(1.0);
        while cdf(probe) < p && probe < 2f64.powi(53) {
            lo = probe;
            probe *= 2.0;
        }
        hi = probe;
    }
    if cdf(lo) >= p {
        return lo;
    }
    // Invariant: cdf(lo) < p <= cdf(hi)
    while hi - lo > 1.0 {
        let mid = (lo + (hi - lo) / 2.0).floor();
        if cdf(mid) < p {
            lo = mid;
        } else {
            hi = mid;
        }
    }
    hi
}
