//! Discrete families.
//!
//! Mass functions return 0 at non-integer points and cumulative functions
//! evaluate at `floor(x)`.

use rand_distr::Distribution;

use crate::error::Result;
use crate::math::continuous::sampling_error;
use crate::math::special::{beta_inc, beta_inc_complement, gamma_p, gamma_q, ln_choose, ln_gamma};
use crate::math::{discrete_quantile, Univariate};
use crate::rng::Generator;
use crate::types::OperationResult;

const I64_LIMIT: f64 = 9_223_372_036_854_775_808.0;

fn is_integer(x: f64) -> bool {
    x.fract() == 0.0
}

// =============================================================================
// Bernoulli
// =============================================================================

/// Single trial with success probability `p`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bernoulli {
    pub p: f64,
}

impl Univariate for Bernoulli {
    fn range(&self) -> (f64, f64) {
        (0.0, 1.0)
    }

    fn pdf(&self, x: f64) -> f64 {
        if x == 0.0 {
            1.0 - self.p
        } else if x == 1.0 {
            self.p
        } else {
            0.0
        }
    }

    fn cdf(&self, x: f64) -> f64 {
        if x < 1.0 {
            1.0 - self.p
        } else {
            1.0
        }
    }

    fn sf(&self, x: f64) -> f64 {
        if x < 1.0 {
            self.p
        } else {
            0.0
        }
    }

    fn quantile(&self, p: f64) -> f64 {
        if p <= 1.0 - self.p {
            0.0
        } else {
            1.0
        }
    }

    fn mean(&self) -> f64 {
        self.p
    }

    fn variance(&self) -> f64 {
        self.p * (1.0 - self.p)
    }

    fn mode(&self) -> Option<f64> {
        Some(if self.p <= 0.5 { 0.0 } else { 1.0 })
    }

    fn skewness(&self) -> f64 {
        (1.0 - 2.0 * self.p) / self.variance().sqrt()
    }

    fn excess_kurtosis(&self) -> f64 {
        let v = self.variance();
        (1.0 - 6.0 * v) / v
    }

    fn sample(&self, rng: &mut Generator) -> Result<OperationResult> {
        let dist = rand_distr::Bernoulli::new(self.p).map_err(sampling_error)?;
        Ok(OperationResult::Integer(i64::from(dist.sample(rng))))
    }
}

// =============================================================================
// Binomial
// =============================================================================

/// Number of successes in `n` independent trials with probability `p`.
///
/// `n` is held as `f64` but is always integral.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Binomial {
    pub n: f64,
    pub p: f64,
}

impl Univariate for Binomial {
    fn range(&self) -> (f64, f64) {
        (0.0, self.n)
    }

    fn pdf(&self, x: f64) -> f64 {
        if !is_integer(x) {
            return 0.0;
        }
        if self.p == 0.0 {
            return if x == 0.0 { 1.0 } else { 0.0 };
        }
        if self.p == 1.0 {
            return if x == self.n { 1.0 } else { 0.0 };
        }
        (ln_choose(self.n, x) + x * self.p.ln() + (self.n - x) * (-self.p).ln_1p()).exp()
    }

    fn cdf(&self, x: f64) -> f64 {
        let k = x.floor();
        if k >= self.n || self.p == 0.0 {
            return 1.0;
        }
        if self.p == 1.0 {
            return 0.0;
        }
        // P(X <= k) = 1 - I_p(k + 1, n - k)
        beta_inc_complement(k + 1.0, self.n - k, self.p)
    }

    fn sf(&self, x: f64) -> f64 {
        let k = x.floor();
        if k >= self.n || self.p == 0.0 {
            return 0.0;
        }
        if self.p == 1.0 {
            return 1.0;
        }
        beta_inc(k + 1.0, self.n - k, self.p)
    }

    fn quantile(&self, p: f64) -> f64 {
        discrete_quantile(|k| self.cdf(k), p, 0.0, self.n)
    }

    fn mean(&self) -> f64 {
        self.n * self.p
    }

    fn variance(&self) -> f64 {
        self.n * self.p * (1.0 - self.p)
    }

    fn mode(&self) -> Option<f64> {
        Some(((self.n + 1.0) * self.p).floor().min(self.n))
    }

    fn skewness(&self) -> f64 {
        (1.0 - 2.0 * self.p) / self.variance().sqrt()
    }

    fn excess_kurtosis(&self) -> f64 {
        (1.0 - 6.0 * self.p * (1.0 - self.p)) / self.variance()
    }

    fn sample(&self, rng: &mut Generator) -> Result<OperationResult> {
        let dist = rand_distr::Binomial::new(self.n as u64, self.p).map_err(sampling_error)?;
        Ok(OperationResult::Integer(dist.sample(rng) as i64))
    }
}

// =============================================================================
// Poisson
// =============================================================================

/// Count of events at mean rate `lambda`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Poisson {
    pub lambda: f64,
}

impl Univariate for Poisson {
    fn range(&self) -> (f64, f64) {
        (0.0, f64::INFINITY)
    }

    fn pdf(&self, x: f64) -> f64 {
        if !is_integer(x) || x.is_infinite() {
            return 0.0;
        }
        (x * self.lambda.ln() - self.lambda - ln_gamma(x + 1.0)).exp()
    }

    fn cdf(&self, x: f64) -> f64 {
        if x.is_infinite() {
            return 1.0;
        }
        gamma_q(x.floor() + 1.0, self.lambda)
    }

    fn sf(&self, x: f64) -> f64 {
        if x.is_infinite() {
            return 0.0;
        }
        gamma_p(x.floor() + 1.0, self.lambda)
    }

    fn quantile(&self, p: f64) -> f64 {
        if p >= 1.0 {
            return f64::INFINITY;
        }
        discrete_quantile(|k| self.cdf(k), p, 0.0, f64::INFINITY)
    }

    fn mean(&self) -> f64 {
        self.lambda
    }

    fn variance(&self) -> f64 {
        self.lambda
    }

    fn mode(&self) -> Option<f64> {
        Some(self.lambda.floor())
    }

    fn skewness(&self) -> f64 {
        1.0 / self.lambda.sqrt()
    }

    fn excess_kurtosis(&self) -> f64 {
        1.0 / self.lambda
    }

    fn sample(&self, rng: &mut Generator) -> Result<OperationResult> {
        let dist = rand_distr::Poisson::new(self.lambda).map_err(sampling_error)?;
        let draw: f64 = dist.sample(rng);
        // 2^63 is the first value an i64 cannot hold.
        if draw >= I64_LIMIT {
            return Err(sampling_error(format!(
                "poisson draw {draw:e} exceeds the integer range"
            )));
        }
        Ok(OperationResult::Integer(draw as i64))
    }
}
