//! Continuous families.

use std::f64::consts::{LN_2, PI};
use std::fmt::Display;

use rand::distributions::Open01;
use rand::Rng;
use rand_distr::Distribution;

use crate::error::{Result, StochasticError};
use crate::math::special::{
    gamma, gamma_p, gamma_q, inv_std_normal, ln_gamma, solve_increasing, std_normal_cdf,
    std_normal_pdf, std_normal_sf, HALF_LN_2PI,
};
use crate::math::Univariate;
use crate::rng::Generator;
use crate::types::OperationResult;

pub(crate) fn sampling_error(err: impl Display) -> StochasticError {
    StochasticError::SamplingError(err.to_string())
}

// =============================================================================
// Normal
// =============================================================================

/// Normal distribution N(mean, stddev²).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Normal {
    pub mean: f64,
    pub std_dev: f64,
}

impl Univariate for Normal {
    fn range(&self) -> (f64, f64) {
        (f64::NEG_INFINITY, f64::INFINITY)
    }

    fn pdf(&self, x: f64) -> f64 {
        std_normal_pdf((x - self.mean) / self.std_dev) / self.std_dev
    }

    fn ln_pdf(&self, x: f64) -> f64 {
        let z = (x - self.mean) / self.std_dev;
        -0.5 * z * z - HALF_LN_2PI - self.std_dev.ln()
    }

    fn cdf(&self, x: f64) -> f64 {
        std_normal_cdf((x - self.mean) / self.std_dev)
    }

    fn sf(&self, x: f64) -> f64 {
        std_normal_sf((x - self.mean) / self.std_dev)
    }

    fn quantile(&self, p: f64) -> f64 {
        self.mean + self.std_dev * inv_std_normal(p)
    }

    fn quantile_complement(&self, q: f64) -> f64 {
        self.mean - self.std_dev * inv_std_normal(q)
    }

    fn mean(&self) -> f64 {
        self.mean
    }

    fn variance(&self) -> f64 {
        self.std_dev * self.std_dev
    }

    fn mode(&self) -> Option<f64> {
        Some(self.mean)
    }

    fn median(&self) -> f64 {
        self.mean
    }

    fn skewness(&self) -> f64 {
        0.0
    }

    fn excess_kurtosis(&self) -> f64 {
        0.0
    }

    fn sample(&self, rng: &mut Generator) -> Result<OperationResult> {
        let dist = rand_distr::Normal::new(self.mean, self.std_dev).map_err(sampling_error)?;
        Ok(OperationResult::Float(dist.sample(rng)))
    }
}

// =============================================================================
// Log-normal
// =============================================================================

/// Log-normal distribution: ln X ~ N(location, scale²).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LogNormal {
    pub location: f64,
    pub scale: f64,
}

impl LogNormal {
    fn z(&self, x: f64) -> f64 {
        (x.ln() - self.location) / self.scale
    }
}

impl Univariate for LogNormal {
    fn range(&self) -> (f64, f64) {
        (0.0, f64::INFINITY)
    }

    fn pdf(&self, x: f64) -> f64 {
        if x == 0.0 {
            return 0.0;
        }
        std_normal_pdf(self.z(x)) / (self.scale * x)
    }

    fn cdf(&self, x: f64) -> f64 {
        if x == 0.0 {
            return 0.0;
        }
        std_normal_cdf(self.z(x))
    }

    fn sf(&self, x: f64) -> f64 {
        if x == 0.0 {
            return 1.0;
        }
        std_normal_sf(self.z(x))
    }

    fn quantile(&self, p: f64) -> f64 {
        (self.location + self.scale * inv_std_normal(p)).exp()
    }

    fn quantile_complement(&self, q: f64) -> f64 {
        (self.location - self.scale * inv_std_normal(q)).exp()
    }

    fn mean(&self) -> f64 {
        (self.location + 0.5 * self.scale * self.scale).exp()
    }

    fn variance(&self) -> f64 {
        let s2 = self.scale * self.scale;
        s2.exp_m1() * (2.0 * self.location + s2).exp()
    }

    fn mode(&self) -> Option<f64> {
        Some((self.location - self.scale * self.scale).exp())
    }

    fn median(&self) -> f64 {
        self.location.exp()
    }

    fn skewness(&self) -> f64 {
        let s2 = self.scale * self.scale;
        (s2.exp() + 2.0) * s2.exp_m1().sqrt()
    }

    fn excess_kurtosis(&self) -> f64 {
        let s2 = self.scale * self.scale;
        (4.0 * s2).exp() + 2.0 * (3.0 * s2).exp() + 3.0 * (2.0 * s2).exp() - 6.0
    }

    fn sample(&self, rng: &mut Generator) -> Result<OperationResult> {
        let dist = rand_distr::LogNormal::new(self.location, self.scale).map_err(sampling_error)?;
        Ok(OperationResult::Float(dist.sample(rng)))
    }
}

// =============================================================================
// Logistic
// =============================================================================

/// Logistic distribution with location and scale.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Logistic {
    pub location: f64,
    pub scale: f64,
}

impl Univariate for Logistic {
    fn range(&self) -> (f64, f64) {
        (f64::NEG_INFINITY, f64::INFINITY)
    }

    fn pdf(&self, x: f64) -> f64 {
        let e = (-((x - self.location) / self.scale).abs()).exp();
        e / (self.scale * (1.0 + e) * (1.0 + e))
    }

    fn cdf(&self, x: f64) -> f64 {
        1.0 / (1.0 + (-(x - self.location) / self.scale).exp())
    }

    fn sf(&self, x: f64) -> f64 {
        1.0 / (1.0 + ((x - self.location) / self.scale).exp())
    }

    fn quantile(&self, p: f64) -> f64 {
        self.location + self.scale * (p / (1.0 - p)).ln()
    }

    fn quantile_complement(&self, q: f64) -> f64 {
        self.location + self.scale * ((1.0 - q) / q).ln()
    }

    fn mean(&self) -> f64 {
        self.location
    }

    fn variance(&self) -> f64 {
        self.scale * self.scale * PI * PI / 3.0
    }

    fn mode(&self) -> Option<f64> {
        Some(self.location)
    }

    fn median(&self) -> f64 {
        self.location
    }

    fn skewness(&self) -> f64 {
        0.0
    }

    fn excess_kurtosis(&self) -> f64 {
        1.2
    }

    fn sample(&self, rng: &mut Generator) -> Result<OperationResult> {
        // rand_distr has no logistic sampler; invert the CDF on (0, 1).
        let u: f64 = rng.sample(Open01);
        Ok(OperationResult::Float(self.quantile(u)))
    }
}

// =============================================================================
// Exponential
// =============================================================================

/// Exponential distribution with rate `lambda`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Exponential {
    pub lambda: f64,
}

impl Univariate for Exponential {
    fn range(&self) -> (f64, f64) {
        (0.0, f64::INFINITY)
    }

    fn pdf(&self, x: f64) -> f64 {
        self.lambda * (-self.lambda * x).exp()
    }

    fn ln_pdf(&self, x: f64) -> f64 {
        self.lambda.ln() - self.lambda * x
    }

    fn cdf(&self, x: f64) -> f64 {
        -(-self.lambda * x).exp_m1()
    }

    fn sf(&self, x: f64) -> f64 {
        (-self.lambda * x).exp()
    }

    fn quantile(&self, p: f64) -> f64 {
        -(-p).ln_1p() / self.lambda
    }

    fn quantile_complement(&self, q: f64) -> f64 {
        -q.ln() / self.lambda
    }

    fn mean(&self) -> f64 {
        1.0 / self.lambda
    }

    fn variance(&self) -> f64 {
        1.0 / (self.lambda * self.lambda)
    }

    fn mode(&self) -> Option<f64> {
        Some(0.0)
    }

    fn median(&self) -> f64 {
        LN_2 / self.lambda
    }

    fn skewness(&self) -> f64 {
        2.0
    }

    fn excess_kurtosis(&self) -> f64 {
        6.0
    }

    fn sample(&self, rng: &mut Generator) -> Result<OperationResult> {
        let dist = rand_distr::Exp::new(self.lambda).map_err(sampling_error)?;
        Ok(OperationResult::Float(dist.sample(rng)))
    }
}

// =============================================================================
// Gamma
// =============================================================================

/// Gamma distribution with shape `k` and scale `θ`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Gamma {
    pub shape: f64,
    pub scale: f64,
}

impl Univariate for Gamma {
    fn range(&self) -> (f64, f64) {
        (0.0, f64::INFINITY)
    }

    fn pdf(&self, x: f64) -> f64 {
        if x == 0.0 {
            return match self.shape.partial_cmp(&1.0) {
                Some(std::cmp::Ordering::Less) => f64::INFINITY,
                Some(std::cmp::Ordering::Equal) => 1.0 / self.scale,
                _ => 0.0,
            };
        }
        self.ln_pdf(x).exp()
    }

    fn ln_pdf(&self, x: f64) -> f64 {
        if x == 0.0 {
            return self.pdf(x).ln();
        }
        (self.shape - 1.0) * x.ln() - x / self.scale - ln_gamma(self.shape) - self.shape * self.scale.ln()
    }

    fn cdf(&self, x: f64) -> f64 {
        gamma_p(self.shape, x / self.scale)
    }

    fn sf(&self, x: f64) -> f64 {
        gamma_q(self.shape, x / self.scale)
    }

    fn quantile(&self, p: f64) -> f64 {
        if p <= 0.0 {
            return 0.0;
        }
        if p >= 1.0 {
            return f64::INFINITY;
        }
        if p > 0.5 {
            return self.quantile_complement(1.0 - p);
        }
        solve_increasing(|x| self.cdf(x), p, 0.0, f64::INFINITY)
    }

    fn quantile_complement(&self, q: f64) -> f64 {
        if q >= 1.0 {
            return 0.0;
        }
        if q <= 0.0 {
            return f64::INFINITY;
        }
        solve_increasing(|x| -self.sf(x), -q, 0.0, f64::INFINITY)
    }

    fn mean(&self) -> f64 {
        self.shape * self.scale
    }

    fn variance(&self) -> f64 {
        self.shape * self.scale * self.scale
    }

    fn mode(&self) -> Option<f64> {
        (self.shape >= 1.0).then(|| (self.shape - 1.0) * self.scale)
    }

    fn skewness(&self) -> f64 {
        2.0 / self.shape.sqrt()
    }

    fn excess_kurtosis(&self) -> f64 {
        6.0 / self.shape
    }

    fn sample(&self, rng: &mut Generator) -> Result<OperationResult> {
        let dist = rand_distr::Gamma::new(self.shape, self.scale).map_err(sampling_error)?;
        Ok(OperationResult::Float(dist.sample(rng)))
    }
}

// =============================================================================
// Uniform
// =============================================================================

/// Continuous uniform distribution on `[lower, upper]`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Uniform {
    pub lower: f64,
    pub upper: f64,
}

impl Uniform {
    fn width(&self) -> f64 {
        self.upper - self.lower
    }
}

impl Univariate for Uniform {
    fn range(&self) -> (f64, f64) {
        (self.lower, self.upper)
    }

    fn domain(&self) -> (f64, f64) {
        (f64::NEG_INFINITY, f64::INFINITY)
    }

    fn pdf(&self, x: f64) -> f64 {
        if x < self.lower || x > self.upper {
            0.0
        } else {
            1.0 / self.width()
        }
    }

    fn cdf(&self, x: f64) -> f64 {
        ((x - self.lower) / self.width()).clamp(0.0, 1.0)
    }

    fn sf(&self, x: f64) -> f64 {
        ((self.upper - x) / self.width()).clamp(0.0, 1.0)
    }

    fn quantile(&self, p: f64) -> f64 {
        self.lower + p * self.width()
    }

    fn quantile_complement(&self, q: f64) -> f64 {
        self.upper - q * self.width()
    }

    fn mean(&self) -> f64 {
        0.5 * (self.lower + self.upper)
    }

    fn variance(&self) -> f64 {
        self.width() * self.width() / 12.0
    }

    fn mode(&self) -> Option<f64> {
        Some(self.lower)
    }

    fn median(&self) -> f64 {
        self.mean()
    }

    fn skewness(&self) -> f64 {
        0.0
    }

    fn excess_kurtosis(&self) -> f64 {
        -1.2
    }

    fn sample(&self, rng: &mut Generator) -> Result<OperationResult> {
        // Interpolate rather than scale by the width, which may overflow.
        let u: f64 = rng.gen();
        Ok(OperationResult::Float(self.lower * (1.0 - u) + self.upper * u))
    }
}

// =============================================================================
// Weibull
// =============================================================================

/// Weibull distribution with shape `k` and scale `λ`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Weibull {
    pub shape: f64,
    pub scale: f64,
}

impl Weibull {
    /// Γ(1 + i/k).
    fn raw_moment_factor(&self, i: f64) -> f64 {
        gamma(1.0 + i / self.shape)
    }
}

impl Univariate for Weibull {
    fn range(&self) -> (f64, f64) {
        (0.0, f64::INFINITY)
    }

    fn pdf(&self, x: f64) -> f64 {
        if x == 0.0 {
            return match self.shape.partial_cmp(&1.0) {
                Some(std::cmp::Ordering::Less) => f64::INFINITY,
                Some(std::cmp::Ordering::Equal) => 1.0 / self.scale,
                _ => 0.0,
            };
        }
        let t = x / self.scale;
        (self.shape / self.scale) * t.powf(self.shape - 1.0) * (-t.powf(self.shape)).exp()
    }

    fn cdf(&self, x: f64) -> f64 {
        -(-(x / self.scale).powf(self.shape)).exp_m1()
    }

    fn sf(&self, x: f64) -> f64 {
        (-(x / self.scale).powf(self.shape)).exp()
    }

    fn quantile(&self, p: f64) -> f64 {
        self.scale * (-(-p).ln_1p()).powf(1.0 / self.shape)
    }

    fn quantile_complement(&self, q: f64) -> f64 {
        self.scale * (-q.ln()).powf(1.0 / self.shape)
    }

    fn mean(&self) -> f64 {
        self.scale * self.raw_moment_factor(1.0)
    }

    fn variance(&self) -> f64 {
        let g1 = self.raw_moment_factor(1.0);
        self.scale * self.scale * (self.raw_moment_factor(2.0) - g1 * g1)
    }

    fn mode(&self) -> Option<f64> {
        if self.shape <= 1.0 {
            return Some(0.0);
        }
        Some(self.scale * ((self.shape - 1.0) / self.shape).powf(1.0 / self.shape))
    }

    fn median(&self) -> f64 {
        self.scale * LN_2.powf(1.0 / self.shape)
    }

    fn skewness(&self) -> f64 {
        let mu = self.mean();
        let sigma = self.std_dev();
        let m3 = self.scale.powi(3) * self.raw_moment_factor(3.0);
        (m3 - 3.0 * mu * sigma * sigma - mu.powi(3)) / sigma.powi(3)
    }

    fn excess_kurtosis(&self) -> f64 {
        let mu = self.mean();
        let sigma = self.std_dev();
        let m4 = self.scale.powi(4) * self.raw_moment_factor(4.0);
        let skew = self.skewness();
        (m4 - 4.0 * skew * sigma.powi(3) * mu - 6.0 * mu * mu * sigma * sigma - mu.powi(4))
            / sigma.powi(4)
            - 3.0
    }

    fn sample(&self, rng: &mut Generator) -> Result<OperationResult> {
        let dist = rand_distr::Weibull::new(self.scale, self.shape).map_err(sampling_error)?;
        Ok(OperationResult::Float(dist.sample(rng)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_standard_normal_reference_values() {
        let n = Normal { mean: 0.0, std_dev: 1.0 };
        assert_relative_eq!(n.pdf(0.0), 0.398_942_280_401_432_7, epsilon = 1e-15);
        assert_relative_eq!(n.cdf(0.0), 0.5, epsilon = 1e-15);
        assert_relative_eq!(n.quantile(0.5), 0.0, epsilon = 1e-15);
        assert_relative_eq!(n.ln_pdf(1.0), n.pdf(1.0).ln(), epsilon = 1e-14);
    }

    #[test]
    fn test_lognormal_moments() {
        let d = LogNormal { location: 0.0, scale: 1.0 };
        assert_relative_eq!(d.mean(), 0.5_f64.exp(), epsilon = 1e-14);
        assert_relative_eq!(d.median(), 1.0, epsilon = 1e-14);
        assert_relative_eq!(d.cdf(1.0), 0.5, epsilon = 1e-14);
        assert_eq!(d.pdf(0.0), 0.0);
    }

    #[test]
    fn test_logistic_quantile_inverts_cdf() {
        let d = Logistic { location: 1.0, scale: 2.0 };
        let x = d.quantile(0.3);
        assert_relative_eq!(d.cdf(x), 0.3, epsilon = 1e-14);
        assert_relative_eq!(d.quantile_complement(0.3), d.quantile(0.7), epsilon = 1e-12);
    }

    #[test]
    fn test_exponential_closed_forms() {
        let d = Exponential { lambda: 2.0 };
        assert_relative_eq!(d.pdf(0.0), 2.0, epsilon = 1e-15);
        assert_relative_eq!(d.cdf(1.0), 1.0 - (-2.0_f64).exp(), epsilon = 1e-15);
        assert_relative_eq!(d.median(), LN_2 / 2.0, epsilon = 1e-15);
        assert_relative_eq!(d.quantile(d.cdf(0.7)), 0.7, epsilon = 1e-12);
    }

    #[test]
    fn test_gamma_matches_exponential_when_shape_is_one() {
        let g = Gamma { shape: 1.0, scale: 0.5 };
        let e = Exponential { lambda: 2.0 };
        for &x in &[0.1, 0.5, 1.0, 3.0] {
            assert_relative_eq!(g.pdf(x), e.pdf(x), epsilon = 1e-13);
            assert_relative_eq!(g.cdf(x), e.cdf(x), epsilon = 1e-13);
        }
        assert_relative_eq!(g.quantile(0.9), e.quantile(0.9), epsilon = 1e-10);
    }

    #[test]
    fn test_gamma_mode_undefined_below_one() {
        assert_eq!(Gamma { shape: 0.5, scale: 1.0 }.mode(), None);
        assert_eq!(Gamma { shape: 3.0, scale: 2.0 }.mode(), Some(4.0));
    }

    #[test]
    fn test_uniform_outside_bounds() {
        let u = Uniform { lower: -1.0, upper: 3.0 };
        assert_eq!(u.pdf(5.0), 0.0);
        assert_eq!(u.cdf(-7.0), 0.0);
        assert_eq!(u.cdf(7.0), 1.0);
        assert_relative_eq!(u.pdf(0.0), 0.25, epsilon = 1e-15);
    }

    #[test]
    fn test_weibull_reduces_to_exponential() {
        let w = Weibull { shape: 1.0, scale: 2.0 };
        assert_relative_eq!(w.mean(), 2.0, epsilon = 1e-12);
        assert_relative_eq!(w.variance(), 4.0, epsilon = 1e-11);
        assert_relative_eq!(w.skewness(), 2.0, epsilon = 1e-9);
        assert_relative_eq!(w.excess_kurtosis(), 6.0, epsilon = 1e-8);
    }
}
