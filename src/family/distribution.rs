//! Immutable distribution handles with checked evaluation.

use crate::error::{Result, StochasticError};
use crate::family::Family;
use crate::math::{
    Bernoulli, Binomial, Exponential, Gamma, LogNormal, Logistic, Normal, Poisson, Uniform,
    Univariate, Weibull,
};
use crate::rng::Generator;
use crate::types::OperationResult;

/// A distribution bound to validated parameters.
///
/// Construction is O(1) and allocation free. Evaluation methods reject NaN
/// and out-of-domain inputs with `DomainError` before delegating to the
/// family's formulae.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Distribution {
    Normal(Normal),
    LogNormal(LogNormal),
    Logistic(Logistic),
    Exponential(Exponential),
    Gamma(Gamma),
    Uniform(Uniform),
    Weibull(Weibull),
    Bernoulli(Bernoulli),
    Binomial(Binomial),
    Poisson(Poisson),
}

impl Distribution {
    /// Binds a parameter tuple that has already passed [`validate`](super::validate).
    ///
    /// # Panics
    ///
    /// Panics if `params` is shorter than the family's arity.
    #[must_use]
    pub fn make(family: Family, params: &[f64]) -> Self {
        match family {
            Family::Normal => Distribution::Normal(Normal {
                mean: params[0],
                std_dev: params[1],
            }),
            Family::LogNormal => Distribution::LogNormal(LogNormal {
                location: params[0],
                scale: params[1],
            }),
            Family::Logistic => Distribution::Logistic(Logistic {
                location: params[0],
                scale: params[1],
            }),
            Family::Exponential => Distribution::Exponential(Exponential { lambda: params[0] }),
            Family::Gamma => Distribution::Gamma(Gamma {
                shape: params[0],
                scale: params[1],
            }),
            Family::Uniform => Distribution::Uniform(Uniform {
                lower: params[0],
                upper: params[1],
            }),
            Family::Weibull => Distribution::Weibull(Weibull {
                shape: params[0],
                scale: params[1],
            }),
            Family::Bernoulli => Distribution::Bernoulli(Bernoulli { p: params[0] }),
            Family::Binomial => Distribution::Binomial(Binomial {
                n: params[0],
                p: params[1],
            }),
            Family::Poisson => Distribution::Poisson(Poisson { lambda: params[0] }),
        }
    }

    #[must_use]
    pub fn family(&self) -> Family {
        match self {
            Distribution::Normal(_) => Family::Normal,
            Distribution::LogNormal(_) => Family::LogNormal,
            Distribution::Logistic(_) => Family::Logistic,
            Distribution::Exponential(_) => Family::Exponential,
            Distribution::Gamma(_) => Family::Gamma,
            Distribution::Uniform(_) => Family::Uniform,
            Distribution::Weibull(_) => Family::Weibull,
            Distribution::Bernoulli(_) => Family::Bernoulli,
            Distribution::Binomial(_) => Family::Binomial,
            Distribution::Poisson(_) => Family::Poisson,
        }
    }

    /// Unchecked formulae for this distribution.
    #[must_use]
    pub fn math(&self) -> &dyn Univariate {
        match self {
            Distribution::Normal(d) => d,
            Distribution::LogNormal(d) => d,
            Distribution::Logistic(d) => d,
            Distribution::Exponential(d) => d,
            Distribution::Gamma(d) => d,
            Distribution::Uniform(d) => d,
            Distribution::Weibull(d) => d,
            Distribution::Bernoulli(d) => d,
            Distribution::Binomial(d) => d,
            Distribution::Poisson(d) => d,
        }
    }

    fn domain_error(&self, operation: &'static str, message: String) -> StochasticError {
        StochasticError::domain(self.family().name(), operation, message)
    }

    fn check_point(&self, operation: &'static str, x: f64) -> Result<()> {
        if x.is_nan() {
            return Err(self.domain_error(operation, "evaluation point is NaN".into()));
        }
        let (lo, hi) = self.math().domain();
        if x < lo || x > hi {
            return Err(self.domain_error(
                operation,
                format!("evaluation point {x} outside [{lo}, {hi}]"),
            ));
        }
        Ok(())
    }

    fn check_probability(&self, operation: &'static str, p: f64) -> Result<()> {
        if (0.0..=1.0).contains(&p) {
            Ok(())
        } else {
            Err(self.domain_error(operation, format!("probability {p} outside [0, 1]")))
        }
    }

    // ==================== Point Operations ====================

    /// # Errors
    ///
    /// Returns `DomainError` for NaN or out-of-domain `x`.
    pub fn pdf(&self, x: f64) -> Result<f64> {
        self.check_point("pdf", x)?;
        Ok(self.math().pdf(x))
    }

    /// # Errors
    ///
    /// Returns `DomainError` for NaN or out-of-domain `x`.
    pub fn log_pdf(&self, x: f64) -> Result<f64> {
        self.check_point("log_pdf", x)?;
        Ok(self.math().ln_pdf(x))
    }

    /// # Errors
    ///
    /// Returns `DomainError` for NaN or out-of-domain `x`.
    pub fn cdf(&self, x: f64) -> Result<f64> {
        self.check_point("cdf", x)?;
        Ok(self.math().cdf(x))
    }

    /// # Errors
    ///
    /// Returns `DomainError` for NaN or out-of-domain `x`.
    pub fn log_cdf(&self, x: f64) -> Result<f64> {
        self.check_point("log_cdf", x)?;
        Ok(self.math().cdf(x).ln())
    }

    /// # Errors
    ///
    /// Returns `DomainError` for NaN or out-of-domain `x`.
    pub fn cdf_complement(&self, x: f64) -> Result<f64> {
        self.check_point("cdf_complement", x)?;
        Ok(self.math().sf(x))
    }

    /// # Errors
    ///
    /// Returns `DomainError` for NaN or out-of-domain `x`.
    pub fn log_cdf_complement(&self, x: f64) -> Result<f64> {
        self.check_point("log_cdf_complement", x)?;
        Ok(self.math().sf(x).ln())
    }

    /// # Errors
    ///
    /// Returns `DomainError` if `p` is NaN or outside [0, 1].
    pub fn quantile(&self, p: f64) -> Result<f64> {
        self.check_probability("quantile", p)?;
        Ok(self.math().quantile(p))
    }

    /// # Errors
    ///
    /// Returns `DomainError` if `q` is NaN or outside [0, 1].
    pub fn quantile_complement(&self, q: f64) -> Result<f64> {
        self.check_probability("quantile_complement", q)?;
        Ok(self.math().quantile_complement(q))
    }

    /// Hazard rate f(x) / (1 − F(x)).
    ///
    /// # Errors
    ///
    /// Returns `DomainError` for NaN or out-of-domain `x`.
    pub fn hazard(&self, x: f64) -> Result<f64> {
        self.check_point("hazard", x)?;
        let math = self.math();
        let survival = math.sf(x);
        let density = math.pdf(x);
        if survival == 0.0 {
            return Ok(if density == 0.0 { 0.0 } else { f64::INFINITY });
        }
        Ok(density / survival)
    }

    /// Cumulative hazard −ln(1 − F(x)).
    ///
    /// # Errors
    ///
    /// Returns `DomainError` for NaN or out-of-domain `x`.
    pub fn chf(&self, x: f64) -> Result<f64> {
        self.check_point("chf", x)?;
        Ok(-self.math().sf(x).ln())
    }

    // ==================== Properties ====================

    #[must_use]
    pub fn mean(&self) -> f64 {
        self.math().mean()
    }

    #[must_use]
    pub fn std_dev(&self) -> f64 {
        self.math().std_dev()
    }

    #[must_use]
    pub fn variance(&self) -> f64 {
        self.math().variance()
    }

    /// # Errors
    ///
    /// Returns `DomainError` where the mode is undefined (gamma with shape < 1).
    pub fn mode(&self) -> Result<f64> {
        self.math()
            .mode()
            .ok_or_else(|| self.domain_error("mode", "mode is undefined for these parameters".into()))
    }

    #[must_use]
    pub fn median(&self) -> f64 {
        self.math().median()
    }

    #[must_use]
    pub fn skewness(&self) -> f64 {
        self.math().skewness()
    }

    #[must_use]
    pub fn kurtosis(&self) -> f64 {
        self.math().excess_kurtosis() + 3.0
    }

    #[must_use]
    pub fn kurtosis_excess(&self) -> f64 {
        self.math().excess_kurtosis()
    }

    /// Closed interval of representable variates; unbounded ends are infinite.
    #[must_use]
    pub fn range(&self) -> (f64, f64) {
        self.math().range()
    }

    /// Interval of positive density; unbounded ends are `±f64::MAX`.
    #[must_use]
    pub fn support(&self) -> (f64, f64) {
        self.math().support()
    }

    // ==================== Sampling ====================

    /// Draws one variate from `rng`.
    ///
    /// # Errors
    ///
    /// Returns `SamplingError` if the sampler rejects the parameters.
    pub fn sample(&self, rng: &mut Generator) -> Result<OperationResult> {
        self.math().sample(rng)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use rand::SeedableRng;

    fn normal() -> Distribution {
        Distribution::make(Family::Normal, &[0.0, 1.0])
    }

    #[test]
    fn test_make_binds_parameters() {
        assert_eq!(
            Distribution::make(Family::Binomial, &[10.0, 0.3]),
            Distribution::Binomial(Binomial { n: 10.0, p: 0.3 })
        );
        assert_eq!(normal().family(), Family::Normal);
    }

    #[test]
    fn test_nan_point_is_domain_error() {
        let err = normal().pdf(f64::NAN).unwrap_err();
        assert!(err.is_domain_error());
        assert!(err.to_string().contains("normal_pdf"));
    }

    #[test]
    fn test_point_outside_half_bounded_range() {
        let exp = Distribution::make(Family::Exponential, &[1.0]);
        assert!(exp.cdf(-1.0).unwrap_err().is_domain_error());
        assert!(exp.cdf(0.0).is_ok());
    }

    #[test]
    fn test_uniform_accepts_points_outside_bounds() {
        let u = Distribution::make(Family::Uniform, &[0.0, 1.0]);
        assert_eq!(u.pdf(2.0).unwrap(), 0.0);
        assert_eq!(u.cdf(-2.0).unwrap(), 0.0);
    }

    #[test]
    fn test_probability_checks() {
        assert!(normal().quantile(1.5).unwrap_err().is_domain_error());
        assert!(normal().quantile_complement(-0.1).unwrap_err().is_domain_error());
        assert!(normal().quantile(f64::NAN).is_err());
        assert_eq!(normal().quantile(1.0).unwrap(), f64::INFINITY);
    }

    #[test]
    fn test_log_variants_match_logs() {
        let d = normal();
        assert_relative_eq!(d.log_cdf(0.3).unwrap(), d.cdf(0.3).unwrap().ln(), epsilon = 1e-15);
        assert_relative_eq!(
            d.log_cdf_complement(0.3).unwrap(),
            d.cdf_complement(0.3).unwrap().ln(),
            epsilon = 1e-15
        );
    }

    #[test]
    fn test_exponential_hazard_is_constant() {
        let d = Distribution::make(Family::Exponential, &[2.5]);
        for &x in &[0.0, 0.5, 3.0] {
            assert_relative_eq!(d.hazard(x).unwrap(), 2.5, epsilon = 1e-12);
            assert_relative_eq!(d.chf(x).unwrap(), 2.5 * x, epsilon = 1e-12);
        }
    }

    #[test]
    fn test_gamma_mode_below_one_is_domain_error() {
        let d = Distribution::make(Family::Gamma, &[0.5, 1.0]);
        assert!(d.mode().unwrap_err().is_domain_error());
    }

    #[test]
    fn test_kurtosis_is_excess_plus_three() {
        let d = Distribution::make(Family::Poisson, &[2.0]);
        assert_relative_eq!(d.kurtosis(), d.kurtosis_excess() + 3.0, epsilon = 1e-15);
    }

    #[test]
    fn test_support_of_unbounded_family_is_finite() {
        assert_eq!(normal().range(), (f64::NEG_INFINITY, f64::INFINITY));
        assert_eq!(normal().support(), (-f64::MAX, f64::MAX));
    }

    #[test]
    fn test_discrete_draws_are_integers() {
        let mut rng = Generator::seed_from_u64(1);
        let d = Distribution::make(Family::Binomial, &[10.0, 0.5]);
        for _ in 0..32 {
            match d.sample(&mut rng).unwrap() {
                OperationResult::Integer(k) => assert!((0..=10).contains(&k)),
                other => panic!("unexpected {other:?}"),
            }
        }
    }
}
