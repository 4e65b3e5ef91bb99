//! Parameter domain checks.

use crate::error::{Result, StochasticError};
use crate::family::Family;

/// Largest trial count whose every integer is exactly representable.
const MAX_TRIALS: f64 = 9_007_199_254_740_992.0;

/// Checks a parameter tuple against the family's legal domain.
///
/// `params` must be non-null and in the order given by [`Family::parameters`].
///
/// # Errors
///
/// Returns `InvalidParameter` naming the first offending parameter, or
/// `ArgumentCount` if the tuple has the wrong length.
pub fn validate(family: Family, params: &[f64]) -> Result<()> {
    let specs = family.parameters();
    if params.len() != specs.len() {
        return Err(StochasticError::ArgumentCount {
            function: family.name().to_string(),
            expected: specs.len(),
            actual: params.len(),
        });
    }
    let check = Check { family, params };
    match family {
        Family::Normal | Family::LogNormal | Family::Logistic => {
            check.finite(0)?;
            check.positive(1)
        }
        Family::Exponential | Family::Poisson => check.positive(0),
        Family::Gamma | Family::Weibull => {
            check.positive(0)?;
            check.positive(1)
        }
        Family::Uniform => {
            check.finite(0)?;
            check.finite(1)?;
            if params[0] >= params[1] {
                return Err(check.fail(0, "must be less than upper"));
            }
            Ok(())
        }
        Family::Bernoulli => check.probability(0),
        Family::Binomial => {
            check.count(0)?;
            check.probability(1)
        }
    }
}

struct Check<'a> {
    family: Family,
    params: &'a [f64],
}

impl Check<'_> {
    fn fail(&self, index: usize, reason: &'static str) -> StochasticError {
        StochasticError::InvalidParameter {
            family: self.family.name(),
            parameter: self.family.parameters()[index].name,
            value: self.params[index],
            reason,
        }
    }

    fn finite(&self, index: usize) -> Result<()> {
        if self.params[index].is_finite() {
            Ok(())
        } else {
            Err(self.fail(index, "must be finite"))
        }
    }

    fn positive(&self, index: usize) -> Result<()> {
        self.finite(index)?;
        if self.params[index] > 0.0 {
            Ok(())
        } else {
            Err(self.fail(index, "must be greater than 0"))
        }
    }

    fn probability(&self, index: usize) -> Result<()> {
        if (0.0..=1.0).contains(&self.params[index]) {
            Ok(())
        } else {
            Err(self.fail(index, "must lie in [0, 1]"))
        }
    }

    fn count(&self, index: usize) -> Result<()> {
        let v = self.params[index];
        if v >= 1.0 && v <= MAX_TRIALS && v.fract() == 0.0 {
            Ok(())
        } else {
            Err(self.fail(index, "must be a positive integer"))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn reason(family: Family, params: &[f64]) -> (&'static str, &'static str) {
        match validate(family, params) {
            Err(StochasticError::InvalidParameter {
                parameter, reason, ..
            }) => (parameter, reason),
            other => panic!("expected InvalidParameter, got {other:?}"),
        }
    }

    #[test]
    fn test_accepts_legal_tuples() {
        assert!(validate(Family::Normal, &[0.0, 1.0]).is_ok());
        assert!(validate(Family::Uniform, &[-1.0, 1.0]).is_ok());
        assert!(validate(Family::Bernoulli, &[0.0]).is_ok());
        assert!(validate(Family::Bernoulli, &[1.0]).is_ok());
        assert!(validate(Family::Binomial, &[10.0, 0.3]).is_ok());
        assert!(validate(Family::Poisson, &[0.5]).is_ok());
    }

    #[test]
    fn test_scale_must_be_positive() {
        assert_eq!(reason(Family::Normal, &[0.0, 0.0]), ("stddev", "must be greater than 0"));
        assert_eq!(reason(Family::LogNormal, &[0.0, -1.0]).0, "scale");
        assert_eq!(reason(Family::Gamma, &[-2.0, 1.0]).0, "shape");
        assert_eq!(reason(Family::Exponential, &[0.0]).0, "lambda");
    }

    #[test]
    fn test_non_finite_rejected() {
        assert_eq!(reason(Family::Normal, &[f64::NAN, 1.0]), ("mean", "must be finite"));
        assert_eq!(reason(Family::Normal, &[0.0, f64::INFINITY]), ("stddev", "must be finite"));
        assert_eq!(reason(Family::Bernoulli, &[f64::NAN]).0, "p");
    }

    #[test]
    fn test_probability_outside_unit_interval() {
        assert_eq!(reason(Family::Binomial, &[10.0, 1.5]), ("p", "must lie in [0, 1]"));
        assert_eq!(reason(Family::Bernoulli, &[-0.1]).0, "p");
    }

    #[test]
    fn test_trial_count_must_be_positive_integer() {
        assert_eq!(reason(Family::Binomial, &[2.5, 0.5]).0, "n");
        assert_eq!(reason(Family::Binomial, &[0.0, 0.5]).0, "n");
        assert_eq!(reason(Family::Binomial, &[1e300, 0.5]).0, "n");
    }

    #[test]
    fn test_uniform_bounds_ordered() {
        assert_eq!(reason(Family::Uniform, &[1.0, 1.0]).0, "lower");
    }

    #[test]
    fn test_wrong_arity() {
        assert!(matches!(
            validate(Family::Normal, &[0.0]),
            Err(StochasticError::ArgumentCount { expected: 2, actual: 1, .. })
        ));
    }
}
