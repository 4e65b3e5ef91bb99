//! Distribution families: parameter layout, validation and construction.

pub mod distribution;
pub mod validate;

use std::fmt;

use crate::error::Result;
use crate::kernel::FamilyStrategy;

pub use distribution::Distribution;
pub use validate::validate;

/// How a parameter is typed at the host boundary.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParameterKind {
    /// Any real number, passed as `Float64`.
    Real,
    /// A non-negative integer count, passed as `Int64`.
    Count,
}

/// Name and kind of one distribution parameter.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ParameterSpec {
    pub name: &'static str,
    pub kind: ParameterKind,
}

const fn real(name: &'static str) -> ParameterSpec {
    ParameterSpec {
        name,
        kind: ParameterKind::Real,
    }
}

const fn count(name: &'static str) -> ParameterSpec {
    ParameterSpec {
        name,
        kind: ParameterKind::Count,
    }
}

/// Supported distribution families.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Family {
    Normal,
    LogNormal,
    Logistic,
    Exponential,
    Gamma,
    Uniform,
    Weibull,
    Bernoulli,
    Binomial,
    Poisson,
}

impl Family {
    const ALL: [Family; 10] = [
        Family::Normal,
        Family::LogNormal,
        Family::Logistic,
        Family::Exponential,
        Family::Gamma,
        Family::Uniform,
        Family::Weibull,
        Family::Bernoulli,
        Family::Binomial,
        Family::Poisson,
    ];

    /// Every family, in registration order.
    #[must_use]
    pub fn all() -> &'static [Family] {
        &Self::ALL
    }

    /// Lowercase name used as the function-name prefix.
    #[must_use]
    pub fn name(&self) -> &'static str {
        match self {
            Family::Normal => "normal",
            Family::LogNormal => "lognormal",
            Family::Logistic => "logistic",
            Family::Exponential => "exponential",
            Family::Gamma => "gamma",
            Family::Uniform => "uniform",
            Family::Weibull => "weibull",
            Family::Bernoulli => "bernoulli",
            Family::Binomial => "binomial",
            Family::Poisson => "poisson",
        }
    }

    /// Looks a family up by name.
    #[must_use]
    pub fn from_name(name: &str) -> Option<Family> {
        Self::ALL.iter().copied().find(|f| f.name() == name)
    }

    /// Parameters in call order.
    #[must_use]
    pub fn parameters(&self) -> &'static [ParameterSpec] {
        const NORMAL: [ParameterSpec; 2] = [real("mean"), real("stddev")];
        const LOCATION_SCALE: [ParameterSpec; 2] = [real("location"), real("scale")];
        const SHAPE_SCALE: [ParameterSpec; 2] = [real("shape"), real("scale")];
        const RATE: [ParameterSpec; 1] = [real("lambda")];
        const BOUNDS: [ParameterSpec; 2] = [real("lower"), real("upper")];
        const PROBABILITY: [ParameterSpec; 1] = [real("p")];
        const TRIALS: [ParameterSpec; 2] = [count("n"), real("p")];

        match self {
            Family::Normal => &NORMAL,
            Family::LogNormal | Family::Logistic => &LOCATION_SCALE,
            Family::Gamma | Family::Weibull => &SHAPE_SCALE,
            Family::Exponential | Family::Poisson => &RATE,
            Family::Uniform => &BOUNDS,
            Family::Bernoulli => &PROBABILITY,
            Family::Binomial => &TRIALS,
        }
    }

    /// Returns true for families over the integers.
    #[must_use]
    pub fn is_discrete(&self) -> bool {
        matches!(self, Family::Bernoulli | Family::Binomial | Family::Poisson)
    }
}

impl fmt::Display for Family {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FamilyStrategy for Family {
    type Dist = Distribution;

    fn name(&self) -> &'static str {
        Family::name(self)
    }

    fn arity(&self) -> usize {
        self.parameters().len()
    }

    fn validate(&self, params: &[f64]) -> Result<()> {
        validate(*self, params)
    }

    fn construct(&self, params: &[f64]) -> Distribution {
        Distribution::make(*self, params)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_names_round_trip() {
        for family in Family::all() {
            assert_eq!(Family::from_name(family.name()), Some(*family));
        }
        assert_eq!(Family::from_name("cauchy"), None);
    }

    #[test]
    fn test_arity() {
        assert_eq!(FamilyStrategy::arity(&Family::Normal), 2);
        assert_eq!(FamilyStrategy::arity(&Family::Poisson), 1);
        assert_eq!(Family::Binomial.parameters()[0].kind, ParameterKind::Count);
    }

    #[test]
    fn test_discrete_families() {
        let discrete: Vec<_> = Family::all().iter().filter(|f| f.is_discrete()).collect();
        assert_eq!(
            discrete,
            vec![&Family::Bernoulli, &Family::Binomial, &Family::Poisson]
        );
    }
}
