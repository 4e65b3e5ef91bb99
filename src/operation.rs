//! Operation catalogue.
//!
//! Every operation belongs to one of three classes that fix its calling
//! convention: point operations take one extra argument column, property
//! operations take none, and sampling draws from the thread's generator.

use crate::error::{Result, StochasticError};
use crate::family::{Distribution, Family};
use crate::rng::Generator;
use crate::types::{OperationResult, ResultShape};

/// Calling convention of an operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OperationClass {
    /// Evaluated at an evaluation point or probability.
    Point,
    /// Depends on the parameters alone.
    Property,
    /// Draws one variate per row.
    Sample,
}

impl OperationClass {
    #[must_use]
    pub fn name(&self) -> &'static str {
        match self {
            OperationClass::Point => "point",
            OperationClass::Property => "property",
            OperationClass::Sample => "sample",
        }
    }
}

/// Operations exposed for every family.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OperationKind {
    Sample,
    Pdf,
    LogPdf,
    Cdf,
    LogCdf,
    CdfComplement,
    LogCdfComplement,
    Quantile,
    QuantileComplement,
    Hazard,
    Chf,
    Mean,
    StdDev,
    Variance,
    Mode,
    Median,
    Skewness,
    Kurtosis,
    KurtosisExcess,
    Range,
    Support,
}

impl OperationKind {
    const ALL: [OperationKind; 21] = [
        OperationKind::Sample,
        OperationKind::Pdf,
        OperationKind::LogPdf,
        OperationKind::Cdf,
        OperationKind::LogCdf,
        OperationKind::CdfComplement,
        OperationKind::LogCdfComplement,
        OperationKind::Quantile,
        OperationKind::QuantileComplement,
        OperationKind::Hazard,
        OperationKind::Chf,
        OperationKind::Mean,
        OperationKind::StdDev,
        OperationKind::Variance,
        OperationKind::Mode,
        OperationKind::Median,
        OperationKind::Skewness,
        OperationKind::Kurtosis,
        OperationKind::KurtosisExcess,
        OperationKind::Range,
        OperationKind::Support,
    ];

    #[must_use]
    pub fn all() -> &'static [OperationKind] {
        &Self::ALL
    }

    /// Function-name suffix.
    #[must_use]
    pub fn name(&self) -> &'static str {
        match self {
            OperationKind::Sample => "sample",
            OperationKind::Pdf => "pdf",
            OperationKind::LogPdf => "log_pdf",
            OperationKind::Cdf => "cdf",
            OperationKind::LogCdf => "log_cdf",
            OperationKind::CdfComplement => "cdf_complement",
            OperationKind::LogCdfComplement => "log_cdf_complement",
            OperationKind::Quantile => "quantile",
            OperationKind::QuantileComplement => "quantile_complement",
            OperationKind::Hazard => "hazard",
            OperationKind::Chf => "chf",
            OperationKind::Mean => "mean",
            OperationKind::StdDev => "stddev",
            OperationKind::Variance => "variance",
            OperationKind::Mode => "mode",
            OperationKind::Median => "median",
            OperationKind::Skewness => "skewness",
            OperationKind::Kurtosis => "kurtosis",
            OperationKind::KurtosisExcess => "kurtosis_excess",
            OperationKind::Range => "range",
            OperationKind::Support => "support",
        }
    }

    #[must_use]
    pub fn class(&self) -> OperationClass {
        match self {
            OperationKind::Sample => OperationClass::Sample,
            OperationKind::Pdf
            | OperationKind::LogPdf
            | OperationKind::Cdf
            | OperationKind::LogCdf
            | OperationKind::CdfComplement
            | OperationKind::LogCdfComplement
            | OperationKind::Quantile
            | OperationKind::QuantileComplement
            | OperationKind::Hazard
            | OperationKind::Chf => OperationClass::Point,
            _ => OperationClass::Property,
        }
    }

    /// Name of the extra argument column, if any.
    #[must_use]
    pub fn argument(&self) -> Option<&'static str> {
        match self {
            OperationKind::Quantile | OperationKind::QuantileComplement => Some("p"),
            _ if self.class() == OperationClass::Point => Some("x"),
            _ => None,
        }
    }

    /// Output column shape of this operation for `family`.
    #[must_use]
    pub fn result_shape(&self, family: Family) -> ResultShape {
        match self {
            OperationKind::Sample if family.is_discrete() => ResultShape::Int64,
            OperationKind::Range | OperationKind::Support => ResultShape::Pair,
            _ => ResultShape::Float64,
        }
    }

    /// Returns whether the operation is offered for `family`.
    #[must_use]
    pub fn applies_to(&self, family: Family) -> bool {
        match self {
            OperationKind::Hazard | OperationKind::Chf => !family.is_discrete(),
            _ => true,
        }
    }

    /// Evaluates a point operation at `value`.
    ///
    /// # Errors
    ///
    /// Propagates `DomainError` from the distribution, and returns
    /// `WrongOperationClass` for operations that take no argument.
    pub fn eval_point(&self, dist: &Distribution, value: f64) -> Result<OperationResult> {
        let v = match self {
            OperationKind::Pdf => dist.pdf(value)?,
            OperationKind::LogPdf => dist.log_pdf(value)?,
            OperationKind::Cdf => dist.cdf(value)?,
            OperationKind::LogCdf => dist.log_cdf(value)?,
            OperationKind::CdfComplement => dist.cdf_complement(value)?,
            OperationKind::LogCdfComplement => dist.log_cdf_complement(value)?,
            OperationKind::Quantile => dist.quantile(value)?,
            OperationKind::QuantileComplement => dist.quantile_complement(value)?,
            OperationKind::Hazard => dist.hazard(value)?,
            OperationKind::Chf => dist.chf(value)?,
            other => return Err(other.wrong_class(OperationClass::Point)),
        };
        Ok(OperationResult::Float(v))
    }

    /// Evaluates a property operation.
    ///
    /// # Errors
    ///
    /// Propagates `DomainError` from the distribution, and returns
    /// `WrongOperationClass` for point and sampling operations.
    pub fn eval_property(&self, dist: &Distribution) -> Result<OperationResult> {
        let v = match self {
            OperationKind::Mean => dist.mean(),
            OperationKind::StdDev => dist.std_dev(),
            OperationKind::Variance => dist.variance(),
            OperationKind::Mode => dist.mode()?,
            OperationKind::Median => dist.median(),
            OperationKind::Skewness => dist.skewness(),
            OperationKind::Kurtosis => dist.kurtosis(),
            OperationKind::KurtosisExcess => dist.kurtosis_excess(),
            OperationKind::Range => {
                let (lo, hi) = dist.range();
                return Ok(OperationResult::Pair(lo, hi));
            }
            OperationKind::Support => {
                let (lo, hi) = dist.support();
                return Ok(OperationResult::Pair(lo, hi));
            }
            other => return Err(other.wrong_class(OperationClass::Property)),
        };
        Ok(OperationResult::Float(v))
    }

    fn wrong_class(self, requested: OperationClass) -> StochasticError {
        StochasticError::WrongOperationClass {
            operation: self.name(),
            class: self.class().name(),
            requested: requested.name(),
        }
    }

    /// Draws one variate.
    ///
    /// # Errors
    ///
    /// Propagates `SamplingError` from the sampler.
    pub fn eval_sample(dist: &Distribution, rng: &mut Generator) -> Result<OperationResult> {
        dist.sample(rng)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classes_and_arguments() {
        assert_eq!(OperationKind::Pdf.argument(), Some("x"));
        assert_eq!(OperationKind::Quantile.argument(), Some("p"));
        assert_eq!(OperationKind::Mean.argument(), None);
        assert_eq!(OperationKind::Sample.class(), OperationClass::Sample);
        assert_eq!(OperationKind::Support.class(), OperationClass::Property);
    }

    #[test]
    fn test_shapes() {
        assert_eq!(OperationKind::Sample.result_shape(Family::Normal), ResultShape::Float64);
        assert_eq!(OperationKind::Sample.result_shape(Family::Poisson), ResultShape::Int64);
        assert_eq!(OperationKind::Range.result_shape(Family::Binomial), ResultShape::Pair);
        assert_eq!(OperationKind::Mean.result_shape(Family::Binomial), ResultShape::Float64);
    }

    #[test]
    fn test_hazard_only_for_continuous() {
        assert!(OperationKind::Hazard.applies_to(Family::Gamma));
        assert!(!OperationKind::Chf.applies_to(Family::Bernoulli));
        assert!(OperationKind::Pdf.applies_to(Family::Bernoulli));
    }

    #[test]
    fn test_names_unique() {
        let mut names: Vec<_> = OperationKind::all().iter().map(OperationKind::name).collect();
        names.sort_unstable();
        names.dedup();
        assert_eq!(names.len(), OperationKind::all().len());
    }

    #[test]
    fn test_eval_dispatch() {
        let dist = Distribution::make(Family::Uniform, &[0.0, 4.0]);
        assert_eq!(
            OperationKind::Cdf.eval_point(&dist, 1.0).unwrap(),
            OperationResult::Float(0.25)
        );
        assert_eq!(
            OperationKind::Range.eval_property(&dist).unwrap(),
            OperationResult::Pair(0.0, 4.0)
        );
    }

    #[test]
    fn test_wrong_class_is_rejected() {
        let dist = Distribution::make(Family::Uniform, &[0.0, 4.0]);
        let err = OperationKind::Pdf.eval_property(&dist).unwrap_err();
        assert!(matches!(
            err,
            StochasticError::WrongOperationClass {
                operation: "pdf",
                class: "point",
                requested: "property",
            }
        ));
        assert!(matches!(
            OperationKind::Mean.eval_point(&dist, 1.0),
            Err(StochasticError::WrongOperationClass { .. })
        ));
        assert!(matches!(
            OperationKind::Sample.eval_property(&dist),
            Err(StochasticError::WrongOperationClass { class: "sample", .. })
        ));
    }
}
