//! Batch evaluation kernel.
//!
//! Lifts a row-wise distribution operation into a batch-wide computation.
//! The kernel inspects the shape of every input column and picks one of three
//! paths:
//!
//! | parameters | argument | path                                            |
//! |------------|----------|-------------------------------------------------|
//! | constant   | none     | validate, construct and evaluate once           |
//! | constant   | constant | validate, construct and evaluate once           |
//! | constant   | varying  | validate and construct on the first non-null    |
//! |            |          | argument row, iterate argument                  |
//! | any varying| any      | validate, construct and evaluate per row        |
//!
//! Nulls short-circuit: a null in any input of a row yields a null output row
//! without touching the validator or the factory. Validation and domain errors
//! abort the whole batch.

pub mod encoder;

use std::sync::Arc;

use datafusion::logical_expr::ColumnarValue;

use crate::config::KernelConfig;
use crate::error::{Result, StochasticError};
use crate::rng::{Generator, RngProvider};
use crate::types::{Column, OperationResult, ResultShape};

use self::encoder::OutputBuilder;

/// Largest number of distribution parameters a family may take.
pub const MAX_PARAMETERS: usize = 2;

/// Family capability consumed by the kernel.
pub trait FamilyStrategy: Send + Sync {
    /// Distribution handle built from a validated parameter tuple.
    type Dist;

    fn name(&self) -> &'static str;

    /// Number of parameter columns.
    fn arity(&self) -> usize;

    /// Checks one non-null parameter tuple.
    ///
    /// # Errors
    ///
    /// Returns `InvalidParameter` if the tuple is outside the family's domain.
    fn validate(&self, params: &[f64]) -> Result<()>;

    /// Binds a validated tuple.
    fn construct(&self, params: &[f64]) -> Self::Dist;
}

/// Row-wise operation applied by the kernel.
pub enum Invocation<'a, D> {
    /// Takes one argument column after the parameters.
    Point(&'a dyn Fn(&D, f64) -> Result<OperationResult>),
    /// Depends on the parameters alone.
    Property(&'a dyn Fn(&D) -> Result<OperationResult>),
    /// Draws from the calling thread's generator.
    Sample(&'a dyn Fn(&D, &mut Generator) -> Result<OperationResult>),
}

impl<D> Invocation<'_, D> {
    fn takes_argument(&self) -> bool {
        matches!(self, Invocation::Point(_))
    }

    fn label(&self) -> &'static str {
        match self {
            Invocation::Point(_) => "point",
            Invocation::Property(_) => "property",
            Invocation::Sample(_) => "sample",
        }
    }
}

/// Evaluates invocations over batches of columns.
#[derive(Debug, Clone)]
pub struct BatchKernel {
    config: KernelConfig,
    rng: Arc<RngProvider>,
}

impl Default for BatchKernel {
    fn default() -> Self {
        Self::with_rng(KernelConfig::default(), RngProvider::global())
    }
}

impl BatchKernel {
    /// Creates a kernel with a private generator provider seeded from `config`.
    #[must_use]
    pub fn new(config: KernelConfig) -> Self {
        let rng = Arc::new(RngProvider::new(config.global_seed));
        Self { config, rng }
    }

    /// Creates a kernel drawing from an existing provider.
    #[must_use]
    pub fn with_rng(config: KernelConfig, rng: Arc<RngProvider>) -> Self {
        Self { config, rng }
    }

    #[must_use]
    pub fn config(&self) -> &KernelConfig {
        &self.config
    }

    #[must_use]
    pub fn rng(&self) -> &Arc<RngProvider> {
        &self.rng
    }

    /// Evaluates `invocation` over one batch.
    ///
    /// `args` holds the parameter columns in family order, followed by the
    /// argument column for point operations. The output is constant when
    /// every input is constant and the operation does not sample.
    ///
    /// # Errors
    ///
    /// Returns `ArgumentCount`, `LengthMismatch` or `TypeError` for malformed
    /// input, and propagates any validation, domain or shape error raised while
    /// evaluating a row. No partial output is returned.
    pub fn evaluate<S: FamilyStrategy>(
        &self,
        strategy: &S,
        args: &[ColumnarValue],
        num_rows: usize,
        shape: ResultShape,
        invocation: &Invocation<'_, S::Dist>,
    ) -> Result<ColumnarValue> {
        let arity = strategy.arity();
        let expected = arity + usize::from(invocation.takes_argument());
        if args.len() != expected || arity > MAX_PARAMETERS {
            return Err(StochasticError::ArgumentCount {
                function: strategy.name().to_string(),
                expected,
                actual: args.len(),
            });
        }

        let columns = args
            .iter()
            .map(Column::try_from_columnar)
            .collect::<Result<Vec<_>>>()?;
        for column in &columns {
            column.check_rows(num_rows)?;
        }
        let (params, argument) = columns.split_at(arity);
        let argument = argument.first();

        if self.config.constant_fast_path && params.iter().all(Column::is_constant) {
            tracing::trace!(
                family = strategy.name(),
                invocation = invocation.label(),
                num_rows,
                "constant parameter path"
            );
            return self.evaluate_constant(strategy, params, argument, num_rows, shape, invocation);
        }

        tracing::trace!(
            family = strategy.name(),
            invocation = invocation.label(),
            num_rows,
            "varying path"
        );
        self.evaluate_varying(strategy, params, argument, num_rows, shape, invocation)
    }

    /// Parameters shared by every row: validate and construct at most once.
    ///
    /// A null anywhere in the constant inputs short-circuits before
    /// validation, and a varying argument defers validation to its first
    /// non-null row, so this path fails exactly when the per-row path would.
    fn evaluate_constant<S: FamilyStrategy>(
        &self,
        strategy: &S,
        params: &[Column],
        argument: Option<&Column>,
        num_rows: usize,
        shape: ResultShape,
        invocation: &Invocation<'_, S::Dist>,
    ) -> Result<ColumnarValue> {
        let mut values = [0.0; MAX_PARAMETERS];
        for (slot, column) in values.iter_mut().zip(params) {
            match column.constant().flatten() {
                Some(v) => *slot = v,
                None => return Ok(encoder::constant_null(shape)),
            }
        }
        let values = &values[..params.len()];
        let build = || -> Result<S::Dist> {
            strategy.validate(values)?;
            Ok(strategy.construct(values))
        };

        match invocation {
            Invocation::Property(f) => encoder::constant(f(&build()?)?, shape),
            Invocation::Point(f) => match argument {
                Some(Column::Constant(Some(x))) => encoder::constant(f(&build()?, *x)?, shape),
                Some(Column::Constant(None)) | None => Ok(encoder::constant_null(shape)),
                Some(column) => {
                    let mut out = OutputBuilder::new(shape, num_rows);
                    let mut dist = None;
                    for row in 0..num_rows {
                        let Some(x) = column.value(row) else {
                            out.append_null();
                            continue;
                        };
                        if dist.is_none() {
                            dist = Some(build()?);
                        }
                        if let Some(dist) = &dist {
                            out.append(f(dist, x)?)?;
                        }
                    }
                    Ok(out.finish())
                }
            },
            Invocation::Sample(f) => {
                let mut out = OutputBuilder::new(shape, num_rows);
                if num_rows == 0 {
                    return Ok(out.finish());
                }
                let dist = build()?;
                self.rng.with_generator(|rng| {
                    for _ in 0..num_rows {
                        out.append(f(&dist, rng)?)?;
                    }
                    Ok::<_, StochasticError>(())
                })?;
                Ok(out.finish())
            }
        }
    }

    /// At least one parameter varies: resolve, validate and construct per row.
    fn evaluate_varying<S: FamilyStrategy>(
        &self,
        strategy: &S,
        params: &[Column],
        argument: Option<&Column>,
        num_rows: usize,
        shape: ResultShape,
        invocation: &Invocation<'_, S::Dist>,
    ) -> Result<ColumnarValue> {
        let mut out = OutputBuilder::new(shape, num_rows);
        let arity = params.len();
        let mut values = [0.0; MAX_PARAMETERS];

        let mut row_loop = |rng: Option<&mut Generator>| -> Result<()> {
            let mut rng = rng;
            for row in 0..num_rows {
                let Some(x) = resolve_row(params, argument, row, &mut values) else {
                    out.append_null();
                    continue;
                };
                let values = &values[..arity];
                strategy.validate(values)?;
                let dist = strategy.construct(values);
                let result = match (invocation, rng.as_deref_mut()) {
                    (Invocation::Point(f), _) => f(&dist, x)?,
                    (Invocation::Property(f), _) => f(&dist)?,
                    (Invocation::Sample(f), Some(rng)) => f(&dist, rng)?,
                    (Invocation::Sample(_), None) => {
                        return Err(StochasticError::SamplingError(
                            "no generator bound to the row loop".into(),
                        ))
                    }
                };
                out.append(result)?;
            }
            Ok(())
        };

        if matches!(invocation, Invocation::Sample(_)) {
            self.rng.with_generator(|rng| row_loop(Some(rng)))?;
        } else {
            row_loop(None)?;
        }
        Ok(out.finish())
    }
}

/// Loads the parameters of `row` into `values` and returns the argument.
///
/// Returns `None` if any input of the row is null. Operations without an
/// argument column see `NaN` as their argument.
fn resolve_row(
    params: &[Column],
    argument: Option<&Column>,
    row: usize,
    values: &mut [f64; MAX_PARAMETERS],
) -> Option<f64> {
    for (slot, column) in values.iter_mut().zip(params) {
        *slot = column.value(row)?;
    }
    match argument {
        Some(column) => column.value(row),
        None => Some(f64::NAN),
    }
}
