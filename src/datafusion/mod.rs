//! DataFusion integration module.
//!
//! Exposes every (family, operation) pair as a DataFusion scalar function
//! named `{family}_{operation}`, e.g. `normal_pdf(mean, stddev, x)` or
//! `binomial_sample(n, p)`. All functions registered together share one
//! [`BatchKernel`], and therefore one set of per-thread generators.

pub mod udf;

use std::sync::Arc;

use datafusion::execution::context::SessionContext;
use datafusion::logical_expr::ScalarUDF;

use crate::config::KernelConfig;
use crate::error::{Result, StochasticError};
use crate::family::Family;
use crate::kernel::BatchKernel;
use crate::operation::OperationKind;

pub use udf::DistributionUdf;

/// Builds every distribution function backed by `kernel`.
#[must_use]
pub fn distribution_udfs(kernel: &Arc<BatchKernel>) -> Vec<ScalarUDF> {
    Family::all()
        .iter()
        .flat_map(|family| {
            OperationKind::all()
                .iter()
                .filter(|op| op.applies_to(*family))
                .map(|op| ScalarUDF::new_from_impl(DistributionUdf::new(*family, *op, Arc::clone(kernel))))
        })
        .collect()
}

/// Builds the single function called `name`.
///
/// # Errors
///
/// Returns `UnknownFunction` if no family offers an operation under that name.
pub fn distribution_udf(name: &str, kernel: &Arc<BatchKernel>) -> Result<ScalarUDF> {
    Family::all()
        .iter()
        .find_map(|family| {
            let suffix = name.strip_prefix(family.name())?.strip_prefix('_')?;
            let op = OperationKind::all()
                .iter()
                .find(|op| op.name() == suffix && op.applies_to(*family))?;
            Some(ScalarUDF::new_from_impl(DistributionUdf::new(*family, *op, Arc::clone(kernel))))
        })
        .ok_or_else(|| StochasticError::UnknownFunction(name.to_string()))
}

/// Registers every distribution function on `ctx`.
///
/// Returns the kernel shared by the registered functions.
pub fn register_distribution_functions(ctx: &SessionContext, config: KernelConfig) -> Arc<BatchKernel> {
    let kernel = Arc::new(BatchKernel::new(config));
    let udfs = distribution_udfs(&kernel);
    tracing::debug!(
        count = udfs.len(),
        seed = kernel.config().global_seed,
        "registering distribution functions"
    );
    for udf in udfs {
        ctx.register_udf(udf);
    }
    kernel
}
