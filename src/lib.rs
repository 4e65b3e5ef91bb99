//! stochastic - vectorized probability distributions for `DataFusion`
//!
//! Exposes density, cumulative probability, quantile, moment and sampling
//! operations for ten distribution families as batch-wise scalar functions.
//!
//! ```text
//!   DataFusion ──> DistributionUdf ──> BatchKernel ──> FamilyStrategy (validate, construct)
//!                                          │                  │
//!                                          │                  └─> Distribution ──> math
//!                                          ├─> RngProvider (per-thread generators)
//!                                          └─> encoder (Float64 / Int64 / pair columns)
//! ```
//!
//! The kernel never names a concrete family: it is generic over
//! [`FamilyStrategy`] and an [`Invocation`], so new families only need a
//! validator, a factory and their formulae.

pub mod config;
pub mod datafusion;
pub mod error;
pub mod family;
pub mod kernel;
pub mod math;
pub mod operation;
pub mod rng;
pub mod types;

pub use config::{KernelConfig, DEFAULT_GLOBAL_SEED};
pub use error::{Result, StochasticError};
pub use family::{Distribution, Family, ParameterKind, ParameterSpec};
pub use kernel::{BatchKernel, FamilyStrategy, Invocation, MAX_PARAMETERS};
pub use operation::{OperationClass, OperationKind};
pub use rng::{derive_seed, Generator, RngProvider};
pub use types::{Column, OperationResult, ResultShape};

pub use crate::datafusion::{
    distribution_udf, distribution_udfs, register_distribution_functions, DistributionUdf,
};
