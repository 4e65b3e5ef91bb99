//! `ScalarUDFImpl` wrapping one (family, operation) pair.

use std::any::Any;
use std::sync::Arc;

use arrow::datatypes::DataType as ArrowDataType;
use datafusion::error::Result as DfResult;
use datafusion::logical_expr::{ColumnarValue, ScalarUDFImpl, Signature, Volatility};

use crate::family::{Distribution, Family, ParameterKind};
use crate::kernel::{BatchKernel, Invocation};
use crate::operation::{OperationClass, OperationKind};
use crate::rng::Generator;
use crate::types::ResultShape;

/// Scalar function `{family}_{operation}` evaluated by a shared [`BatchKernel`].
#[derive(Debug)]
pub struct DistributionUdf {
    family: Family,
    operation: OperationKind,
    name: String,
    signature: Signature,
    kernel: Arc<BatchKernel>,
}

impl DistributionUdf {
    /// Creates the function for `family` and `operation`.
    #[must_use]
    pub fn new(family: Family, operation: OperationKind, kernel: Arc<BatchKernel>) -> Self {
        let mut arg_types: Vec<ArrowDataType> = family
            .parameters()
            .iter()
            .map(|p| match p.kind {
                ParameterKind::Real => ArrowDataType::Float64,
                ParameterKind::Count => ArrowDataType::Int64,
            })
            .collect();
        if operation.argument().is_some() {
            arg_types.push(ArrowDataType::Float64);
        }
        let volatility = match operation.class() {
            OperationClass::Sample => Volatility::Volatile,
            OperationClass::Point | OperationClass::Property => Volatility::Immutable,
        };

        DistributionUdf {
            family,
            operation,
            name: format!("{}_{}", family.name(), operation.name()),
            signature: Signature::exact(arg_types, volatility),
            kernel,
        }
    }

    #[must_use]
    pub fn family(&self) -> Family {
        self.family
    }

    #[must_use]
    pub fn operation(&self) -> OperationKind {
        self.operation
    }

    /// Output shape of the function.
    #[must_use]
    pub fn result_shape(&self) -> ResultShape {
        self.operation.result_shape(self.family)
    }
}

impl ScalarUDFImpl for DistributionUdf {
    fn as_any(&self) -> &dyn Any {
        self
    }

    fn name(&self) -> &str {
        &self.name
    }

    fn signature(&self) -> &Signature {
        &self.signature
    }

    fn return_type(&self, _arg_types: &[ArrowDataType]) -> DfResult<ArrowDataType> {
        Ok(self.result_shape().to_arrow())
    }

    fn invoke_batch(&self, args: &[ColumnarValue], number_rows: usize) -> DfResult<ColumnarValue> {
        let operation = self.operation;
        let point = |dist: &Distribution, x: f64| operation.eval_point(dist, x);
        let property = |dist: &Distribution| operation.eval_property(dist);
        let sample = |dist: &Distribution, rng: &mut Generator| OperationKind::eval_sample(dist, rng);

        let invocation: Invocation<'_, Distribution> = match operation.class() {
            OperationClass::Point => Invocation::Point(&point),
            OperationClass::Property => Invocation::Property(&property),
            OperationClass::Sample => Invocation::Sample(&sample),
        };
        let output = self.kernel.evaluate(
            &self.family,
            args,
            number_rows,
            self.result_shape(),
            &invocation,
        )?;
        Ok(output)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use datafusion::common::ScalarValue;
    use datafusion::logical_expr::TypeSignature;

    fn udf(family: Family, operation: OperationKind) -> DistributionUdf {
        DistributionUdf::new(family, operation, Arc::new(BatchKernel::default()))
    }

    #[test]
    fn test_name_and_signature() {
        let f = udf(Family::Binomial, OperationKind::Pdf);
        assert_eq!(f.name(), "binomial_pdf");
        assert_eq!(
            f.signature().type_signature,
            TypeSignature::Exact(vec![
                ArrowDataType::Int64,
                ArrowDataType::Float64,
                ArrowDataType::Float64
            ])
        );
        assert_eq!(f.signature().volatility, Volatility::Immutable);
    }

    #[test]
    fn test_sample_is_volatile() {
        let f = udf(Family::Poisson, OperationKind::Sample);
        assert_eq!(f.signature().volatility, Volatility::Volatile);
        assert_eq!(f.return_type(&[]).unwrap(), ArrowDataType::Int64);
    }

    #[test]
    fn test_invoke_constant_pdf() {
        let f = udf(Family::Normal, OperationKind::Pdf);
        let args = [
            ColumnarValue::Scalar(ScalarValue::Float64(Some(0.0))),
            ColumnarValue::Scalar(ScalarValue::Float64(Some(1.0))),
            ColumnarValue::Scalar(ScalarValue::Float64(Some(0.0))),
        ];
        let ColumnarValue::Scalar(ScalarValue::Float64(Some(v))) = f.invoke_batch(&args, 1).unwrap()
        else {
            panic!("expected a constant float");
        };
        assert!((v - 0.398_942).abs() < 1e-6);
    }

    #[test]
    fn test_invalid_parameter_surfaces_as_external_error() {
        let f = udf(Family::Bernoulli, OperationKind::Mean);
        let args = [ColumnarValue::Scalar(ScalarValue::Float64(Some(1.5)))];
        let err = f.invoke_batch(&args, 1).unwrap_err();
        assert!(err.to_string().contains("Invalid parameter for bernoulli distribution"));
    }
}
