//! Result encoder: writes operation results into Arrow output columns.

use std::sync::Arc;

use arrow::array::{
    ArrayBuilder, ArrayRef, FixedSizeListArray, FixedSizeListBuilder, Float64Array,
    Float64Builder, Int64Builder,
};
use datafusion::common::ScalarValue;
use datafusion::logical_expr::ColumnarValue;

use crate::error::{Result, StochasticError};
use crate::types::{pair_item_field, OperationResult, ResultShape, PAIR_WIDTH};

fn shape_mismatch(shape: ResultShape, result: &OperationResult) -> StochasticError {
    StochasticError::ShapeMismatch {
        expected: shape.name(),
        actual: result.tag(),
    }
}

/// Row-by-row writer for one output column.
///
/// Pair rows occupy two consecutive child slots; a null pair row still
/// consumes both slots so that row `i` always starts at slot `2 * i`.
pub enum OutputBuilder {
    Float64(Float64Builder),
    Int64(Int64Builder),
    Pair(FixedSizeListBuilder<Float64Builder>),
}

impl OutputBuilder {
    /// Creates a builder sized for `capacity` rows.
    #[must_use]
    pub fn new(shape: ResultShape, capacity: usize) -> Self {
        match shape {
            ResultShape::Float64 => OutputBuilder::Float64(Float64Builder::with_capacity(capacity)),
            ResultShape::Int64 => OutputBuilder::Int64(Int64Builder::with_capacity(capacity)),
            ResultShape::Pair => {
                let values = Float64Builder::with_capacity(capacity * PAIR_WIDTH as usize);
                OutputBuilder::Pair(
                    FixedSizeListBuilder::with_capacity(values, PAIR_WIDTH, capacity)
                        .with_field(pair_item_field()),
                )
            }
        }
    }

    #[must_use]
    pub fn shape(&self) -> ResultShape {
        match self {
            OutputBuilder::Float64(_) => ResultShape::Float64,
            OutputBuilder::Int64(_) => ResultShape::Int64,
            OutputBuilder::Pair(_) => ResultShape::Pair,
        }
    }

    /// Number of rows written so far.
    #[must_use]
    pub fn len(&self) -> usize {
        match self {
            OutputBuilder::Float64(b) => b.len(),
            OutputBuilder::Int64(b) => b.len(),
            OutputBuilder::Pair(b) => b.len(),
        }
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Writes one result.
    ///
    /// # Errors
    ///
    /// Returns `ShapeMismatch` if the result's tag disagrees with the column shape.
    pub fn append(&mut self, result: OperationResult) -> Result<()> {
        match (self, result) {
            (OutputBuilder::Float64(b), OperationResult::Float(v)) => b.append_value(v),
            (OutputBuilder::Int64(b), OperationResult::Integer(v)) => b.append_value(v),
            (OutputBuilder::Pair(b), OperationResult::Pair(lo, hi)) => {
                b.values().append_value(lo);
                b.values().append_value(hi);
                b.append(true);
            }
            (builder, result) => return Err(shape_mismatch(builder.shape(), &result)),
        }
        Ok(())
    }

    /// Writes one null row.
    pub fn append_null(&mut self) {
        match self {
            OutputBuilder::Float64(b) => b.append_null(),
            OutputBuilder::Int64(b) => b.append_null(),
            OutputBuilder::Pair(b) => {
                b.values().append_null();
                b.values().append_null();
                b.append(false);
            }
        }
    }

    #[must_use]
    pub fn finish_array(self) -> ArrayRef {
        match self {
            OutputBuilder::Float64(mut b) => Arc::new(b.finish()),
            OutputBuilder::Int64(mut b) => Arc::new(b.finish()),
            OutputBuilder::Pair(mut b) => Arc::new(b.finish()),
        }
    }

    /// Finishes the column as a varying output.
    #[must_use]
    pub fn finish(self) -> ColumnarValue {
        ColumnarValue::Array(self.finish_array())
    }
}

/// Encodes one result shared by every row.
///
/// # Errors
///
/// Returns `ShapeMismatch` if the result's tag disagrees with `shape`.
pub fn constant(result: OperationResult, shape: ResultShape) -> Result<ColumnarValue> {
    let scalar = match (shape, result) {
        (ResultShape::Float64, OperationResult::Float(v)) => ScalarValue::Float64(Some(v)),
        (ResultShape::Int64, OperationResult::Integer(v)) => ScalarValue::Int64(Some(v)),
        (ResultShape::Pair, OperationResult::Pair(lo, hi)) => {
            let values = Arc::new(Float64Array::from(vec![lo, hi]));
            let list = FixedSizeListArray::try_new(pair_item_field(), PAIR_WIDTH, values, None)?;
            ScalarValue::FixedSizeList(Arc::new(list))
        }
        (shape, result) => return Err(shape_mismatch(shape, &result)),
    };
    Ok(ColumnarValue::Scalar(scalar))
}

/// Encodes a null shared by every row.
#[must_use]
pub fn constant_null(shape: ResultShape) -> ColumnarValue {
    let scalar = match shape {
        ResultShape::Float64 => ScalarValue::Float64(None),
        ResultShape::Int64 => ScalarValue::Int64(None),
        ResultShape::Pair => ScalarValue::FixedSizeList(Arc::new(FixedSizeListArray::new_null(
            pair_item_field(),
            PAIR_WIDTH,
            1,
        ))),
    };
    ColumnarValue::Scalar(scalar)
}
