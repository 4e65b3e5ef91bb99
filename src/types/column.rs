//! Numeric view over a host input column.

use arrow::array::{Array, AsArray, Float64Array};
use arrow::datatypes::{DataType, Float64Type};
use datafusion::common::ScalarValue;
use datafusion::logical_expr::ColumnarValue;

use crate::error::{Result, StochasticError};

/// One input column, read as `Float64`.
///
/// `Constant` carries a single value (or null) shared by every row of the
/// batch; `Varying` carries one value per row with its own validity bitmap.
#[derive(Debug, Clone)]
pub enum Column {
    /// One value for all rows.
    Constant(Option<f64>),
    /// Independent value per row.
    Varying(Float64Array),
}

impl Column {
    /// Reads a host column, coercing numeric types to `Float64`.
    ///
    /// # Errors
    ///
    /// Returns `TypeError` for non-numeric columns.
    pub fn try_from_columnar(value: &ColumnarValue) -> Result<Self> {
        let data_type = value.data_type();
        if !(data_type.is_numeric() || data_type == DataType::Null) {
            return Err(StochasticError::TypeError {
                expected: "numeric".into(),
                actual: data_type.to_string(),
            });
        }
        match value {
            ColumnarValue::Scalar(scalar) => match scalar.cast_to(&DataType::Float64)? {
                ScalarValue::Float64(v) => Ok(Column::Constant(v)),
                other => Err(StochasticError::TypeError {
                    expected: "Float64".into(),
                    actual: other.data_type().to_string(),
                }),
            },
            ColumnarValue::Array(array) => {
                let array = arrow::compute::cast(array, &DataType::Float64)?;
                let floats = array.as_primitive_opt::<Float64Type>().ok_or_else(|| {
                    StochasticError::TypeError {
                        expected: "Float64".into(),
                        actual: array.data_type().to_string(),
                    }
                })?;
                Ok(Column::Varying(floats.clone()))
            }
        }
    }

    /// Returns true if the column has one value for all rows.
    #[must_use]
    pub fn is_constant(&self) -> bool {
        matches!(self, Column::Constant(_))
    }

    /// Returns the shared value of a constant column.
    ///
    /// The outer `Option` is `None` for varying columns; the inner one is `None`
    /// for a constant null.
    #[must_use]
    pub fn constant(&self) -> Option<Option<f64>> {
        match self {
            Column::Constant(v) => Some(*v),
            Column::Varying(_) => None,
        }
    }

    /// Resolves the value of `row`, or `None` if it is null.
    #[must_use]
    pub fn value(&self, row: usize) -> Option<f64> {
        match self {
            Column::Constant(v) => *v,
            Column::Varying(array) => {
                if array.is_null(row) {
                    None
                } else {
                    Some(array.value(row))
                }
            }
        }
    }

    /// Checks that a varying column has exactly `num_rows` values.
    ///
    /// # Errors
    ///
    /// Returns `LengthMismatch` otherwise.
    pub fn check_rows(&self, num_rows: usize) -> Result<()> {
        match self {
            Column::Varying(array) if array.len() != num_rows => {
                Err(StochasticError::LengthMismatch {
                    expected: num_rows,
                    actual: array.len(),
                })
            }
            _ => Ok(()),
        }
    }
}
