//! Operation results and output shapes.

use std::sync::Arc;

use arrow::datatypes::{DataType, Field, FieldRef};

/// Number of physical slots per row in a pair-shaped column.
pub const PAIR_WIDTH: i32 = 2;

/// Value produced by one evaluation of an operation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum OperationResult {
    /// Real-valued result (densities, probabilities, moments, continuous draws).
    Float(f64),
    /// Integer-valued result (discrete draws).
    Integer(i64),
    /// Closed interval `[lower, upper]` (range and support).
    Pair(f64, f64),
}

impl OperationResult {
    /// Name of the variant, for error messages.
    #[must_use]
    pub fn tag(&self) -> &'static str {
        match self {
            OperationResult::Float(_) => "float",
            OperationResult::Integer(_) => "integer",
            OperationResult::Pair(..) => "pair",
        }
    }
}

/// Physical shape of an operation's output column, fixed at registration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ResultShape {
    /// `Float64` column.
    Float64,
    /// `Int64` column.
    Int64,
    /// `FixedSizeList<Float64>` column with two slots per row.
    Pair,
}

impl ResultShape {
    /// Returns the name of the shape.
    #[must_use]
    pub fn name(&self) -> &'static str {
        match self {
            ResultShape::Float64 => "float",
            ResultShape::Int64 => "integer",
            ResultShape::Pair => "pair",
        }
    }

    /// Converts to an Arrow data type.
    #[must_use]
    pub fn to_arrow(&self) -> DataType {
        match self {
            ResultShape::Float64 => DataType::Float64,
            ResultShape::Int64 => DataType::Int64,
            ResultShape::Pair => DataType::FixedSizeList(pair_item_field(), PAIR_WIDTH),
        }
    }
}

/// Child field of pair-shaped columns.
#[must_use]
pub fn pair_item_field() -> FieldRef {
    Arc::new(Field::new("item", DataType::Float64, true))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pair_shape_is_fixed_size_list_of_two() {
        match ResultShape::Pair.to_arrow() {
            DataType::FixedSizeList(field, size) => {
                assert_eq!(size, 2);
                assert_eq!(field.data_type(), &DataType::Float64);
            }
            other => panic!("unexpected type {other:?}"),
        }
    }
}
