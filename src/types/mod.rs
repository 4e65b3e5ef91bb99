//! Column and result types shared by the kernel and the host adapter.

pub mod column;
pub mod result;

pub use column::Column;
pub use result::{pair_item_field, OperationResult, ResultShape, PAIR_WIDTH};
