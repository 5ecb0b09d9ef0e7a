//! Type coercion stages for document-extracted text.
//!
//! Direct fields already carry their native type; only values pulled out of
//! the document column need a cast. The dispatch table is small: integers
//! parse as i32, numbers as f64, booleans leniently, date/times through the
//! round-trip parser, and strings pass through untouched (no cast node is
//! emitted at all).

use crate::expr::{Expr, Stage};
use crate::types::DataType;

/// Builds the coercion stage for a data type.
pub fn cast_stage(data_type: DataType) -> Stage {
    match data_type {
        DataType::String => Stage::identity(),
        ty => Stage::new(Expr::cast(Expr::Param, ty)),
    }
}
