//! Core types: clauses, scalar values, listing options and result pages.

pub mod clause;
pub mod options;
pub mod value;

pub use clause::{DataType, FilterClause, Operator, SortClause, SortDirection};
pub use options::{DayInterval, ListOptions, ResultSet};
pub use value::{ScalarValue, parse_datetime};
