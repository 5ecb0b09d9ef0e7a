//! Clause-to-stage compilation.
//!
//! Turns declarative clauses into executable stages: path resolution against
//! the entity's static descriptor, predicate construction per operator and
//! type, coercion for document-extracted text, and free-text search
//! expansion. Each step produces an independent [`Stage`](crate::expr::Stage)
//! and the pieces are fused by composition.

pub mod coerce;
pub mod filter;
pub mod path;
pub mod predicate;
pub mod search;
pub mod sort;

pub use filter::compile_filter;
pub use path::{ResolvedPath, resolve_path};
pub use predicate::build_predicate;
pub use search::compile_search;
pub use sort::compile_sort_key;
