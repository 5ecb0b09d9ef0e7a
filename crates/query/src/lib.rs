//! Declarative list queries: compile filter and sort clauses into executable
//! predicates and orderings, push them down to a data source, and page over
//! the results.
//!
//! # Architecture
//!
//! The crate is organized as a small compilation pipeline:
//!
//! - [`types`]: the clause model (paths, operators, semantic data types),
//!   scalar values, and list options.
//! - [`schema`]: static entity descriptors, the record view a source exposes
//!   per row, and the lazy document-field registry.
//! - [`expr`]: the closed expression algebra. Compiled stages are
//!   single-parameter functions fused by structural composition, evaluated in
//!   memory or rendered to parameterized SQL.
//! - [`compile`]: clause-to-stage compilation (path resolution, predicate
//!   construction, coercion, free-text search expansion).
//! - [`query`]: the accumulated compiled query (AND-folded filter, ordered
//!   sort keys) with its two-phase sort pushdown.
//! - [`source`]: the async [`DataSource`](source::DataSource) trait and the
//!   bundled in-memory implementation.
//! - [`list`]: paged execution with the partial-page count short-circuit.
//!
//! # Example
//!
//! ```
//! use listwise_query::query::Query;
//! use listwise_query::schema::{Entity, EntityDescriptor, FieldDescriptor, FieldKind, Record};
//! use listwise_query::types::{DataType, FilterClause, Operator};
//!
//! static TASK: EntityDescriptor = EntityDescriptor {
//!     name: "Task",
//!     fields: &[FieldDescriptor { name: "title", kind: FieldKind::String }],
//! };
//!
//! struct Task {
//!     title: String,
//! }
//!
//! impl Entity for Task {
//!     fn descriptor() -> &'static EntityDescriptor {
//!         &TASK
//!     }
//!     fn record(&self) -> Record {
//!         Record::new().with_scalar("title", self.title.as_str())
//!     }
//! }
//!
//! let mut query = Query::for_entity::<Task>();
//! query
//!     .apply_filters(&[FilterClause::new(
//!         "title",
//!         Operator::Contains,
//!         DataType::String,
//!         "review",
//!     )])
//!     .unwrap();
//!
//! let task = Task { title: "Quarterly review".into() };
//! assert!(query.filter().unwrap().eval_bool(&task.record()));
//! ```

pub mod compile;
pub mod error;
pub mod expr;
pub mod list;
pub mod query;
pub mod schema;
pub mod source;
pub mod types;

pub use error::{CompileError, ListError, QueryError, QueryResult, StoreError};
pub use list::to_result_set;
pub use query::{Query, SortKey};
pub use types::{
    DataType, FilterClause, ListOptions, Operator, ResultSet, SortClause, SortDirection,
};
