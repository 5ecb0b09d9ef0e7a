//! Error types for the query compiler.
//!
//! Compilation errors are programmer/input errors raised synchronously and
//! meant to fail fast; store failures pass through [`QueryError::Store`]
//! without being wrapped or reinterpreted, and nothing here is retried.

// Error enum variant fields are self-documenting via their #[error(...)] messages
#![allow(missing_docs)]

use thiserror::Error;

use crate::types::{DataType, Operator};

/// Result alias for operations that can fail anywhere in the pipeline.
pub type QueryResult<T> = Result<T, QueryError>;

/// Opaque error produced by a store client.
///
/// Connectivity, timeout and query-execution failures propagate through the
/// compiler unchanged; retry and backoff policy belong to the store client.
pub type StoreError = Box<dyn std::error::Error + Send + Sync>;

/// The primary error type for all listing operations.
#[derive(Error, Debug)]
pub enum QueryError {
    /// Clause compilation errors
    #[error(transparent)]
    Compile(#[from] CompileError),

    /// Pagination argument errors
    #[error(transparent)]
    List(#[from] ListError),

    /// Store client failures, passed through verbatim
    #[error("{0}")]
    Store(StoreError),
}

impl From<StoreError> for QueryError {
    fn from(err: StoreError) -> Self {
        QueryError::Store(err)
    }
}

/// Errors raised while compiling filter or sort clauses.
#[derive(Error, Debug, PartialEq, Eq)]
pub enum CompileError {
    /// A segment of a direct (non-document) path did not resolve against the
    /// entity's field table.
    #[error("field not found: no segment '{segment}' in path '{path}'")]
    FieldNotFound { path: String, segment: String },

    /// The operator is not defined for the clause's data type, or the clause
    /// literal does not parse as that type.
    #[error("operator {operator} is not supported for {data_type} values")]
    UnsupportedOperator {
        operator: Operator,
        data_type: DataType,
    },

    /// An inner stage handed to the composer was not a supported splice
    /// point, so the result could not be guaranteed to stay pushdown-safe.
    #[error("expression shape '{found}' is not a supported splice point")]
    Composition { found: String },
}

/// Errors raised by the result materializer.
#[derive(Error, Debug, PartialEq, Eq)]
pub enum ListError {
    /// Pages are 1-based.
    #[error("page must be at least 1, got {page}")]
    InvalidPage { page: i64 },

    /// Zero means count-only; negative sizes are rejected.
    #[error("size must not be negative, got {size}")]
    InvalidSize { size: i64 },

    /// The caller's cancellation token was observed before a store call.
    #[error("listing cancelled")]
    Cancelled,
}
