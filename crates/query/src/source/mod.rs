//! Data source abstraction.
//!
//! A source executes a compiled [`Query`](crate::query::Query): it filters
//! with the pushed-down predicate, orders by the compiled keys, and serves
//! page windows and counts. SQL-backed implementations render the stages
//! through [`expr::sql`](crate::expr::sql); the bundled [`MemorySource`]
//! evaluates them in process and doubles as the reference semantics.

pub mod memory;

use async_trait::async_trait;
use tokio_util::sync::CancellationToken;

use crate::error::StoreError;
use crate::query::Query;

pub use memory::MemorySource;

/// A half-open row window: skip `skip` rows, yield at most `take`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRange {
    /// Rows to skip before the window starts.
    pub skip: u64,
    /// Maximum rows in the window.
    pub take: u64,
}

/// Executes compiled queries against a store of `T` rows.
#[async_trait]
pub trait DataSource<T>: Send + Sync {
    /// Fetches the rows matching `query`, ordered by its keys, restricted to
    /// `range` when given.
    async fn fetch(
        &self,
        query: &Query,
        range: Option<PageRange>,
        cancel: &CancellationToken,
    ) -> Result<Vec<T>, StoreError>;

    /// Counts the rows matching `query`.
    async fn count(&self, query: &Query, cancel: &CancellationToken) -> Result<u64, StoreError>;
}
