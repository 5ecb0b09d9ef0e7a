//! In-process data source.
//!
//! Holds rows in a `Vec` and evaluates compiled stages directly. The sort is
//! stable, so rows tied on every key keep their insertion order. Count calls
//! are tallied to make the pagination short-circuit observable in tests.

use std::cmp::Ordering;
use std::io;
use std::sync::atomic::{AtomicUsize, Ordering as AtomicOrdering};

use async_trait::async_trait;
use tokio_util::sync::CancellationToken;

use crate::error::StoreError;
use crate::query::{Query, SortKey};
use crate::schema::Entity;
use crate::types::SortDirection;

use super::{DataSource, PageRange};

/// A [`DataSource`] over an in-memory row set.
#[derive(Debug)]
pub struct MemorySource<T> {
    rows: Vec<T>,
    count_calls: AtomicUsize,
}

impl<T> MemorySource<T> {
    /// Creates a source over the given rows.
    pub fn new(rows: Vec<T>) -> Self {
        Self {
            rows,
            count_calls: AtomicUsize::new(0),
        }
    }

    /// Number of times [`DataSource::count`] has run against this source.
    pub fn count_calls(&self) -> usize {
        self.count_calls.load(AtomicOrdering::Relaxed)
    }
}

fn cancelled() -> StoreError {
    Box::new(io::Error::other("operation cancelled"))
}

fn order_rows<T: Entity>(rows: &mut [T], keys: &[SortKey]) {
    rows.sort_by(|a, b| {
        let left = a.record();
        let right = b.record();
        for key in keys {
            let l = key.stage.eval_scalar(&left);
            let r = key.stage.eval_scalar(&right);
            let ord = match key.direction {
                SortDirection::Asc => l.sort_cmp(&r),
                SortDirection::Desc => r.sort_cmp(&l),
            };
            if ord != Ordering::Equal {
                return ord;
            }
        }
        Ordering::Equal
    });
}

#[async_trait]
impl<T> DataSource<T> for MemorySource<T>
where
    T: Entity + Clone + Send + Sync,
{
    async fn fetch(
        &self,
        query: &Query,
        range: Option<PageRange>,
        cancel: &CancellationToken,
    ) -> Result<Vec<T>, StoreError> {
        if cancel.is_cancelled() {
            return Err(cancelled());
        }

        let mut matched: Vec<T> = self
            .rows
            .iter()
            .filter(|row| match query.filter() {
                Some(predicate) => predicate.eval_bool(&row.record()),
                None => true,
            })
            .cloned()
            .collect();

        order_rows(&mut matched, query.order());

        let windowed = match range {
            Some(PageRange { skip, take }) => matched
                .into_iter()
                .skip(skip as usize)
                .take(take as usize)
                .collect(),
            None => matched,
        };
        Ok(windowed)
    }

    async fn count(&self, query: &Query, cancel: &CancellationToken) -> Result<u64, StoreError> {
        self.count_calls.fetch_add(1, AtomicOrdering::Relaxed);
        if cancel.is_cancelled() {
            return Err(cancelled());
        }

        let total = self
            .rows
            .iter()
            .filter(|row| match query.filter() {
                Some(predicate) => predicate.eval_bool(&row.record()),
                None => true,
            })
            .count();
        Ok(total as u64)
    }
}
