//! Paged listing over a data source.
//!
//! Runs a compiled query as one page fetch plus, only when necessary, one
//! count. When a non-empty page comes back shorter than the requested size
//! the total is already known (`skip + len`) and the count query is skipped.

use tokio_util::sync::CancellationToken;
use tracing::debug;

use crate::error::{ListError, QueryError};
use crate::query::Query;
use crate::source::{DataSource, PageRange};
use crate::types::ResultSet;

/// Fetches one page of results plus the total match count.
///
/// Pages are 1-based. A `size` of zero is a count-only request: no rows are
/// fetched and the result set is empty.
pub async fn to_result_set<T, S>(
    source: &S,
    query: &Query,
    page: i64,
    size: i64,
    cancel: &CancellationToken,
) -> Result<ResultSet<T>, QueryError>
where
    S: DataSource<T> + ?Sized,
{
    if page < 1 {
        return Err(ListError::InvalidPage { page }.into());
    }
    if size < 0 {
        return Err(ListError::InvalidSize { size }.into());
    }
    if cancel.is_cancelled() {
        return Err(ListError::Cancelled.into());
    }

    if size == 0 {
        let count = source.count(query, cancel).await?;
        return Ok(ResultSet::count_only(count));
    }

    let skip = (page as u64 - 1) * size as u64;
    let range = PageRange {
        skip,
        take: size as u64,
    };
    let items = source.fetch(query, Some(range), cancel).await?;

    // A partial page pins the total without a second round trip.
    let count = if !items.is_empty() && (items.len() as u64) < size as u64 {
        debug!(
            page,
            size,
            len = items.len(),
            "partial page, skipping count query"
        );
        skip + items.len() as u64
    } else {
        if cancel.is_cancelled() {
            return Err(ListError::Cancelled.into());
        }
        source.count(query, cancel).await?
    };

    Ok(ResultSet::new(items, count))
}
