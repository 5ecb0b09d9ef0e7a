//! Listing options and result pages.

use chrono::{DateTime, Duration, NaiveTime, Utc};
use serde::{Deserialize, Serialize};

use super::clause::{FilterClause, SortClause};

/// Options describing one listing request.
///
/// `sorts` ordering is significant (primary, secondary, ...) and the vector
/// is consumed while the request is compiled: each sort pass removes the
/// clauses it handled.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListOptions {
    /// 1-based page number.
    pub page: i64,

    /// Page size; zero requests a count-only response.
    pub size: i64,

    /// Optional free-text search term.
    pub search: Option<String>,

    /// Sort clauses in priority order.
    pub sorts: Vec<SortClause>,

    /// Filter clauses, all of which must match.
    pub filters: Vec<FilterClause>,
}

impl Default for ListOptions {
    fn default() -> Self {
        Self {
            page: 1,
            size: 20,
            search: None,
            sorts: Vec::new(),
            filters: Vec::new(),
        }
    }
}

impl ListOptions {
    /// Creates options for the given page and size.
    pub fn new(page: i64, size: i64) -> Self {
        Self {
            page,
            size,
            ..Self::default()
        }
    }

    /// Adds a filter clause.
    pub fn with_filter(mut self, clause: FilterClause) -> Self {
        self.filters.push(clause);
        self
    }

    /// Adds a sort clause.
    pub fn with_sort(mut self, clause: SortClause) -> Self {
        self.sorts.push(clause);
        self
    }

    /// Sets the search term.
    pub fn with_search(mut self, term: impl Into<String>) -> Self {
        self.search = Some(term.into());
        self
    }
}

/// One page of materialized results plus the total match count.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ResultSet<T> {
    /// The items on this page, in plan order.
    pub items: Vec<T>,

    /// Total number of records matching the filter, across all pages.
    pub count: u64,
}

impl<T> ResultSet<T> {
    /// Creates a result set.
    pub fn new(items: Vec<T>, count: u64) -> Self {
        Self { items, count }
    }

    /// Creates an empty result set with the given total count.
    pub fn count_only(count: u64) -> Self {
        Self {
            items: Vec::new(),
            count,
        }
    }

    /// Returns the number of items on this page.
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Returns true if this page has no items.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Maps the items to a different type, keeping the count.
    pub fn map<U, F>(self, f: F) -> ResultSet<U>
    where
        F: FnMut(T) -> U,
    {
        ResultSet {
            items: self.items.into_iter().map(f).collect(),
            count: self.count,
        }
    }
}

/// The 24-hour interval `[from, to)` containing an instant.
///
/// Gives date equality whole-day semantics: `Eq` on a date/time literal
/// matches every instant of the literal's calendar day.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DayInterval {
    /// Midnight at the start of the day.
    pub from: DateTime<Utc>,
    /// Midnight at the start of the next day (exclusive).
    pub to: DateTime<Utc>,
}

impl DayInterval {
    /// Builds the interval for the calendar day containing `instant`.
    pub fn containing(instant: DateTime<Utc>) -> Self {
        let from = instant.date_naive().and_time(NaiveTime::MIN).and_utc();
        Self {
            from,
            to: from + Duration::days(1),
        }
    }

    /// Returns true if `instant` falls inside the interval.
    pub fn contains(&self, instant: DateTime<Utc>) -> bool {
        self.from <= instant && instant < self.to
    }
}
