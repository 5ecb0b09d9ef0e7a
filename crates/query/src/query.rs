//! The compiled query: a pushed-down filter plus an ordered key list.
//!
//! A [`Query`] accumulates compiled clauses for one entity. Filters AND-fold
//! into a single predicate stage; sort clauses become [`SortKey`]s appended
//! in application order, so earlier clauses take precedence. Sort pushdown is
//! split in two: [`Query::apply_sort`] consumes only the document-addressed
//! clauses (those the store cannot order without the compiled extraction),
//! leaving plain-field clauses pending for the caller to either hand to
//! [`Query::apply_direct_sort`] or order natively.

use crate::compile::{compile_filter, compile_search, compile_sort_key};
use crate::error::CompileError;
use crate::expr::{Expr, Stage};
use crate::schema::{Entity, EntityDescriptor, registry};
use crate::types::{DataType, FilterClause, ListOptions, SortClause, SortDirection};

/// One compiled ordering key.
#[derive(Debug, Clone)]
pub struct SortKey {
    /// Key extraction stage, evaluated per record.
    pub stage: Stage,
    /// Sort direction.
    pub direction: SortDirection,
    /// Declared type of the extracted key.
    pub data_type: DataType,
}

/// A compiled query against one entity.
#[derive(Debug, Clone)]
pub struct Query {
    descriptor: &'static EntityDescriptor,
    filter: Option<Stage>,
    order: Vec<SortKey>,
}

impl Query {
    /// Creates an empty query for a descriptor.
    pub fn new(descriptor: &'static EntityDescriptor) -> Self {
        Self {
            descriptor,
            filter: None,
            order: Vec::new(),
        }
    }

    /// Creates an empty query for an entity type.
    pub fn for_entity<T: Entity>() -> Self {
        Self::new(T::descriptor())
    }

    /// The entity descriptor this query was compiled against.
    pub fn descriptor(&self) -> &'static EntityDescriptor {
        self.descriptor
    }

    /// The accumulated filter predicate, if any clause has been applied.
    pub fn filter(&self) -> Option<&Stage> {
        self.filter.as_ref()
    }

    /// The accumulated ordering keys, highest precedence first.
    pub fn order(&self) -> &[SortKey] {
        &self.order
    }

    /// Compiles and applies filter clauses, AND-folding them into the
    /// existing predicate.
    pub fn apply_filters(&mut self, filters: &[FilterClause]) -> Result<(), CompileError> {
        for clause in filters {
            let stage = compile_filter(self.descriptor, clause)?;
            self.and_filter(stage);
        }
        Ok(())
    }

    /// Expands a free-text search term over the entity's string fields and
    /// ANDs it into the filter. A blank term or a string-less entity leaves
    /// the query unchanged.
    pub fn apply_search(&mut self, term: &str) {
        if let Some(stage) = compile_search(self.descriptor, term) {
            self.and_filter(stage);
        }
    }

    /// Compiles and consumes the document-addressed clauses out of `pending`,
    /// appending their keys in clause order. Plain-field clauses stay in
    /// `pending`, in their original relative order, for the caller to order
    /// natively or hand to [`Query::apply_direct_sort`].
    ///
    /// On error `pending` is left untouched.
    pub fn apply_sort(&mut self, pending: &mut Vec<SortClause>) -> Result<(), CompileError> {
        let mut keys = Vec::new();
        for clause in pending.iter() {
            if self.is_document_clause(clause) {
                keys.push(compile_sort_key(self.descriptor, clause)?);
            }
        }
        let descriptor = self.descriptor;
        pending.retain(|clause| {
            let root = clause.path.split('.').next().unwrap_or("");
            !registry::is_document_field(descriptor, root)
        });
        self.order.extend(keys);
        Ok(())
    }

    /// Compiles and consumes every remaining clause in `pending`, appending
    /// their keys in clause order.
    ///
    /// On error `pending` is left untouched.
    pub fn apply_direct_sort(&mut self, pending: &mut Vec<SortClause>) -> Result<(), CompileError> {
        let mut keys = Vec::new();
        for clause in pending.iter() {
            keys.push(compile_sort_key(self.descriptor, clause)?);
        }
        pending.clear();
        self.order.extend(keys);
        Ok(())
    }

    /// Applies a whole option set: filters, search, then both sort phases.
    ///
    /// Consumes the option's sort clauses; after a successful call every
    /// clause has been compiled into this query.
    pub fn apply_options(&mut self, options: &mut ListOptions) -> Result<(), CompileError> {
        self.apply_filters(&options.filters)?;
        if let Some(term) = options.search.as_deref() {
            self.apply_search(term);
        }
        let mut pending = std::mem::take(&mut options.sorts);
        self.apply_sort(&mut pending)?;
        self.apply_direct_sort(&mut pending)?;
        Ok(())
    }

    fn and_filter(&mut self, stage: Stage) {
        self.filter = Some(match self.filter.take() {
            Some(existing) => Stage::new(Expr::and(existing.into_body(), stage.into_body())),
            None => stage,
        });
    }

    fn is_document_clause(&self, clause: &SortClause) -> bool {
        let root = clause.path.split('.').next().unwrap_or("");
        registry::is_document_field(self.descriptor, root)
    }
}
