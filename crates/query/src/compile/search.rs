//! Free-text search compilation.
//!
//! A search term expands into a case-insensitive substring test over every
//! top-level string field of the entity, folded together with OR. Entities
//! with no string fields produce no predicate at all.

use crate::expr::{Expr, Stage};
use crate::schema::{EntityDescriptor, FieldKind};

/// Compiles a free-text search term against an entity descriptor.
pub fn compile_search(descriptor: &'static EntityDescriptor, term: &str) -> Option<Stage> {
    let term = term.trim();
    if term.is_empty() {
        return None;
    }

    let mut body: Option<Expr> = None;
    for field in descriptor.fields {
        if !matches!(field.kind, FieldKind::String) {
            continue;
        }
        let test = Expr::Contains {
            haystack: Box::new(Expr::field(Expr::Param, field.name)),
            needle: term.to_string(),
        };
        body = Some(match body {
            Some(prev) => Expr::or(prev, test),
            None => test,
        });
    }
    body.map(Stage::new)
}
