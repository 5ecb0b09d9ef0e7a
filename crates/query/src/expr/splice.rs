//! Stage composition by structural parameter substitution.
//!
//! To compose an outer stage `g` with an inner stage `f`, every occurrence
//! of `g`'s parameter placeholder is replaced with `f`'s body; the fused
//! stage is then parameterized on `f`'s original input. Applied pairwise
//! left to right across the pipeline this is associative: the result is
//! behaviorally identical to writing `record => d(c(b(a(record))))`
//! directly.
//!
//! Only two inner shapes are accepted: a plain member-access chain, or a
//! single recognized call (JSON extraction or cast) over such a chain. The
//! restriction keeps every composed stage translatable into the store's
//! native query form instead of forcing client-side evaluation.

use crate::error::CompileError;

use super::{Expr, Stage};

impl Stage {
    /// Builds the composition `self ∘ inner`.
    ///
    /// Fails with [`CompileError::Composition`] when `inner`'s body is not a
    /// supported splice point.
    pub fn compose(self, inner: Stage) -> Result<Stage, CompileError> {
        if !is_splice_point(&inner.body) {
            return Err(CompileError::Composition {
                found: shape_name(&inner.body).to_string(),
            });
        }
        Ok(Stage {
            body: substitute(self.body, &inner.body),
        })
    }
}

/// Replaces every `Param` occurrence in `expr` with `replacement`.
fn substitute(expr: Expr, replacement: &Expr) -> Expr {
    match expr {
        Expr::Param => replacement.clone(),
        Expr::Field { base, name } => Expr::Field {
            base: Box::new(substitute(*base, replacement)),
            name,
        },
        Expr::JsonExtract { base, pointer } => Expr::JsonExtract {
            base: Box::new(substitute(*base, replacement)),
            pointer,
        },
        Expr::Cast { base, ty } => Expr::Cast {
            base: Box::new(substitute(*base, replacement)),
            ty,
        },
        Expr::Literal(value) => Expr::Literal(value),
        Expr::Compare { lhs, op, rhs } => Expr::Compare {
            lhs: Box::new(substitute(*lhs, replacement)),
            op,
            rhs: Box::new(substitute(*rhs, replacement)),
        },
        Expr::And(a, b) => Expr::And(
            Box::new(substitute(*a, replacement)),
            Box::new(substitute(*b, replacement)),
        ),
        Expr::Or(a, b) => Expr::Or(
            Box::new(substitute(*a, replacement)),
            Box::new(substitute(*b, replacement)),
        ),
        Expr::Not(e) => Expr::Not(Box::new(substitute(*e, replacement))),
        Expr::IsNull(e) => Expr::IsNull(Box::new(substitute(*e, replacement))),
        Expr::InList { needle, items } => Expr::InList {
            needle: Box::new(substitute(*needle, replacement)),
            items,
        },
        Expr::Contains { haystack, needle } => Expr::Contains {
            haystack: Box::new(substitute(*haystack, replacement)),
            needle,
        },
    }
}

/// A member-access chain, or a single recognized call over one.
fn is_splice_point(expr: &Expr) -> bool {
    match expr {
        Expr::Param => true,
        Expr::Field { base, .. } => is_access_chain(base),
        Expr::JsonExtract { base, .. } | Expr::Cast { base, .. } => is_splice_point(base),
        _ => false,
    }
}

fn is_access_chain(expr: &Expr) -> bool {
    match expr {
        Expr::Param => true,
        Expr::Field { base, .. } => is_access_chain(base),
        _ => false,
    }
}

fn shape_name(expr: &Expr) -> &'static str {
    match expr {
        Expr::Param => "param",
        Expr::Field { .. } => "field access",
        Expr::JsonExtract { .. } => "json extract",
        Expr::Cast { .. } => "cast",
        Expr::Literal(_) => "literal",
        Expr::Compare { .. } => "comparison",
        Expr::And(..) => "conjunction",
        Expr::Or(..) => "disjunction",
        Expr::Not(_) => "negation",
        Expr::IsNull(_) => "null test",
        Expr::InList { .. } => "set membership",
        Expr::Contains { .. } => "substring test",
    }
}
