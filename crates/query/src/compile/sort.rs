//! Sort clause compilation.
//!
//! A sort clause compiles into a key-extraction stage plus its direction and
//! declared type. Document-backed keys reuse the same access/extract/coerce
//! pipeline as filters, minus the predicate on top.

use tracing::debug;

use crate::error::CompileError;
use crate::expr::{Expr, Stage};
use crate::query::SortKey;
use crate::schema::EntityDescriptor;
use crate::types::SortClause;

use super::coerce::cast_stage;
use super::path::{ResolvedPath, access_stage, resolve_path};

/// Compiles one sort clause into an orderable key.
pub fn compile_sort_key(
    descriptor: &'static EntityDescriptor,
    clause: &SortClause,
) -> Result<SortKey, CompileError> {
    let stage = match resolve_path(descriptor, &clause.path)? {
        ResolvedPath::Direct { segments, .. } => access_stage(&segments),
        ResolvedPath::Document { root, pointer } => {
            let access = access_stage(std::slice::from_ref(&root));
            let extract = Stage::new(Expr::json_extract(Expr::Param, pointer));
            cast_stage(clause.data_type).compose(extract.compose(access)?)?
        }
    };

    debug!(
        path = %clause.path,
        direction = %clause.direction,
        data_type = %clause.data_type,
        "compiled sort clause"
    );
    Ok(SortKey {
        stage,
        direction: clause.direction,
        data_type: clause.data_type,
    })
}
