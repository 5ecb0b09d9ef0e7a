//! Filter clause compilation.
//!
//! A clause compiles into a pipeline of independent stages fused by
//! composition: member access to reach the addressed value, then (for
//! document-backed paths) JSON extraction and type coercion, then the
//! operator predicate. The fused stage is a single-input predicate over the
//! whole record.

use tracing::debug;

use crate::error::CompileError;
use crate::expr::{Expr, Stage};
use crate::schema::EntityDescriptor;
use crate::types::FilterClause;

use super::coerce::cast_stage;
use super::path::{ResolvedPath, access_stage, resolve_path};
use super::predicate::build_predicate;

/// Compiles one filter clause against an entity descriptor.
pub fn compile_filter(
    descriptor: &'static EntityDescriptor,
    clause: &FilterClause,
) -> Result<Stage, CompileError> {
    let predicate = build_predicate(clause.operator, clause.data_type, &clause.value)?;

    let fused = match resolve_path(descriptor, &clause.path)? {
        ResolvedPath::Direct { segments, .. } => {
            predicate.compose(access_stage(&segments))?
        }
        ResolvedPath::Document { root, pointer } => {
            let access = access_stage(std::slice::from_ref(&root));
            let extract = Stage::new(Expr::json_extract(Expr::Param, pointer));
            let coerce = cast_stage(clause.data_type);
            predicate.compose(coerce.compose(extract.compose(access)?)?)?
        }
    };

    debug!(
        path = %clause.path,
        operator = %clause.operator,
        data_type = %clause.data_type,
        "compiled filter clause"
    );
    Ok(fused)
}
