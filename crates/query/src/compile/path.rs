//! Field path resolution.
//!
//! The first path segment decides everything: if it names a document-backed
//! field the remainder becomes a JSON pointer into that column; otherwise
//! every segment must resolve, case-insensitively, against the entity's
//! static field table, with nested descriptors becoming the lookup context
//! for the following segment.

use crate::error::CompileError;
use crate::expr::{Expr, Stage};
use crate::schema::{EntityDescriptor, FieldKind, registry};

/// Outcome of resolving a dotted path.
#[derive(Debug, Clone)]
pub enum ResolvedPath {
    /// Every segment resolved against plain typed fields.
    Direct {
        /// Canonical segment names, descriptor casing.
        segments: Vec<String>,
        /// Kind of the final field.
        kind: FieldKind,
    },
    /// The root is stored in the document column.
    Document {
        /// Canonical root field name.
        root: String,
        /// JSON pointer for the remaining segments; `$` for a bare root.
        pointer: String,
    },
}

/// Resolves a dotted path against an entity descriptor.
pub fn resolve_path(
    descriptor: &'static EntityDescriptor,
    path: &str,
) -> Result<ResolvedPath, CompileError> {
    let segments: Vec<&str> = path.split('.').collect();
    let root = segments[0];
    if root.is_empty() {
        return Err(CompileError::FieldNotFound {
            path: path.to_string(),
            segment: root.to_string(),
        });
    }

    if registry::is_document_field(descriptor, root) {
        // The descriptor contains the root, so the lookup cannot miss.
        let canonical = descriptor
            .field(root)
            .map(|f| f.name.to_string())
            .unwrap_or_else(|| root.to_string());
        let rest = &segments[1..];
        let pointer = if rest.is_empty() {
            "$".to_string()
        } else {
            format!("$.{}", rest.join("."))
        };
        return Ok(ResolvedPath::Document {
            root: canonical,
            pointer,
        });
    }

    let mut current = descriptor;
    let mut canonical = Vec::with_capacity(segments.len());
    let mut kind = FieldKind::String;
    for (i, segment) in segments.iter().enumerate() {
        let field = current
            .field(segment)
            .ok_or_else(|| CompileError::FieldNotFound {
                path: path.to_string(),
                segment: segment.to_string(),
            })?;
        canonical.push(field.name.to_string());
        kind = field.kind;
        if let FieldKind::Nested(next) = field.kind {
            current = next();
        } else if i + 1 < segments.len() {
            // Scalar or document field with trailing segments.
            return Err(CompileError::FieldNotFound {
                path: path.to_string(),
                segment: segments[i + 1].to_string(),
            });
        }
    }

    Ok(ResolvedPath::Direct {
        segments: canonical,
        kind,
    })
}

/// Builds the member-access stage for a resolved segment list.
pub fn access_stage(segments: &[String]) -> Stage {
    let mut body = Expr::Param;
    for segment in segments {
        body = Expr::field(body, segment.clone());
    }
    Stage::new(body)
}
