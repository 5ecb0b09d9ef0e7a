//! Process-wide registry of document-backed root fields.
//!
//! The registry caches, per entity type, the set of root field names whose
//! storage is the JSON document column rather than a plain column. It is
//! populated lazily from the static descriptor the first time a query is
//! compiled for a type, with a double-checked write so racing compilations
//! stay idempotent. Entries are never invalidated: after first use the set
//! is immutable for the process lifetime and reads are lock-cheap.

use std::collections::HashSet;
use std::sync::Arc;

use parking_lot::RwLock;

use super::{EntityDescriptor, FieldKind};

static DOCUMENT_FIELDS: RwLock<Vec<(&'static str, Arc<HashSet<String>>)>> =
    RwLock::new(Vec::new());

/// Returns the set of document-backed root field names for an entity type,
/// lower-cased for case-insensitive matching.
pub fn document_roots(descriptor: &'static EntityDescriptor) -> Arc<HashSet<String>> {
    {
        let cache = DOCUMENT_FIELDS.read();
        if let Some((_, roots)) = cache.iter().find(|(name, _)| *name == descriptor.name) {
            return Arc::clone(roots);
        }
    }

    let built: HashSet<String> = descriptor
        .fields
        .iter()
        .filter(|f| matches!(f.kind, FieldKind::Document))
        .map(|f| f.name.to_ascii_lowercase())
        .collect();

    let mut cache = DOCUMENT_FIELDS.write();
    // Re-check under the write lock: another compilation may have won the race.
    if let Some((_, roots)) = cache.iter().find(|(name, _)| *name == descriptor.name) {
        return Arc::clone(roots);
    }
    let roots = Arc::new(built);
    cache.push((descriptor.name, Arc::clone(&roots)));
    roots
}

/// Returns true if `field_name` is stored in the entity's document column.
pub fn is_document_field(descriptor: &'static EntityDescriptor, field_name: &str) -> bool {
    document_roots(descriptor).contains(&field_name.to_ascii_lowercase())
}
