//! Schema validation orchestration and shared helpers.

pub mod naming;
pub mod relation;

use crate::{
    error::ErrorTree,
    node::{Schema, ValidateNode},
};

/// Run full schema validation in a staged, deterministic order.
pub(crate) fn validate_schema(schema: &Schema) -> Result<(), ErrorTree> {
    let mut errs = ErrorTree::new();

    // Phase 1: validate each node (structural + local invariants).
    for collection in schema.collections {
        if let Err(e) = collection.validate() {
            errs.add_for(collection.name, e);
        }
    }

    // Phase 2: cross-node invariants.
    naming::validate_unique_collections(schema, &mut errs);
    relation::validate_relations(schema, &mut errs);

    errs.result()
}
