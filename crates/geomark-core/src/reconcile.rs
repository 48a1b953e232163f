//! Schema reconciliation.
//!
//! Brings the store's structure in line with the declared schema. Production
//! runs only ever create what is missing; development runs drop and recreate.

use crate::{
    error::BootstrapError,
    mode::Mode,
    model::CollectionDef,
    store::{Collection, CollectionStore},
};
use geomark_schema::node::{self, Schema};
use serde::Serialize;
use tracing::{info, warn};

///
/// Reconciled
///

#[derive(Clone, Debug, Eq, PartialEq)]
pub enum Reconciled {
    /// Collection already present; left untouched.
    Kept(Collection),
    /// Collection created from the declaration.
    Created(Collection),
}

impl Reconciled {
    #[must_use]
    pub const fn collection(&self) -> &Collection {
        match self {
            Self::Kept(c) | Self::Created(c) => c,
        }
    }

    #[must_use]
    pub fn into_collection(self) -> Collection {
        match self {
            Self::Kept(c) | Self::Created(c) => c,
        }
    }

    #[must_use]
    pub const fn is_created(&self) -> bool {
        matches!(self, Self::Created(_))
    }
}

///
/// SchemaReport
///

#[derive(Clone, Debug, Default, Eq, PartialEq, Serialize)]
pub struct SchemaReport {
    pub dropped: Vec<String>,
    pub kept: Vec<String>,
    pub created: Vec<String>,
}

/// Reconcile one declared collection against the store.
///
/// In development mode an existing collection is truncated and deleted first.
/// Relation targets must already be committed; a missing target is
/// [`BootstrapError::DependencyMissing`].
pub fn reconcile<S>(
    store: &mut S,
    node: &node::Collection,
    mode: Mode,
) -> Result<Reconciled, BootstrapError>
where
    S: CollectionStore + ?Sized,
{
    let mut existing = store.find_collection(node.name);

    if mode.is_development()
        && let Some(collection) = existing
    {
        drop_collection(store, &collection)?;
        existing = store.find_collection(node.name);
    }

    if let Some(collection) = existing {
        info!(collection = node.name, id = %collection.id, "collection present, leaving as is");
        return Ok(Reconciled::Kept(collection));
    }

    let def = CollectionDef::resolve(node, |target| {
        store.find_collection(target).map(|c| c.id)
    })
    .map_err(|e| BootstrapError::dependency_missing(node.name, &e.target))?;

    let collection = store.create_collection(def).map_err(|e| {
        BootstrapError::persistence(format!("create collection '{}'", node.name), e)
    })?;
    info!(
        collection = node.name,
        id = %collection.id,
        fields = collection.def.fields.len(),
        "collection created"
    );

    Ok(Reconciled::Created(collection))
}

/// Ensure every declared collection exists.
///
/// Development mode first drops the declared collections that exist, in
/// reverse dependency order, so dependents go before the collections they
/// reference. Collections are then reconciled in dependency order.
pub fn ensure_schema<S>(
    store: &mut S,
    schema: &Schema,
    mode: Mode,
) -> Result<SchemaReport, BootstrapError>
where
    S: CollectionStore + ?Sized,
{
    schema.validate()?;
    let ordered = schema
        .ordered()
        .map_err(|e| BootstrapError::InvalidSchema(e.into()))?;

    let mut report = SchemaReport::default();

    if mode.is_development() {
        for node in ordered.iter().rev() {
            if let Some(collection) = store.find_collection(node.name) {
                drop_collection(store, &collection)?;
                report.dropped.push(node.name.to_string());
            }
        }
    }

    for node in ordered {
        match reconcile(store, node, mode)? {
            Reconciled::Kept(_) => report.kept.push(node.name.to_string()),
            Reconciled::Created(_) => report.created.push(node.name.to_string()),
        }
    }

    Ok(report)
}

// Records go first so the delete cannot trip over content.
fn drop_collection<S>(store: &mut S, collection: &Collection) -> Result<(), BootstrapError>
where
    S: CollectionStore + ?Sized,
{
    let name = collection.name();
    warn!(collection = name, id = %collection.id, "development mode: dropping collection");

    store.truncate_collection(collection).map_err(|e| {
        BootstrapError::persistence(format!("truncate collection '{name}'"), e)
    })?;
    store
        .delete_collection(collection)
        .map_err(|e| BootstrapError::persistence(format!("delete collection '{name}'"), e))
}
