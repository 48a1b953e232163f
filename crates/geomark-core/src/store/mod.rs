//! Persistent collection store boundary.
//!
//! The reconciler and seeder only talk to [`CollectionStore`]. Structural and
//! referential constraints are enforced here, not re-checked by callers.

mod file;
mod memory;

pub use file::FileStore;
pub use memory::MemoryStore;

pub use crate::model::{Collection, CollectionDef};

use crate::{
    error::ErrorClass,
    types::{RecordId, Timestamp},
    value::FieldValues,
};
use serde::{Deserialize, Serialize};
use std::{io, path::PathBuf};
use thiserror::Error as ThisError;

///
/// StoreError
///

#[derive(Debug, ThisError)]
pub enum StoreError {
    #[error("collection '{0}' already exists")]
    CollectionExists(String),

    #[error("collection '{0}' not found")]
    CollectionNotFound(String),

    #[error("invalid definition for collection '{collection}': {reason}")]
    InvalidDefinition { collection: String, reason: String },

    #[error("collection '{collection}' is still referenced by '{by}'")]
    Referenced { collection: String, by: String },

    #[error("record {record} not found in '{collection}'")]
    RecordNotFound { collection: String, record: RecordId },

    #[error("collection '{collection}' has no field '{field}'")]
    UnknownField { collection: String, field: String },

    #[error("invalid value for '{collection}.{field}': {reason}")]
    InvalidValue {
        collection: String,
        field: String,
        reason: String,
    },

    #[error("'{collection}.{field}' is required")]
    MissingRequired { collection: String, field: String },

    #[error("'{collection}.{field}' references missing record {record}")]
    DanglingRelation {
        collection: String,
        field: String,
        record: RecordId,
    },

    #[error("store snapshot '{}' is corrupt: {reason}", path.display())]
    Corrupt { path: PathBuf, reason: String },

    #[error("store i/o failed at '{}': {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

impl StoreError {
    #[must_use]
    pub const fn class(&self) -> ErrorClass {
        match self {
            Self::CollectionExists(_) | Self::Referenced { .. } | Self::DanglingRelation { .. } => {
                ErrorClass::Conflict
            }
            Self::CollectionNotFound(_) | Self::RecordNotFound { .. } => ErrorClass::NotFound,
            Self::InvalidDefinition { .. }
            | Self::UnknownField { .. }
            | Self::InvalidValue { .. }
            | Self::MissingRequired { .. } => ErrorClass::Unsupported,
            Self::Corrupt { .. } => ErrorClass::Corruption,
            Self::Io { .. } => ErrorClass::Internal,
        }
    }
}

///
/// Record
///

#[derive(Clone, Debug, Deserialize, PartialEq, Serialize)]
pub struct Record {
    pub id: RecordId,
    pub values: FieldValues,
}

impl Record {
    #[must_use]
    pub fn text(&self, field: &str) -> Option<&str> {
        self.values.text(field)
    }

    #[must_use]
    pub fn timestamp(&self, field: &str) -> Option<Timestamp> {
        self.values.get(field).and_then(crate::value::Value::as_timestamp)
    }
}

///
/// CollectionStore
///
/// Handles passed back in (`&Collection`) are checked against the live
/// identity; a handle to a dropped collection fails with `CollectionNotFound`.
///

pub trait CollectionStore {
    fn find_collection(&self, name: &str) -> Option<Collection>;

    /// Every collection, in creation order.
    fn collections(&self) -> Vec<Collection>;

    fn create_collection(&mut self, def: CollectionDef) -> Result<Collection, StoreError>;

    /// Drop a collection and its records. Fails while another collection
    /// holds a relation to it.
    fn delete_collection(&mut self, collection: &Collection) -> Result<(), StoreError>;

    /// Delete every record. Fails while records elsewhere still reference them.
    fn truncate_collection(&mut self, collection: &Collection) -> Result<(), StoreError>;

    fn create_record(
        &mut self,
        collection: &Collection,
        values: FieldValues,
    ) -> Result<RecordId, StoreError>;

    /// Merge `values` into an existing record and restamp update autodates.
    fn update_record(
        &mut self,
        collection: &Collection,
        id: RecordId,
        values: FieldValues,
    ) -> Result<(), StoreError>;

    /// Records in creation order.
    fn records(&self, collection: &Collection) -> Result<Vec<Record>, StoreError>;

    fn count_records(&self, collection: &Collection) -> Result<usize, StoreError> {
        Ok(self.records(collection)?.len())
    }
}
