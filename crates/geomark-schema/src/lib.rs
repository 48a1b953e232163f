//! Declarative schema for the geomark collections.
//!
//! Nodes in this crate describe *what should exist* in the store. They are
//! static and carry no store identity; relation targets are named, not
//! resolved. The runtime crate turns them into live collection definitions
//! once the referenced collections have been committed.

pub mod error;
pub mod geo;
pub mod node;
pub mod types;
pub mod validate;

/// Maximum length for collection schema identifiers.
pub const MAX_COLLECTION_NAME_LEN: usize = 64;

/// Maximum length for field schema identifiers.
pub const MAX_FIELD_NAME_LEN: usize = 64;

/// Field name reserved for the store-assigned record identifier.
pub const RESERVED_ID_FIELD: &str = "id";

use crate::node::SchemaError;
use thiserror::Error as ThisError;

///
/// Prelude
///

pub mod prelude {
    pub use crate::{
        err,
        error::ErrorTree,
        node::*,
        types::{FieldKind, Operation},
    };
    pub use serde::Serialize;
}

///
/// Error
///

#[derive(Debug, ThisError)]
pub enum Error {
    #[error(transparent)]
    SchemaError(#[from] SchemaError),

    #[error("schema validation failed:\n{0}")]
    Validation(error::ErrorTree),
}
