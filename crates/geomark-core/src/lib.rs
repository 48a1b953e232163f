//! Runtime for geomark: the store boundary, schema reconciliation, fixture
//! seeding and the bootstrap sequence that ties them together.
#![warn(unreachable_pub)]

pub mod bootstrap;
pub mod entity;
pub mod error;
pub mod mode;
pub mod model;
pub mod reconcile;
pub mod seed;
pub mod store;
pub mod types;
pub mod value;

#[cfg(test)]
pub(crate) mod test_support;

///
/// CONSTANTS
///

/// Fixture path used when configuration does not name one.
pub const DEFAULT_FIXTURE_PATH: &str = "data/cameras.json";

///
/// Prelude
///

pub mod prelude {
    pub use crate::{
        bootstrap::{Bootstrap, BootstrapReport},
        entity::{Cluster, Marker, MarkerType},
        error::BootstrapError,
        mode::Mode,
        store::{CollectionStore, FileStore, MemoryStore},
        types::{CollectionId, RecordId, Timestamp},
        value::{FieldValues, Value},
    };
}
