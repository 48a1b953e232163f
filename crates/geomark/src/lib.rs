//! ## Crate layout
//! - `config`: `geomark.toml` loading.
//! - `core`: store boundary, schema reconciliation, fixture seeding, bootstrap.
//! - `schema`: declarative collection schema and its validation.
//!
//! The binary (`src/main.rs`) wires these together with `banner`, `cli`,
//! `inspect` and `telemetry`.

pub use geomark_config as config;
pub use geomark_core as core;
pub use geomark_schema as schema;

pub mod banner;
pub mod cli;
pub mod inspect;
pub mod telemetry;

//
// Consts
//

/// Workspace version re-export for downstream tooling/tests.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

///
/// Prelude
///

pub mod prelude {
    pub use crate::{
        config::{Config, ConfigError},
        core::prelude::*,
        schema::geo::SCHEMA,
    };
}
