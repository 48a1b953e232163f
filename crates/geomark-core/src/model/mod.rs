//! Runtime collection definitions.
//!
//! `geomark_schema` nodes say *what should exist*; the types here are what the
//! store holds. Relations are resolved to live collection identifiers, so a
//! definition can only be built once its targets are committed.

mod collection;
mod field;

pub use collection::*;
pub use field::*;
