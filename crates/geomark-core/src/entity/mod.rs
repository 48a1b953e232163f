//! Typed records for the geo collections.
//!
//! Writes go through `to_values`, which maps struct fields onto the declared
//! field names; absent optional fields are left out of the write.

mod cluster;
mod marker;

pub use cluster::Cluster;
pub use marker::{Marker, MarkerType};
