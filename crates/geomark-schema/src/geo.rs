//! The geomark collections: `cluster` groups, `marker` points.
//!
//! Marker holds a relation to cluster, so cluster must be committed first.

use crate::prelude::*;

pub const CLUSTER_NAME: &str = "cluster";
pub const MARKER_NAME: &str = "marker";

/// Allowed values for `marker.type`.
pub const MARKER_TYPES: &[&str] = &["ai", "speed", "overseer", "undefined"];

pub mod fields {
    pub const TITLE: &str = "title";
    pub const DESCRIPTION: &str = "description";
    pub const LATITUDE: &str = "latitude";
    pub const LONGITUDE: &str = "longitude";
    pub const CAMERA_COUNT: &str = "camera_count";
    pub const TYPE: &str = "type";
    pub const DIRECTION: &str = "direction";
    pub const CLUSTER_ID: &str = "cluster_id";
    pub const CREATED: &str = "created";
    pub const UPDATED: &str = "updated";
}

const CLUSTER_FIELDS: &[Field] = &[
    Field::optional(fields::TITLE, FieldKind::Text),
    Field::optional(fields::DESCRIPTION, FieldKind::Editor),
    Field::optional(fields::LATITUDE, FieldKind::Text),
    Field::optional(fields::LONGITUDE, FieldKind::Text),
    Field::optional(fields::CAMERA_COUNT, FieldKind::Number),
];

const MARKER_FIELDS: &[Field] = &[
    Field::optional(fields::TITLE, FieldKind::Text),
    Field::optional(fields::DESCRIPTION, FieldKind::Editor),
    Field::optional(fields::LATITUDE, FieldKind::Text),
    Field::optional(fields::LONGITUDE, FieldKind::Text),
    Field::optional(
        fields::TYPE,
        FieldKind::Select {
            values: MARKER_TYPES,
        },
    ),
    Field::optional(fields::DIRECTION, FieldKind::Text),
    Field::optional(
        fields::CLUSTER_ID,
        FieldKind::Relation {
            target: CLUSTER_NAME,
            max_select: 1,
        },
    ),
    Field::optional(
        fields::CREATED,
        FieldKind::Autodate {
            on_create: true,
            on_update: false,
        },
    ),
    Field::optional(
        fields::UPDATED,
        FieldKind::Autodate {
            on_create: true,
            on_update: true,
        },
    ),
];

pub const CLUSTER: Collection = Collection {
    name: CLUSTER_NAME,
    rules: Rules::authenticated(),
    fields: FieldList {
        fields: CLUSTER_FIELDS,
    },
};

pub const MARKER: Collection = Collection {
    name: MARKER_NAME,
    rules: Rules::authenticated(),
    fields: FieldList {
        fields: MARKER_FIELDS,
    },
};

/// Declaration order is already dependency order.
pub static SCHEMA: Schema = Schema {
    collections: &[CLUSTER, MARKER],
};
