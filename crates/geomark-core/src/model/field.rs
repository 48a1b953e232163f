use crate::types::CollectionId;
use geomark_schema::types::FieldKind;
use serde::{Deserialize, Serialize};

///
/// FieldDef
///

#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub struct FieldDef {
    pub name: String,
    pub kind: FieldType,
    #[serde(default)]
    pub required: bool,
}

///
/// FieldType
///
/// Resolved counterpart of [`FieldKind`].
///

#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
#[remain::sorted]
pub enum FieldType {
    Autodate {
        on_create: bool,
        on_update: bool,
    },
    Editor,
    Number,
    Relation {
        collection_id: CollectionId,
        max_select: u8,
    },
    Select {
        values: Vec<String>,
    },
    Text,
}

impl FieldType {
    /// Resolve a declared kind; relation targets go through `lookup`.
    /// Returns the unresolved target name on failure.
    pub fn resolve(
        kind: FieldKind,
        lookup: impl FnOnce(&str) -> Option<CollectionId>,
    ) -> Result<Self, &'static str> {
        let ty = match kind {
            FieldKind::Autodate {
                on_create,
                on_update,
            } => Self::Autodate {
                on_create,
                on_update,
            },
            FieldKind::Editor => Self::Editor,
            FieldKind::Number => Self::Number,
            FieldKind::Relation { target, max_select } => Self::Relation {
                collection_id: lookup(target).ok_or(target)?,
                max_select,
            },
            FieldKind::Select { values } => Self::Select {
                values: values.iter().map(ToString::to_string).collect(),
            },
            FieldKind::Text => Self::Text,
        };

        Ok(ty)
    }

    #[must_use]
    pub const fn label(&self) -> &'static str {
        match self {
            Self::Autodate { .. } => "autodate",
            Self::Editor => "editor",
            Self::Number => "number",
            Self::Relation { .. } => "relation",
            Self::Select { .. } => "select",
            Self::Text => "text",
        }
    }

    #[must_use]
    pub const fn relation_target(&self) -> Option<CollectionId> {
        match self {
            Self::Relation { collection_id, .. } => Some(*collection_id),
            _ => None,
        }
    }
}
