use derive_more::{Display, FromStr};
use serde::Serialize;

///
/// FieldKind
///
/// Declared storage shape of a collection field.
///

#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
#[remain::sorted]
pub enum FieldKind {
    /// Timestamp stamped by the store, never written by callers.
    Autodate { on_create: bool, on_update: bool },
    /// Rich text.
    Editor,
    Number,
    /// Reference to records of another collection, named here and resolved
    /// to a live collection identifier when the collection is created.
    Relation {
        target: &'static str,
        max_select: u8,
    },
    Select {
        values: &'static [&'static str],
    },
    Text,
}

impl FieldKind {
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Autodate { .. } => "autodate",
            Self::Editor => "editor",
            Self::Number => "number",
            Self::Relation { .. } => "relation",
            Self::Select { .. } => "select",
            Self::Text => "text",
        }
    }

    /// Name of the referenced collection, if this is a relation.
    #[must_use]
    pub const fn relation_target(self) -> Option<&'static str> {
        match self {
            Self::Relation { target, .. } => Some(target),
            _ => None,
        }
    }

    #[must_use]
    pub const fn is_autodate(self) -> bool {
        matches!(self, Self::Autodate { .. })
    }
}

///
/// Operation
///
/// Record operations an access rule is attached to.
///

#[derive(Clone, Copy, Debug, Display, Eq, FromStr, Hash, Ord, PartialEq, PartialOrd, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Operation {
    List,
    View,
    Create,
    Update,
    Delete,
}

impl Operation {
    pub const ALL: [Self; 5] = [
        Self::List,
        Self::View,
        Self::Create,
        Self::Update,
        Self::Delete,
    ];
}
