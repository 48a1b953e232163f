use crate::{
    model::{FieldDef, FieldType},
    types::{CollectionId, Timestamp},
};
use geomark_schema::node;
use serde::{Deserialize, Serialize};
use thiserror::Error as ThisError;

///
/// UnresolvedRelation
///

#[derive(Debug, Eq, PartialEq, ThisError)]
#[error("field '{field}' references collection '{target}', which does not exist")]
pub struct UnresolvedRelation {
    pub field: String,
    pub target: String,
}

///
/// AccessRules
///
/// Per-operation filters. `None` locks the operation to superusers, an empty
/// string opens it to everyone.
///

#[derive(Clone, Debug, Default, Deserialize, Eq, PartialEq, Serialize)]
pub struct AccessRules {
    pub list: Option<String>,
    pub view: Option<String>,
    pub create: Option<String>,
    pub update: Option<String>,
    pub delete: Option<String>,
}

impl From<&node::Rules> for AccessRules {
    fn from(rules: &node::Rules) -> Self {
        let filter = |rule: node::Rule| rule.filter().map(ToString::to_string);

        Self {
            list: filter(rules.list),
            view: filter(rules.view),
            create: filter(rules.create),
            update: filter(rules.update),
            delete: filter(rules.delete),
        }
    }
}

///
/// CollectionDef
///
/// A collection definition ready to hand to the store.
///

#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub struct CollectionDef {
    pub name: String,
    pub rules: AccessRules,
    pub fields: Vec<FieldDef>,
}

impl CollectionDef {
    /// Build from a schema node, resolving every relation target to the
    /// identifier of the committed collection `lookup` returns for it.
    pub fn resolve(
        node: &node::Collection,
        lookup: impl Fn(&str) -> Option<CollectionId>,
    ) -> Result<Self, UnresolvedRelation> {
        let mut fields = Vec::with_capacity(node.fields.fields.len());
        for field in node.fields.iter() {
            let kind = FieldType::resolve(field.kind, &lookup).map_err(|target| {
                UnresolvedRelation {
                    field: field.ident.to_string(),
                    target: target.to_string(),
                }
            })?;

            fields.push(FieldDef {
                name: field.ident.to_string(),
                kind,
                required: field.required,
            });
        }

        Ok(Self {
            name: node.name.to_string(),
            rules: AccessRules::from(&node.rules),
            fields,
        })
    }

    #[must_use]
    pub fn field(&self, name: &str) -> Option<&FieldDef> {
        self.fields.iter().find(|f| f.name == name)
    }

    /// Collections referenced through relation fields.
    pub fn relation_targets(&self) -> impl Iterator<Item = CollectionId> + '_ {
        self.fields.iter().filter_map(|f| f.kind.relation_target())
    }
}

///
/// Collection
///
/// A committed collection: its definition plus the identity the store gave it.
///

#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub struct Collection {
    pub id: CollectionId,
    pub created: Timestamp,
    #[serde(flatten)]
    pub def: CollectionDef,
}

impl Collection {
    #[must_use]
    pub fn name(&self) -> &str {
        &self.def.name
    }

    #[must_use]
    pub fn field(&self, name: &str) -> Option<&FieldDef> {
        self.def.field(name)
    }

    #[must_use]
    pub fn references(&self, target: CollectionId) -> bool {
        self.def.relation_targets().any(|id| id == target)
    }
}
