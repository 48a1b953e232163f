use crate::{prelude::*, validate};
use std::collections::BTreeSet;
use thiserror::Error as ThisError;

///
/// SchemaError
///

#[derive(Debug, Eq, PartialEq, ThisError)]
pub enum SchemaError {
    #[error("collection '{collection}' references undeclared collection '{target}'")]
    UnknownTarget { collection: String, target: String },

    #[error("relation cycle between collections: {}", .0.join(", "))]
    Cycle(Vec<String>),
}

///
/// Schema
///
/// The full declarative source of truth for the store structure.
///

#[derive(Clone, Copy, Debug, Serialize)]
pub struct Schema {
    pub collections: &'static [Collection],
}

impl Schema {
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&'static Collection> {
        self.collections.iter().find(|c| c.name == name)
    }

    /// Collections in dependency order: every collection appears after the
    /// collections its relations reference. Ties keep declaration order.
    /// A relation to its own collection can never be resolved at creation
    /// time, so it is reported as a cycle.
    pub fn ordered(&self) -> Result<Vec<&'static Collection>, SchemaError> {
        for collection in self.collections {
            for target in collection.dependencies() {
                if self.get(target).is_none() {
                    return Err(SchemaError::UnknownTarget {
                        collection: collection.name.to_string(),
                        target: target.to_string(),
                    });
                }
            }
        }

        let mut placed: BTreeSet<&'static str> = BTreeSet::new();
        let mut out = Vec::with_capacity(self.collections.len());

        while out.len() < self.collections.len() {
            let next = self.collections.iter().find(|c| {
                !placed.contains(c.name)
                    && c.dependencies()
                        .iter()
                        .all(|dep| placed.contains(dep))
            });

            match next {
                Some(collection) => {
                    placed.insert(collection.name);
                    out.push(collection);
                }
                None => {
                    let stuck = self
                        .collections
                        .iter()
                        .filter(|c| !placed.contains(c.name))
                        .map(|c| c.name.to_string())
                        .collect();

                    return Err(SchemaError::Cycle(stuck));
                }
            }
        }

        Ok(out)
    }

    /// Run full validation, accumulating every problem.
    pub fn validate(&self) -> Result<(), crate::Error> {
        validate::validate_schema(self).map_err(crate::Error::Validation)
    }
}
