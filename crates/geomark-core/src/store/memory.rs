use crate::{
    model::{FieldDef, FieldType},
    store::{Collection, CollectionDef, CollectionStore, Record, StoreError},
    types::{CollectionId, RecordId, Timestamp},
    value::{FieldValues, Value},
};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use tracing::debug;

///
/// Entry
///

#[derive(Clone, Debug, Deserialize, Serialize)]
struct Entry {
    collection: Collection,
    records: Vec<Record>,
}

impl Entry {
    fn contains(&self, id: RecordId) -> bool {
        self.records.iter().any(|r| r.id == id)
    }
}

///
/// MemoryStore
///
/// In-process store. Also the in-memory image behind [`FileStore`](super::FileStore).
///

#[derive(Clone, Debug, Default, Deserialize, Serialize)]
pub struct MemoryStore {
    entries: Vec<Entry>,
}

impl MemoryStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    fn entry_by_id(&self, id: CollectionId) -> Option<&Entry> {
        self.entries.iter().find(|e| e.collection.id == id)
    }

    fn position(&self, collection: &Collection) -> Result<usize, StoreError> {
        self.entries
            .iter()
            .position(|e| e.collection.id == collection.id)
            .ok_or_else(|| StoreError::CollectionNotFound(collection.name().to_string()))
    }

    // ======================================================================
    // Definition checks
    // ======================================================================

    fn check_definition(&self, def: &CollectionDef) -> Result<(), StoreError> {
        let invalid = |reason: String| StoreError::InvalidDefinition {
            collection: def.name.clone(),
            reason,
        };

        if def.name.is_empty() {
            return Err(invalid("name is empty".to_string()));
        }
        if self.find_collection(&def.name).is_some() {
            return Err(StoreError::CollectionExists(def.name.clone()));
        }

        let mut seen = BTreeSet::new();
        for field in &def.fields {
            if !seen.insert(field.name.as_str()) {
                return Err(invalid(format!("duplicate field '{}'", field.name)));
            }
            if let FieldType::Relation { collection_id, .. } = &field.kind
                && self.entry_by_id(*collection_id).is_none()
            {
                return Err(invalid(format!(
                    "field '{}' targets unknown collection {collection_id}",
                    field.name
                )));
            }
        }

        Ok(())
    }

    // ======================================================================
    // Value checks
    // ======================================================================

    fn check_values(&self, collection: &Collection, values: &FieldValues) -> Result<(), StoreError> {
        for (name, value) in values.iter() {
            let field = collection
                .field(name)
                .ok_or_else(|| StoreError::UnknownField {
                    collection: collection.name().to_string(),
                    field: name.clone(),
                })?;

            self.check_value(collection, field, value)?;
        }

        Ok(())
    }

    fn check_value(
        &self,
        collection: &Collection,
        field: &FieldDef,
        value: &Value,
    ) -> Result<(), StoreError> {
        let invalid = |reason: String| StoreError::InvalidValue {
            collection: collection.name().to_string(),
            field: field.name.clone(),
            reason,
        };

        // autodates belong to the store, including clearing them
        if matches!(field.kind, FieldType::Autodate { .. }) {
            return Err(invalid("autodate fields are managed by the store".to_string()));
        }
        if value.is_null() {
            return Ok(());
        }

        match (&field.kind, value) {
            (FieldType::Text | FieldType::Editor, Value::Text(_)) => Ok(()),
            (FieldType::Number, Value::Number(n)) => {
                if n.is_finite() {
                    Ok(())
                } else {
                    Err(invalid(format!("{n} is not a finite number")))
                }
            }
            (FieldType::Select { values }, Value::Text(s)) => {
                if values.iter().any(|v| v == s) {
                    Ok(())
                } else {
                    Err(invalid(format!(
                        "'{s}' is not one of [{}]",
                        values.join(", ")
                    )))
                }
            }
            (
                FieldType::Relation {
                    collection_id,
                    max_select,
                },
                Value::Relation(ids),
            ) => {
                if ids.len() > usize::from(*max_select) {
                    return Err(invalid(format!(
                        "{} ids given, at most {max_select} allowed",
                        ids.len()
                    )));
                }

                let target = self.entry_by_id(*collection_id);
                for id in ids {
                    if !target.is_some_and(|t| t.contains(*id)) {
                        return Err(StoreError::DanglingRelation {
                            collection: collection.name().to_string(),
                            field: field.name.clone(),
                            record: *id,
                        });
                    }
                }

                Ok(())
            }
            (kind, value) => Err(invalid(format!(
                "{} field cannot hold a {} value",
                kind.label(),
                value.kind()
            ))),
        }
    }

    fn check_required(collection: &Collection, values: &FieldValues) -> Result<(), StoreError> {
        for field in collection.def.fields.iter().filter(|f| f.required) {
            if values.get(&field.name).is_none_or(Value::is_null) {
                return Err(StoreError::MissingRequired {
                    collection: collection.name().to_string(),
                    field: field.name.clone(),
                });
            }
        }

        Ok(())
    }

    fn stamp_autodates(collection: &Collection, values: &mut FieldValues, creating: bool) {
        let now = Timestamp::now();
        for field in &collection.def.fields {
            if let FieldType::Autodate {
                on_create,
                on_update,
            } = field.kind
                && ((creating && on_create) || (!creating && on_update))
            {
                values.set(field.name.clone(), now);
            }
        }
    }

    // Name of the first collection (other than `target` itself) holding records that
    // reference any of `ids` in `target`.
    fn referencing_records(&self, target: &Entry) -> Option<String> {
        let ids: BTreeSet<RecordId> = target.records.iter().map(|r| r.id).collect();
        if ids.is_empty() {
            return None;
        }

        for entry in &self.entries {
            if entry.collection.id == target.collection.id {
                continue;
            }

            let fields: Vec<&str> = entry
                .collection
                .def
                .fields
                .iter()
                .filter(|f| f.kind.relation_target() == Some(target.collection.id))
                .map(|f| f.name.as_str())
                .collect();

            let referenced = entry.records.iter().any(|record| {
                fields.iter().any(|f| {
                    record
                        .values
                        .get(*f)
                        .and_then(Value::as_relation)
                        .is_some_and(|refs| refs.iter().any(|id| ids.contains(id)))
                })
            });

            if referenced {
                return Some(entry.collection.name().to_string());
            }
        }

        None
    }
}

impl CollectionStore for MemoryStore {
    fn find_collection(&self, name: &str) -> Option<Collection> {
        self.entries
            .iter()
            .find(|e| e.collection.name() == name)
            .map(|e| e.collection.clone())
    }

    fn collections(&self) -> Vec<Collection> {
        self.entries.iter().map(|e| e.collection.clone()).collect()
    }

    fn create_collection(&mut self, def: CollectionDef) -> Result<Collection, StoreError> {
        self.check_definition(&def)?;

        let collection = Collection {
            id: CollectionId::generate(),
            created: Timestamp::now(),
            def,
        };
        debug!(collection = collection.name(), id = %collection.id, "collection created");

        self.entries.push(Entry {
            collection: collection.clone(),
            records: Vec::new(),
        });

        Ok(collection)
    }

    fn delete_collection(&mut self, collection: &Collection) -> Result<(), StoreError> {
        let pos = self.position(collection)?;

        if let Some(other) = self
            .entries
            .iter()
            .find(|e| e.collection.id != collection.id && e.collection.references(collection.id))
        {
            return Err(StoreError::Referenced {
                collection: collection.name().to_string(),
                by: other.collection.name().to_string(),
            });
        }

        let removed = self.entries.remove(pos);
        debug!(
            collection = removed.collection.name(),
            records = removed.records.len(),
            "collection deleted"
        );

        Ok(())
    }

    fn truncate_collection(&mut self, collection: &Collection) -> Result<(), StoreError> {
        let pos = self.position(collection)?;

        if let Some(by) = self.referencing_records(&self.entries[pos]) {
            return Err(StoreError::Referenced {
                collection: collection.name().to_string(),
                by,
            });
        }

        let entry = &mut self.entries[pos];
        let removed = entry.records.len();
        entry.records.clear();
        debug!(collection = collection.name(), removed, "collection truncated");

        Ok(())
    }

    fn create_record(
        &mut self,
        collection: &Collection,
        mut values: FieldValues,
    ) -> Result<RecordId, StoreError> {
        let pos = self.position(collection)?;
        let live = self.entries[pos].collection.clone();

        self.check_values(&live, &values)?;
        Self::check_required(&live, &values)?;
        Self::stamp_autodates(&live, &mut values, true);

        let id = RecordId::generate();
        self.entries[pos].records.push(Record { id, values });
        debug!(collection = live.name(), %id, "record created");

        Ok(id)
    }

    fn update_record(
        &mut self,
        collection: &Collection,
        id: RecordId,
        values: FieldValues,
    ) -> Result<(), StoreError> {
        let pos = self.position(collection)?;
        let live = self.entries[pos].collection.clone();

        self.check_values(&live, &values)?;

        let Some(idx) = self.entries[pos].records.iter().position(|r| r.id == id) else {
            return Err(StoreError::RecordNotFound {
                collection: live.name().to_string(),
                record: id,
            });
        };

        let mut merged = self.entries[pos].records[idx].values.clone();
        for (name, value) in values {
            merged.set(name, value);
        }
        Self::check_required(&live, &merged)?;
        Self::stamp_autodates(&live, &mut merged, false);

        self.entries[pos].records[idx].values = merged;
        debug!(collection = live.name(), %id, "record updated");

        Ok(())
    }

    fn records(&self, collection: &Collection) -> Result<Vec<Record>, StoreError> {
        let pos = self.position(collection)?;

        Ok(self.entries[pos].records.clone())
    }

    fn count_records(&self, collection: &Collection) -> Result<usize, StoreError> {
        let pos = self.position(collection)?;

        Ok(self.entries[pos].records.len())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{create_geo_collections, marker_values};
    use geomark_schema::geo::{CLUSTER, fields};

    #[test]
    fn duplicate_collection_names_are_rejected() {
        let mut store = MemoryStore::new();
        let def = CollectionDef::resolve(&CLUSTER, |_| None).expect("resolve");

        store.create_collection(def.clone()).expect("first create");
        let err = store.create_collection(def).expect_err("second create");

        assert!(matches!(err, StoreError::CollectionExists(name) if name == "cluster"));
    }

    #[test]
    fn relation_must_point_at_an_existing_record() {
        let mut store = MemoryStore::new();
        let (_, marker) = create_geo_collections(&mut store);

        let ghost = RecordId::generate();
        let err = store
            .create_record(&marker, marker_values(Some(ghost)))
            .expect_err("dangling relation");

        assert!(matches!(err, StoreError::DanglingRelation { record, .. } if record == ghost));
        assert_eq!(store.count_records(&marker).expect("count"), 0);
    }

    #[test]
    fn select_values_are_checked() {
        let mut store = MemoryStore::new();
        let (_, marker) = create_geo_collections(&mut store);

        let values = FieldValues::new().with(fields::TYPE, "laser");
        let err = store.create_record(&marker, values).expect_err("bad select");

        assert!(matches!(err, StoreError::InvalidValue { field, .. } if field == "type"));
    }

    #[test]
    fn unknown_fields_and_wrong_kinds_are_rejected() {
        let mut store = MemoryStore::new();
        let (cluster, _) = create_geo_collections(&mut store);

        let err = store
            .create_record(&cluster, FieldValues::new().with("altitude", "12"))
            .expect_err("unknown field");
        assert!(matches!(err, StoreError::UnknownField { .. }));

        let err = store
            .create_record(&cluster, FieldValues::new().with(fields::CAMERA_COUNT, "two"))
            .expect_err("text in number field");
        assert!(matches!(err, StoreError::InvalidValue { .. }));
    }

    #[test]
    fn autodates_are_stamped_not_accepted() {
        let mut store = MemoryStore::new();
        let (cluster, marker) = create_geo_collections(&mut store);

        let err = store
            .create_record(
                &marker,
                FieldValues::new().with(fields::CREATED, Timestamp::EPOCH),
            )
            .expect_err("caller-set autodate");
        assert!(matches!(err, StoreError::InvalidValue { .. }));

        let cluster_id = store
            .create_record(&cluster, FieldValues::new().with(fields::TITLE, "A"))
            .expect("cluster");
        let id = store
            .create_record(&marker, marker_values(Some(cluster_id)))
            .expect("marker");

        let record = &store.records(&marker).expect("records")[0];
        let created = record.timestamp(fields::CREATED).expect("created stamped");
        let updated = record.timestamp(fields::UPDATED).expect("updated stamped");
        assert_eq!(created, updated);

        store
            .update_record(&marker, id, FieldValues::new().with(fields::DIRECTION, "north"))
            .expect("update");
        let record = &store.records(&marker).expect("records")[0];

        assert_eq!(record.timestamp(fields::CREATED), Some(created));
        assert!(record.timestamp(fields::UPDATED).expect("updated") >= updated);
        assert_eq!(record.text(fields::DIRECTION), Some("north"));
    }

    #[test]
    fn autodates_cannot_be_cleared() {
        let mut store = MemoryStore::new();
        let (cluster, marker) = create_geo_collections(&mut store);
        let cluster_id = store
            .create_record(&cluster, FieldValues::new().with(fields::TITLE, "A"))
            .expect("cluster");
        let id = store
            .create_record(&marker, marker_values(Some(cluster_id)))
            .expect("marker");
        let created = store.records(&marker).expect("records")[0]
            .timestamp(fields::CREATED)
            .expect("created stamped");

        let err = store
            .update_record(&marker, id, FieldValues::new().with(fields::CREATED, Value::Null))
            .expect_err("clearing an autodate");
        assert!(matches!(err, StoreError::InvalidValue { ref field, .. } if field == "created"));

        let err = store
            .create_record(&marker, FieldValues::new().with(fields::UPDATED, Value::Null))
            .expect_err("null autodate on create");
        assert!(matches!(err, StoreError::InvalidValue { .. }));

        let record = &store.records(&marker).expect("records")[0];
        assert_eq!(record.timestamp(fields::CREATED), Some(created));
        assert_eq!(store.count_records(&marker).expect("count"), 1);
    }

    #[test]
    fn referenced_collection_cannot_be_deleted() {
        let mut store = MemoryStore::new();
        let (cluster, marker) = create_geo_collections(&mut store);

        let err = store.delete_collection(&cluster).expect_err("marker references cluster");
        assert!(matches!(err, StoreError::Referenced { ref by, .. } if by == "marker"));

        store.delete_collection(&marker).expect("marker has no dependents");
        store.delete_collection(&cluster).expect("cluster is free now");
        assert!(store.collections().is_empty());
    }

    #[test]
    fn referenced_records_block_truncation() {
        let mut store = MemoryStore::new();
        let (cluster, marker) = create_geo_collections(&mut store);

        let cluster_id = store
            .create_record(&cluster, FieldValues::new())
            .expect("cluster");
        store
            .create_record(&marker, marker_values(Some(cluster_id)))
            .expect("marker");

        let err = store.truncate_collection(&cluster).expect_err("referenced");
        assert!(matches!(err, StoreError::Referenced { .. }));

        store.truncate_collection(&marker).expect("truncate markers");
        store.truncate_collection(&cluster).expect("truncate clusters");
        assert_eq!(store.count_records(&cluster).expect("count"), 0);
    }

    #[test]
    fn stale_handles_are_rejected() {
        let mut store = MemoryStore::new();
        let def = CollectionDef::resolve(&CLUSTER, |_| None).expect("resolve");
        let old = store.create_collection(def.clone()).expect("create");

        store.delete_collection(&old).expect("delete");
        let new = store.create_collection(def).expect("recreate");

        assert_ne!(old.id, new.id);
        assert!(matches!(
            store.create_record(&old, FieldValues::new()),
            Err(StoreError::CollectionNotFound(_))
        ));
    }
}
