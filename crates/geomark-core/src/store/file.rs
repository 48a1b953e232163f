use crate::{
    store::{Collection, CollectionDef, CollectionStore, MemoryStore, Record, StoreError},
    types::RecordId,
    value::FieldValues,
};
use serde::{Deserialize, Serialize};
use std::{
    fs, io,
    path::{Path, PathBuf},
};
use tracing::debug;

/// Snapshot layout version written by this build.
const SNAPSHOT_VERSION: u32 = 1;

///
/// Snapshot
///

#[derive(Deserialize, Serialize)]
struct Snapshot {
    version: u32,
    store: MemoryStore,
}

///
/// FileStore
///
/// [`MemoryStore`] persisted as a JSON snapshot. Every mutation is applied
/// to a copy, written to disk, and only then becomes visible, so a failed
/// write leaves both the file and the in-memory image unchanged.
///

#[derive(Debug)]
pub struct FileStore {
    path: PathBuf,
    inner: MemoryStore,
}

impl FileStore {
    /// Open the snapshot at `path`; a missing file is an empty store.
    pub fn open(path: impl Into<PathBuf>) -> Result<Self, StoreError> {
        let path = path.into();

        let inner = match fs::read(&path) {
            Ok(bytes) => Self::decode(&path, &bytes)?,
            Err(e) if e.kind() == io::ErrorKind::NotFound => MemoryStore::new(),
            Err(source) => return Err(StoreError::Io { path, source }),
        };
        debug!(path = %path.display(), "store opened");

        Ok(Self { path, inner })
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn decode(path: &Path, bytes: &[u8]) -> Result<MemoryStore, StoreError> {
        let snapshot: Snapshot =
            serde_json::from_slice(bytes).map_err(|e| StoreError::Corrupt {
                path: path.to_path_buf(),
                reason: e.to_string(),
            })?;

        if snapshot.version != SNAPSHOT_VERSION {
            return Err(StoreError::Corrupt {
                path: path.to_path_buf(),
                reason: format!(
                    "unsupported snapshot version {} (expected {SNAPSHOT_VERSION})",
                    snapshot.version
                ),
            });
        }

        Ok(snapshot.store)
    }

    fn persist(&self, store: &MemoryStore) -> Result<(), StoreError> {
        let io_err = |source| StoreError::Io {
            path: self.path.clone(),
            source,
        };

        if let Some(parent) = self.path.parent()
            && !parent.as_os_str().is_empty()
        {
            fs::create_dir_all(parent).map_err(io_err)?;
        }

        let snapshot = Snapshot {
            version: SNAPSHOT_VERSION,
            store: store.clone(),
        };
        let bytes = serde_json::to_vec_pretty(&snapshot).map_err(|e| io_err(e.into()))?;

        let mut tmp = self.path.clone().into_os_string();
        tmp.push(".tmp");
        let tmp = PathBuf::from(tmp);

        fs::write(&tmp, bytes).map_err(io_err)?;
        fs::rename(&tmp, &self.path).map_err(io_err)?;

        Ok(())
    }

    fn mutate<R>(
        &mut self,
        f: impl FnOnce(&mut MemoryStore) -> Result<R, StoreError>,
    ) -> Result<R, StoreError> {
        let mut next = self.inner.clone();
        let out = f(&mut next)?;
        self.persist(&next)?;
        self.inner = next;

        Ok(out)
    }
}

impl CollectionStore for FileStore {
    fn find_collection(&self, name: &str) -> Option<Collection> {
        self.inner.find_collection(name)
    }

    fn collections(&self) -> Vec<Collection> {
        self.inner.collections()
    }

    fn create_collection(&mut self, def: CollectionDef) -> Result<Collection, StoreError> {
        self.mutate(|s| s.create_collection(def))
    }

    fn delete_collection(&mut self, collection: &Collection) -> Result<(), StoreError> {
        self.mutate(|s| s.delete_collection(collection))
    }

    fn truncate_collection(&mut self, collection: &Collection) -> Result<(), StoreError> {
        self.mutate(|s| s.truncate_collection(collection))
    }

    fn create_record(
        &mut self,
        collection: &Collection,
        values: FieldValues,
    ) -> Result<RecordId, StoreError> {
        self.mutate(|s| s.create_record(collection, values))
    }

    fn update_record(
        &mut self,
        collection: &Collection,
        id: RecordId,
        values: FieldValues,
    ) -> Result<(), StoreError> {
        self.mutate(|s| s.update_record(collection, id, values))
    }

    fn records(&self, collection: &Collection) -> Result<Vec<Record>, StoreError> {
        self.inner.records(collection)
    }

    fn count_records(&self, collection: &Collection) -> Result<usize, StoreError> {
        self.inner.count_records(collection)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::create_geo_collections;
    use geomark_schema::geo::fields;

    #[test]
    fn missing_file_opens_empty() {
        let dir = tempfile::tempdir().expect("tempdir");
        let store = FileStore::open(dir.path().join("nested/store.json")).expect("open");

        assert!(store.collections().is_empty());
        assert!(!store.path().exists());
    }

    #[test]
    fn mutations_survive_reopen() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("data/store.json");

        let (cluster_id, record_id) = {
            let mut store = FileStore::open(&path).expect("open");
            let (cluster, _) = create_geo_collections(&mut store);
            let record_id = store
                .create_record(&cluster, FieldValues::new().with(fields::TITLE, "Ba Dinh"))
                .expect("record");
            (cluster.id, record_id)
        };

        let store = FileStore::open(&path).expect("reopen");
        let cluster = store.find_collection("cluster").expect("cluster persisted");
        let records = store.records(&cluster).expect("records");

        assert_eq!(cluster.id, cluster_id);
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].id, record_id);
        assert_eq!(records[0].text(fields::TITLE), Some("Ba Dinh"));
        assert!(store.find_collection("marker").is_some());
    }

    #[test]
    fn rejected_mutation_leaves_file_untouched() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("store.json");

        let mut store = FileStore::open(&path).expect("open");
        let (cluster, _) = create_geo_collections(&mut store);
        let before = fs::read(&path).expect("snapshot written");

        store
            .delete_collection(&cluster)
            .expect_err("marker still references cluster");

        assert_eq!(fs::read(&path).expect("snapshot"), before);
        assert!(store.find_collection("cluster").is_some());
    }

    #[test]
    fn corrupt_snapshot_is_reported() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("store.json");
        fs::write(&path, b"{ not json").expect("write");

        let err = FileStore::open(&path).expect_err("corrupt");
        assert!(matches!(err, StoreError::Corrupt { .. }));

        fs::write(&path, br#"{"version": 99, "store": {"entries": []}}"#).expect("write");
        let err = FileStore::open(&path).expect_err("future version");
        assert!(matches!(err, StoreError::Corrupt { reason, .. } if reason.contains("99")));
    }
}
