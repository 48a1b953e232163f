//! Sample data seeding from a JSON fixture.
//!
//! Development only. The fixture is parsed in full before the store is
//! touched, so a malformed fixture commits nothing. Store failures abort the
//! run; records written before the failure stay committed and the error names
//! the cluster (and camera) index that failed.

mod fixture;

pub use fixture::{CameraFixture, ClusterFixture, Fixture};

use crate::{
    error::BootstrapError,
    mode::Mode,
    store::{Collection, CollectionStore},
};
use geomark_schema::geo::{CLUSTER_NAME, MARKER_NAME};
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::{debug, info, warn};

const SEED_DEPENDENT: &str = "sample data";

///
/// TruncatePolicy
///
/// Which collections are emptied before reseeding.
///

#[derive(Clone, Copy, Debug, Default, Deserialize, Eq, PartialEq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum TruncatePolicy {
    /// Markers only; clusters accumulate across runs.
    Markers,
    /// Markers, then clusters.
    #[default]
    All,
}

///
/// SeedReport
///

#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Serialize)]
pub struct SeedReport {
    pub skipped: bool,
    pub clusters: usize,
    pub markers: usize,
}

impl SeedReport {
    #[must_use]
    pub const fn skipped() -> Self {
        Self {
            skipped: true,
            clusters: 0,
            markers: 0,
        }
    }
}

/// Read and fully parse the fixture at `path`.
pub fn load_fixture(path: &Path) -> Result<Fixture, BootstrapError> {
    Fixture::load(path)
}

/// Seed the store from the fixture at `path`. A no-op in production.
pub fn seed<S>(
    store: &mut S,
    path: &Path,
    mode: Mode,
    policy: TruncatePolicy,
) -> Result<SeedReport, BootstrapError>
where
    S: CollectionStore + ?Sized,
{
    if !mode.is_development() {
        info!("production mode, skipping sample data");
        return Ok(SeedReport::skipped());
    }

    let fixture = load_fixture(path)?;
    info!(
        path = %path.display(),
        clusters = fixture.len(),
        cameras = fixture.camera_count(),
        "fixture loaded"
    );

    seed_fixture(store, &fixture, policy)
}

/// Write an already parsed fixture. Mode checks are the caller's concern.
pub fn seed_fixture<S>(
    store: &mut S,
    fixture: &Fixture,
    policy: TruncatePolicy,
) -> Result<SeedReport, BootstrapError>
where
    S: CollectionStore + ?Sized,
{
    let clusters = require(store, CLUSTER_NAME)?;
    let markers = require(store, MARKER_NAME)?;

    truncate(store, &markers)?;
    if policy == TruncatePolicy::All {
        truncate(store, &clusters)?;
    }

    let mut report = SeedReport::default();

    for (ci, cluster) in fixture.iter().enumerate() {
        let cluster_id = store
            .create_record(&clusters, cluster.to_cluster().to_values())
            .map_err(|e| {
                partial_commit(&report);
                BootstrapError::persistence(
                    format!("seed cluster #{ci} ('{}')", cluster.title),
                    e,
                )
            })?;
        report.clusters += 1;
        debug!(index = ci, id = %cluster_id, title = %cluster.title, "cluster seeded");

        for (mi, camera) in cluster.cameras.iter().enumerate() {
            let marker_id = store
                .create_record(&markers, camera.to_marker(cluster_id).to_values())
                .map_err(|e| {
                    partial_commit(&report);
                    BootstrapError::persistence(
                        format!("seed cluster #{ci} camera #{mi} ('{}')", camera.title),
                        e,
                    )
                })?;
            report.markers += 1;
            debug!(cluster = ci, index = mi, id = %marker_id, "marker seeded");
        }
    }

    info!(
        clusters = report.clusters,
        markers = report.markers,
        "sample data seeded"
    );

    Ok(report)
}

fn require<S>(store: &S, name: &str) -> Result<Collection, BootstrapError>
where
    S: CollectionStore + ?Sized,
{
    store
        .find_collection(name)
        .ok_or_else(|| BootstrapError::dependency_missing(SEED_DEPENDENT, name))
}

fn truncate<S>(store: &mut S, collection: &Collection) -> Result<(), BootstrapError>
where
    S: CollectionStore + ?Sized,
{
    store.truncate_collection(collection).map_err(|e| {
        BootstrapError::persistence(format!("truncate collection '{}'", collection.name()), e)
    })
}

fn partial_commit(report: &SeedReport) {
    if report.clusters > 0 {
        warn!(
            clusters = report.clusters,
            markers = report.markers,
            "seeding aborted after a partial commit"
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        entity::{Cluster, Marker},
        reconcile::ensure_schema,
        store::{MemoryStore, StoreError},
        test_support::{TWO_CLUSTER_FIXTURE, write_fixture},
        value::FieldValues,
    };
    use geomark_schema::geo::{SCHEMA, fields};

    fn schema_store() -> MemoryStore {
        let mut store = MemoryStore::new();
        ensure_schema(&mut store, &SCHEMA, Mode::Production).expect("schema");

        store
    }

    fn counts(store: &MemoryStore) -> (usize, usize) {
        let c = store.find_collection(CLUSTER_NAME).expect("cluster");
        let m = store.find_collection(MARKER_NAME).expect("marker");

        (
            store.count_records(&c).expect("count"),
            store.count_records(&m).expect("count"),
        )
    }

    #[test]
    fn production_seed_is_a_no_op() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = write_fixture(&dir, TWO_CLUSTER_FIXTURE);
        let mut store = schema_store();
        let cluster = store.find_collection(CLUSTER_NAME).expect("cluster");
        store
            .create_record(&cluster, FieldValues::new().with(fields::TITLE, "existing"))
            .expect("record");

        let report = seed(&mut store, &path, Mode::Production, TruncatePolicy::All).expect("seed");

        assert!(report.skipped);
        assert_eq!(counts(&store), (1, 0));
    }

    #[test]
    fn production_seed_does_not_read_the_fixture() {
        let mut store = schema_store();

        let report = seed(
            &mut store,
            Path::new("/no/such/fixture.json"),
            Mode::Production,
            TruncatePolicy::All,
        )
        .expect("no-op");

        assert_eq!(report, SeedReport::skipped());
    }

    #[test]
    fn development_seed_links_markers_to_their_cluster() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = write_fixture(&dir, TWO_CLUSTER_FIXTURE);
        let mut store = schema_store();

        let report = seed(&mut store, &path, Mode::Development, TruncatePolicy::All).expect("seed");
        assert_eq!((report.clusters, report.markers), (2, 3));
        assert_eq!(counts(&store), (2, 3));

        let cluster_coll = store.find_collection(CLUSTER_NAME).expect("cluster");
        let marker_coll = store.find_collection(MARKER_NAME).expect("marker");
        let clusters = store.records(&cluster_coll).expect("clusters");
        let markers: Vec<_> = store
            .records(&marker_coll)
            .expect("markers")
            .iter()
            .map(Marker::from_record)
            .collect();

        let a = clusters[0].id;
        let b = clusters[1].id;
        assert_eq!(Cluster::from_record(&clusters[0]).title.as_deref(), Some("Cluster A"));
        assert_eq!(Cluster::from_record(&clusters[1]).camera_count, Some(2));

        let links: Vec<_> = markers
            .iter()
            .map(|m| (m.title.as_deref(), m.cluster_id))
            .collect();
        assert_eq!(
            links,
            vec![
                (Some("A-1"), Some(a)),
                (Some("B-1"), Some(b)),
                (Some("B-2"), Some(b)),
            ]
        );
        assert!(markers.iter().all(|m| m.created.is_some() && m.updated.is_some()));
    }

    #[test]
    fn reseeding_with_symmetric_truncation_replaces_everything() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = write_fixture(&dir, TWO_CLUSTER_FIXTURE);
        let mut store = schema_store();

        seed(&mut store, &path, Mode::Development, TruncatePolicy::All).expect("first");
        seed(&mut store, &path, Mode::Development, TruncatePolicy::All).expect("second");

        assert_eq!(counts(&store), (2, 3));
    }

    #[test]
    fn reseeding_markers_only_accumulates_clusters() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = write_fixture(&dir, TWO_CLUSTER_FIXTURE);
        let mut store = schema_store();

        seed(&mut store, &path, Mode::Development, TruncatePolicy::Markers).expect("first");
        seed(&mut store, &path, Mode::Development, TruncatePolicy::Markers).expect("second");

        assert_eq!(counts(&store), (4, 3));
    }

    #[test]
    fn malformed_fixture_commits_nothing() {
        let dir = tempfile::tempdir().expect("tempdir");
        let good = write_fixture(&dir, TWO_CLUSTER_FIXTURE);
        let mut store = schema_store();
        seed(&mut store, &good, Mode::Development, TruncatePolicy::All).expect("seed");

        let bad = dir.path().join("bad.json");
        std::fs::write(
            &bad,
            r#"[{"title":"A","description":"","latitude":"1","longitude":"2","cameras":{}}]"#,
        )
        .expect("write");

        let err = seed(&mut store, &bad, Mode::Development, TruncatePolicy::All)
            .expect_err("malformed");

        assert!(matches!(err, BootstrapError::FixtureMalformed { .. }));
        // previous contents untouched: parsing happens before truncation
        assert_eq!(counts(&store), (2, 3));
    }

    #[test]
    fn load_fixture_reports_line_and_column() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = write_fixture(&dir, TWO_CLUSTER_FIXTURE);
        assert_eq!(load_fixture(&path).expect("fixture").camera_count(), 3);

        let bad = write_fixture(&dir, "[\n  {\"title\": 1}\n]");
        let err = load_fixture(&bad).expect_err("malformed");

        let BootstrapError::FixtureMalformed { path, source } = &err else {
            panic!("expected malformed fixture, got {err:?}");
        };
        assert_eq!(path, &bad);
        assert_eq!(source.line(), 2);
    }

    #[test]
    fn missing_fixture_is_unreadable() {
        let mut store = schema_store();

        let err = seed(
            &mut store,
            Path::new("/no/such/fixture.json"),
            Mode::Development,
            TruncatePolicy::All,
        )
        .expect_err("missing");

        assert!(matches!(err, BootstrapError::FixtureUnreadable { .. }));
    }

    #[test]
    fn seeding_without_schema_is_dependency_missing() {
        let fixture = Fixture::default();
        let mut store = MemoryStore::new();

        let err = seed_fixture(&mut store, &fixture, TruncatePolicy::All).expect_err("no schema");

        assert!(matches!(
            err,
            BootstrapError::DependencyMissing { ref dependency, .. } if dependency == "cluster"
        ));
    }

    ///
    /// FailingStore
    /// Rejects the nth record write.
    ///

    struct FailingStore {
        inner: MemoryStore,
        fail_at: usize,
        writes: usize,
    }

    impl CollectionStore for FailingStore {
        fn find_collection(&self, name: &str) -> Option<Collection> {
            self.inner.find_collection(name)
        }

        fn collections(&self) -> Vec<Collection> {
            self.inner.collections()
        }

        fn create_collection(
            &mut self,
            def: crate::model::CollectionDef,
        ) -> Result<Collection, StoreError> {
            self.inner.create_collection(def)
        }

        fn delete_collection(&mut self, collection: &Collection) -> Result<(), StoreError> {
            self.inner.delete_collection(collection)
        }

        fn truncate_collection(&mut self, collection: &Collection) -> Result<(), StoreError> {
            self.inner.truncate_collection(collection)
        }

        fn create_record(
            &mut self,
            collection: &Collection,
            values: FieldValues,
        ) -> Result<crate::types::RecordId, StoreError> {
            self.writes += 1;
            if self.writes == self.fail_at {
                return Err(StoreError::Io {
                    path: "store.json".into(),
                    source: std::io::Error::other("disk full"),
                });
            }

            self.inner.create_record(collection, values)
        }

        fn update_record(
            &mut self,
            collection: &Collection,
            id: crate::types::RecordId,
            values: FieldValues,
        ) -> Result<(), StoreError> {
            self.inner.update_record(collection, id, values)
        }

        fn records(&self, collection: &Collection) -> Result<Vec<crate::store::Record>, StoreError> {
            self.inner.records(collection)
        }
    }

    #[test]
    fn store_failure_reports_the_failing_index_and_keeps_prior_writes() {
        let fixture = Fixture::parse(Path::new("cameras.json"), TWO_CLUSTER_FIXTURE.as_bytes())
            .expect("fixture");
        // writes: cluster A, A-1, cluster B, B-1, B-2 -> fail on B-1
        let mut store = FailingStore {
            inner: schema_store(),
            fail_at: 4,
            writes: 0,
        };

        let err = seed_fixture(&mut store, &fixture, TruncatePolicy::All).expect_err("fails");

        let BootstrapError::Persistence { context, .. } = &err else {
            panic!("expected persistence error, got {err:?}");
        };
        assert_eq!(context, "seed cluster #1 camera #0 ('B-1')");
        assert_eq!(counts(&store.inner), (2, 1));
    }
}
