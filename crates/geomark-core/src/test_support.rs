use crate::{
    model::CollectionDef,
    store::{Collection, CollectionStore},
    types::RecordId,
    value::FieldValues,
};
use geomark_schema::geo::{CLUSTER, MARKER, fields};

/// Create `cluster` then `marker` directly through the store.
pub(crate) fn create_geo_collections<S: CollectionStore>(store: &mut S) -> (Collection, Collection) {
    let cluster = store
        .create_collection(CollectionDef::resolve(&CLUSTER, |_| None).expect("cluster resolves"))
        .expect("create cluster");

    let cluster_id = cluster.id;
    let marker = store
        .create_collection(
            CollectionDef::resolve(&MARKER, |name| (name == CLUSTER.name).then_some(cluster_id))
                .expect("marker resolves"),
        )
        .expect("create marker");

    (cluster, marker)
}

pub(crate) fn marker_values(cluster_id: Option<RecordId>) -> FieldValues {
    let mut values = FieldValues::new()
        .with(fields::TITLE, "Cam 01")
        .with(fields::TYPE, "speed");
    values.set_opt(fields::CLUSTER_ID, cluster_id);

    values
}

/// Two clusters: A with one camera, B with two.
pub(crate) const TWO_CLUSTER_FIXTURE: &str = r#"[
  {
    "title": "Cluster A",
    "description": "first",
    "latitude": "21.0285",
    "longitude": "105.8542",
    "cameras": [
      {
        "title": "A-1",
        "description": "gate",
        "latitude": "21.0286",
        "longitude": "105.8543",
        "type": "ai",
        "direction": "north"
      }
    ]
  },
  {
    "title": "Cluster B",
    "description": "second",
    "latitude": "10.7769",
    "longitude": "106.7009",
    "cameras": [
      {
        "title": "B-1",
        "description": "bridge",
        "latitude": "10.7770",
        "longitude": "106.7010",
        "type": "speed",
        "direction": "south"
      },
      {
        "title": "B-2",
        "description": "market",
        "latitude": "10.7771",
        "longitude": "106.7011",
        "type": "overseer",
        "direction": "east"
      }
    ]
  }
]"#;

/// Write `contents` to a fresh fixture file inside `dir`.
pub(crate) fn write_fixture(dir: &tempfile::TempDir, contents: &str) -> std::path::PathBuf {
    let path = dir.path().join("cameras.json");
    std::fs::write(&path, contents).expect("write fixture");

    path
}
