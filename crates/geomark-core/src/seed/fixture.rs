use crate::{
    entity::{Cluster, Marker, MarkerType},
    error::BootstrapError,
    types::RecordId,
};
use derive_more::{Deref, IntoIterator};
use serde::{Deserialize, Serialize};
use std::{fs, path::Path};

///
/// Fixture
///
/// Ordered cluster descriptors, each with its nested cameras.
///

#[derive(Clone, Debug, Default, Deref, Deserialize, Eq, IntoIterator, PartialEq, Serialize)]
#[into_iterator(owned, ref)]
#[serde(transparent)]
pub struct Fixture(Vec<ClusterFixture>);

impl Fixture {
    #[must_use]
    pub const fn new(clusters: Vec<ClusterFixture>) -> Self {
        Self(clusters)
    }

    /// Read and fully parse a fixture file.
    pub fn load(path: &Path) -> Result<Self, BootstrapError> {
        let bytes = fs::read(path).map_err(|source| BootstrapError::FixtureUnreadable {
            path: path.to_path_buf(),
            source,
        })?;

        Self::parse(path, &bytes)
    }

    /// Parse fixture bytes; `path` only labels errors.
    pub fn parse(path: &Path, bytes: &[u8]) -> Result<Self, BootstrapError> {
        serde_json::from_slice(bytes).map_err(|source| BootstrapError::FixtureMalformed {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Total number of cameras across all clusters.
    #[must_use]
    pub fn camera_count(&self) -> usize {
        self.0.iter().map(|c| c.cameras.len()).sum()
    }
}

///
/// ClusterFixture
///

#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub struct ClusterFixture {
    pub title: String,
    pub description: String,
    pub latitude: String,
    pub longitude: String,
    pub cameras: Vec<CameraFixture>,
}

impl ClusterFixture {
    /// Cluster record for this descriptor; `camera_count` is the number of
    /// nested cameras.
    #[must_use]
    pub fn to_cluster(&self) -> Cluster {
        Cluster {
            title: Some(self.title.clone()),
            description: Some(self.description.clone()),
            latitude: Some(self.latitude.clone()),
            longitude: Some(self.longitude.clone()),
            camera_count: u32::try_from(self.cameras.len()).ok(),
        }
    }
}

///
/// CameraFixture
///

#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub struct CameraFixture {
    pub title: String,
    pub description: String,
    pub latitude: String,
    pub longitude: String,
    #[serde(rename = "type")]
    pub kind: MarkerType,
    pub direction: String,
}

impl CameraFixture {
    #[must_use]
    pub fn to_marker(&self, cluster_id: RecordId) -> Marker {
        Marker {
            title: Some(self.title.clone()),
            description: Some(self.description.clone()),
            latitude: Some(self.latitude.clone()),
            longitude: Some(self.longitude.clone()),
            kind: Some(self.kind),
            direction: Some(self.direction.clone()),
            cluster_id: Some(cluster_id),
            created: None,
            updated: None,
        }
    }
}
