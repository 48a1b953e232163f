//! Startup sequence: reconcile the schema, then seed sample data.

use crate::{
    DEFAULT_FIXTURE_PATH,
    error::BootstrapError,
    mode::Mode,
    reconcile::{self, SchemaReport},
    seed::{self, SeedReport, TruncatePolicy},
    store::CollectionStore,
};
use geomark_schema::geo;
use serde::Serialize;
use std::path::{Path, PathBuf};
use tracing::info;

///
/// Bootstrap
///
/// Mode and inputs for one startup run. The store is passed to each step
/// rather than owned, so callers decide its lifetime.
///

#[derive(Clone, Debug)]
pub struct Bootstrap {
    mode: Mode,
    fixture: PathBuf,
    truncate: TruncatePolicy,
}

impl Bootstrap {
    #[must_use]
    pub fn new(mode: Mode) -> Self {
        Self {
            mode,
            fixture: PathBuf::from(DEFAULT_FIXTURE_PATH),
            truncate: TruncatePolicy::default(),
        }
    }

    #[must_use]
    pub fn with_fixture(mut self, path: impl Into<PathBuf>) -> Self {
        self.fixture = path.into();
        self
    }

    #[must_use]
    pub const fn with_truncate(mut self, policy: TruncatePolicy) -> Self {
        self.truncate = policy;
        self
    }

    #[must_use]
    pub const fn mode(&self) -> Mode {
        self.mode
    }

    #[must_use]
    pub fn fixture(&self) -> &Path {
        &self.fixture
    }

    pub fn ensure_schema<S>(&self, store: &mut S) -> Result<SchemaReport, BootstrapError>
    where
        S: CollectionStore + ?Sized,
    {
        reconcile::ensure_schema(store, &geo::SCHEMA, self.mode)
    }

    pub fn seed_sample_data<S>(&self, store: &mut S) -> Result<SeedReport, BootstrapError>
    where
        S: CollectionStore + ?Sized,
    {
        seed::seed(store, &self.fixture, self.mode, self.truncate)
    }

    /// Schema first, then sample data; the first failure aborts.
    pub fn run<S>(&self, store: &mut S) -> Result<BootstrapReport, BootstrapError>
    where
        S: CollectionStore + ?Sized,
    {
        info!(mode = %self.mode, "bootstrap starting");

        let schema = self.ensure_schema(store)?;
        let seed = self.seed_sample_data(store)?;

        info!(
            created = schema.created.len(),
            kept = schema.kept.len(),
            dropped = schema.dropped.len(),
            "bootstrap complete"
        );

        Ok(BootstrapReport {
            mode: self.mode,
            schema,
            seed,
        })
    }
}

///
/// BootstrapReport
///

#[derive(Clone, Debug, Eq, PartialEq, Serialize)]
pub struct BootstrapReport {
    pub mode: Mode,
    pub schema: SchemaReport,
    pub seed: SeedReport,
}
