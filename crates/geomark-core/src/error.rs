use crate::store::StoreError;
use std::{fmt, io, path::PathBuf};
use thiserror::Error as ThisError;

///
/// BootstrapError
///
/// Everything the schema reconciler and the fixture seeder can fail with.
/// None of these are retried; each one aborts startup.
///

#[derive(Debug, ThisError)]
pub enum BootstrapError {
    #[error("schema is invalid: {0}")]
    InvalidSchema(#[from] geomark_schema::Error),

    #[error("'{dependent}' requires collection '{dependency}', which does not exist")]
    DependencyMissing {
        dependent: String,
        dependency: String,
    },

    #[error("{context}: {source}")]
    Persistence {
        context: String,
        #[source]
        source: StoreError,
    },

    #[error("fixture '{}' is unreadable: {source}", path.display())]
    FixtureUnreadable {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("fixture '{}' is malformed: {source}", path.display())]
    FixtureMalformed {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

impl BootstrapError {
    pub(crate) fn persistence(context: impl Into<String>, source: StoreError) -> Self {
        Self::Persistence {
            context: context.into(),
            source,
        }
    }

    pub(crate) fn dependency_missing(dependent: &str, dependency: &str) -> Self {
        Self::DependencyMissing {
            dependent: dependent.to_string(),
            dependency: dependency.to_string(),
        }
    }

    #[must_use]
    pub fn class(&self) -> ErrorClass {
        match self {
            Self::InvalidSchema(_) => ErrorClass::InvariantViolation,
            Self::DependencyMissing { .. } => ErrorClass::NotFound,
            Self::Persistence { source, .. } => source.class(),
            Self::FixtureUnreadable { source, .. } => {
                if source.kind() == io::ErrorKind::NotFound {
                    ErrorClass::NotFound
                } else {
                    ErrorClass::Internal
                }
            }
            Self::FixtureMalformed { .. } => ErrorClass::Unsupported,
        }
    }

    #[must_use]
    pub const fn origin(&self) -> ErrorOrigin {
        match self {
            Self::InvalidSchema(_) | Self::DependencyMissing { .. } => ErrorOrigin::Schema,
            Self::Persistence { .. } => ErrorOrigin::Store,
            Self::FixtureUnreadable { .. } | Self::FixtureMalformed { .. } => ErrorOrigin::Fixture,
        }
    }

    #[must_use]
    pub fn display_with_class(&self) -> String {
        format!("{}:{}: {self}", self.origin(), self.class())
    }
}

///
/// ErrorClass
/// Error taxonomy for runtime classification.
///

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum ErrorClass {
    Conflict,
    Corruption,
    Internal,
    InvariantViolation,
    NotFound,
    Unsupported,
}

impl fmt::Display for ErrorClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::Conflict => "conflict",
            Self::Corruption => "corruption",
            Self::Internal => "internal",
            Self::InvariantViolation => "invariant_violation",
            Self::NotFound => "not_found",
            Self::Unsupported => "unsupported",
        };
        write!(f, "{label}")
    }
}

///
/// ErrorOrigin
///

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum ErrorOrigin {
    Fixture,
    Schema,
    Store,
}

impl fmt::Display for ErrorOrigin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::Fixture => "fixture",
            Self::Schema => "schema",
            Self::Store => "store",
        };
        write!(f, "{label}")
    }
}
