use derive_more::{Display, From, FromStr};
use serde::{Deserialize, Serialize};
use ulid::Ulid;

///
/// RecordId
///
/// Store-assigned record identifier, fixed at creation.
///

#[derive(
    Clone,
    Copy,
    Debug,
    Deserialize,
    Display,
    Eq,
    From,
    FromStr,
    Hash,
    Ord,
    PartialEq,
    PartialOrd,
    Serialize,
)]
#[serde(transparent)]
pub struct RecordId(Ulid);

impl RecordId {
    #[must_use]
    pub fn generate() -> Self {
        Self(Ulid::new())
    }

    #[must_use]
    pub const fn from_ulid(ulid: Ulid) -> Self {
        Self(ulid)
    }

    #[must_use]
    pub const fn get(self) -> Ulid {
        self.0
    }
}

///
/// CollectionId
///
/// Store-assigned collection identity. A dropped and recreated collection
/// never gets its old identifier back.
///

#[derive(
    Clone,
    Copy,
    Debug,
    Deserialize,
    Display,
    Eq,
    From,
    FromStr,
    Hash,
    Ord,
    PartialEq,
    PartialOrd,
    Serialize,
)]
#[serde(transparent)]
pub struct CollectionId(Ulid);

impl CollectionId {
    #[must_use]
    pub fn generate() -> Self {
        Self(Ulid::new())
    }

    #[must_use]
    pub const fn get(self) -> Ulid {
        self.0
    }
}
