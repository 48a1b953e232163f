use crate::{
    store::Record,
    types::{RecordId, Timestamp},
    value::{FieldValues, Value},
};
use derive_more::Display;
use geomark_schema::geo::fields;
use serde::{Deserialize, Serialize};

///
/// MarkerType
///

#[derive(Clone, Copy, Debug, Deserialize, Display, Eq, Hash, PartialEq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum MarkerType {
    #[display("ai")]
    Ai,
    #[display("speed")]
    Speed,
    #[display("overseer")]
    Overseer,
    #[display("undefined")]
    Undefined,
}

impl MarkerType {
    pub const ALL: [Self; 4] = [Self::Ai, Self::Speed, Self::Overseer, Self::Undefined];

    /// Stored select value.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Ai => "ai",
            Self::Speed => "speed",
            Self::Overseer => "overseer",
            Self::Undefined => "undefined",
        }
    }

    #[must_use]
    pub fn parse(s: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|t| t.as_str() == s)
    }
}

impl From<MarkerType> for Value {
    fn from(t: MarkerType) -> Self {
        Self::Text(t.as_str().to_string())
    }
}

///
/// Marker
///
/// Point of interest belonging to at most one cluster. `created` and
/// `updated` are read back from the store and never written.
///

#[derive(Clone, Debug, Default, Deserialize, Eq, PartialEq, Serialize)]
pub struct Marker {
    pub title: Option<String>,
    pub description: Option<String>,
    pub latitude: Option<String>,
    pub longitude: Option<String>,
    pub kind: Option<MarkerType>,
    pub direction: Option<String>,
    pub cluster_id: Option<RecordId>,

    #[serde(default, skip_serializing)]
    pub created: Option<Timestamp>,
    #[serde(default, skip_serializing)]
    pub updated: Option<Timestamp>,
}

impl Marker {
    #[must_use]
    pub fn to_values(&self) -> FieldValues {
        let mut values = FieldValues::new();
        values.set_opt(fields::TITLE, self.title.clone());
        values.set_opt(fields::DESCRIPTION, self.description.clone());
        values.set_opt(fields::LATITUDE, self.latitude.clone());
        values.set_opt(fields::LONGITUDE, self.longitude.clone());
        values.set_opt(fields::TYPE, self.kind);
        values.set_opt(fields::DIRECTION, self.direction.clone());
        values.set_opt(fields::CLUSTER_ID, self.cluster_id);

        values
    }

    #[must_use]
    pub fn from_record(record: &Record) -> Self {
        let text = |field| record.text(field).map(ToString::to_string);

        Self {
            title: text(fields::TITLE),
            description: text(fields::DESCRIPTION),
            latitude: text(fields::LATITUDE),
            longitude: text(fields::LONGITUDE),
            kind: record.text(fields::TYPE).and_then(MarkerType::parse),
            direction: text(fields::DIRECTION),
            cluster_id: record
                .values
                .get(fields::CLUSTER_ID)
                .and_then(Value::as_relation)
                .and_then(|ids| ids.first().copied()),
            created: record.timestamp(fields::CREATED),
            updated: record.timestamp(fields::UPDATED),
        }
    }
}
