use crate::{store::Record, value::FieldValues};
use geomark_schema::geo::fields;
use serde::{Deserialize, Serialize};

///
/// Cluster
///
/// Named geographic grouping of markers. Coordinates are kept as the text
/// the source supplied.
///

#[derive(Clone, Debug, Default, Deserialize, Eq, PartialEq, Serialize)]
pub struct Cluster {
    pub title: Option<String>,
    pub description: Option<String>,
    pub latitude: Option<String>,
    pub longitude: Option<String>,
    pub camera_count: Option<u32>,
}

impl Cluster {
    #[must_use]
    pub fn to_values(&self) -> FieldValues {
        let mut values = FieldValues::new();
        values.set_opt(fields::TITLE, self.title.clone());
        values.set_opt(fields::DESCRIPTION, self.description.clone());
        values.set_opt(fields::LATITUDE, self.latitude.clone());
        values.set_opt(fields::LONGITUDE, self.longitude.clone());
        values.set_opt(fields::CAMERA_COUNT, self.camera_count);

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
            camera_count: record
                .values
                .get(fields::CAMERA_COUNT)
                .and_then(crate::value::Value::as_number)
                .and_then(count_from_f64),
        }
    }
}

// Counts are written from u32, so anything else is not ours.
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn count_from_f64(n: f64) -> Option<u32> {
    if n.fract() == 0.0 && (0.0..=f64::from(u32::MAX)).contains(&n) {
        Some(n as u32)
    } else {
        None
    }
}
