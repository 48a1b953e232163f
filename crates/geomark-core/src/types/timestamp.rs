use chrono::{DateTime, SecondsFormat, Utc};
use derive_more::{Display, FromStr};
use serde::{Deserialize, Serialize};

///
/// Timestamp
/// (in milliseconds since the unix epoch)
///

#[derive(
    Clone,
    Copy,
    Debug,
    Default,
    Deserialize,
    Display,
    Eq,
    FromStr,
    Hash,
    Ord,
    PartialEq,
    PartialOrd,
    Serialize,
)]
#[serde(transparent)]
#[repr(transparent)]
pub struct Timestamp(u64);

impl Timestamp {
    pub const EPOCH: Self = Self(u64::MIN);

    #[must_use]
    pub const fn from_millis(ms: u64) -> Self {
        Self(ms)
    }

    #[must_use]
    pub const fn from_seconds(secs: u64) -> Self {
        Self(secs.saturating_mul(1_000))
    }

    /// Current wall-clock time. Clocks before the epoch clamp to it.
    #[must_use]
    pub fn now() -> Self {
        Self(u64::try_from(Utc::now().timestamp_millis()).unwrap_or_default())
    }

    #[must_use]
    pub const fn get(self) -> u64 {
        self.0
    }

    /// RFC 3339 rendering with millisecond precision.
    #[must_use]
    pub fn to_rfc3339(self) -> String {
        i64::try_from(self.0)
            .ok()
            .and_then(DateTime::<Utc>::from_timestamp_millis)
            .map_or_else(
                || self.0.to_string(),
                |dt| dt.to_rfc3339_opts(SecondsFormat::Millis, true),
            )
    }
}
