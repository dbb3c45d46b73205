//! Record identifiers
//!
//! Ids are opaque strings. New ids come from [`IdGenerator`], which derives
//! them from a millisecond timestamp and never hands out the same value twice.

use chrono::{DateTime, Utc};
use serde::de::{self, Visitor};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt::{self, Display, Formatter};

/// Unique record identifier within one record kind
///
/// Immutable once created. Stored as a JSON string; numeric ids found in
/// older data are read as their decimal text.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct RecordId(String);

impl RecordId {
    /// Wrap an existing id
    #[inline]
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Borrow the id text
    #[inline]
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Display for RecordId {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for RecordId {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

impl From<String> for RecordId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

impl AsRef<str> for RecordId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl Serialize for RecordId {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.0)
    }
}

impl<'de> Deserialize<'de> for RecordId {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct IdVisitor;

        impl Visitor<'_> for IdVisitor {
            type Value = RecordId;

            fn expecting(&self, f: &mut Formatter<'_>) -> fmt::Result {
                f.write_str("a string or integer record id")
            }

            fn visit_str<E: de::Error>(self, v: &str) -> Result<RecordId, E> {
                Ok(RecordId::new(v))
            }

            fn visit_string<E: de::Error>(self, v: String) -> Result<RecordId, E> {
                Ok(RecordId(v))
            }

            fn visit_u64<E: de::Error>(self, v: u64) -> Result<RecordId, E> {
                Ok(RecordId(v.to_string()))
            }

            fn visit_i64<E: de::Error>(self, v: i64) -> Result<RecordId, E> {
                Ok(RecordId(v.to_string()))
            }
        }

        deserializer.deserialize_any(IdVisitor)
    }
}

/// Largest id treated as a timestamp: 9999-12-31T23:59:59.999Z in millis
const MAX_TIMESTAMP_ID: i64 = 253_402_300_799_999;

/// Timestamp-derived id source
///
/// Uses the millisecond timestamp of `now`; when the clock has not advanced
/// past the previous id (or went backwards) the previous value plus one is
/// used instead, so ids from one generator strictly increase.
#[derive(Debug, Clone, Default)]
pub struct IdGenerator {
    last: Option<i64>,
}

impl IdGenerator {
    /// Create a generator with no history
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Produce the next id for the given instant
    pub fn next_id(&mut self, now: DateTime<Utc>) -> RecordId {
        let millis = now.timestamp_millis();
        let value = match self.last {
            Some(last) if millis <= last => last.saturating_add(1),
            _ => millis,
        };
        self.last = Some(value);
        RecordId(value.to_string())
    }

    /// Make sure future ids sort after an id already in use
    ///
    /// Non-numeric ids and numbers past the year 9999 in millis are ignored; they
    /// cannot collide with a generated id.
    pub fn observe(&mut self, id: &RecordId) {
        if let Ok(value) = id.as_str().parse::<i64>() {
            if value > MAX_TIMESTAMP_ID {
                return;
            }
            if self.last.map_or(true, |last| value > last) {
                self.last = Some(value);
            }
        }
    }
}
