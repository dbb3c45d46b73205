//! Task records

use chrono::{DateTime, TimeZone, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};

use crate::category::Category;
use crate::id::RecordId;
use crate::record::{Record, RecordHeader, RecordKind};

/// A to-do item
///
/// # Invariants
/// - `completed == true` implies `completed_at.is_some()`
/// - `completed == false` implies `completed_at.is_none()`
///
/// Use [`Task::set_completed`] to flip completion so both fields move together.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Task {
    #[serde(flatten)]
    pub header: RecordHeader,
    #[serde(default)]
    pub text: String,
    #[serde(default)]
    pub completed: bool,
    #[serde(
        default,
        deserialize_with = "lenient_timestamp",
        skip_serializing_if = "Option::is_none"
    )]
    pub completed_at: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub icon_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_habit: Option<bool>,
    /// Fields this version does not know about, kept as-is
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Task {
    /// New open task
    #[must_use]
    pub fn new(id: RecordId, text: impl Into<String>, category: Category) -> Self {
        Self {
            header: RecordHeader::new(id, category),
            text: text.into(),
            completed: false,
            completed_at: None,
            date: None,
            icon_type: None,
            is_habit: None,
            extra: Map::new(),
        }
    }

    /// Mark done at `now`, or reopen
    pub fn set_completed(&mut self, completed: bool, now: DateTime<Utc>) {
        self.completed = completed;
        self.completed_at = completed.then_some(now);
    }
}

impl Record for Task {
    const KIND: RecordKind = RecordKind::Task;

    fn header(&self) -> &RecordHeader {
        &self.header
    }

    fn header_mut(&mut self) -> &mut RecordHeader {
        &mut self.header
    }

    fn search_text(&self) -> &str {
        &self.text
    }
}

/// Reads an RFC 3339 string or epoch milliseconds; anything else reads as absent.
fn lenient_timestamp<'de, D>(deserializer: D) -> Result<Option<DateTime<Utc>>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<Value>::deserialize(deserializer)?;
    Ok(match raw {
        Some(Value::String(s)) => DateTime::parse_from_rfc3339(&s)
            .ok()
            .map(|dt| dt.with_timezone(&Utc)),
        Some(Value::Number(n)) => n
            .as_i64()
            .and_then(|millis| Utc.timestamp_millis_opt(millis).single()),
        _ => None,
    })
}
