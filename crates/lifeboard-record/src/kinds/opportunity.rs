//! Opportunity records

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::category::Category;
use crate::id::RecordId;
use crate::record::{Record, RecordHeader, RecordKind};

/// Progress of an opportunity
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum OpportunityStatus {
    /// Not started
    #[default]
    #[serde(alias = "פתוח")]
    Open,
    /// Being pursued
    #[serde(alias = "בתהליך")]
    InProgress,
    /// Done or dropped
    #[serde(alias = "סגור")]
    Closed,
}

/// An opportunity worth tracking, with a target date and link
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Opportunity {
    #[serde(flatten)]
    pub header: RecordHeader,
    #[serde(default)]
    pub name: String,
    /// Free-form target date as entered
    #[serde(default)]
    pub date: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    #[serde(default)]
    pub status: OpportunityStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_habit: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_reset: Option<String>,
    /// Fields this version does not know about, kept as-is
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Opportunity {
    /// New open opportunity
    #[must_use]
    pub fn new(
        id: RecordId,
        name: impl Into<String>,
        date: impl Into<String>,
        category: Category,
    ) -> Self {
        Self {
            header: RecordHeader::new(id, category),
            name: name.into(),
            date: date.into(),
            url: None,
            status: OpportunityStatus::Open,
            is_habit: None,
            last_reset: None,
            extra: Map::new(),
        }
    }
}

impl Record for Opportunity {
    const KIND: RecordKind = RecordKind::Opportunity;

    fn header(&self) -> &RecordHeader {
        &self.header
    }

    fn header_mut(&mut self) -> &mut RecordHeader {
        &mut self.header
    }

    fn search_text(&self) -> &str {
        &self.name
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn opportunity_reads_legacy_status() {
        let opp: Opportunity = serde_json::from_value(json!({
            "id": "o1",
            "name": "Grant",
            "category": "תעסוקתי",
            "date": "16.10.2026",
            "status": "בתהליך",
            "isHabit": true
        }))
        .unwrap();

        assert_eq!(opp.status, OpportunityStatus::InProgress);
        assert_eq!(opp.is_habit, Some(true));
        assert_eq!(opp.header.category, Category::Occupational);
    }

    #[test]
    fn opportunity_writes_status_name() {
        let opp = Opportunity::new(RecordId::new("o2"), "x", "", Category::Personal);
        let json = serde_json::to_value(&opp).unwrap();
        assert_eq!(json["status"], "OPEN");
        assert!(json.get("url").is_none());
    }
}
