//! Focus goal records

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::category::Category;
use crate::id::RecordId;
use crate::record::{Record, RecordHeader, RecordKind};

/// Time horizon of a focus action
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ActionRange {
    /// Short term
    #[serde(alias = "קצר")]
    Short,
    /// Medium term
    #[default]
    #[serde(alias = "בינוני")]
    Medium,
    /// Long term
    #[serde(alias = "ארוך")]
    Long,
}

/// One concrete step toward a focus goal
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FocusAction {
    #[serde(default)]
    pub text: String,
    #[serde(default)]
    pub range: ActionRange,
}

/// A focus goal: what to concentrate on, why, and how
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Focus {
    #[serde(flatten)]
    pub header: RecordHeader,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub why: String,
    #[serde(default)]
    pub actions: Vec<FocusAction>,
    /// Fields this version does not know about, kept as-is
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Focus {
    /// New focus goal without actions
    #[must_use]
    pub fn new(id: RecordId, name: impl Into<String>, category: Category) -> Self {
        Self {
            header: RecordHeader::new(id, category),
            name: name.into(),
            why: String::new(),
            actions: Vec::new(),
            extra: Map::new(),
        }
    }
}

impl Record for Focus {
    const KIND: RecordKind = RecordKind::Focus;

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
