//! Idea records

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::category::Category;
use crate::id::RecordId;
use crate::record::{Record, RecordHeader, RecordKind};

/// A free-form idea
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Idea {
    #[serde(flatten)]
    pub header: RecordHeader,
    #[serde(default)]
    pub text: String,
    /// Fields this version does not know about, kept as-is
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Idea {
    /// New idea
    #[must_use]
    pub fn new(id: RecordId, text: impl Into<String>, category: Category) -> Self {
        Self {
            header: RecordHeader::new(id, category),
            text: text.into(),
            extra: Map::new(),
        }
    }
}

impl Record for Idea {
    const KIND: RecordKind = RecordKind::Idea;

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
