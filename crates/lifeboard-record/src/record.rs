//! Shared record base and the [`Record`] trait
//!
//! Every record kind embeds a [`RecordHeader`] carrying its identity and
//! placement. Everything else is kind-specific and opaque to partitioning.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::fmt::{self, Debug, Display, Formatter};
use std::str::FromStr;

use crate::category::{Category, Domain};
use crate::error::RecordError;
use crate::id::RecordId;

/// Identity and placement shared by all record kinds
///
/// # Invariants
/// - `original_category` is only set while `category` is `Main`
/// - `id` never changes after creation
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecordHeader {
    /// Record id
    pub id: RecordId,
    /// Partition the record is currently displayed under
    pub category: Category,
    /// Domain a promoted record returns to on demotion
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub original_category: Option<Domain>,
}

impl RecordHeader {
    /// Header for a freshly created record
    #[inline]
    #[must_use]
    pub fn new(id: RecordId, category: Category) -> Self {
        Self {
            id,
            category,
            original_category: None,
        }
    }

    /// Current position in the promotion state machine
    #[inline]
    #[must_use]
    pub fn placement(&self) -> Placement {
        match (self.category.domain(), self.original_category) {
            (Some(domain), _) => Placement::Domain(domain),
            (None, Some(origin)) => Placement::Promoted(origin),
            (None, None) => Placement::Main,
        }
    }

    /// Domain whose partition holds this record, if any
    ///
    /// Promoted records still belong to their origin domain.
    #[inline]
    #[must_use]
    pub fn home_domain(&self) -> Option<Domain> {
        match self.placement() {
            Placement::Domain(domain) | Placement::Promoted(domain) => Some(domain),
            Placement::Main => None,
        }
    }
}

/// Placement of a record relative to the main view
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Placement {
    /// Shown under its own domain
    Domain(Domain),
    /// Shown under main, remembers its domain
    Promoted(Domain),
    /// Created directly under main, no domain of origin
    Main,
}

impl Display for Placement {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            Placement::Domain(domain) => write!(f, "{domain}"),
            Placement::Promoted(domain) => write!(f, "MAIN (from {domain})"),
            Placement::Main => f.write_str("MAIN"),
        }
    }
}

/// The four kinds of records the dashboard tracks
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RecordKind {
    /// To-do items with completion state
    Task,
    /// Focus goals with reasons and actions
    Focus,
    /// Tracked opportunities
    Opportunity,
    /// Free-form ideas
    Idea,
}

impl RecordKind {
    /// All kinds
    pub const ALL: [RecordKind; 4] = [
        RecordKind::Task,
        RecordKind::Focus,
        RecordKind::Opportunity,
        RecordKind::Idea,
    ];

    /// Stable lowercase name
    #[inline]
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            RecordKind::Task => "task",
            RecordKind::Focus => "focus",
            RecordKind::Opportunity => "opportunity",
            RecordKind::Idea => "idea",
        }
    }
}

impl Display for RecordKind {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for RecordKind {
    type Err = RecordError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "task" | "tasks" => Ok(RecordKind::Task),
            "focus" | "focuses" | "goal" | "goals" => Ok(RecordKind::Focus),
            "opportunity" | "opportunities" | "opp" | "opps" => Ok(RecordKind::Opportunity),
            "idea" | "ideas" => Ok(RecordKind::Idea),
            _ => Err(RecordError::UnknownKind(s.to_string())),
        }
    }
}

/// A persisted record of one kind
///
/// Implementors embed a [`RecordHeader`]; partitioning and promotion only ever
/// look at the header.
pub trait Record: Clone + Debug + PartialEq + Serialize + DeserializeOwned + Send + Sync + 'static {
    /// Kind tag
    const KIND: RecordKind;

    /// Shared header
    fn header(&self) -> &RecordHeader;

    /// Mutable shared header
    fn header_mut(&mut self) -> &mut RecordHeader;

    /// Text matched by searches and shown in listings
    fn search_text(&self) -> &str;

    /// Record id
    #[inline]
    fn id(&self) -> &RecordId {
        &self.header().id
    }

    /// Current display category
    #[inline]
    fn category(&self) -> Category {
        self.header().category
    }
}
