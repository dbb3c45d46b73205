//! Typed partition keys
//!
//! Maps `(kind, slot)` to the storage key of that partition. The membership
//! predicate in [`PartitionSlot::admits`] decides which records a partition
//! holds; both the reconciler and the writer go through it.

use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fmt::{self, Display, Formatter};

use lifeboard_record::{Category, Domain, RecordHeader, RecordKind};

/// One of the four partitions of a record kind
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PartitionSlot {
    /// The main view
    Main,
    /// A life domain
    Domain(Domain),
}

impl PartitionSlot {
    /// All slots, main first
    pub const ALL: [PartitionSlot; 4] = [
        PartitionSlot::Main,
        PartitionSlot::Domain(Domain::Personal),
        PartitionSlot::Domain(Domain::Occupational),
        PartitionSlot::Domain(Domain::Financial),
    ];

    /// Category a record gets when read from this partition without one
    #[inline]
    #[must_use]
    pub const fn default_category(&self) -> Category {
        match self {
            PartitionSlot::Main => Category::Main,
            PartitionSlot::Domain(domain) => domain.category(),
        }
    }

    /// Membership predicate
    ///
    /// - main holds records whose category is `Main`
    /// - domain X holds records whose category is X, plus records promoted from X
    #[inline]
    #[must_use]
    pub fn admits(&self, header: &RecordHeader) -> bool {
        match self {
            PartitionSlot::Main => header.category == Category::Main,
            PartitionSlot::Domain(domain) => {
                header.category == domain.category()
                    || (header.category == Category::Main
                        && header.original_category == Some(*domain))
            }
        }
    }
}

impl Display for PartitionSlot {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            PartitionSlot::Main => f.write_str("MAIN"),
            PartitionSlot::Domain(domain) => write!(f, "{domain}"),
        }
    }
}

/// Storage keys for the four partitions of one record kind
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct KindPartitions {
    /// Key of the main partition
    pub main: String,
    /// Key of the personal domain partition
    pub personal: String,
    /// Key of the occupational domain partition
    pub occupational: String,
    /// Key of the financial domain partition
    pub financial: String,
}

impl KindPartitions {
    /// Build from four keys
    #[must_use]
    pub fn new(
        main: impl Into<String>,
        personal: impl Into<String>,
        occupational: impl Into<String>,
        financial: impl Into<String>,
    ) -> Self {
        Self {
            main: main.into(),
            personal: personal.into(),
            occupational: occupational.into(),
            financial: financial.into(),
        }
    }

    /// Key for a slot
    #[inline]
    #[must_use]
    pub fn key(&self, slot: PartitionSlot) -> &str {
        match slot {
            PartitionSlot::Main => &self.main,
            PartitionSlot::Domain(Domain::Personal) => &self.personal,
            PartitionSlot::Domain(Domain::Occupational) => &self.occupational,
            PartitionSlot::Domain(Domain::Financial) => &self.financial,
        }
    }

    /// Slots with their keys, main first
    ///
    /// Main first matters to the reconciler: on an id collision the main copy
    /// is seen before domain copies.
    pub fn slots(&self) -> impl Iterator<Item = (PartitionSlot, &str)> + '_ {
        PartitionSlot::ALL.into_iter().map(move |slot| (slot, self.key(slot)))
    }
}

/// Partition keys for every record kind
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PartitionTable {
    /// Task partitions
    pub task: KindPartitions,
    /// Focus goal partitions
    pub focus: KindPartitions,
    /// Opportunity partitions
    pub opportunity: KindPartitions,
    /// Idea partitions
    pub idea: KindPartitions,
}

impl PartitionTable {
    /// Partitions of one kind
    #[inline]
    #[must_use]
    pub fn for_kind(&self, kind: RecordKind) -> &KindPartitions {
        match kind {
            RecordKind::Task => &self.task,
            RecordKind::Focus => &self.focus,
            RecordKind::Opportunity => &self.opportunity,
            RecordKind::Idea => &self.idea,
        }
    }

    /// Every key in the table with its kind and slot
    pub fn entries(&self) -> impl Iterator<Item = (RecordKind, PartitionSlot, &str)> + '_ {
        RecordKind::ALL.into_iter().flat_map(move |kind| {
            self.for_kind(kind)
                .slots()
                .map(move |(slot, key)| (kind, slot, key))
        })
    }

    /// Check that keys are non-empty and no key is used twice
    ///
    /// # Errors
    /// Returns a description of the first problem found
    pub fn validate(&self) -> Result<(), String> {
        let mut seen = HashSet::new();
        for (kind, slot, key) in self.entries() {
            if key.trim().is_empty() {
                return Err(format!("empty partition key for {kind}/{slot}"));
            }
            if !seen.insert(key) {
                return Err(format!("partition key '{key}' is used more than once"));
            }
        }
        Ok(())
    }
}

impl Default for PartitionTable {
    /// Keys written by the original dashboard
    fn default() -> Self {
        Self {
            task: KindPartitions::new(
                "dashboard_main_tasks",
                "tasks_personal",
                "tasks_occ",
                "fin_tasks_v2",
            ),
            focus: KindPartitions::new(
                "dashboard_main_focuses",
                "projects_personal",
                "projects_occ",
                "fin_goals_data",
            ),
            opportunity: KindPartitions::new(
                "dashboard_opps",
                "opps_personal",
                "opps_occ",
                "fin_opps_data_v2",
            ),
            idea: KindPartitions::new("ideas_main", "ideas_personal", "ideas_occ", "ideas_fin"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use lifeboard_record::RecordId;

    fn header(category: Category, original: Option<Domain>) -> RecordHeader {
        RecordHeader {
            id: RecordId::new("r"),
            category,
            original_category: original,
        }
    }

    #[test]
    fn main_admits_only_main() {
        assert!(PartitionSlot::Main.admits(&header(Category::Main, None)));
        assert!(PartitionSlot::Main.admits(&header(Category::Main, Some(Domain::Personal))));
        assert!(!PartitionSlot::Main.admits(&header(Category::Personal, None)));
    }

    #[test]
    fn domain_admits_own_and_promoted_from_it() {
        let fin = PartitionSlot::Domain(Domain::Financial);
        assert!(fin.admits(&header(Category::Financial, None)));
        assert!(fin.admits(&header(Category::Main, Some(Domain::Financial))));
        assert!(!fin.admits(&header(Category::Main, Some(Domain::Personal))));
        assert!(!fin.admits(&header(Category::Main, None)));
        assert!(!fin.admits(&header(Category::Occupational, None)));
    }

    #[test]
    fn promoted_record_lands_in_exactly_two_partitions() {
        let h = header(Category::Main, Some(Domain::Occupational));
        let holders: Vec<_> = PartitionSlot::ALL.iter().filter(|s| s.admits(&h)).collect();
        assert_eq!(
            holders,
            vec![&PartitionSlot::Main, &PartitionSlot::Domain(Domain::Occupational)]
        );
    }

    #[test]
    fn default_table_is_valid() {
        let table = PartitionTable::default();
        assert!(table.validate().is_ok());
        assert_eq!(
            table.for_kind(RecordKind::Task).key(PartitionSlot::Main),
            "dashboard_main_tasks"
        );
        assert_eq!(table.entries().count(), 16);
    }

    #[test]
    fn duplicate_keys_rejected() {
        let mut table = PartitionTable::default();
        table.idea.main = "tasks_personal".to_string();
        let err = table.validate().unwrap_err();
        assert!(err.contains("tasks_personal"));
    }

    #[test]
    fn slots_iterate_main_first() {
        let table = PartitionTable::default();
        let first = table.focus.slots().next().unwrap();
        assert_eq!(first, (PartitionSlot::Main, "dashboard_main_focuses"));
    }
}
