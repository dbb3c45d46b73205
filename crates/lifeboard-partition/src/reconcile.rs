//! Load-time merge of a record kind's partitions
//!
//! Partitions are read main first, then personal, occupational, financial.
//! Records are merged by id: a later copy replaces an earlier one, except that
//! a copy whose category is `Main` is never replaced by a domain copy.
//!
//! Nothing here fails. Missing or malformed partitions read as empty and
//! undecodable elements are skipped; both are counted in [`LoadReport`].

use indexmap::map::Entry;
use indexmap::IndexMap;
use serde_json::Value;

use lifeboard_record::{Record, RecordId};

use crate::keys::{KindPartitions, PartitionSlot};
use crate::store::PartitionStore;

/// What happened while loading one record kind
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LoadReport {
    /// Partitions that existed and held a JSON array
    pub partitions_read: usize,
    /// Keys with no stored value
    pub missing: Vec<String>,
    /// Keys whose value was not a JSON array
    pub malformed: Vec<String>,
    /// Keys the store failed to read
    pub unreadable: Vec<String>,
    /// Array elements that could not be decoded as a record
    pub skipped_records: usize,
    /// Ids seen in more than one partition
    pub duplicates: usize,
}

impl LoadReport {
    /// Check if every partition was read without loss
    #[inline]
    #[must_use]
    pub fn is_clean(&self) -> bool {
        self.malformed.is_empty() && self.unreadable.is_empty() && self.skipped_records == 0
    }

    /// Fold another report into this one
    pub fn absorb(&mut self, other: LoadReport) {
        self.partitions_read += other.partitions_read;
        self.missing.extend(other.missing);
        self.malformed.extend(other.malformed);
        self.unreadable.extend(other.unreadable);
        self.skipped_records += other.skipped_records;
        self.duplicates += other.duplicates;
    }
}

/// Deduplicated records of one kind plus the load report
#[derive(Debug, Clone)]
pub struct Reconciled<R> {
    /// Merged collection, in first-seen order
    pub records: Vec<R>,
    /// What the load found along the way
    pub report: LoadReport,
}

/// Read all partitions of a kind and merge them into one collection
pub fn reconcile<R, S>(store: &S, partitions: &KindPartitions) -> Reconciled<R>
where
    R: Record,
    S: PartitionStore + ?Sized,
{
    let mut report = LoadReport::default();
    let mut merged: IndexMap<RecordId, R> = IndexMap::new();

    for (slot, key) in partitions.slots() {
        for record in read_partition::<R, S>(store, slot, key, &mut report) {
            merge_into(&mut merged, record, &mut report);
        }
    }

    tracing::debug!(
        kind = %R::KIND,
        records = merged.len(),
        duplicates = report.duplicates,
        "reconciled partitions"
    );

    Reconciled {
        records: merged.into_values().collect(),
        report,
    }
}

/// Decode one partition; anything unusable is recorded and dropped
fn read_partition<R, S>(
    store: &S,
    slot: PartitionSlot,
    key: &str,
    report: &mut LoadReport,
) -> Vec<R>
where
    R: Record,
    S: PartitionStore + ?Sized,
{
    let bytes = match store.get(key) {
        Ok(Some(bytes)) => bytes,
        Ok(None) => {
            report.missing.push(key.to_string());
            return Vec::new();
        }
        Err(e) => {
            tracing::warn!(key, error = %e, "partition unreadable, treating as empty");
            report.unreadable.push(key.to_string());
            return Vec::new();
        }
    };

    let elements = match serde_json::from_slice::<Value>(&bytes) {
        Ok(Value::Array(elements)) => elements,
        Ok(_) | Err(_) => {
            tracing::warn!(key, "partition is not a JSON array, treating as empty");
            report.malformed.push(key.to_string());
            return Vec::new();
        }
    };
    report.partitions_read += 1;

    let default_category = slot.default_category();
    elements
        .into_iter()
        .filter_map(|mut element| {
            if let Value::Object(fields) = &mut element {
                let has_category = fields.get("category").is_some_and(|c| !c.is_null());
                if !has_category {
                    fields.insert(
                        "category".to_string(),
                        Value::String(default_category.as_str().to_string()),
                    );
                }
            }
            match serde_json::from_value::<R>(element) {
                Ok(record) => Some(record),
                Err(e) => {
                    tracing::warn!(key, kind = %R::KIND, error = %e, "skipping undecodable record");
                    report.skipped_records += 1;
                    None
                }
            }
        })
        .collect()
}

/// Insert with the main-wins tie-break
fn merge_into<R: Record>(merged: &mut IndexMap<RecordId, R>, record: R, report: &mut LoadReport) {
    match merged.entry(record.id().clone()) {
        Entry::Vacant(slot) => {
            slot.insert(record);
        }
        Entry::Occupied(mut slot) => {
            report.duplicates += 1;
            let keep_existing = slot.get().category().is_main() && !record.category().is_main();
            if !keep_existing {
                slot.insert(record);
            }
        }
    }
}
