//! Full rewrite of a record kind's partitions
//!
//! Every partition is recomputed from the in-memory collection with the
//! membership predicate and written whole. Promoted records therefore appear
//! in both the main partition and their origin domain's partition.

use serde::Serialize;

use lifeboard_record::Record;

use crate::error::StoreError;
use crate::keys::{KindPartitions, PartitionSlot};
use crate::store::PartitionStore;

/// Result of one writer pass
#[derive(Debug, Default)]
pub struct WriteReport {
    /// Keys written with the number of records each now holds
    pub written: Vec<(String, usize)>,
    /// Keys that could not be written
    pub failed: Vec<(String, StoreError)>,
}

impl WriteReport {
    /// Check if every partition was written
    #[inline]
    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.failed.is_empty()
    }

    /// Records written to a key, if it was written
    #[must_use]
    pub fn count_for(&self, key: &str) -> Option<usize> {
        self.written
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, count)| *count)
    }
}

/// Records of `records` that belong in `slot`, in collection order
pub fn partition_members<'a, R: Record>(
    records: &'a [R],
    slot: PartitionSlot,
) -> impl Iterator<Item = &'a R> + 'a {
    records.iter().filter(move |r| slot.admits(r.header()))
}

/// Rewrite every partition of a kind from `records`
///
/// A failure on one key is logged and reported; the remaining keys are still
/// written.
pub fn write_partitions<R, S>(store: &S, partitions: &KindPartitions, records: &[R]) -> WriteReport
where
    R: Record,
    S: PartitionStore + ?Sized,
{
    let mut report = WriteReport::default();

    for (slot, key) in partitions.slots() {
        let members: Vec<&R> = partition_members(records, slot).collect();
        match encode(key, &members).and_then(|bytes| store.set(key, &bytes)) {
            Ok(()) => {
                tracing::debug!(key, records = members.len(), "partition rewritten");
                report.written.push((key.to_string(), members.len()));
            }
            Err(e) => {
                tracing::warn!(key, kind = %R::KIND, error = %e, "partition write failed");
                report.failed.push((key.to_string(), e));
            }
        }
    }

    report
}

fn encode<T: Serialize>(key: &str, members: &T) -> Result<Vec<u8>, StoreError> {
    serde_json::to_vec(members).map_err(|source| StoreError::Encode {
        key: key.to_string(),
        source,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::StoreResult;
    use crate::store::MemoryStore;
    use lifeboard_record::{Category, Domain, RecordId, Task};
    use serde_json::Value;

    fn partitions() -> KindPartitions {
        KindPartitions::new("main", "personal", "occ", "fin")
    }

    fn task(id: &str, category: Category, original: Option<Domain>) -> Task {
        let mut task = Task::new(RecordId::new(id), id, category);
        task.header.original_category = original;
        task
    }

    fn stored_ids(store: &MemoryStore, key: &str) -> Vec<String> {
        let raw = store.raw(key).unwrap();
        let value: Value = serde_json::from_str(&raw).unwrap();
        value
            .as_array()
            .unwrap()
            .iter()
            .map(|r| r["id"].as_str().unwrap().to_string())
            .collect()
    }

    #[test]
    fn writes_every_partition_even_when_empty() {
        let store = MemoryStore::new();
        let report = write_partitions::<Task, _>(&store, &partitions(), &[]);
        assert!(report.is_complete());
        assert_eq!(report.written.len(), 4);
        assert_eq!(store.raw("occ").as_deref(), Some("[]"));
    }

    #[test]
    fn promoted_record_is_denormalized() {
        let store = MemoryStore::new();
        let records = vec![
            task("a", Category::Personal, None),
            task("b", Category::Main, Some(Domain::Financial)),
            task("c", Category::Main, None),
            task("d", Category::Occupational, None),
        ];

        let report = write_partitions(&store, &partitions(), &records);

        assert_eq!(stored_ids(&store, "main"), vec!["b", "c"]);
        assert_eq!(stored_ids(&store, "personal"), vec!["a"]);
        assert_eq!(stored_ids(&store, "occ"), vec!["d"]);
        assert_eq!(stored_ids(&store, "fin"), vec!["b"]);
        assert_eq!(report.count_for("main"), Some(2));
    }

    #[test]
    fn rewrite_drops_records_no_longer_present() {
        let store = MemoryStore::new();
        let mut records = vec![
            task("a", Category::Personal, None),
            task("b", Category::Personal, None),
        ];
        write_partitions(&store, &partitions(), &records);
        records.retain(|t| t.header.id.as_str() != "a");
        write_partitions(&store, &partitions(), &records);

        assert_eq!(stored_ids(&store, "personal"), vec!["b"]);
    }

    struct FailingStore {
        inner: MemoryStore,
        broken_key: &'static str,
    }

    impl PartitionStore for FailingStore {
        fn get(&self, key: &str) -> StoreResult<Option<Vec<u8>>> {
            self.inner.get(key)
        }

        fn set(&self, key: &str, bytes: &[u8]) -> StoreResult<()> {
            if key == self.broken_key {
                return Err(StoreError::InvalidKey(key.to_string()));
            }
            self.inner.set(key, bytes)
        }
    }

    #[test]
    fn failed_key_does_not_stop_others() {
        let store = FailingStore {
            inner: MemoryStore::new(),
            broken_key: "personal",
        };
        let records = vec![task("a", Category::Financial, None)];

        let report = write_partitions(&store, &partitions(), &records);

        assert!(!report.is_complete());
        assert_eq!(report.failed.len(), 1);
        assert_eq!(report.failed[0].0, "personal");
        assert_eq!(report.written.len(), 3);
        assert!(store.inner.contains("fin"));
    }
}
