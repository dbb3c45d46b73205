//! Testing utilities for the Lifeboard workspace
//!
//! Shared fixtures: record builders, a memory-backed ledger on a stopped
//! clock, and helpers for inspecting raw partitions.

#![allow(missing_docs)]

use chrono::{DateTime, Duration, TimeZone, Utc};
use serde_json::Value;
use std::sync::Arc;

use lifeboard_core::{FixedClock, Ledger, LedgerConfig};
use lifeboard_partition::{MemoryStore, PartitionSlot};
use lifeboard_record::{Category, Domain, RecordId, RecordKind, Task};

/// Instant every fixture clock starts at
pub fn epoch() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2026, 10, 16, 12, 0, 0).unwrap()
}

pub fn days_ago(days: i64) -> DateTime<Utc> {
    epoch() - Duration::days(days)
}

pub fn task(id: &str, text: &str, category: Category) -> Task {
    Task::new(RecordId::new(id), text, category)
}

pub fn promoted_task(id: &str, text: &str, origin: Domain) -> Task {
    let mut task = task(id, text, Category::Main);
    task.header.original_category = Some(origin);
    task
}

pub fn completed_task(id: &str, text: &str, category: Category, at: DateTime<Utc>) -> Task {
    let mut task = task(id, text, category);
    task.set_completed(true, at);
    task
}

/// A ledger over a shared memory store, with the clock still reachable
pub struct TestBed {
    pub store: Arc<MemoryStore>,
    pub clock: Arc<FixedClock>,
    pub ledger: Ledger<Arc<MemoryStore>>,
}

impl TestBed {
    pub fn new() -> Self {
        Self::with_config(LedgerConfig::default())
    }

    pub fn with_config(config: LedgerConfig) -> Self {
        Self::over(Arc::new(MemoryStore::new()), config)
    }

    /// Open a ledger over an already seeded store
    pub fn over(store: Arc<MemoryStore>, config: LedgerConfig) -> Self {
        let clock = Arc::new(FixedClock::new(epoch()));
        let ledger = Ledger::open(store.clone(), config)
            .unwrap()
            .with_clock(clock.clone());
        Self {
            store,
            clock,
            ledger,
        }
    }

    /// Fresh ledger over the same store, as after a restart
    pub fn reopen(&self) -> Ledger<Arc<MemoryStore>> {
        Ledger::open(self.store.clone(), self.ledger.config().clone())
            .unwrap()
            .with_clock(self.clock.clone())
    }

    /// Ids stored under a kind's partition
    pub fn ids_in(&self, kind: RecordKind, slot: PartitionSlot) -> Vec<String> {
        let key = self.ledger.config().partitions.for_kind(kind).key(slot).to_string();
        partition_ids(&self.store, &key)
    }
}

impl Default for TestBed {
    fn default() -> Self {
        Self::new()
    }
}

/// Ids stored in a raw partition, in stored order
pub fn partition_ids(store: &MemoryStore, key: &str) -> Vec<String> {
    let Some(raw) = store.raw(key) else {
        return Vec::new();
    };
    let value: Value = serde_json::from_str(&raw).unwrap();
    value
        .as_array()
        .unwrap()
        .iter()
        .map(|record| match &record["id"] {
            Value::String(s) => s.clone(),
            other => other.to_string(),
        })
        .collect()
}

/// Seed a partition with JSON
pub fn seed(store: &MemoryStore, key: &str, json: Value) {
    store.insert_raw(key, serde_json::to_vec(&json).unwrap());
}
