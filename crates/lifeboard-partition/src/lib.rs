//! Lifeboard Partition Layer
//!
//! Every record kind is persisted as four partitions: one for the main view and
//! one per life domain. A promoted record is stored twice, in main and in the
//! partition of the domain it came from.
//!
//! # Core Concepts
//!
//! - [`PartitionStore`]: Byte storage keyed by partition name
//! - [`FileStore`] / [`MemoryStore`]: Directory-backed and in-memory stores
//! - [`PartitionSlot::admits`]: The single membership predicate
//! - [`reconcile`]: Merge a kind's partitions into one deduplicated collection
//! - [`write_partitions`]: Recompute and rewrite every partition of a kind
//!
//! # Example
//!
//! ```rust,ignore
//! use lifeboard_partition::{reconcile, write_partitions, MemoryStore, PartitionTable};
//! use lifeboard_record::{RecordKind, Task};
//!
//! let store = MemoryStore::new();
//! let table = PartitionTable::default();
//! let loaded = reconcile::<Task, _>(&store, table.for_kind(RecordKind::Task));
//! let report = write_partitions(&store, table.for_kind(RecordKind::Task), &loaded.records);
//! assert!(report.is_complete());
//! ```

#![warn(unreachable_pub)]
#![allow(missing_docs)]

// Core modules
mod error;
mod file_store;
mod keys;
mod reconcile;
mod store;
mod writer;

// Re-exports
pub use error::{StoreError, StoreResult};
pub use file_store::{FileStore, PARTITION_EXTENSION};
pub use keys::{KindPartitions, PartitionSlot, PartitionTable};
pub use reconcile::{reconcile, LoadReport, Reconciled};
pub use store::{MemoryStore, PartitionStore};
pub use writer::{partition_members, write_partitions, WriteReport};

/// Version of this crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
