//! Lifeboard Core
//!
//! The [`Ledger`] owns the in-memory record collections of a life dashboard
//! and keeps their persisted partitions in step with every change.
//!
//! # Core Concepts
//!
//! - [`Ledger`]: Load, mutate, promote/demote, archive, restore and purge
//! - [`Outcome`]: Every operation applies or is skipped; nothing fails
//! - [`SessionAccess`]: Read-only sessions skip every mutation
//! - [`Clock`]: Time source for ids, completion stamps and the archive window
//! - [`LedgerConfig`]: Partition keys, archive window and retention policy
//!
//! # Example
//!
//! ```rust,ignore
//! use lifeboard_core::{Ledger, LedgerConfig};
//! use lifeboard_partition::MemoryStore;
//! use lifeboard_record::{Category, Task};
//!
//! let mut ledger = Ledger::open(MemoryStore::new(), LedgerConfig::default())?;
//! let id = ledger.add_task("Buy milk", Category::Financial).applied().unwrap();
//! let _ = ledger.promote::<Task>(&id);
//! let _ = ledger.set_completed(&id, true);
//! assert_eq!(ledger.archive_view(None).len(), 1);
//! ```

#![warn(unreachable_pub)]
#![allow(missing_docs)]

// Core modules
mod access;
mod archive;
mod clock;
mod collections;
mod config;
mod error;
mod ledger;
mod outcome;
mod promotion;

// Re-exports
pub use access::{AccessMode, SessionAccess};
pub use archive::{archive_view, is_archived, is_expired, matches_search};
pub use clock::{Clock, FixedClock, SystemClock};
pub use collections::{Collected, Collections};
pub use config::{ArchiveConfig, LedgerConfig, RetentionPolicy, DEFAULT_WINDOW_DAYS};
pub use error::{ConfigError, LedgerError, LedgerResult};
pub use ledger::{CalendarDraft, Ledger};
pub use outcome::{Outcome, SkipReason};

/// Version of this crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
