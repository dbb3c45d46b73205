//! Lifeboard Record Model
//!
//! Typed records for the life dashboard: tasks, focus goals, opportunities and
//! ideas, each filed under a life domain or promoted into the main view.
//!
//! # Core Concepts
//!
//! - [`Category`]: Partition a record is displayed under (`Main` or a domain)
//! - [`Domain`]: The three life domains a promoted record can return to
//! - [`RecordHeader`]: Id and placement shared by every kind
//! - [`Record`]: Trait implemented by [`Task`], [`Focus`], [`Opportunity`], [`Idea`]
//! - [`Placement`]: Position in the promotion state machine
//!
//! # Example
//!
//! ```rust,ignore
//! use lifeboard_record::{Category, IdGenerator, Record, Task};
//!
//! let mut ids = IdGenerator::new();
//! let task = Task::new(ids.next_id(chrono::Utc::now()), "Buy milk", Category::Financial);
//! assert_eq!(task.category(), Category::Financial);
//! ```

#![warn(unreachable_pub)]
#![allow(missing_docs)]

// Core modules
mod category;
mod error;
mod id;
mod record;

/// Concrete record kinds
pub mod kinds;

// Re-exports
pub use category::{Category, Domain};
pub use error::RecordError;
pub use id::{IdGenerator, RecordId};
pub use kinds::{ActionRange, Focus, FocusAction, Idea, Opportunity, OpportunityStatus, Task};
pub use record::{Placement, Record, RecordHeader, RecordKind};

/// Version of this crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
