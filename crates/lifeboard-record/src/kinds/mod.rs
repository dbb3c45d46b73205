//! Concrete record kinds
//!
//! Each kind embeds a [`RecordHeader`](crate::RecordHeader) and keeps unknown
//! JSON fields so rewrites never drop data written by other versions.

mod focus;
mod idea;
mod opportunity;
mod task;

pub use focus::{ActionRange, Focus, FocusAction};
pub use idea::Idea;
pub use opportunity::{Opportunity, OpportunityStatus};
pub use task::Task;
