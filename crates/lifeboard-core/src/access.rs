//! Session access guard
//!
//! The ledger asks this collaborator before every mutation. When it refuses,
//! the call is skipped before the collection or the store is touched.

use serde::{Deserialize, Serialize};
use std::fmt::{self, Display, Formatter};

/// Decides whether the current viewer may change records
pub trait SessionAccess: Send + Sync {
    /// Check if mutations are allowed
    fn can_mutate(&self) -> bool;
}

/// Who is looking at the dashboard
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AccessMode {
    /// The dashboard's owner, full access
    #[default]
    Owner,
    /// A mentor viewing someone else's dashboard, read-only
    Mentor,
}

impl AccessMode {
    /// Mode for a read-only flag
    #[inline]
    #[must_use]
    pub const fn from_read_only(read_only: bool) -> Self {
        if read_only {
            AccessMode::Mentor
        } else {
            AccessMode::Owner
        }
    }
}

impl SessionAccess for AccessMode {
    #[inline]
    fn can_mutate(&self) -> bool {
        matches!(self, AccessMode::Owner)
    }
}

impl Display for AccessMode {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            AccessMode::Owner => f.write_str("owner"),
            AccessMode::Mentor => f.write_str("mentor (read-only)"),
        }
    }
}
