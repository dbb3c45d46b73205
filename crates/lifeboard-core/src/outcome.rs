//! Result of a ledger operation
//!
//! Ledger operations never fail. They either apply or are skipped, and a
//! skipped call leaves both the collection and the store untouched.

use std::fmt::{self, Display, Formatter};

use crate::error::TransitionError;

/// Why an operation did nothing
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SkipReason {
    /// Session may not mutate
    ReadOnly,
    /// No record with that id
    NotFound,
    /// Promote on a record already shown under main
    AlreadyPromoted,
    /// Demote on a record with no domain to return to
    NotPromoted,
    /// Promote on a record created directly under main
    NativeMain,
    /// Restore or purge of a task that is not completed
    NotCompleted,
}

impl Display for SkipReason {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        let text = match self {
            SkipReason::ReadOnly => "read-only session",
            SkipReason::NotFound => "no such record",
            SkipReason::AlreadyPromoted => "already promoted",
            SkipReason::NotPromoted => "not promoted",
            SkipReason::NativeMain => "record was created under main",
            SkipReason::NotCompleted => "task is not completed",
        };
        f.write_str(text)
    }
}

impl From<TransitionError> for SkipReason {
    fn from(err: TransitionError) -> Self {
        match err {
            TransitionError::AlreadyPromoted(_) => SkipReason::AlreadyPromoted,
            TransitionError::NativeMain => SkipReason::NativeMain,
            TransitionError::NotPromoted => SkipReason::NotPromoted,
        }
    }
}

/// Applied with a value, or skipped with a reason
#[must_use]
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome<T = ()> {
    Applied(T),
    Skipped(SkipReason),
}

impl<T> Outcome<T> {
    /// Check if the operation took effect
    #[inline]
    #[must_use]
    pub fn is_applied(&self) -> bool {
        matches!(self, Outcome::Applied(_))
    }

    /// Reason the operation was skipped, if it was
    #[inline]
    #[must_use]
    pub fn skip_reason(&self) -> Option<SkipReason> {
        match self {
            Outcome::Applied(_) => None,
            Outcome::Skipped(reason) => Some(*reason),
        }
    }

    /// Value of an applied operation
    #[inline]
    pub fn applied(self) -> Option<T> {
        match self {
            Outcome::Applied(value) => Some(value),
            Outcome::Skipped(_) => None,
        }
    }

    /// Map the applied value
    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> Outcome<U> {
        match self {
            Outcome::Applied(value) => Outcome::Applied(f(value)),
            Outcome::Skipped(reason) => Outcome::Skipped(reason),
        }
    }
}

impl<T> From<Result<T, SkipReason>> for Outcome<T> {
    fn from(result: Result<T, SkipReason>) -> Self {
        match result {
            Ok(value) => Outcome::Applied(value),
            Err(reason) => Outcome::Skipped(reason),
        }
    }
}
