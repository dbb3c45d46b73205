//! Archive projection over the task collection
//!
//! Nothing here is persisted. The archive is recomputed on every read from
//! the completed tasks whose completion falls inside a rolling window.

use chrono::{DateTime, Duration, Utc};

use lifeboard_record::Task;

/// Completion instant used by the window filter
///
/// A completed task without a stamp is treated as completed at `now`. A stamp
/// in the future is clamped to `now`.
#[inline]
fn effective_completion(task: &Task, now: DateTime<Utc>) -> DateTime<Utc> {
    task.completed_at.map_or(now, |at| at.min(now))
}

/// Check if a task belongs in the archive view
#[must_use]
pub fn is_archived(task: &Task, now: DateTime<Utc>, window: Duration) -> bool {
    task.completed && effective_completion(task, now) >= now - window
}

/// Check if a completed task is older than a retention age
///
/// Tasks without a completion stamp never expire.
#[must_use]
pub fn is_expired(task: &Task, now: DateTime<Utc>, age: Duration) -> bool {
    task.completed && task.completed_at.is_some_and(|at| at < now - age)
}

/// Case-insensitive substring match; an empty needle matches everything
#[must_use]
pub fn matches_search(text: &str, needle: &str) -> bool {
    let needle = needle.trim();
    needle.is_empty() || text.to_lowercase().contains(&needle.to_lowercase())
}

/// Archived tasks matching `search`, newest completion first
///
/// Tasks without a completion stamp sort last.
#[must_use]
pub fn archive_view<'a>(
    tasks: &'a [Task],
    search: Option<&str>,
    now: DateTime<Utc>,
    window: Duration,
) -> Vec<&'a Task> {
    let needle = search.unwrap_or_default();
    let mut view: Vec<&Task> = tasks
        .iter()
        .filter(|t| is_archived(t, now, window) && matches_search(&t.text, needle))
        .collect();
    // None < Some, so reversing puts unstamped tasks at the end.
    view.sort_by(|a, b| b.completed_at.cmp(&a.completed_at));
    view
}
