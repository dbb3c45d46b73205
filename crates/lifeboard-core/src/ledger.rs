//! The ledger: sole writable owner of the record collections
//!
//! Data flows one way on load (partitions, reconciler, collections) and one
//! way on mutation (collections, writer, partitions). Every mutation rewrites
//! all partitions of the affected kind before returning.

use chrono::{DateTime, Duration, Utc};
use serde::Serialize;
use std::sync::Arc;

use lifeboard_partition::{reconcile, write_partitions, LoadReport, PartitionStore, WriteReport};
use lifeboard_record::{
    Category, Domain, Focus, IdGenerator, Idea, Opportunity, Placement, RecordId, Task,
};

use crate::access::{AccessMode, SessionAccess};
use crate::archive;
use crate::clock::{Clock, SystemClock};
use crate::collections::{Collected, Collections};
use crate::config::LedgerConfig;
use crate::error::LedgerResult;
use crate::outcome::{Outcome, SkipReason};
use crate::promotion;

/// Prefill for a calendar event created from a task
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CalendarDraft {
    /// Task text
    pub title: String,
    /// Domain the event is filed under
    pub category: Domain,
}

/// Record collections backed by a partition store
pub struct Ledger<S> {
    store: S,
    config: LedgerConfig,
    clock: Arc<dyn Clock>,
    access: Arc<dyn SessionAccess>,
    ids: IdGenerator,
    records: Collections,
    last_load: LoadReport,
    last_write: Option<WriteReport>,
}

impl<S: PartitionStore> Ledger<S> {
    /// Create an empty ledger; nothing is read until [`Ledger::load_all`]
    ///
    /// Access follows `config.read_only` and time comes from the system
    /// clock until replaced.
    ///
    /// # Errors
    /// Returns [`LedgerError::Config`](crate::LedgerError::Config) if the
    /// configuration does not validate
    pub fn new(store: S, config: LedgerConfig) -> LedgerResult<Self> {
        config.validate()?;
        let access = Arc::new(AccessMode::from_read_only(config.read_only));
        Ok(Self {
            store,
            config,
            clock: Arc::new(SystemClock),
            access,
            ids: IdGenerator::new(),
            records: Collections::default(),
            last_load: LoadReport::default(),
            last_write: None,
        })
    }

    /// Create and load every record kind
    ///
    /// # Errors
    /// As [`Ledger::new`]
    pub fn open(store: S, config: LedgerConfig) -> LedgerResult<Self> {
        let mut ledger = Self::new(store, config)?;
        ledger.load_all();
        Ok(ledger)
    }

    /// Replace the time source
    #[must_use]
    pub fn with_clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.clock = clock;
        self
    }

    /// Replace the access guard
    #[must_use]
    pub fn with_access(mut self, access: Arc<dyn SessionAccess>) -> Self {
        self.access = access;
        self
    }

    /// Backing partition store
    #[inline]
    #[must_use]
    pub fn store(&self) -> &S {
        &self.store
    }

    /// Configuration the ledger was opened with
    #[inline]
    #[must_use]
    pub fn config(&self) -> &LedgerConfig {
        &self.config
    }

    /// Current time as seen by the ledger
    #[inline]
    #[must_use]
    pub fn now(&self) -> DateTime<Utc> {
        self.clock.now()
    }

    /// Check if the session may mutate
    #[inline]
    #[must_use]
    pub fn can_mutate(&self) -> bool {
        self.access.can_mutate()
    }

    /// Report of the most recent load
    #[inline]
    #[must_use]
    pub fn last_load(&self) -> &LoadReport {
        &self.last_load
    }

    /// Report of the most recent partition rewrite
    #[inline]
    #[must_use]
    pub fn last_write(&self) -> Option<&WriteReport> {
        self.last_write.as_ref()
    }

    /// Archive window length
    #[inline]
    #[must_use]
    pub fn window(&self) -> Duration {
        self.config.archive.window()
    }

    // ------------------------------------------------------------------
    // Load
    // ------------------------------------------------------------------

    /// Reload every kind from the store, replacing all collections
    pub fn load_all(&mut self) -> &LoadReport {
        let mut report = LoadReport::default();
        report.absorb(self.reload::<Task>());
        report.absorb(self.reload::<Focus>());
        report.absorb(self.reload::<Opportunity>());
        report.absorb(self.reload::<Idea>());

        tracing::info!(
            records = self.records.len(),
            partitions = report.partitions_read,
            duplicates = report.duplicates,
            skipped = report.skipped_records,
            "ledger loaded"
        );
        self.last_load = report;
        &self.last_load
    }

    /// Reload one kind from the store
    pub fn load<R: Collected>(&mut self) -> &[R] {
        self.last_load = self.reload::<R>();
        R::collection(&self.records)
    }

    fn reload<R: Collected>(&mut self) -> LoadReport {
        let loaded = reconcile::<R, S>(&self.store, self.config.partitions.for_kind(R::KIND));
        for record in &loaded.records {
            self.ids.observe(record.id());
        }
        *R::collection_mut(&mut self.records) = loaded.records;
        loaded.report
    }

    // ------------------------------------------------------------------
    // Read
    // ------------------------------------------------------------------

    /// Current collection of a kind
    #[inline]
    #[must_use]
    pub fn records<R: Collected>(&self) -> &[R] {
        R::collection(&self.records)
    }

    /// Record by id
    #[must_use]
    pub fn get<R: Collected>(&self, id: &RecordId) -> Option<&R> {
        self.records::<R>().iter().find(|r| r.id() == id)
    }

    /// Records shown under a tab
    ///
    /// Completed tasks are left out; they live in the archive.
    #[must_use]
    pub fn category_view<R: Collected>(&self, category: Category) -> Vec<&R> {
        self.records::<R>()
            .iter()
            .filter(|r| r.category() == category && r.is_live())
            .collect()
    }

    /// Number of tasks not yet completed, across all categories
    #[must_use]
    pub fn open_task_count(&self) -> usize {
        self.records::<Task>().iter().filter(|t| !t.completed).count()
    }

    /// Completed tasks inside the archive window, newest first
    #[must_use]
    pub fn archive_view(&self, search: Option<&str>) -> Vec<&Task> {
        archive::archive_view(self.records::<Task>(), search, self.now(), self.window())
    }

    /// Calendar prefill for a task
    ///
    /// A promoted task reports the domain it came from; a task created under
    /// main reports `Personal`.
    #[must_use]
    pub fn calendar_draft(&self, id: &RecordId) -> Option<CalendarDraft> {
        self.get::<Task>(id).map(|task| CalendarDraft {
            title: task.text.clone(),
            category: task.header.home_domain().unwrap_or(Domain::Personal),
        })
    }

    // ------------------------------------------------------------------
    // Mutate
    // ------------------------------------------------------------------

    /// Replace a whole collection and rewrite its partitions
    pub fn mutate<R: Collected>(&mut self, collection: Vec<R>) -> Outcome {
        if let Err(reason) = self.guard() {
            return Outcome::Skipped(reason);
        }
        for record in &collection {
            self.ids.observe(record.id());
        }
        *R::collection_mut(&mut self.records) = collection;
        self.persist::<R>();
        Outcome::Applied(())
    }

    /// Add an open task under `tab`
    pub fn add_task(&mut self, text: impl Into<String>, tab: Category) -> Outcome<RecordId> {
        self.insert_new(|id| Task::new(id, text, tab))
    }

    /// Add a focus goal under `tab`
    pub fn add_focus(&mut self, name: impl Into<String>, tab: Category) -> Outcome<RecordId> {
        self.insert_new(|id| Focus::new(id, name, tab))
    }

    /// Add an open opportunity under `tab`, dated today
    pub fn add_opportunity(&mut self, name: impl Into<String>, tab: Category) -> Outcome<RecordId> {
        let date = self.now().format("%d.%m.%Y").to_string();
        self.insert_new(|id| Opportunity::new(id, name, date, tab))
    }

    /// Add an idea under `tab`
    pub fn add_idea(&mut self, text: impl Into<String>, tab: Category) -> Outcome<RecordId> {
        self.insert_new(|id| Idea::new(id, text, tab))
    }

    /// Edit a record's own fields
    ///
    /// Changes `edit` makes to the header are discarded: id, category and
    /// origin only move through promotion and demotion.
    pub fn edit<R: Collected>(&mut self, id: &RecordId, edit: impl FnOnce(&mut R)) -> Outcome {
        self.update::<R, _>(id, |record, now| {
            let header = record.header().clone();
            edit(record);
            *record.header_mut() = header;
            record.settle(now);
            Ok(())
        })
    }

    /// Mark a task done or open
    pub fn set_completed(&mut self, id: &RecordId, completed: bool) -> Outcome {
        let outcome = self.update::<Task, _>(id, |task, now| {
            if task.completed != completed {
                task.set_completed(completed, now);
            }
            Ok(())
        });
        if outcome.is_applied() {
            tracing::info!(%id, completed, "task completion set");
        }
        outcome
    }

    /// Flip a task's completion, returning the new state
    pub fn toggle_completed(&mut self, id: &RecordId) -> Outcome<bool> {
        self.update::<Task, _>(id, |task, now| {
            let completed = !task.completed;
            task.set_completed(completed, now);
            Ok(completed)
        })
    }

    /// Remove a record; a second call for the same id is skipped
    pub fn delete<R: Collected>(&mut self, id: &RecordId) -> Outcome {
        self.remove_where::<R>(id, |_| Ok(()))
    }

    /// Show a domain record under main
    pub fn promote<R: Collected>(&mut self, id: &RecordId) -> Outcome<Placement> {
        let outcome = self.update::<R, _>(id, |record, _| {
            promotion::promote(record.header_mut()).map_err(SkipReason::from)
        });
        match &outcome {
            Outcome::Applied(placement) => {
                tracing::info!(kind = %R::KIND, %id, %placement, "record promoted");
            }
            Outcome::Skipped(reason) => {
                tracing::debug!(kind = %R::KIND, %id, %reason, "promote skipped");
            }
        }
        outcome
    }

    /// Return a promoted record to its domain
    pub fn demote<R: Collected>(&mut self, id: &RecordId) -> Outcome<Placement> {
        let outcome = self.update::<R, _>(id, |record, _| {
            promotion::demote(record.header_mut()).map_err(SkipReason::from)
        });
        match &outcome {
            Outcome::Applied(placement) => {
                tracing::info!(kind = %R::KIND, %id, %placement, "record demoted");
            }
            Outcome::Skipped(reason) => {
                tracing::debug!(kind = %R::KIND, %id, %reason, "demote skipped");
            }
        }
        outcome
    }

    /// Reopen a completed task; its placement is unchanged
    pub fn restore(&mut self, id: &RecordId) -> Outcome {
        let outcome = self.update::<Task, _>(id, |task, now| {
            if !task.completed {
                return Err(SkipReason::NotCompleted);
            }
            task.set_completed(false, now);
            Ok(())
        });
        if outcome.is_applied() {
            tracing::info!(%id, "task restored from archive");
        }
        outcome
    }

    /// Permanently remove a completed task from every partition
    ///
    /// Open tasks are refused; use [`Ledger::delete`] for those.
    pub fn purge(&mut self, id: &RecordId) -> Outcome {
        let outcome = self.remove_where::<Task>(id, |task| {
            if task.completed {
                Ok(())
            } else {
                Err(SkipReason::NotCompleted)
            }
        });
        if outcome.is_applied() {
            tracing::info!(%id, "task purged");
        }
        outcome
    }

    /// Apply the configured retention policy, returning how many tasks went
    pub fn sweep_retention(&mut self) -> Outcome<usize> {
        if let Err(reason) = self.guard() {
            return Outcome::Skipped(reason);
        }
        let Some(age) = self.config.archive.retention_age() else {
            return Outcome::Applied(0);
        };

        let now = self.now();
        let tasks = Task::collection_mut(&mut self.records);
        let before = tasks.len();
        tasks.retain(|task| !archive::is_expired(task, now, age));
        let swept = before - tasks.len();

        if swept > 0 {
            tracing::info!(swept, days = age.num_days(), "retention sweep purged tasks");
            self.persist::<Task>();
        }
        Outcome::Applied(swept)
    }

    // ------------------------------------------------------------------
    // Internals
    // ------------------------------------------------------------------

    fn guard(&self) -> Result<(), SkipReason> {
        if self.access.can_mutate() {
            Ok(())
        } else {
            tracing::debug!("mutation refused in read-only session");
            Err(SkipReason::ReadOnly)
        }
    }

    fn insert_new<R: Collected>(&mut self, build: impl FnOnce(RecordId) -> R) -> Outcome<RecordId> {
        if let Err(reason) = self.guard() {
            return Outcome::Skipped(reason);
        }
        let id = self.ids.next_id(self.clock.now());
        R::collection_mut(&mut self.records).insert(0, build(id.clone()));
        tracing::info!(kind = %R::KIND, %id, "record added");
        self.persist::<R>();
        Outcome::Applied(id)
    }

    /// Run `change` on one record, then rewrite its partitions if it applied
    fn update<R, T>(
        &mut self,
        id: &RecordId,
        change: impl FnOnce(&mut R, DateTime<Utc>) -> Result<T, SkipReason>,
    ) -> Outcome<T>
    where
        R: Collected,
    {
        if let Err(reason) = self.guard() {
            return Outcome::Skipped(reason);
        }
        let now = self.clock.now();
        let Some(record) = R::collection_mut(&mut self.records)
            .iter_mut()
            .find(|r| r.id() == id)
        else {
            return Outcome::Skipped(SkipReason::NotFound);
        };

        match change(record, now) {
            Ok(value) => {
                self.persist::<R>();
                Outcome::Applied(value)
            }
            Err(reason) => Outcome::Skipped(reason),
        }
    }

    fn remove_where<R: Collected>(
        &mut self,
        id: &RecordId,
        allowed: impl FnOnce(&R) -> Result<(), SkipReason>,
    ) -> Outcome {
        if let Err(reason) = self.guard() {
            return Outcome::Skipped(reason);
        }
        let collection = R::collection_mut(&mut self.records);
        let Some(index) = collection.iter().position(|r| r.id() == id) else {
            return Outcome::Skipped(SkipReason::NotFound);
        };
        if let Err(reason) = allowed(&collection[index]) {
            return Outcome::Skipped(reason);
        }
        collection.remove(index);
        tracing::debug!(kind = %R::KIND, %id, "record removed");
        self.persist::<R>();
        Outcome::Applied(())
    }

    fn persist<R: Collected>(&mut self) {
        let report = write_partitions(
            &self.store,
            self.config.partitions.for_kind(R::KIND),
            R::collection(&self.records),
        );
        if !report.is_complete() {
            tracing::warn!(
                kind = %R::KIND,
                failed = report.failed.len(),
                "partitions not rewritten; storage may lag the collection"
            );
        }
        self.last_write = Some(report);
    }
}
