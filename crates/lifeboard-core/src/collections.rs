//! In-memory record collections, one per kind

use chrono::{DateTime, Utc};

use lifeboard_record::{Focus, Idea, Opportunity, Record, Task};

/// The four collections owned by a ledger
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Collections {
    tasks: Vec<Task>,
    focuses: Vec<Focus>,
    opportunities: Vec<Opportunity>,
    ideas: Vec<Idea>,
}

impl Collections {
    /// Total number of records across kinds
    #[must_use]
    pub fn len(&self) -> usize {
        self.tasks.len() + self.focuses.len() + self.opportunities.len() + self.ideas.len()
    }

    /// Check if every collection is empty
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// A record kind with a collection in [`Collections`]
pub trait Collected: Record {
    /// Borrow this kind's collection
    fn collection(all: &Collections) -> &Vec<Self>;

    /// Mutably borrow this kind's collection
    fn collection_mut(all: &mut Collections) -> &mut Vec<Self>;

    /// Check if the record is shown in its category's live view
    #[inline]
    fn is_live(&self) -> bool {
        true
    }

    /// Restore kind invariants after a free-form edit
    #[inline]
    fn settle(&mut self, _now: DateTime<Utc>) {}
}

impl Collected for Task {
    fn collection(all: &Collections) -> &Vec<Self> {
        &all.tasks
    }

    fn collection_mut(all: &mut Collections) -> &mut Vec<Self> {
        &mut all.tasks
    }

    /// Completed tasks move to the archive
    fn is_live(&self) -> bool {
        !self.completed
    }

    /// `completed` and `completed_at` move together
    fn settle(&mut self, now: DateTime<Utc>) {
        if !self.completed {
            self.completed_at = None;
        } else if self.completed_at.is_none() {
            self.completed_at = Some(now);
        }
    }
}

impl Collected for Focus {
    fn collection(all: &Collections) -> &Vec<Self> {
        &all.focuses
    }

    fn collection_mut(all: &mut Collections) -> &mut Vec<Self> {
        &mut all.focuses
    }
}

impl Collected for Opportunity {
    fn collection(all: &Collections) -> &Vec<Self> {
        &all.opportunities
    }

    fn collection_mut(all: &mut Collections) -> &mut Vec<Self> {
        &mut all.opportunities
    }
}

impl Collected for Idea {
    fn collection(all: &Collections) -> &Vec<Self> {
        &all.ideas
    }

    fn collection_mut(all: &mut Collections) -> &mut Vec<Self> {
        &mut all.ideas
    }
}
