//! The curator queue: deduplicated, priority-classed work items.
//!
//! A queue item says "this contact needs processing" at one of three
//! urgency tiers. At most one item exists per contact: re-enqueuing
//! upgrades the stored tier only when the new one is strictly higher.
//! The queue is a plain in-memory structure with no internal locking;
//! callers serialize access.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Urgency tier for processing a contact, highest priority first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RunType {
    /// Must run before anything else queued.
    Immediate,

    /// Normal processing.
    Upcoming,

    /// Opportunistic improvement, runs when nothing else is queued.
    Improvement,
}

impl RunType {
    /// Priority rank; lower is more urgent.
    fn rank(self) -> u8 {
        match self {
            Self::Immediate => 0,
            Self::Upcoming => 1,
            Self::Improvement => 2,
        }
    }

    /// Whether this tier strictly outranks `other`.
    pub fn is_higher_priority_than(self, other: Self) -> bool {
        self.rank() < other.rank()
    }
}

/// A queued "contact needs processing" work item.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QueueItem {
    /// Opaque contact reference (path or identifier).
    pub contact: String,

    /// Urgency tier at which the contact was queued.
    pub run_type: RunType,

    /// When the item was (last) enqueued.
    pub enqueued_at: DateTime<Utc>,

    /// Monotonic insertion counter, breaks FIFO ties within a tier.
    seq: u64,
}

/// Observability snapshot of the queue.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct QueueStatus {
    /// Whether the orchestrator is currently running a pass.
    pub processing: bool,

    /// The contact being processed, when known.
    pub active_contact: Option<String>,

    /// Number of queued items.
    pub queued: usize,
}

/// Deduplicating priority queue of contacts awaiting processing.
#[derive(Debug, Default)]
pub struct CuratorQueue {
    items: Vec<QueueItem>,
    next_seq: u64,
    processing: bool,
    active_contact: Option<String>,
}

impl CuratorQueue {
    /// Create an empty queue.
    pub fn new() -> Self {
        Self::default()
    }

    /// Enqueue a contact at the given tier.
    ///
    /// If the contact is already queued, the stored tier is upgraded only
    /// when the new one is strictly higher priority (upgrades refresh the
    /// timestamp and FIFO position); ties and downgrades keep the
    /// existing entry untouched. Returns whether the queue changed.
    pub fn enqueue(&mut self, contact: impl Into<String>, run_type: RunType) -> bool {
        let contact = contact.into();

        if let Some(existing) = self.items.iter_mut().find(|i| i.contact == contact) {
            if run_type.is_higher_priority_than(existing.run_type) {
                existing.run_type = run_type;
                existing.enqueued_at = Utc::now();
                existing.seq = self.next_seq;
                self.next_seq += 1;
                debug!("upgraded queue entry: {contact} -> {run_type:?}");
                return true;
            }
            return false;
        }

        self.items.push(QueueItem {
            contact: contact.clone(),
            run_type,
            enqueued_at: Utc::now(),
            seq: self.next_seq,
        });
        self.next_seq += 1;
        debug!("enqueued contact: {contact} at {run_type:?}");
        true
    }

    /// Remove and return the most urgent item: highest tier first, FIFO
    /// within a tier.
    pub fn dequeue(&mut self) -> Option<QueueItem> {
        let index = self.best_index()?;
        Some(self.items.remove(index))
    }

    /// The item `dequeue` would return, without removing it.
    pub fn peek(&self) -> Option<&QueueItem> {
        self.best_index().map(|i| &self.items[i])
    }

    /// Number of queued items.
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Whether the queue holds no items.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Drop all queued items. Processing status is unaffected.
    pub fn clear(&mut self) {
        self.items.clear();
    }

    /// Record whether a pass is in flight and for which contact. This
    /// status is observability only; it never gates enqueue or dequeue.
    pub fn set_processing(&mut self, processing: bool, active_contact: Option<String>) {
        self.processing = processing;
        self.active_contact = active_contact;
    }

    /// Snapshot of the queue state.
    pub fn status(&self) -> QueueStatus {
        QueueStatus {
            processing: self.processing,
            active_contact: self.active_contact.clone(),
            queued: self.items.len(),
        }
    }

    fn best_index(&self) -> Option<usize> {
        self.items
            .iter()
            .enumerate()
            .min_by_key(|(_, item)| (item.run_type.rank(), item.seq))
            .map(|(index, _)| index)
    }
}
