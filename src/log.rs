use crate::event::{Event, EventDraft};
use chrono::Utc;
use std::collections::VecDeque;
use std::sync::{Mutex, MutexGuard, PoisonError};

/// Number of events retained when no capacity is given.
pub const DEFAULT_CAPACITY: usize = 100;

/// A bounded, insertion-ordered, in-memory log of recorded requests.
///
/// The log assigns identifiers and timestamps, keeps at most `capacity`
/// events (evicting the oldest first), and is safe to share between request
/// handlers behind an `Arc`. Every operation takes the same mutex for its
/// whole duration, so readers never see a half-assigned identifier or a
/// sequence in the middle of eviction.
///
/// Identifiers start at 1 and are never reused, even after the event that
/// carried one has been evicted.
///
/// # Examples
///
/// ```
/// use webhook_inspector::{EventDraft, EventLog};
///
/// let log = EventLog::new(2);
/// log.insert(EventDraft::new("POST", "/hook"));
/// log.insert(EventDraft::new("PUT", "/hook"));
/// let third = log.insert(EventDraft::new("PATCH", "/hook"));
///
/// assert_eq!(third.id, 3);
/// let ids: Vec<u64> = log.list().iter().map(|e| e.id).collect();
/// assert_eq!(ids, vec![2, 3]);
/// assert!(log.get(1).is_none());
/// ```
#[derive(Debug)]
pub struct EventLog {
    inner: Mutex<Inner>,
    max_len: usize,
}

#[derive(Debug)]
struct Inner {
    events: VecDeque<Event>,
    next_id: u64,
}

impl EventLog {
    /// Create an empty log that retains at most `max_len` events.
    ///
    /// `max_len` is expected to be at least 1. It is not checked: a log built
    /// with 0 still stamps and returns events but retains none of them.
    pub fn new(max_len: usize) -> Self {
        EventLog {
            inner: Mutex::new(Inner {
                events: VecDeque::with_capacity(max_len),
                next_id: 1,
            }),
            max_len,
        }
    }

    /// Stamp a draft with the next identifier and the current time, append
    /// it, and evict from the front until at most `capacity` events remain.
    ///
    /// Returns a copy of the stored event.
    pub fn insert(&self, draft: EventDraft) -> Event {
        let mut inner = self.lock();

        let id = inner.next_id;
        inner.next_id += 1;

        let event = Event::stamp(draft, id, Utc::now());
        inner.events.push_back(event.clone());

        let excess = inner.events.len().saturating_sub(self.max_len);
        if excess > 0 {
            inner.events.drain(..excess);
            log::debug!(
                "evicted {excess} event(s), oldest retained id is now {:?}",
                inner.events.front().map(|e| e.id)
            );
        }

        log::debug!(
            "recorded event {id} ({} {}), {} retained",
            event.method,
            event.path,
            inner.events.len()
        );
        event
    }

    /// Snapshot of every retained event, oldest first.
    pub fn list(&self) -> Vec<Event> {
        self.lock().events.iter().cloned().collect()
    }

    /// Copy of the retained event with the given identifier.
    ///
    /// Returns `None` for identifiers that were never assigned and for ones
    /// whose event has been evicted.
    pub fn get(&self, id: u64) -> Option<Event> {
        self.lock().events.iter().find(|e| e.id == id).cloned()
    }

    /// Number of events currently retained.
    pub fn len(&self) -> usize {
        self.lock().events.len()
    }

    /// Returns `true` if no events are retained.
    pub fn is_empty(&self) -> bool {
        self.lock().events.is_empty()
    }

    /// Maximum number of retained events.
    pub fn capacity(&self) -> usize {
        self.max_len
    }

    /// Identifier the next insert will receive. `next_id() - 1` is the number
    /// of inserts performed so far.
    pub fn next_id(&self) -> u64 {
        self.lock().next_id
    }

    // No operation panics while holding the guard, so a poisoned mutex still
    // guards consistent state.
    fn lock(&self) -> MutexGuard<'_, Inner> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl Default for EventLog {
    fn default() -> Self {
        EventLog::new(DEFAULT_CAPACITY)
    }
}
