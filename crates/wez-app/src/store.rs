//! Published envelope state shared between the orchestrator and consumers.
//!
//! Writers replace the whole state under the lock; readers clone an `Arc`
//! out, so a reader never observes a partially written snapshot. A
//! generation counter lets consumers poll for changes without taking the lock.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use wez_core::state::EnvelopeSnapshot;

/// What consumers should currently display.
#[derive(Debug, Clone, Default, PartialEq)]
pub enum Published {
    /// Nothing published yet.
    #[default]
    Empty,
    /// No target designated; any earlier envelope is void.
    Cleared,
    /// Most recent complete envelope (possibly stale).
    Ready(Arc<EnvelopeSnapshot>),
}

impl Published {
    pub fn snapshot(&self) -> Option<&Arc<EnvelopeSnapshot>> {
        match self {
            Published::Ready(snapshot) => Some(snapshot),
            _ => None,
        }
    }
}

/// A state change observed by [`SnapshotStore::poll_since`].
#[derive(Debug, Clone, PartialEq)]
pub struct EnvelopeUpdate {
    pub generation: u64,
    pub published: Published,
}

#[derive(Debug, Default)]
struct StoreState {
    published: Published,
    /// Bumped by every clear; cycles started under an older epoch are discarded.
    clear_epoch: u64,
}

/// Single-writer, many-reader envelope store.
#[derive(Debug, Default)]
pub struct SnapshotStore {
    state: Mutex<StoreState>,
    generation: AtomicU64,
}

impl SnapshotStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> MutexGuard<'_, StoreState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Current published state.
    pub fn latest(&self) -> Published {
        self.lock().published.clone()
    }

    /// Incremented on every visible state change.
    pub fn generation(&self) -> u64 {
        self.generation.load(Ordering::Acquire)
    }

    /// The current state, if it changed after generation `seen`.
    pub fn poll_since(&self, seen: u64) -> Option<EnvelopeUpdate> {
        if self.generation() <= seen {
            return None;
        }
        let state = self.lock();
        Some(EnvelopeUpdate {
            generation: self.generation(),
            published: state.published.clone(),
        })
    }

    /// Epoch a cycle must present to [`SnapshotStore::publish`].
    pub fn epoch(&self) -> u64 {
        self.lock().clear_epoch
    }

    /// Mark the envelope cleared and void any cycle already in flight.
    ///
    /// Returns `true` if consumers will see a change.
    pub fn clear(&self) -> bool {
        let mut state = self.lock();
        state.clear_epoch += 1;
        if state.published == Published::Cleared {
            return false;
        }
        state.published = Published::Cleared;
        self.generation.fetch_add(1, Ordering::AcqRel);
        true
    }

    /// Replace the published envelope in one assignment.
    ///
    /// Returns `false`, leaving the store untouched, if a clear happened since
    /// `epoch` was read.
    pub fn publish(&self, snapshot: Arc<EnvelopeSnapshot>, epoch: u64) -> bool {
        let mut state = self.lock();
        if state.clear_epoch != epoch {
            return false;
        }
        state.published = Published::Ready(snapshot);
        self.generation.fetch_add(1, Ordering::AcqRel);
        true
    }
}
