//! Stale-result discard guard for orchestration layers.
//!
//! Inputs (the transaction, its candidate signatures) arrive from independent
//! fetches that can race: a user may select a new transaction while the
//! previous lookup is still in flight. Each request takes a ticket from the
//! guard; only the result carrying the latest ticket may be committed.
//! Since the resolution pipeline is stateless, dropping a stale result is
//! always safe.

use std::sync::atomic::{AtomicU64, Ordering};
use tracing::debug;

/// Generation token handed out by [`RequestGuard::begin`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Ticket(u64);

impl Ticket {
    pub fn generation(&self) -> u64 {
        self.0
    }
}

/// Monotonic generation counter.
#[derive(Debug, Default)]
pub struct RequestGuard {
    latest: AtomicU64,
}

impl RequestGuard {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start a new request. Every ticket issued before it becomes stale.
    pub fn begin(&self) -> Ticket {
        Ticket(self.latest.fetch_add(1, Ordering::AcqRel) + 1)
    }

    pub fn is_current(&self, ticket: Ticket) -> bool {
        self.latest.load(Ordering::Acquire) == ticket.0
    }

    /// Pass `value` through if `ticket` is still the latest, drop it otherwise.
    pub fn commit<T>(&self, ticket: Ticket, value: T) -> Option<T> {
        if self.is_current(ticket) {
            Some(value)
        } else {
            debug!(
                generation = ticket.0,
                latest = self.latest.load(Ordering::Acquire),
                "dropping stale result"
            );
            None
        }
    }
}
