//! Monotonic request tokens so that only the newest request may update a view.

use std::sync::atomic::{AtomicU64, Ordering};

/// Token handed out when a request is issued.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct Ticket(u64);

/// Issues increasing [`Ticket`]s and tells whether a ticket is still the newest.
#[derive(Debug, Default)]
pub struct RequestFence {
    latest: AtomicU64,
}

impl RequestFence {
    pub fn new() -> Self {
        Self::default()
    }

    /// Issue a new ticket; every previously issued ticket becomes stale.
    pub fn issue(&self) -> Ticket {
        Ticket(self.latest.fetch_add(1, Ordering::SeqCst) + 1)
    }

    pub fn is_current(&self, ticket: Ticket) -> bool {
        self.latest.load(Ordering::SeqCst) == ticket.0
    }
}
