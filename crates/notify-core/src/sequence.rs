//! Request Sequencing
//!
//! Monotonic per-resource tickets. A response is applied only if its ticket
//! is still the newest one issued, which turns last-response-wins into
//! last-request-wins without cancelling anything in flight.

use std::cell::Cell;

/// Sequence number handed out when a request is dispatched
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct Ticket(u64);

#[derive(Debug, Default)]
pub struct RequestSequencer {
    latest: Cell<u64>,
}

impl RequestSequencer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Issue the ticket for a request about to be sent
    pub fn issue(&self) -> Ticket {
        let next = self.latest.get() + 1;
        self.latest.set(next);
        Ticket(next)
    }

    /// Whether no newer request was dispatched since `ticket`
    pub fn is_current(&self, ticket: Ticket) -> bool {
        ticket.0 == self.latest.get()
    }

    /// Make every outstanding ticket stale, e.g. after a confirmed local change
    pub fn invalidate(&self) {
        self.latest.set(self.latest.get() + 1);
    }
}
