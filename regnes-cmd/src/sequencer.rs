//! Per-stream request tickets for discarding superseded responses.

use std::fmt;

/// Identifies one request cycle on a stream. Later tickets compare greater.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Ticket(u64);

impl fmt::Display for Ticket {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Issues increasing tickets and remembers the newest one.
///
/// A response is applied only if it carries the newest ticket, so a slow
/// request that finishes after a newer one can never overwrite its result.
#[derive(Debug, Default)]
pub struct Sequencer {
    latest: u64,
}

impl Sequencer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start a new cycle, superseding every earlier ticket.
    pub fn issue(&mut self) -> Ticket {
        self.latest += 1;
        Ticket(self.latest)
    }

    pub fn is_current(&self, ticket: Ticket) -> bool {
        ticket.0 == self.latest
    }

    /// Newest ticket issued so far, if any.
    pub fn latest(&self) -> Option<Ticket> {
        (self.latest > 0).then_some(Ticket(self.latest))
    }
}
