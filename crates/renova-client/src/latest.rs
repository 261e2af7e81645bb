// SPDX-FileCopyrightText: 2026 Renova Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Last-write-wins guard for superseded in-flight fetches.
//!
//! A view issues one report fetch per user action, and a new action
//! supersedes any fetch still in flight. The view takes a ticket before
//! each fetch and offers the response back with it; a response whose
//! ticket is older than the newest issued one is rejected, so a slow
//! stale response can never overwrite a newer result.

/// Monotonic ticket identifying one fetch generation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct FetchTicket(u64);

/// Holder for the most recent result, keyed by fetch generation.
#[derive(Debug, Default)]
pub struct Latest<T> {
    issued: u64,
    current: Option<(u64, T)>,
}

impl<T> Latest<T> {
    pub fn new() -> Self {
        Self {
            issued: 0,
            current: None,
        }
    }

    /// Take a ticket for a fetch that is about to start. Every call
    /// supersedes all previously issued tickets.
    pub fn begin(&mut self) -> FetchTicket {
        self.issued += 1;
        FetchTicket(self.issued)
    }

    /// Offer a completed fetch result.
    ///
    /// Accepted only when no newer ticket has been issued since `ticket`;
    /// returns whether the value was stored.
    pub fn accept(&mut self, ticket: FetchTicket, value: T) -> bool {
        if ticket.0 != self.issued {
            return false;
        }
        self.current = Some((ticket.0, value));
        true
    }

    /// The most recent accepted value, if any.
    pub fn get(&self) -> Option<&T> {
        self.current.as_ref().map(|(_, value)| value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_the_only_outstanding_fetch() {
        let mut latest = Latest::new();
        let t = latest.begin();
        assert!(latest.accept(t, "page-1"));
        assert_eq!(latest.get(), Some(&"page-1"));
    }

    #[test]
    fn stale_response_is_rejected() {
        let mut latest = Latest::new();
        let stale = latest.begin();
        let fresh = latest.begin();

        // The newer fetch lands first; the stale one must not clobber it.
        assert!(latest.accept(fresh, "page-2"));
        assert!(!latest.accept(stale, "page-1"));
        assert_eq!(latest.get(), Some(&"page-2"));
    }

    #[test]
    fn superseded_fetch_never_lands_even_first() {
        let mut latest = Latest::new();
        let stale = latest.begin();
        let _fresh = latest.begin();

        assert!(!latest.accept(stale, "page-1"));
        assert_eq!(latest.get(), None);
    }
}
