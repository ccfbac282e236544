// ── Stale-response guard ──
//
// Nothing in this layer cancels a superseded request. Instead each logical
// query slot ("catalog-grid", "search-suggest", ...) hands out increasing
// tickets, and a response is only delivered if its ticket is still the
// latest one issued for that slot when it resolves.

use std::future::Future;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

use dashmap::DashMap;
use tracing::debug;

/// Per-slot request generation counter.
///
/// Cheap to clone; clones share the same counters.
#[derive(Debug, Clone, Default)]
pub struct RequestSequencer {
    slots: Arc<DashMap<String, Arc<AtomicU64>>>,
}

/// Proof of issue for one request in one slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Ticket(u64);

impl RequestSequencer {
    pub fn new() -> Self {
        Self::default()
    }

    fn counter(&self, slot: &str) -> Arc<AtomicU64> {
        if let Some(counter) = self.slots.get(slot) {
            return Arc::clone(counter.value());
        }
        Arc::clone(
            self.slots
                .entry(slot.to_owned())
                .or_insert_with(|| Arc::new(AtomicU64::new(0)))
                .value(),
        )
    }

    /// Issue the next ticket for `slot`, superseding every earlier one.
    pub fn issue(&self, slot: &str) -> Ticket {
        Ticket(self.counter(slot).fetch_add(1, Ordering::AcqRel) + 1)
    }

    /// Whether `ticket` is still the newest issued for `slot`.
    pub fn is_current(&self, slot: &str, ticket: Ticket) -> bool {
        self.slots
            .get(slot)
            .is_some_and(|c| c.load(Ordering::Acquire) == ticket.0)
    }

    /// Run `fut` under a fresh ticket for `slot`.
    ///
    /// Resolves to `None` when a newer request for the same slot was issued
    /// before this one finished; the stale result is dropped.
    pub async fn track<F, T>(&self, slot: &str, fut: F) -> Option<T>
    where
        F: Future<Output = T>,
    {
        let ticket = self.issue(slot);
        let output = fut.await;
        if self.is_current(slot, ticket) {
            Some(output)
        } else {
            debug!(slot, ticket = ticket.0, "discarding stale response");
            None
        }
    }
}
