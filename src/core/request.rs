//! Last-request-wins guards
//!
//! In-flight reads are never cancelled. Instead every read takes a
//! [`RequestTicket`] before it starts, and its result is only applied if the
//! ticket is still the latest one when the read resolves.

use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

/// Identifies one started request
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct RequestTicket(u64);

impl RequestTicket {
    pub fn sequence(&self) -> u64 {
        self.0
    }
}

/// Hands out monotonically increasing tickets
///
/// Clones share the same counter.
#[derive(Debug, Clone, Default)]
pub struct RequestTracker {
    latest: Arc<AtomicU64>,
}

impl RequestTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start a request, superseding every earlier ticket
    pub fn begin(&self) -> RequestTicket {
        RequestTicket(self.latest.fetch_add(1, Ordering::SeqCst) + 1)
    }

    /// Whether no request started after `ticket`
    pub fn is_current(&self, ticket: RequestTicket) -> bool {
        self.latest.load(Ordering::SeqCst) == ticket.0
    }
}

pub const DEFAULT_DEBOUNCE: Duration = Duration::from_millis(300);

/// Delays a value until input goes quiet
///
/// Each call to [`settle`](Debouncer::settle) waits the quiet period and
/// yields its value only if no newer call started in the meantime; earlier
/// calls resolve to `None`.
///
/// ```rust,ignore
/// let debouncer = Debouncer::new(Duration::from_millis(300));
/// if let Some(query) = debouncer.settle(input).await {
///     session.update_filters(FilterUpdate::Search(Some(query)));
/// }
/// ```
#[derive(Debug, Clone)]
pub struct Debouncer {
    delay: Duration,
    tracker: RequestTracker,
}

impl Debouncer {
    pub fn new(delay: Duration) -> Self {
        Self {
            delay,
            tracker: RequestTracker::new(),
        }
    }

    pub fn delay(&self) -> Duration {
        self.delay
    }

    pub async fn settle<T>(&self, value: T) -> Option<T> {
        let ticket = self.tracker.begin();
        tokio::time::sleep(self.delay).await;
        self.tracker.is_current(ticket).then_some(value)
    }
}

impl Default for Debouncer {
    fn default() -> Self {
        Self::new(DEFAULT_DEBOUNCE)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_only_latest_ticket_is_current() {
        let tracker = RequestTracker::new();
        let first = tracker.begin();
        assert!(tracker.is_current(first));

        let second = tracker.begin();
        assert!(!tracker.is_current(first));
        assert!(tracker.is_current(second));
        assert!(second > first);
    }

    #[test]
    fn test_clones_share_sequence() {
        let tracker = RequestTracker::new();
        let clone = tracker.clone();

        let first = tracker.begin();
        let second = clone.begin();
        assert!(!tracker.is_current(first));
        assert!(tracker.is_current(second));
    }

    #[tokio::test(start_paused = true)]
    async fn test_debouncer_keeps_last_value() {
        let debouncer = Debouncer::new(Duration::from_millis(300));

        let early = {
            let debouncer = debouncer.clone();
            tokio::spawn(async move { debouncer.settle("lap").await })
        };
        tokio::time::sleep(Duration::from_millis(100)).await;
        let late = {
            let debouncer = debouncer.clone();
            tokio::spawn(async move { debouncer.settle("laptop").await })
        };

        assert_eq!(early.await.unwrap(), None);
        assert_eq!(late.await.unwrap(), Some("laptop"));
    }

    #[tokio::test(start_paused = true)]
    async fn test_debouncer_single_value_passes() {
        let debouncer = Debouncer::default();
        assert_eq!(debouncer.settle(42).await, Some(42));
    }
}
