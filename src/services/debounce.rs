//! Debounced input as an explicit scheduled task.

use std::time::{Duration, Instant};

/// Default quiet window for search input
pub const SEARCH_DEBOUNCE: Duration = Duration::from_millis(500);

/// A cancellable scheduled emission of the latest input value.
///
/// Every call to [`input`](Debouncer::input) cancels the pending emission
/// and reschedules it one quiet window from now; last write wins. The host
/// event loop drives [`poll`](Debouncer::poll) from its tick, so there is
/// no timer thread and the only race that can exist is the
/// cancel-and-reschedule the type makes explicit. Time is passed in, which
/// keeps the schedule fully deterministic under test.
#[derive(Debug)]
pub struct Debouncer {
    quiet: Duration,
    pending: Option<Pending>,
}

#[derive(Debug)]
struct Pending {
    text: String,
    deadline: Instant,
}

impl Debouncer {
    pub fn new(quiet: Duration) -> Self {
        Self {
            quiet,
            pending: None,
        }
    }

    /// Record a keystroke's worth of input, restarting the quiet window
    pub fn input(&mut self, text: impl Into<String>, now: Instant) {
        self.pending = Some(Pending {
            text: text.into(),
            deadline: now + self.quiet,
        });
    }

    /// Emit the pending value once the quiet window has elapsed
    pub fn poll(&mut self, now: Instant) -> Option<String> {
        match &self.pending {
            Some(pending) if now >= pending.deadline => self.pending.take().map(|p| p.text),
            _ => None,
        }
    }

    /// Drop the pending emission, if any
    pub fn cancel(&mut self) {
        self.pending = None;
    }

    pub fn is_pending(&self) -> bool {
        self.pending.is_some()
    }
}

impl Default for Debouncer {
    fn default() -> Self {
        Self::new(SEARCH_DEBOUNCE)
    }
}
