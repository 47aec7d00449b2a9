use super::scheduler::Scheduler;

use std::time::Duration;

/// Quiet period between the last keystroke and the query commit.
pub const DEBOUNCE_DELAY: Duration = Duration::from_millis(400);

/// Single-slot debouncer.
///
/// Each `trigger` cancels the previously pending callback and schedules the new
/// one `delay` from now, so a burst of triggers yields exactly one call, `delay`
/// after the last trigger. Dropping the debouncer cancels whatever is pending.
pub struct Debouncer<S: Scheduler> {
    scheduler: S,
    delay: Duration,
    pending: Option<S::Handle>,
}

impl<S: Scheduler> Debouncer<S> {
    pub fn new(scheduler: S, delay: Duration) -> Self {
        Self {
            scheduler,
            delay,
            pending: None,
        }
    }

    pub fn delay(&self) -> Duration {
        self.delay
    }

    /// (Re)starts the quiet period; `callback` runs if nothing else triggers first.
    pub fn trigger<F>(&mut self, callback: F)
    where
        F: FnOnce() + Send + 'static,
    {
        self.cancel();
        self.pending = Some(self.scheduler.schedule(self.delay, Box::new(callback)));
    }

    /// Drops the pending callback, if any.
    pub fn cancel(&mut self) {
        if let Some(handle) = self.pending.take() {
            self.scheduler.cancel(handle);
        }
    }
}

impl<S: Scheduler> Drop for Debouncer<S> {
    fn drop(&mut self) {
        self.cancel();
    }
}
