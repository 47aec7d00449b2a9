//! Virtual-clock scheduler.
//!
//! Time stands still until `advance` is called; due callbacks then run on the
//! caller's thread in deadline order. Clones share one clock.

use super::scheduler::{Callback, Scheduler};

use std::collections::BTreeMap;
use std::sync::{Arc, Mutex, MutexGuard};
use std::time::Duration;

struct Timer {
    due_ms: u64,
    callback: Callback,
}

#[derive(Default)]
struct VirtualClock {
    now_ms: u64,
    next_id: u64,
    timers: BTreeMap<u64, Timer>,
}

#[derive(Clone, Default)]
pub struct ManualScheduler {
    clock: Arc<Mutex<VirtualClock>>,
}

impl ManualScheduler {
    pub fn new() -> Self {
        Self::default()
    }

    fn clock(&self) -> MutexGuard<'_, VirtualClock> {
        // Callbacks never run under the lock, so a poisoned clock is still consistent.
        self.clock.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    /// Virtual time elapsed since creation.
    pub fn now(&self) -> Duration {
        Duration::from_millis(self.clock().now_ms)
    }

    /// Number of timers scheduled and not yet fired or cancelled.
    pub fn pending(&self) -> usize {
        self.clock().timers.len()
    }

    /// Moves the clock forward by `by`, firing every timer that falls due on the way.
    ///
    /// Callbacks run without the clock locked, so they may schedule or cancel timers;
    /// a timer scheduled inside the window fires in the same call.
    pub fn advance(&self, by: Duration) {
        let target = self.clock().now_ms + by.as_millis() as u64;

        loop {
            let due = {
                let mut clock = self.clock();
                let next = clock
                    .timers
                    .iter()
                    .filter(|(_, timer)| timer.due_ms <= target)
                    .min_by_key(|(id, timer)| (timer.due_ms, **id))
                    .map(|(id, _)| *id);

                next.and_then(|id| clock.timers.remove(&id)).map(|timer| {
                    clock.now_ms = timer.due_ms;
                    timer.callback
                })
            };

            match due {
                Some(callback) => callback(),
                None => break,
            }
        }

        self.clock().now_ms = target;
    }
}

impl Scheduler for ManualScheduler {
    type Handle = u64;

    fn schedule(&self, delay: Duration, callback: Callback) -> Self::Handle {
        let mut clock = self.clock();
        let id = clock.next_id;
        clock.next_id += 1;
        let due_ms = clock.now_ms + delay.as_millis() as u64;
        clock.timers.insert(id, Timer { due_ms, callback });
        id
    }

    fn cancel(&self, handle: Self::Handle) {
        self.clock().timers.remove(&handle);
    }
}
