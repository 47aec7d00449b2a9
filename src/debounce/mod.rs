//! Debounce Module
//!
//! Holds back a burst of keystrokes until input goes quiet, then fires once.
//!
//! ## Design
//! Timers sit behind the `Scheduler` trait (`schedule(delay, callback) -> handle`,
//! `cancel(handle)`). Production code uses `TokioScheduler`; tests drive a
//! `ManualScheduler` whose virtual clock only moves when told to.
//! The `Debouncer` keeps at most one pending timer, replaces it on every
//! trigger, and cancels it when dropped so nothing fires after teardown.
//!
//! ## Submodules
//! - **`scheduler`**: The `Scheduler` trait and the tokio implementation.
//! - **`manual`**: Virtual-clock scheduler for deterministic tests (test builds only).
//! - **`debouncer`**: The single-slot debouncer itself.

pub mod debouncer;
#[cfg(test)]
pub mod manual;
pub mod scheduler;
