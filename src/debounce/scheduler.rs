use std::time::Duration;

/// A one-shot callback run when its timer elapses.
pub type Callback = Box<dyn FnOnce() + Send + 'static>;

/// Something that can run a callback after a delay, and forget about it on request.
pub trait Scheduler: Send {
    /// Identifies one scheduled callback.
    type Handle: Send;

    /// Runs `callback` once `delay` has elapsed, unless cancelled first.
    fn schedule(&self, delay: Duration, callback: Callback) -> Self::Handle;

    /// Prevents the callback behind `handle` from running.
    /// Cancelling a timer that already fired is a no-op.
    fn cancel(&self, handle: Self::Handle);
}

/// Timers backed by `tokio::time::sleep` in a spawned task.
///
/// Must be used from within a tokio runtime.
#[derive(Debug, Clone, Copy, Default)]
pub struct TokioScheduler;

impl Scheduler for TokioScheduler {
    type Handle = tokio::task::JoinHandle<()>;

    fn schedule(&self, delay: Duration, callback: Callback) -> Self::Handle {
        tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            callback();
        })
    }

    fn cancel(&self, handle: Self::Handle) {
        handle.abort();
    }
}
