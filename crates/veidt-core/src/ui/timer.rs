//! Cancellable scheduled tasks

use std::future::Future;
use std::time::Duration;

use tokio::task::JoinHandle;
use tokio::time::{self, Instant, MissedTickBehavior};

/// Shortest period accepted by `ScopedTask::every`
pub const MIN_PERIOD: Duration = Duration::from_millis(1);

/// A spawned task that is aborted when its owner goes away
///
/// Must be created inside a tokio runtime.
#[derive(Debug)]
pub struct ScopedTask {
    handle: JoinHandle<()>,
}

impl ScopedTask {
    /// Spawn a future tied to the returned handle
    pub fn spawn<F>(future: F) -> Self
    where
        F: Future<Output = ()> + Send + 'static,
    {
        Self {
            handle: tokio::spawn(future),
        }
    }

    /// Run `f` once after `delay`
    pub fn after<F>(delay: Duration, f: F) -> Self
    where
        F: FnOnce() + Send + 'static,
    {
        Self::spawn(async move {
            time::sleep(delay).await;
            f();
        })
    }

    /// Run `f` every `period`, first after one full period
    ///
    /// Periods shorter than `MIN_PERIOD` are raised to it.
    pub fn every<F>(period: Duration, mut f: F) -> Self
    where
        F: FnMut() + Send + 'static,
    {
        let period = period.max(MIN_PERIOD);
        Self::spawn(async move {
            let mut ticker = time::interval_at(Instant::now() + period, period);
            // A stalled loop should not fire a burst of catch-up ticks
            ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
            loop {
                ticker.tick().await;
                f();
            }
        })
    }

    /// Abort the task now
    pub fn cancel(&self) {
        self.handle.abort();
    }

    /// Whether the task has completed or been cancelled
    pub fn is_finished(&self) -> bool {
        self.handle.is_finished()
    }
}

impl Drop for ScopedTask {
    fn drop(&mut self) {
        self.handle.abort();
    }
}
