//! Toast notifications
//!
//! Each toast removes itself after the queue's time-to-live. Removal is
//! per entry: a toast added later keeps its own full lifetime. Dropping the
//! queue cancels every pending removal.

use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard};
use std::time::Duration;

use tracing::debug;

use super::timer::ScopedTask;
use crate::config::DEFAULT_TOAST_TTL_MS;

/// A single notification
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Toast {
    pub id: u64,
    pub title: String,
    pub description: String,
}

type Entries = Arc<Mutex<Vec<Toast>>>;

/// Ordered queue of visible toasts
#[derive(Debug)]
pub struct ToastQueue {
    entries: Entries,
    timers: HashMap<u64, ScopedTask>,
    next_id: u64,
    ttl: Duration,
}

impl Default for ToastQueue {
    fn default() -> Self {
        Self::new(Duration::from_millis(DEFAULT_TOAST_TTL_MS))
    }
}

impl ToastQueue {
    /// Create a queue whose toasts live for `ttl`
    pub fn new(ttl: Duration) -> Self {
        Self {
            entries: Arc::new(Mutex::new(Vec::new())),
            timers: HashMap::new(),
            next_id: 1,
            ttl,
        }
    }

    /// Show a toast and schedule its removal
    ///
    /// Returns the new toast's id. Must be called inside a tokio runtime.
    pub fn add(&mut self, title: impl Into<String>, description: impl Into<String>) -> u64 {
        self.timers.retain(|_, timer| !timer.is_finished());

        let id = self.next_id;
        self.next_id += 1;

        lock(&self.entries).push(Toast {
            id,
            title: title.into(),
            description: description.into(),
        });

        let entries = Arc::clone(&self.entries);
        let timer = ScopedTask::after(self.ttl, move || {
            lock(&entries).retain(|toast| toast.id != id);
            debug!(toast_id = id, "toast expired");
        });
        self.timers.insert(id, timer);

        id
    }

    /// Remove a toast before it expires
    ///
    /// Returns false if it was already gone.
    pub fn dismiss(&mut self, id: u64) -> bool {
        // Dropping the timer cancels it
        self.timers.remove(&id);

        let mut entries = lock(&self.entries);
        let before = entries.len();
        entries.retain(|toast| toast.id != id);
        entries.len() != before
    }

    /// Currently visible toasts, oldest first
    pub fn snapshot(&self) -> Vec<Toast> {
        lock(&self.entries).clone()
    }

    pub fn len(&self) -> usize {
        lock(&self.entries).len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Time each toast stays visible
    pub fn ttl(&self) -> Duration {
        self.ttl
    }
}

fn lock(entries: &Entries) -> MutexGuard<'_, Vec<Toast>> {
    entries.lock().unwrap_or_else(|e| e.into_inner())
}
