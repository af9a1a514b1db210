//! Auto-advancing image rotator

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

use super::timer::ScopedTask;
use crate::config::DEFAULT_ROTATOR_INTERVAL_MS;

/// Hero images shown on the landing page
pub const LANDING_IMAGES: [&str; 3] = [
    "https://images.unsplash.com/photo-1580281657527-47f249e8f3a0?q=80&w=1600&auto=format&fit=crop",
    "https://images.unsplash.com/photo-1579154204601-01588f351e67?q=80&w=1600&auto=format&fit=crop",
    "https://images.unsplash.com/photo-1582719478250-c89cae4dc85b?q=80&w=1600&auto=format&fit=crop",
];

/// Index into a fixed image list, advanced by a repeating timer
///
/// Manual selection moves the index but leaves the timer's cadence alone.
#[derive(Debug)]
pub struct ImageRotator {
    images: Vec<String>,
    index: Arc<AtomicUsize>,
    interval: Duration,
    timer: Option<ScopedTask>,
}

impl ImageRotator {
    /// Create a stopped rotator over `images`
    pub fn new<I, S>(images: I, interval: Duration) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            images: images.into_iter().map(Into::into).collect(),
            index: Arc::new(AtomicUsize::new(0)),
            interval,
            timer: None,
        }
    }

    /// Rotator over the landing page images
    pub fn landing(interval: Duration) -> Self {
        Self::new(LANDING_IMAGES, interval)
    }

    /// Start advancing on the interval
    ///
    /// Starting a running rotator does nothing. Must be called inside a
    /// tokio runtime.
    pub fn start(&mut self) {
        if self.timer.is_some() || self.images.len() < 2 {
            return;
        }

        let index = Arc::clone(&self.index);
        let len = self.images.len();
        self.timer = Some(ScopedTask::every(self.interval, move || {
            advance(&index, len);
        }));
    }

    /// Stop advancing
    pub fn stop(&mut self) {
        if let Some(timer) = self.timer.take() {
            timer.cancel();
        }
    }

    pub fn is_running(&self) -> bool {
        self.timer.is_some()
    }

    /// Show the next image now
    pub fn advance(&self) {
        advance(&self.index, self.images.len());
    }

    /// Jump to an image; returns false if `index` is out of range
    pub fn select(&self, index: usize) -> bool {
        if index >= self.images.len() {
            return false;
        }
        self.index.store(index, Ordering::SeqCst);
        true
    }

    pub fn index(&self) -> usize {
        self.index.load(Ordering::SeqCst)
    }

    /// The image currently shown
    pub fn current(&self) -> Option<&str> {
        self.images.get(self.index()).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.images.len()
    }

    pub fn is_empty(&self) -> bool {
        self.images.is_empty()
    }
}

impl Default for ImageRotator {
    fn default() -> Self {
        Self::landing(Duration::from_millis(DEFAULT_ROTATOR_INTERVAL_MS))
    }
}

fn advance(index: &AtomicUsize, len: usize) {
    if len == 0 {
        return;
    }
    // The closure always returns Some, so this cannot fail
    let _ = index.fetch_update(Ordering::SeqCst, Ordering::SeqCst, |i| Some((i + 1) % len));
}
