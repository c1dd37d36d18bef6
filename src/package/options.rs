use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

/// Activity files at or above this many bytes are not loaded
pub const ACTIVITY_SIZE_LIMIT: u64 = 5 * 1024 * 1024;

/// Entries sampled when looking for a wrapping root folder
pub const PREFIX_SAMPLE_SIZE: usize = 20;

/// Entries between two scanning progress notifications
pub const PROGRESS_INTERVAL: usize = 50;

/// Tunables for one load. `Default` gives the standard policy.
#[derive(Debug, Clone)]
pub struct LoadOptions {
    /// Exclusive ceiling on the uncompressed size of an activity file
    pub activity_size_limit: u64,
    pub prefix_sample_size: usize,
    pub progress_interval: usize,
    /// Yield to the async runtime between entries so other tasks (a UI,
    /// a progress printer) get to run during long scans.
    pub yield_between_entries: bool,
}

impl Default for LoadOptions {
    fn default() -> Self {
        Self {
            activity_size_limit: ACTIVITY_SIZE_LIMIT,
            prefix_sample_size: PREFIX_SAMPLE_SIZE,
            progress_interval: PROGRESS_INTERVAL,
            yield_between_entries: true,
        }
    }
}

/// Cooperative cancellation handle, checked between entries.
#[derive(Debug, Clone, Default)]
pub struct CancelFlag(Arc<AtomicBool>);

impl CancelFlag {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.0.store(true, Ordering::Relaxed);
    }

    pub fn is_cancelled(&self) -> bool {
        self.0.load(Ordering::Relaxed)
    }
}
