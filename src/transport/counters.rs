use std::sync::atomic::{AtomicU64, Ordering};

use serde::Serialize;

/// Run-scoped byte counters fed by every [`super::CountingStream`] of a run.
#[derive(Debug, Default)]
pub struct ThroughputCounters {
    bytes_read: AtomicU64,
    bytes_written: AtomicU64,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct ThroughputSnapshot {
    pub bytes_read: u64,
    pub bytes_written: u64,
}

impl ThroughputCounters {
    #[must_use]
    pub const fn new() -> Self {
        Self {
            bytes_read: AtomicU64::new(0),
            bytes_written: AtomicU64::new(0),
        }
    }

    pub fn record_read(&self, bytes: usize) {
        self.bytes_read
            .fetch_add(u64::try_from(bytes).unwrap_or(u64::MAX), Ordering::Relaxed);
    }

    pub fn record_written(&self, bytes: usize) {
        self.bytes_written
            .fetch_add(u64::try_from(bytes).unwrap_or(u64::MAX), Ordering::Relaxed);
    }

    /// Reads both counters. The pair is not a consistent cut while workers are
    /// still running, but each value never goes backwards between snapshots.
    #[must_use]
    pub fn snapshot(&self) -> ThroughputSnapshot {
        ThroughputSnapshot {
            bytes_read: self.bytes_read.load(Ordering::Relaxed),
            bytes_written: self.bytes_written.load(Ordering::Relaxed),
        }
    }
}
