use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

use http::StatusCode;
use serde::Serialize;

use crate::error::TransportError;

/// Classification of one request attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Success,
    BadStatus,
    NetworkFailed,
}

impl Outcome {
    #[must_use]
    pub fn classify(result: &Result<StatusCode, TransportError>, expected: StatusCode) -> Self {
        match result {
            Ok(status) if *status == expected => Outcome::Success,
            Ok(_) => Outcome::BadStatus,
            Err(_) => Outcome::NetworkFailed,
        }
    }
}

/// Per-worker outcome counters.
///
/// Only the owning worker writes, through its [`WorkerRecorder`]. The fields
/// are atomics so the controller may take a best-effort snapshot while the
/// worker is still running; such a snapshot may lag the worker by the attempt
/// in flight but never runs ahead of it. The attempt count is not stored: it
/// is the sum of the three outcome counters, so every snapshot satisfies
/// `requests_attempted == success + network_failed + bad_status`.
#[derive(Debug, Default)]
pub struct WorkerResult {
    success: AtomicU64,
    network_failed: AtomicU64,
    bad_status: AtomicU64,
}

impl WorkerResult {
    #[must_use]
    pub fn snapshot(&self) -> WorkerTally {
        let success = self.success.load(Ordering::Acquire);
        let network_failed = self.network_failed.load(Ordering::Acquire);
        let bad_status = self.bad_status.load(Ordering::Acquire);
        WorkerTally::new(success, network_failed, bad_status)
    }

    fn counter(&self, outcome: Outcome) -> &AtomicU64 {
        match outcome {
            Outcome::Success => &self.success,
            Outcome::BadStatus => &self.bad_status,
            Outcome::NetworkFailed => &self.network_failed,
        }
    }
}

/// Write handle for exactly one [`WorkerResult`]. Not `Clone`.
#[derive(Debug)]
pub struct WorkerRecorder {
    result: Arc<WorkerResult>,
    attempted: u64,
}

impl WorkerRecorder {
    #[must_use]
    pub const fn new(result: Arc<WorkerResult>) -> Self {
        Self {
            result,
            attempted: 0,
        }
    }

    pub fn record(&mut self, outcome: Outcome) {
        self.result.counter(outcome).fetch_add(1, Ordering::Release);
        self.attempted = self.attempted.saturating_add(1);
    }

    #[must_use]
    pub const fn attempted(&self) -> u64 {
        self.attempted
    }

    #[must_use]
    pub fn tally(&self) -> WorkerTally {
        self.result.snapshot()
    }
}

/// Plain-value view of a [`WorkerResult`] at one observation point.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct WorkerTally {
    pub requests_attempted: u64,
    pub success: u64,
    pub network_failed: u64,
    pub bad_status: u64,
}

impl WorkerTally {
    #[must_use]
    pub const fn new(success: u64, network_failed: u64, bad_status: u64) -> Self {
        Self {
            requests_attempted: success
                .saturating_add(network_failed)
                .saturating_add(bad_status),
            success,
            network_failed,
            bad_status,
        }
    }

    #[cfg(test)]
    #[must_use]
    pub const fn is_consistent(&self) -> bool {
        self.requests_attempted
            == self
                .success
                .saturating_add(self.network_failed)
                .saturating_add(self.bad_status)
    }

    pub fn absorb(&mut self, other: &WorkerTally) {
        self.requests_attempted = self
            .requests_attempted
            .saturating_add(other.requests_attempted);
        self.success = self.success.saturating_add(other.success);
        self.network_failed = self.network_failed.saturating_add(other.network_failed);
        self.bad_status = self.bad_status.saturating_add(other.bad_status);
    }
}
