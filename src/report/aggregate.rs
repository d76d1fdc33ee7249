use std::time::Duration;

use serde::Serialize;

use crate::bench::WorkerTally;
use crate::transport::ThroughputSnapshot;

/// Whole seconds used as the rate divisor when the run was shorter than one.
const MIN_ELAPSED_SECS: u64 = 1;

/// Sum of every worker's tally plus the byte counters, normalized by elapsed time.
///
/// Built from plain snapshots, so building it twice from the same inputs gives
/// the same values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct AggregateReport {
    pub totals: WorkerTally,
    pub throughput: ThroughputSnapshot,
    pub elapsed_secs: u64,
}

impl AggregateReport {
    #[must_use]
    pub fn from_snapshots(
        tallies: &[WorkerTally],
        throughput: ThroughputSnapshot,
        elapsed: Duration,
    ) -> Self {
        let mut totals = WorkerTally::default();
        for tally in tallies {
            totals.absorb(tally);
        }

        Self {
            totals,
            throughput,
            elapsed_secs: elapsed.as_secs().max(MIN_ELAPSED_SECS),
        }
    }

    #[must_use]
    pub const fn success_rate(&self) -> u64 {
        per_second(self.totals.success, self.elapsed_secs)
    }

    #[must_use]
    pub const fn read_rate(&self) -> u64 {
        per_second(self.throughput.bytes_read, self.elapsed_secs)
    }

    #[must_use]
    pub const fn write_rate(&self) -> u64 {
        per_second(self.throughput.bytes_written, self.elapsed_secs)
    }

    #[must_use]
    pub const fn has_failures(&self) -> bool {
        self.totals.network_failed > 0 || self.totals.bad_status > 0
    }
}

const fn per_second(value: u64, elapsed_secs: u64) -> u64 {
    match value.checked_div(elapsed_secs) {
        Some(rate) => rate,
        None => 0,
    }
}
