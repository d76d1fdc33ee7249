/// Worker count and per-worker quota derived from the requested totals.
///
/// The worker count is clamped to the request count so no worker gets an
/// empty quota. Requests left over by the integer division are dropped, not
/// spread across workers; `dropped` reports how many.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RunPlan {
    pub workers: usize,
    pub quota: u64,
    pub dropped: u64,
}

impl RunPlan {
    #[must_use]
    pub fn new(total_requests: u64, requested_workers: usize) -> Self {
        let workers = usize::try_from(total_requests)
            .map_or(requested_workers, |total| requested_workers.min(total));
        let worker_count = u64::try_from(workers).unwrap_or(u64::MAX);
        let quota = total_requests.checked_div(worker_count).unwrap_or(0);
        let planned = quota.saturating_mul(worker_count);

        Self {
            workers,
            quota,
            dropped: total_requests.saturating_sub(planned),
        }
    }

    /// Total attempts a full run will make.
    #[must_use]
    pub const fn planned_requests(&self) -> u64 {
        let worker_count = self.workers as u64;
        self.quota.saturating_mul(worker_count)
    }
}
