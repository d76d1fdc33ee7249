use std::sync::Arc;

use futures_util::future::join_all;
use tokio::sync::broadcast::error::RecvError;
use tokio::task::JoinHandle;
use tokio::time::Instant;
use tracing::{debug, info, warn};

use crate::error::AppResult;
use crate::http::KeepAliveClient;
use crate::report::AggregateReport;
use crate::shutdown::ShutdownReceiver;
use crate::transport::ThroughputCounters;

use super::worker::Worker;
use super::{CompletionLatch, RunConfig, RunPlan, WorkerRecorder, WorkerResult, WorkerTally};

/// How a run ended, with the report computed at that moment.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunOutcome {
    /// Every worker spent its quota; the report is final.
    Completed(AggregateReport),
    /// A shutdown arrived first; the report is a best-effort snapshot whose
    /// totals never exceed what a completed run would have produced.
    Interrupted(AggregateReport),
}

impl RunOutcome {
    #[must_use]
    pub const fn report(&self) -> &AggregateReport {
        match self {
            RunOutcome::Completed(report) | RunOutcome::Interrupted(report) => report,
        }
    }

    #[must_use]
    pub const fn is_interrupted(&self) -> bool {
        matches!(self, RunOutcome::Interrupted(_))
    }
}

/// Owns one run: plans quotas, spawns workers, waits, and aggregates.
pub struct Controller {
    config: Arc<RunConfig>,
    counters: Arc<ThroughputCounters>,
}

struct RunningWorkers {
    started: Instant,
    results: Vec<Arc<WorkerResult>>,
    handles: Vec<JoinHandle<WorkerTally>>,
    latch: Arc<CompletionLatch>,
}

impl Controller {
    #[must_use]
    pub fn new(config: RunConfig) -> Self {
        Self {
            config: Arc::new(config),
            counters: Arc::new(ThroughputCounters::new()),
        }
    }

    #[must_use]
    pub fn plan(&self) -> RunPlan {
        RunPlan::new(self.config.total_requests, self.config.workers)
    }

    #[cfg(test)]
    #[must_use]
    pub const fn counters(&self) -> &Arc<ThroughputCounters> {
        &self.counters
    }

    /// Runs every worker to completion, or until `shutdown_rx` fires.
    ///
    /// A closed shutdown channel is not treated as an interrupt.
    ///
    /// # Errors
    ///
    /// Returns an error when a worker task panicked or was cancelled.
    pub async fn run(&self, shutdown_rx: &mut ShutdownReceiver) -> AppResult<RunOutcome> {
        let plan = self.plan();
        if plan.dropped > 0 {
            warn!(
                "{} requests do not divide evenly across {} workers; sending {} and dropping {}.",
                self.config.total_requests,
                plan.workers,
                plan.planned_requests(),
                plan.dropped
            );
        }

        let running = self.spawn_workers(&plan);
        info!("Waiting for results from ops...");

        tokio::select! {
            () = running.latch.wait() => {}
            () = interrupted(shutdown_rx) => {
                let report = self.aggregate(&running.results, running.started);
                for handle in &running.handles {
                    handle.abort();
                }
                info!("Interrupted with {} workers still running.", running.latch.remaining());
                return Ok(RunOutcome::Interrupted(report));
            }
        }

        let mut tallies = Vec::with_capacity(running.handles.len());
        for joined in join_all(running.handles).await {
            tallies.push(joined?);
        }
        debug!("All {} workers joined.", tallies.len());

        let report = AggregateReport::from_snapshots(
            &tallies,
            self.counters.snapshot(),
            running.started.elapsed(),
        );
        Ok(RunOutcome::Completed(report))
    }

    fn spawn_workers(&self, plan: &RunPlan) -> RunningWorkers {
        let latch = CompletionLatch::new();
        let mut results = Vec::with_capacity(plan.workers);
        let mut handles = Vec::with_capacity(plan.workers);
        let started = Instant::now();

        for id in 0..plan.workers {
            let result = Arc::new(WorkerResult::default());
            results.push(Arc::clone(&result));
            let worker = Worker::new(
                id,
                plan.quota,
                Arc::clone(&self.config),
                WorkerRecorder::new(result),
                KeepAliveClient::new(Arc::clone(&self.counters), self.config.timeouts),
                latch.register(),
            );
            handles.push(tokio::spawn(worker.run()));
        }

        RunningWorkers {
            started,
            results,
            handles,
            latch,
        }
    }

    fn aggregate(&self, results: &[Arc<WorkerResult>], started: Instant) -> AggregateReport {
        let tallies: Vec<WorkerTally> = results.iter().map(|result| result.snapshot()).collect();
        AggregateReport::from_snapshots(&tallies, self.counters.snapshot(), started.elapsed())
    }
}

async fn interrupted(shutdown_rx: &mut ShutdownReceiver) {
    match shutdown_rx.recv().await {
        Ok(()) | Err(RecvError::Lagged(_)) => {}
        Err(RecvError::Closed) => std::future::pending::<()>().await,
    }
}
