//! The benchmark engine: per-worker request loops, quota planning, completion
//! tracking and the controller that ties a run together.
mod config;
mod controller;
mod latch;
mod plan;
mod results;
mod worker;


pub use config::RunConfig;
pub use controller::{Controller, RunOutcome};
pub use latch::{CompletionGuard, CompletionLatch};
pub use plan::RunPlan;
pub use results::{Outcome, WorkerRecorder, WorkerResult, WorkerTally};
