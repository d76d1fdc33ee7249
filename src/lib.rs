//! Core library for the `hitbench` CLI.
//!
//! A run splits a fixed request budget evenly across workers. Each worker
//! owns one keep-alive HTTP/1.1 connection whose socket is wrapped so every
//! byte read or written lands in shared throughput counters. The controller
//! waits for all workers (or an interrupt) and folds their tallies into a
//! single report.
pub mod args;
pub mod bench;
pub mod config;
pub mod error;
pub mod http;
pub mod report;
pub mod shutdown;
#[cfg(test)]
mod test_support;
pub mod transport;
