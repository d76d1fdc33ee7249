use std::sync::Arc;

use bytes::Bytes;
use http::{Method, StatusCode};

use crate::http::{Timeouts, UrlSource};

/// Immutable input for one run, shared read-only by every worker.
#[derive(Debug, Clone)]
pub struct RunConfig {
    pub url_source: Arc<dyn UrlSource>,
    pub method: Method,
    pub body: Option<Bytes>,
    pub expected_status: StatusCode,
    pub total_requests: u64,
    pub workers: usize,
    pub print_urls: bool,
    pub timeouts: Timeouts,
}
