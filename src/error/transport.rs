use std::time::Duration;

use thiserror::Error;

use super::SetupError;

/// A failed request attempt. Workers only count these; they never leave the worker.
#[derive(Debug, Error)]
pub enum TransportError {
    #[error("Failed to resolve {host}:{port}: {source}")]
    Resolve {
        host: String,
        port: u16,
        #[source]
        source: std::io::Error,
    },
    #[error("Invalid target URL '{url}': {source}")]
    InvalidTarget {
        url: String,
        #[source]
        source: SetupError,
    },
    #[error("No addresses resolved for {host}.")]
    NoAddresses { host: String },
    #[error("Failed to connect to {addr}: {source}")]
    Connect {
        addr: String,
        #[source]
        source: std::io::Error,
    },
    #[error("Connect to {addr} timed out after {timeout:?}.")]
    ConnectTimeout { addr: String, timeout: Duration },
    #[error("HTTP handshake failed: {source}")]
    Handshake {
        #[source]
        source: hyper::Error,
    },
    #[error("Request failed: {source}")]
    Request {
        #[source]
        source: hyper::Error,
    },
    #[error("Failed to build request: {source}")]
    BuildRequest {
        #[source]
        source: http::Error,
    },
    #[error("Reading response body failed: {source}")]
    Body {
        #[source]
        source: hyper::Error,
    },
    #[error("{phase} timed out after {timeout:?}.")]
    Timeout {
        phase: &'static str,
        timeout: Duration,
    },
}
