use std::path::PathBuf;

use thiserror::Error;

/// Failures that abort a run before any worker is spawned.
#[derive(Debug, Error)]
pub enum SetupError {
    #[error("Could not read data file '{path}': {source}")]
    ReadPayload {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("Invalid URL '{url}': {source}")]
    InvalidUrl {
        url: String,
        #[source]
        source: url::ParseError,
    },
    #[error("URL '{url}' is missing a host.")]
    UrlMissingHost { url: String },
    #[error("Unsupported URL scheme '{scheme}'. Only http is supported.")]
    UnsupportedScheme { scheme: String },
}
