//! HTTP request plumbing: target URLs, request payloads and the per-worker
//! keep-alive client.
mod client;
mod payload;
mod target;


pub use client::{KeepAliveClient, Timeouts};
pub use payload::load_payload;
pub use target::{FixedUrl, RandomIdUrl, RequestTarget, UrlSource, docs_url};
