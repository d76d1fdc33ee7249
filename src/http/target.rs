use rand::Rng;
use url::{Host, Url};

use crate::error::SetupError;
use crate::transport::Endpoint;

/// Document path appended to the base URL for both traffic shapes.
const DOCS_PATH: &str = "/docs?id=disks/";

/// Produces the URL for a worker's next request.
///
/// Implementations are shared by every worker of a run and must not carry
/// state that one worker's call could make visible to another.
pub trait UrlSource: Send + Sync + std::fmt::Debug {
    fn next_url(&self) -> String;
}

/// Always returns the same URL.
#[derive(Debug, Clone)]
pub struct FixedUrl {
    url: String,
}

impl FixedUrl {
    #[must_use]
    pub const fn new(url: String) -> Self {
        Self { url }
    }
}

impl UrlSource for FixedUrl {
    fn next_url(&self) -> String {
        self.url.clone()
    }
}

/// Appends a uniformly random id in `0..id_range` to a fixed prefix.
#[derive(Debug, Clone)]
pub struct RandomIdUrl {
    prefix: String,
    id_range: u64,
}

impl RandomIdUrl {
    /// A zero `id_range` is treated as 1, so the id is always 0.
    #[must_use]
    pub fn new(prefix: String, id_range: u64) -> Self {
        Self {
            prefix,
            id_range: id_range.max(1),
        }
    }
}

impl UrlSource for RandomIdUrl {
    fn next_url(&self) -> String {
        let id = rand::thread_rng().gen_range(0..self.id_range);
        format!("{}{}", self.prefix, id)
    }
}

/// Joins a base URL and the document path without doubling the slash.
#[must_use]
pub fn docs_url(base_url: &str) -> String {
    format!("{}{}", base_url.trim_end_matches('/'), DOCS_PATH)
}

/// A parsed request URL: where to connect and what to put on the request line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestTarget {
    pub endpoint: Endpoint,
    pub path_and_query: String,
}

impl RequestTarget {
    /// Parses an absolute `http://` URL.
    ///
    /// # Errors
    ///
    /// Returns an error when the URL is malformed, not `http`, or has no host.
    pub fn parse(raw: &str) -> Result<Self, SetupError> {
        let url = Url::parse(raw).map_err(|err| SetupError::InvalidUrl {
            url: raw.to_owned(),
            source: err,
        })?;
        if url.scheme() != "http" {
            return Err(SetupError::UnsupportedScheme {
                scheme: url.scheme().to_owned(),
            });
        }

        let host = match url.host() {
            Some(Host::Domain(domain)) => domain.to_owned(),
            Some(Host::Ipv4(addr)) => addr.to_string(),
            Some(Host::Ipv6(addr)) => addr.to_string(),
            None => {
                return Err(SetupError::UrlMissingHost {
                    url: raw.to_owned(),
                });
            }
        };
        let host_str = url.host_str().unwrap_or(host.as_str()).to_owned();
        let authority = match url.port() {
            Some(port) => format!("{}:{}", host_str, port),
            None => host_str,
        };
        let port = url.port_or_known_default().unwrap_or(80);

        let path_and_query = match url.query() {
            Some(query) => format!("{}?{}", url.path(), query),
            None => url.path().to_owned(),
        };

        Ok(Self {
            endpoint: Endpoint {
                host,
                port,
                authority,
            },
            path_and_query,
        })
    }
}
